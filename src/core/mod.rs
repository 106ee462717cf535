pub mod booking_form;
pub mod loader;
pub mod page;
pub mod render;
pub mod review_filter;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{
    BookingDraft, BookingRequest, NavigationContext, Notification, Package, Review, Route,
};
pub use crate::domain::ports::{BookingApi, ConfigProvider};
pub use crate::utils::error::Result;
