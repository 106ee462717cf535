pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{HttpBookingApi, Session};
pub use core::{booking_form::BookingForm, page::BookingPage, render::render_page};
pub use utils::error::{BookingError, Result};
