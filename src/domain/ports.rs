use crate::domain::model::{BookingRequest, Package, Review};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn token(&self) -> Option<&str>;
}

/// The three backend calls the booking page makes.
///
/// A non-2xx answer to either fetch must come back as `BookingError::FetchFailure`
/// and a rejected booking as `BookingError::SubmitFailure`, both carrying the
/// body's `message`. Every other error is treated as a transport failure.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn fetch_package(&self, package_id: &str) -> Result<Package>;
    async fn fetch_reviews(&self, package_id: &str) -> Result<Vec<Review>>;
    async fn create_booking(&self, request: &BookingRequest) -> Result<()>;
}
