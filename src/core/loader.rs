use crate::domain::model::{Package, Review};
use crate::domain::ports::BookingApi;
use crate::utils::error::{BookingError, GENERIC_LOAD_ERROR};

pub const DEFAULT_PACKAGE_ERROR: &str = "Unable to fetch package details.";
pub const DEFAULT_REVIEWS_ERROR: &str = "Unable to fetch reviews.";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

/// Identifies one load pass. Only the most recently issued ticket may apply results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct LoadGenerations {
    current: u64,
}

impl LoadGenerations {
    pub fn issue(&mut self) -> LoadTicket {
        self.current += 1;
        LoadTicket {
            generation: self.current,
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.current
    }
}

/// Outcome of one load pass over both data sources.
#[derive(Debug, Clone, PartialEq)]
pub struct PageData {
    pub package: LoadState<Package>,
    pub reviews: LoadState<Vec<Review>>,
}

impl PageData {
    /// A transport failure anywhere in the pass; which request failed is not reported.
    pub fn aborted() -> Self {
        Self {
            package: LoadState::Failed(GENERIC_LOAD_ERROR.to_string()),
            reviews: LoadState::Failed(GENERIC_LOAD_ERROR.to_string()),
        }
    }
}

/// Fetches the package, then its reviews.
///
/// Non-2xx answers fail only their own slot, using the body's message or a
/// default. Anything else aborts the whole pass with the generic message.
pub async fn fetch_page_data<A>(api: &A, package_id: &str) -> PageData
where
    A: BookingApi + ?Sized,
{
    let package = match api.fetch_package(package_id).await {
        Ok(package) => LoadState::Loaded(package),
        Err(BookingError::FetchFailure {
            status, message, ..
        }) => {
            tracing::warn!("Package {} could not be loaded (status {})", package_id, status);
            LoadState::Failed(message.unwrap_or_else(|| DEFAULT_PACKAGE_ERROR.to_string()))
        }
        Err(e) => {
            tracing::warn!("Loading package {} aborted: {}", package_id, e);
            return PageData::aborted();
        }
    };

    let reviews = match api.fetch_reviews(package_id).await {
        Ok(reviews) => {
            tracing::debug!("Loaded {} reviews for package {}", reviews.len(), package_id);
            LoadState::Loaded(reviews)
        }
        Err(BookingError::FetchFailure {
            status, message, ..
        }) => {
            tracing::warn!("Reviews for {} could not be loaded (status {})", package_id, status);
            LoadState::Failed(message.unwrap_or_else(|| DEFAULT_REVIEWS_ERROR.to_string()))
        }
        Err(e) => {
            tracing::warn!("Loading reviews for {} aborted: {}", package_id, e);
            return PageData::aborted();
        }
    };

    PageData { package, reviews }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{package, review, MockApi};

    #[tokio::test]
    async fn test_both_sources_loaded() {
        let api = MockApi::new()
            .with_package(Ok(package("p1", 100.0)))
            .with_reviews(Ok(vec![review(5), review(3)]));

        let data = fetch_page_data(&api, "p1").await;

        assert_eq!(data.package.value().unwrap().id, "p1");
        assert_eq!(data.reviews.value().unwrap().len(), 2);
        assert_eq!(api.package_calls(), 1);
        assert_eq!(api.review_calls(), 1);
    }

    #[tokio::test]
    async fn test_package_failure_does_not_block_reviews() {
        let api = MockApi::new()
            .with_package(Err(MockApi::fetch_failure(403, Some("Not authorized"))))
            .with_reviews(Ok(vec![review(4)]));

        let data = fetch_page_data(&api, "p1").await;

        assert_eq!(data.package.error(), Some("Not authorized"));
        assert_eq!(data.reviews.value().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failures_fall_back_to_default_messages() {
        let api = MockApi::new()
            .with_package(Err(MockApi::fetch_failure(500, None)))
            .with_reviews(Err(MockApi::fetch_failure(500, None)));

        let data = fetch_page_data(&api, "p1").await;

        assert_eq!(data.package.error(), Some(DEFAULT_PACKAGE_ERROR));
        assert_eq!(data.reviews.error(), Some(DEFAULT_REVIEWS_ERROR));
    }

    #[tokio::test]
    async fn test_transport_error_aborts_pass() {
        let api = MockApi::new().with_package(Err(MockApi::transport_failure()));

        let data = fetch_page_data(&api, "p1").await;

        assert_eq!(data, PageData::aborted());
        assert_eq!(data.package.error(), Some(GENERIC_LOAD_ERROR));
        assert_eq!(api.review_calls(), 0);
    }

    #[tokio::test]
    async fn test_review_transport_error_collapses_to_page_error() {
        let api = MockApi::new()
            .with_package(Ok(package("p1", 100.0)))
            .with_reviews(Err(MockApi::transport_failure()));

        let data = fetch_page_data(&api, "p1").await;

        assert_eq!(data.package.error(), Some(GENERIC_LOAD_ERROR));
        assert_eq!(data.reviews.error(), Some(GENERIC_LOAD_ERROR));
    }

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut generations = LoadGenerations::default();
        let first = generations.issue();
        let second = generations.issue();

        assert!(!generations.is_current(first));
        assert!(generations.is_current(second));
        assert!(second.generation() > first.generation());
    }
}
