use crate::domain::model::{BookingRequest, Package, Review, ReviewAuthor};
use crate::domain::ports::BookingApi;
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn package(id: &str, price: f64) -> Package {
    Package {
        id: id.to_string(),
        name: "Alpine Escape".to_string(),
        description: "Five days in the mountains".to_string(),
        price,
        images: vec!["https://img.example/alps-1.jpg".to_string()],
        features: vec!["Guided hikes".to_string(), "Half board".to_string()],
        itinerary: "Day 1: arrival".to_string(),
        status: "Available".to_string(),
    }
}

pub fn review(rating: u8) -> Review {
    Review {
        author: None,
        comment: format!("Rated {}", rating),
        rating,
    }
}

pub fn named_review(name: &str, comment: &str, rating: u8) -> Review {
    Review {
        author: Some(ReviewAuthor {
            name: Some(name.to_string()),
        }),
        comment: comment.to_string(),
        rating,
    }
}

/// Scripted backend. Each call pops the next queued answer.
#[derive(Default)]
pub struct MockApi {
    packages: Mutex<VecDeque<Result<Package>>>,
    reviews: Mutex<VecDeque<Result<Vec<Review>>>>,
    bookings: Mutex<VecDeque<Result<()>>>,
    submitted: Mutex<Vec<BookingRequest>>,
    package_calls: AtomicUsize,
    review_calls: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_failure(status: u16, message: Option<&str>) -> BookingError {
        BookingError::FetchFailure {
            path: "/mock".to_string(),
            status,
            message: message.map(str::to_string),
        }
    }

    pub fn submit_failure(status: u16, message: Option<&str>) -> BookingError {
        BookingError::SubmitFailure {
            path: "/mock/booking".to_string(),
            status,
            message: message.map(str::to_string),
        }
    }

    pub fn transport_failure() -> BookingError {
        BookingError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ))
    }

    pub fn with_package(self, answer: Result<Package>) -> Self {
        self.packages.lock().unwrap().push_back(answer);
        self
    }

    pub fn with_reviews(self, answer: Result<Vec<Review>>) -> Self {
        self.reviews.lock().unwrap().push_back(answer);
        self
    }

    pub fn with_booking(self, answer: Result<()>) -> Self {
        self.bookings.lock().unwrap().push_back(answer);
        self
    }

    pub fn package_calls(&self) -> usize {
        self.package_calls.load(Ordering::SeqCst)
    }

    pub fn review_calls(&self) -> usize {
        self.review_calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<BookingRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingApi for MockApi {
    async fn fetch_package(&self, _package_id: &str) -> Result<Package> {
        self.package_calls.fetch_add(1, Ordering::SeqCst);
        self.packages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::fetch_failure(404, None)))
    }

    async fn fetch_reviews(&self, _package_id: &str) -> Result<Vec<Review>> {
        self.review_calls.fetch_add(1, Ordering::SeqCst);
        self.reviews
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<()> {
        self.submitted.lock().unwrap().push(request.clone());
        self.bookings
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}
