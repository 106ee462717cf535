use crate::core::booking_form::{BookingForm, FormField, SubmitOutcome};
use crate::core::loader::{fetch_page_data, LoadGenerations, LoadState, LoadTicket, PageData};
use crate::core::review_filter::RatingFilter;
use crate::domain::model::{BookingDraft, NavigationContext, Notification, Package, Review};
use crate::domain::ports::BookingApi;
use crate::utils::error::{BookingError, Result};
use std::collections::VecDeque;

/// View-model for the package booking page.
///
/// Owns both load slots, the rating filter, the booking form and the queue of
/// notifications waiting to be shown. The total price is always derived from the
/// loaded package and the current traveler count.
#[derive(Debug)]
pub struct BookingPage {
    package_id: Option<String>,
    package: LoadState<Package>,
    reviews: LoadState<Vec<Review>>,
    filter: RatingFilter,
    form: BookingForm,
    generations: LoadGenerations,
    notifications: VecDeque<Notification>,
}

impl BookingPage {
    pub fn new(context: NavigationContext) -> Self {
        let package_id = context
            .package_id
            .clone()
            .filter(|id| !id.trim().is_empty());
        Self {
            package_id,
            package: LoadState::Loading,
            reviews: LoadState::Loading,
            filter: RatingFilter::new(),
            form: BookingForm::new(BookingDraft::from(context)),
            generations: LoadGenerations::default(),
            notifications: VecDeque::new(),
        }
    }

    pub fn package_id(&self) -> Option<&str> {
        self.package_id.as_deref()
    }

    /// Starts a load pass. Without a package id the page fails immediately and no ticket is issued.
    pub fn begin_load(&mut self) -> Result<(LoadTicket, String)> {
        let ticket = self.generations.issue();
        let Some(package_id) = self.package_id.clone() else {
            let message = BookingError::MissingPackageId.to_string();
            tracing::warn!("{}", message);
            self.package = LoadState::Failed(message.clone());
            self.reviews = LoadState::Failed(message);
            return Err(BookingError::MissingPackageId);
        };

        tracing::debug!("Load generation {} for package {}", ticket.generation(), package_id);
        self.package = LoadState::Loading;
        self.reviews = LoadState::Loading;
        Ok((ticket, package_id))
    }

    /// Returns false when the ticket is stale and the data was dropped.
    pub fn apply_load(&mut self, ticket: LoadTicket, data: PageData) -> bool {
        if !self.generations.is_current(ticket) {
            tracing::debug!("Discarding stale load generation {}", ticket.generation());
            return false;
        }
        self.package = data.package;
        self.reviews = data.reviews;
        true
    }

    pub async fn load<A>(&mut self, api: &A) -> Result<()>
    where
        A: BookingApi + ?Sized,
    {
        let (ticket, package_id) = self.begin_load()?;
        let data = fetch_page_data(api, &package_id).await;
        self.apply_load(ticket, data);
        Ok(())
    }

    /// Points the page at another package. Any load still in flight becomes stale.
    pub fn change_package(&mut self, package_id: Option<String>) {
        self.package_id = package_id.filter(|id| !id.trim().is_empty());
        self.form.retarget(self.package_id.clone());
        self.package = LoadState::Loading;
        self.reviews = LoadState::Loading;
        self.generations.issue();
    }

    pub fn package_state(&self) -> &LoadState<Package> {
        &self.package
    }

    pub fn reviews_state(&self) -> &LoadState<Vec<Review>> {
        &self.reviews
    }

    pub fn package(&self) -> Option<&Package> {
        self.package.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.package.error()
    }

    pub fn reviews_error(&self) -> Option<&str> {
        self.reviews.error()
    }

    pub fn is_loading(&self) -> bool {
        self.package.is_loading()
    }

    pub fn reviews_loading(&self) -> bool {
        self.reviews.is_loading()
    }

    pub fn toggle_rating(&mut self, rating: u8) -> bool {
        self.filter.toggle(rating)
    }

    pub fn select_rating(&mut self, rating: u8) -> bool {
        self.filter.select(rating)
    }

    pub fn rating_filter(&self) -> &RatingFilter {
        &self.filter
    }

    pub fn visible_reviews(&self) -> Vec<&Review> {
        match &self.reviews {
            LoadState::Loaded(reviews) => self.filter.apply(reviews),
            _ => Vec::new(),
        }
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn update_field(&mut self, field: FormField, value: &str) {
        self.form.update_field(field, value);
    }

    pub fn update_named(&mut self, name: &str, value: &str) -> Result<()> {
        self.form.update_named(name, value)
    }

    pub fn total_price(&self) -> Option<f64> {
        self.form.total_price(self.package())
    }

    pub fn formatted_total_price(&self) -> Option<String> {
        self.total_price().map(|total| format!("{:.2}", total))
    }

    pub async fn submit<A>(&mut self, api: &A) -> SubmitOutcome
    where
        A: BookingApi + ?Sized,
    {
        let package = self.package.value();
        let outcome = self.form.submit(api, package).await;
        self.notifications.push_back(outcome.notification.clone());
        outcome
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }
}
