use crate::domain::model::{BookingDraft, BookingRequest, Notification, Package, Route};
use crate::domain::ports::BookingApi;
use crate::utils::error::{BookingError, Result, DEFAULT_SUBMIT_ERROR, GENERIC_SUBMIT_ERROR};
use std::str::FromStr;

pub const INVALID_DRAFT_MESSAGE: &str = "Please provide valid travel dates and number of travelers.";
pub const NOT_LOGGED_IN_MESSAGE: &str = "User not logged in";
pub const BOOKING_SUCCESS_MESSAGE: &str = "Booking successful";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    TravelDates,
    NumberOfTravelers,
}

impl FromStr for FormField {
    type Err = BookingError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "travelDates" | "travel_dates" => Ok(FormField::TravelDates),
            "numberOfTravelers" | "number_of_travelers" => Ok(FormField::NumberOfTravelers),
            other => Err(BookingError::UnknownField {
                name: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Done,
    Failed(String),
}

/// What the caller should show and where it should go after a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub notification: Notification,
    pub navigate_to: Option<Route>,
}

impl SubmitOutcome {
    fn rejected(message: impl Into<String>) -> Self {
        Self {
            notification: Notification::error(message),
            navigate_to: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookingForm {
    draft: BookingDraft,
    state: SubmissionState,
}

impl BookingForm {
    pub fn new(draft: BookingDraft) -> Self {
        Self {
            draft,
            state: SubmissionState::Idle,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub(crate) fn retarget(&mut self, package_id: Option<String>) {
        self.draft.package_id = package_id;
        self.state = SubmissionState::Idle;
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Raw input is stored as typed; checks happen on submit.
    pub fn update_field(&mut self, field: FormField, value: &str) {
        match field {
            FormField::TravelDates => self.draft.travel_dates = value.to_string(),
            FormField::NumberOfTravelers => {
                self.draft.number_of_travelers = value.trim().parse().unwrap_or(0)
            }
        }
    }

    pub fn update_named(&mut self, name: &str, value: &str) -> Result<()> {
        let field = name.parse::<FormField>()?;
        self.update_field(field, value);
        Ok(())
    }

    /// `None` until the package is loaded.
    pub fn total_price(&self, package: Option<&Package>) -> Option<f64> {
        package.map(|p| p.price * self.draft.number_of_travelers as f64)
    }

    pub fn validate(&self) -> Result<&str> {
        if self.draft.travel_dates.is_empty() || self.draft.number_of_travelers < 1 {
            return Err(BookingError::validation(INVALID_DRAFT_MESSAGE));
        }
        match self.draft.user_id.as_deref() {
            Some(user_id) if !user_id.trim().is_empty() => Ok(user_id),
            _ => Err(BookingError::validation(NOT_LOGGED_IN_MESSAGE)),
        }
    }

    /// Validates the draft and moves to `Submitting`, returning the request to send.
    pub fn begin_submit(&mut self, package: Option<&Package>) -> Result<BookingRequest> {
        match self.state {
            SubmissionState::Submitting => return Err(BookingError::SubmitInProgress),
            SubmissionState::Done => return Err(BookingError::AlreadyBooked),
            SubmissionState::Idle | SubmissionState::Failed(_) => {}
        }

        let user_id = self.validate()?.to_string();
        let request = BookingRequest {
            package_id: self.draft.package_id.clone(),
            travel_dates: self.draft.travel_dates.clone(),
            number_of_travelers: self.draft.number_of_travelers,
            user_id,
            package_price: self.total_price(package).unwrap_or(0.0),
        };

        self.state = SubmissionState::Submitting;
        Ok(request)
    }

    pub fn finish_submit(&mut self, result: Result<()>) -> SubmitOutcome {
        if !self.is_submitting() {
            tracing::warn!("Booking result arrived while form was {:?}", self.state);
        }

        match result {
            Ok(()) => {
                tracing::info!("Booking created for package {:?}", self.draft.package_id);
                self.state = SubmissionState::Done;
                SubmitOutcome {
                    notification: Notification::success(BOOKING_SUCCESS_MESSAGE),
                    navigate_to: Some(Route::BookingHistory),
                }
            }
            Err(e @ BookingError::SubmitFailure { .. }) => {
                let message = e.server_message().unwrap_or(DEFAULT_SUBMIT_ERROR).to_string();
                tracing::warn!("{}: {}", e, message);
                self.state = SubmissionState::Failed(message.clone());
                SubmitOutcome::rejected(format!("Error: {}", message))
            }
            Err(e) => {
                tracing::warn!("Booking request failed: {}", e);
                self.state = SubmissionState::Failed(GENERIC_SUBMIT_ERROR.to_string());
                SubmitOutcome::rejected(GENERIC_SUBMIT_ERROR)
            }
        }
    }

    pub async fn submit<A>(&mut self, api: &A, package: Option<&Package>) -> SubmitOutcome
    where
        A: BookingApi + ?Sized,
    {
        let request = match self.begin_submit(package) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Booking not sent: {}", e);
                return SubmitOutcome::rejected(e.user_friendly_message());
            }
        };

        let result = api.create_booking(&request).await;
        self.finish_submit(result)
    }
}
