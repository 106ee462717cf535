use crate::domain::model::{
    BookingRequest, ErrorBody, Package, PackageEnvelope, Review, ReviewsEnvelope,
};
use crate::domain::ports::{BookingApi, ConfigProvider};
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Credentials injected by whoever owns the login flow.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => {
                tracing::debug!("No bearer token in session, sending request without Authorization");
                request
            }
        }
    }
}

pub struct HttpBookingApi {
    client: Client,
    base_url: Url,
    session: Session,
}

impl HttpBookingApi {
    pub fn new(base_url: &str, timeout: Duration, session: Session) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| BookingError::InvalidConfigValue {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.base_url(),
            Duration::from_secs(config.timeout_seconds()),
            Session::new(config.token().map(str::to_string)),
        )
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BookingError::Config {
                message: format!("{} cannot be used as a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T> {
        let status = response.status();
        tracing::debug!("{} answered {}", url.path(), status);

        let body = response.bytes().await?;
        if status.is_success() {
            Ok(serde_json::from_slice(&body)?)
        } else {
            Err(BookingError::FetchFailure {
                path: url.path().to_string(),
                status: status.as_u16(),
                message: body_message(&body),
            })
        }
    }
}

/// `message` from a JSON error body, if the body has one.
fn body_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn fetch_package(&self, package_id: &str) -> Result<Package> {
        let url = self.endpoint(&["api", "package", package_id])?;
        tracing::debug!("Fetching package from: {}", url);

        let response = self
            .session
            .authorize(self.client.get(url.clone()))
            .send()
            .await?;
        let envelope: PackageEnvelope = Self::decode(&url, response).await?;
        Ok(envelope.package)
    }

    async fn fetch_reviews(&self, package_id: &str) -> Result<Vec<Review>> {
        let url = self.endpoint(&["api", "reviews", "package", package_id])?;
        tracing::debug!("Fetching reviews from: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let envelope: ReviewsEnvelope = Self::decode(&url, response).await?;
        Ok(envelope.reviews)
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<()> {
        let url = self.endpoint(&["api", "booking", "new"])?;
        tracing::debug!(
            "Posting booking for package {:?} ({} travelers) to: {}",
            request.package_id,
            request.number_of_travelers,
            url
        );

        let response = self
            .session
            .authorize(self.client.post(url.clone()))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("{} answered {}", url.path(), status);
        if status.is_success() {
            return Ok(());
        }

        let body = response.bytes().await?;
        Err(BookingError::SubmitFailure {
            path: url.path().to_string(),
            status: status.as_u16(),
            message: body_message(&body),
        })
    }
}
