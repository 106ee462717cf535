use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price per traveler.
    #[serde(default)]
    pub price: f64,
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub itinerary: String,
    #[serde(default)]
    pub status: String,
}

// The backend stores images as `{ "url": ... }` documents; older records are bare strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImageRef {
    Url(String),
    Document { url: String },
}

fn deserialize_images<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs = Option::<Vec<ImageRef>>::deserialize(deserializer)?;
    Ok(refs
        .unwrap_or_default()
        .into_iter()
        .map(|image| match image {
            ImageRef::Url(url) | ImageRef::Document { url } => url,
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "userID", default)]
    pub author: Option<ReviewAuthor>,
    #[serde(rename = "comments", alias = "comment", default)]
    pub comment: String,
    /// Star rating; missing or unusable values decode as 0.
    #[serde(rename = "ratings", alias = "rating", default, deserialize_with = "deserialize_rating")]
    pub rating: u8,
}

pub const MAX_STARS: u8 = 5;

fn deserialize_rating<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let stars = value.as_ref().and_then(|value| match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        _ => None,
    });
    match stars.and_then(|n| u8::try_from(n).ok()).filter(|n| *n <= MAX_STARS) {
        Some(stars) => Ok(stars),
        None => {
            if let Some(value) = value.filter(|v| !v.is_null()) {
                tracing::warn!("Ignoring review rating {}", value);
            }
            Ok(0)
        }
    }
}

impl Review {
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|author| author.name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR)
    }
}

#[derive(Debug, Deserialize)]
pub struct PackageEnvelope {
    pub package: Package,
}

#[derive(Debug, Deserialize)]
pub struct ReviewsEnvelope {
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

/// Values handed over by the previous screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationContext {
    pub package_id: Option<String>,
    pub travel_dates: Option<String>,
    pub number_of_travelers: Option<i64>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub package_id: Option<String>,
    pub travel_dates: String,
    pub number_of_travelers: i64,
    pub user_id: Option<String>,
}

impl From<NavigationContext> for BookingDraft {
    fn from(ctx: NavigationContext) -> Self {
        Self {
            package_id: ctx.package_id,
            travel_dates: ctx.travel_dates.unwrap_or_default(),
            number_of_travelers: ctx.number_of_travelers.filter(|n| *n != 0).unwrap_or(1),
            user_id: ctx.user_id,
        }
    }
}

/// Body of `POST /api/booking/new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub package_id: Option<String>,
    pub travel_dates: String,
    pub number_of_travelers: i64,
    pub user_id: String,
    pub package_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Back,
    BookingHistory,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Back => "..",
            Route::BookingHistory => "/booking-history",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_package_accepts_image_documents_and_strings() {
        let package: Package = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Alps",
            "price": 100,
            "images": [{"url": "https://img/1.jpg"}, "https://img/2.jpg"],
        }))
        .unwrap();

        assert_eq!(package.id, "p1");
        assert_eq!(package.images, vec!["https://img/1.jpg", "https://img/2.jpg"]);
        assert!(package.features.is_empty());
        assert_eq!(package.price, 100.0);
    }

    #[test]
    fn test_package_null_images() {
        let package: Package =
            serde_json::from_value(json!({"id": "p2", "images": null})).unwrap();
        assert!(package.images.is_empty());
    }

    #[test]
    fn test_review_author_fallback() {
        let named: Review = serde_json::from_value(json!({
            "userID": {"name": "Mia"}, "comments": "Great", "ratings": 5
        }))
        .unwrap();
        let null_user: Review =
            serde_json::from_value(json!({"userID": null, "comments": "ok", "ratings": 3}))
                .unwrap();
        let short_form: Review = serde_json::from_value(json!({"rating": 4})).unwrap();

        assert_eq!(named.author_name(), "Mia");
        assert_eq!(null_user.author_name(), ANONYMOUS_AUTHOR);
        assert_eq!(short_form.author_name(), ANONYMOUS_AUTHOR);
        assert_eq!(short_form.rating, 4);
    }

    #[test]
    fn test_booking_request_is_camel_case() {
        let request = BookingRequest {
            package_id: Some("p1".to_string()),
            travel_dates: "2026-12-24".to_string(),
            number_of_travelers: 2,
            user_id: "u1".to_string(),
            package_price: 200.0,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["packageId"], "p1");
        assert_eq!(value["numberOfTravelers"], 2);
        assert_eq!(value["packagePrice"], 200.0);
    }

    #[test]
    fn test_draft_defaults_to_one_traveler() {
        let draft = BookingDraft::from(NavigationContext {
            package_id: Some("p1".to_string()),
            ..Default::default()
        });
        assert_eq!(draft.number_of_travelers, 1);
        assert_eq!(draft.travel_dates, "");
    }

    #[test]
    fn test_draft_replaces_zero_travelers_with_one() {
        let draft = BookingDraft::from(NavigationContext {
            number_of_travelers: Some(0),
            ..Default::default()
        });
        assert_eq!(draft.number_of_travelers, 1);
    }

    #[test]
    fn test_review_with_unusable_rating_decodes_as_zero() {
        let envelope: ReviewsEnvelope = serde_json::from_value(json!({
            "reviews": [
                {"ratings": 5},
                {"comments": "no rating"},
                {"ratings": null},
                {"ratings": "five"},
                {"ratings": 9},
                {"ratings": 3.5},
                {"ratings": 4.0},
                {"ratings": -1}
            ]
        }))
        .unwrap();

        let ratings: Vec<u8> = envelope.reviews.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![5, 0, 0, 0, 0, 0, 4, 0]);
        assert_eq!(envelope.reviews[1].comment, "no rating");
    }
}
