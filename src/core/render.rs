use crate::core::booking_form::SubmissionState;
use crate::core::loader::LoadState;
use crate::core::page::BookingPage;
use crate::core::review_filter::{star_slots, MAX_RATING, MIN_RATING};
use crate::domain::model::{Notification, NotificationLevel, Package, Review};

pub const LOADING_PACKAGE: &str = "Loading package details...";
pub const LOADING_REVIEWS: &str = "Loading reviews...";
pub const NO_FEATURES: &str = "No features available.";
pub const NO_REVIEWS: &str = "No reviews found for this package.";

const FILLED_STAR: char = '★';
const OUTLINED_STAR: char = '☆';

/// Renders the page as plain text, one section after another.
pub fn render_page(page: &BookingPage) -> String {
    let package = match page.package_state() {
        LoadState::Loading => return LOADING_PACKAGE.to_string(),
        LoadState::Failed(message) => return render_error(message),
        LoadState::Loaded(package) => package,
    };

    let mut lines = Vec::new();
    render_header(&mut lines, package);
    render_images(&mut lines, package);
    render_pricing(&mut lines, page, package);
    render_form(&mut lines, page);
    render_features(&mut lines, package);
    render_section(&mut lines, "Itinerary", &package.itinerary);
    render_section(&mut lines, "Status", &package.status);
    render_rating_filter(&mut lines, page);
    render_reviews(&mut lines, page);
    lines.join("\n")
}

fn render_error(message: &str) -> String {
    format!("Error: {}\n[ Go Back ]", message)
}

fn render_header(lines: &mut Vec<String>, package: &Package) {
    lines.push(format!("=== {} ===", package.name));
    lines.push(package.description.clone());
    lines.push(String::new());
}

fn render_images(lines: &mut Vec<String>, package: &Package) {
    for (idx, url) in package.images.iter().enumerate() {
        lines.push(format!("Image {}: {}", idx, url));
    }
    if !package.images.is_empty() {
        lines.push(String::new());
    }
}

fn render_pricing(lines: &mut Vec<String>, page: &BookingPage, package: &Package) {
    lines.push(format!("Price per Traveler: ${}", package.price));
    if let Some(total) = page.formatted_total_price() {
        lines.push(format!("Total Price: ${}", total));
    }
    lines.push(String::new());
}

fn render_form(lines: &mut Vec<String>, page: &BookingPage) {
    let form = page.form();
    let draft = form.draft();
    lines.push(format!("Travel Dates: {}", draft.travel_dates));
    lines.push(format!("Number of Travelers: {}", draft.number_of_travelers));
    let trigger = match form.state() {
        SubmissionState::Submitting => "[ Booking... ]",
        _ => "[ Book Now ]",
    };
    lines.push(trigger.to_string());
}

fn render_features(lines: &mut Vec<String>, package: &Package) {
    lines.push(String::new());
    lines.push("Features".to_string());
    if package.features.is_empty() {
        lines.push(format!("  {}", NO_FEATURES));
    } else {
        lines.extend(package.features.iter().map(|f| format!("  - {}", f)));
    }
}

fn render_section(lines: &mut Vec<String>, title: &str, body: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.push(format!("  {}", body));
}

fn render_rating_filter(lines: &mut Vec<String>, page: &BookingPage) {
    lines.push(String::new());
    lines.push("Filter Reviews by Rating".to_string());
    for rating in MIN_RATING..=MAX_RATING {
        let mark = if page.rating_filter().is_selected(rating) { 'x' } else { ' ' };
        lines.push(format!("  [{}] Rating {} Stars", mark, rating));
    }
}

fn render_reviews(lines: &mut Vec<String>, page: &BookingPage) {
    lines.push(String::new());
    lines.push("Reviews".to_string());
    match page.reviews_state() {
        LoadState::Loading => lines.push(format!("  {}", LOADING_REVIEWS)),
        LoadState::Failed(message) => lines.push(format!("  {}", message)),
        LoadState::Loaded(_) => {
            let visible = page.visible_reviews();
            if visible.is_empty() {
                lines.push(format!("  {}", NO_REVIEWS));
            }
            for review in visible {
                render_review(lines, review);
            }
        }
    }
}

fn render_review(lines: &mut Vec<String>, review: &Review) {
    lines.push(format!("  {}", review.author_name()));
    lines.push(format!("    {}", review.comment));
    lines.push(format!("    {}", stars(review.rating)));
}

pub fn stars(rating: u8) -> String {
    star_slots(rating)
        .iter()
        .map(|filled| if *filled { FILLED_STAR } else { OUTLINED_STAR })
        .collect()
}

pub fn render_notification(notification: &Notification) -> String {
    let icon = match notification.level {
        NotificationLevel::Success => "✅",
        NotificationLevel::Error => "❌",
    };
    format!(
        "[{}] {} {}",
        notification.raised_at.format("%H:%M:%S"),
        icon,
        notification.message
    )
}
