use clap::Parser;
use tour_booking::core::render::{render_notification, render_page};
use tour_booking::utils::error::{BookingError, ErrorSeverity};
use tour_booking::utils::logger::{self, LogFormat};
use tour_booking::utils::validation::Validate;
use tour_booking::{BookingPage, CliConfig, HttpBookingApi};

fn exit_code(e: &BookingError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: BookingError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

#[tokio::main]
async fn main() {
    let mut config = CliConfig::parse();

    logger::init_logger(LogFormat::from_json_flag(config.log_json), config.verbose);

    tracing::info!("Starting tour-booking");

    if let Err(e) = config.load_config_file() {
        fail(e);
    }
    if let Err(e) = config.validate() {
        fail(e);
    }
    tracing::debug!(
        "Backend {} (timeout {}s, token {})",
        config.base_url,
        config.timeout_seconds,
        if config.token.is_some() { "set" } else { "unset" }
    );

    let api = match HttpBookingApi::from_config(&config) {
        Ok(api) => api,
        Err(e) => fail(e),
    };

    let mut page = BookingPage::new(config.navigation_context());
    let loaded = page.load(&api).await;
    for rating in &config.ratings {
        page.select_rating(*rating);
    }

    println!("{}", render_page(&page));

    if let Err(e) = loaded {
        fail(e);
    }
    if page.error().is_some() {
        std::process::exit(1);
    }

    if !config.book {
        return;
    }

    let outcome = page.submit(&api).await;
    println!();
    for notification in page.drain_notifications() {
        println!("{}", render_notification(&notification));
    }

    match outcome.navigate_to {
        Some(route) => {
            tracing::info!("Navigating to {}", route.path());
            println!("➡️  {}", route.path());
        }
        None => std::process::exit(1),
    }
}
