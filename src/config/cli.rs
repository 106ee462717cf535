use crate::config::toml_config::{TomlConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::model::NavigationContext;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "tour-booking")]
#[command(about = "Show a travel package with its reviews and book it")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "BOOKING_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long)]
    pub package_id: Option<String>,

    #[arg(long, help = "Travel date as YYYY-MM-DD")]
    pub travel_dates: Option<String>,

    #[arg(long, default_value = "1")]
    pub travelers: i64,

    #[arg(long)]
    pub user_id: Option<String>,

    #[arg(long = "rating", value_delimiter = ',', help = "Only show reviews with these star ratings")]
    pub ratings: Vec<u8>,

    #[arg(long, help = "Submit the booking after showing the package")]
    pub book: bool,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, help = "TOML config file; its values override flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Folds a TOML file over the flags. Values present in the file win.
    pub fn merge_toml(&mut self, file: TomlConfig) {
        if let Some(base_url) = file.api.base_url.clone() {
            self.base_url = base_url;
        }
        if let Some(timeout) = file.api.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(token) = file.token() {
            self.token = Some(token.to_string());
        }
        if !file.ratings().is_empty() {
            self.ratings = file.ratings().to_vec();
        }

        let ctx = file.navigation_context();
        if ctx.package_id.is_some() {
            self.package_id = ctx.package_id;
        }
        if ctx.travel_dates.is_some() {
            self.travel_dates = ctx.travel_dates;
        }
        if let Some(travelers) = ctx.number_of_travelers {
            self.travelers = travelers;
        }
        if ctx.user_id.is_some() {
            self.user_id = ctx.user_id;
        }
    }

    pub fn load_config_file(&mut self) -> Result<()> {
        if let Some(path) = self.config.clone() {
            tracing::debug!("Loading config file: {}", path);
            let file = TomlConfig::from_file(&path)?;
            file.validate()?;
            self.merge_toml(file);
        }
        Ok(())
    }

    pub fn navigation_context(&self) -> NavigationContext {
        NavigationContext {
            package_id: self.package_id.clone(),
            travel_dates: self.travel_dates.clone(),
            number_of_travelers: Some(self.travelers),
            user_id: self.user_id.clone(),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_ratings("rating", &self.ratings)?;
        if let Some(dates) = &self.travel_dates {
            validation::validate_travel_date("travel_dates", dates)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["tour-booking", "--package-id", "p1"]);

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.travelers, 1);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert!(!config.book);
        assert!(config.validate().is_ok());
        assert_eq!(config.navigation_context().package_id.as_deref(), Some("p1"));
    }

    #[test]
    fn test_ratings_repeat_and_split() {
        let config =
            CliConfig::parse_from(["tour-booking", "--rating", "5", "--rating", "3,4"]);
        assert_eq!(config.ratings, vec![5, 3, 4]);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let bad_rating = CliConfig::parse_from(["tour-booking", "--rating", "9"]);
        assert!(bad_rating.validate().is_err());

        let bad_date = CliConfig::parse_from(["tour-booking", "--travel-dates", "tomorrow"]);
        assert!(bad_date.validate().is_err());

        let bad_url = CliConfig::parse_from(["tour-booking", "--base-url", "ftp://example.com"]);
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_toml_values_override_flags() {
        let mut config = CliConfig::parse_from([
            "tour-booking",
            "--package-id",
            "from-flag",
            "--travelers",
            "4",
            "--user-id",
            "u-flag",
        ]);
        let file = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "https://travel.example.com"

[booking]
package_id = "from-file"
"#,
        )
        .unwrap();

        config.merge_toml(file);

        assert_eq!(config.base_url, "https://travel.example.com");
        assert_eq!(config.package_id.as_deref(), Some("from-file"));
        assert_eq!(config.travelers, 4);
        assert_eq!(config.user_id.as_deref(), Some("u-flag"));
    }
}
