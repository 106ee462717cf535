use crate::domain::model::NavigationContext;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub booking: Option<BookingConfig>,
    pub reviews: Option<ReviewsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingConfig {
    pub package_id: Option<String>,
    pub travel_dates: Option<String>,
    pub number_of_travelers: Option<i64>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewsConfig {
    pub ratings: Option<Vec<u8>>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOOKING_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::Config {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.base_url", self.base_url())?;
        validation::validate_positive_number("api.timeout_seconds", self.timeout_seconds(), 1)?;

        if let Some(booking) = &self.booking {
            if let Some(dates) = &booking.travel_dates {
                validation::validate_travel_date("booking.travel_dates", dates)?;
            }
            if let Some(package_id) = &booking.package_id {
                validation::validate_non_empty_string("booking.package_id", package_id)?;
            }
        }

        validation::validate_ratings("reviews.ratings", self.ratings())?;
        Ok(())
    }

    pub fn ratings(&self) -> &[u8] {
        self.reviews
            .as_ref()
            .and_then(|r| r.ratings.as_deref())
            .unwrap_or(&[])
    }

    pub fn navigation_context(&self) -> NavigationContext {
        let booking = self.booking.clone().unwrap_or_default();
        NavigationContext {
            package_id: booking.package_id,
            travel_dates: booking.travel_dates,
            number_of_travelers: booking.number_of_travelers,
            user_id: booking.user_id,
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn token(&self) -> Option<&str> {
        // An unset ${VAR} survives substitution verbatim.
        self.api
            .token
            .as_deref()
            .filter(|token| !token.starts_with("${"))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
