use crate::housing::{HousingPolicy, ReassignPolicy, RentSchedule};
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub housing: HousingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = RentSchedule::default();
        let housing = HousingConfig {
            auto_advance_on_assign: flag("HOUSING_AUTO_ADVANCE_ON_ASSIGN", true)?,
            vacate_on_reassign: flag("HOUSING_VACATE_ON_REASSIGN", true)?,
            dorm_rate_per_sq_ft: rate("HOUSING_DORM_RATE", defaults.dorm_rate_per_sq_ft)?,
            apartment_rate_per_bedroom: rate(
                "HOUSING_APARTMENT_RATE",
                defaults.apartment_rate_per_bedroom,
            )?,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            housing,
        })
    }
}

fn flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value: raw }),
    }
}

fn rate(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };

    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 && value <= u64::from(u32::MAX) => Ok(value),
        _ => Err(ConfigError::InvalidRate { name, value: raw }),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Record-keeping behavior for the housing registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HousingConfig {
    pub auto_advance_on_assign: bool,
    pub vacate_on_reassign: bool,
    pub dorm_rate_per_sq_ft: u64,
    pub apartment_rate_per_bedroom: u64,
}

impl HousingConfig {
    pub fn policy(&self) -> HousingPolicy {
        HousingPolicy {
            auto_advance_on_assign: self.auto_advance_on_assign,
            reassignment: if self.vacate_on_reassign {
                ReassignPolicy::VacatePrevious
            } else {
                ReassignPolicy::KeepPrevious
            },
            rent: RentSchedule {
                dorm_rate_per_sq_ft: self.dorm_rate_per_sq_ft,
                apartment_rate_per_bedroom: self.apartment_rate_per_bedroom,
            },
        }
    }
}

impl Default for HousingConfig {
    fn default() -> Self {
        let rent = RentSchedule::default();
        Self {
            auto_advance_on_assign: true,
            vacate_on_reassign: true,
            dorm_rate_per_sq_ft: rent.dorm_rate_per_sq_ft,
            apartment_rate_per_bedroom: rent.apartment_rate_per_bedroom,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFlag { name: &'static str, value: String },
    InvalidRate { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false (got '{value}')")
            }
            ConfigError::InvalidRate { name, value } => {
                write!(
                    f,
                    "{name} must be a whole dollar amount between 1 and {} (got '{value}')",
                    u32::MAX
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("HOUSING_AUTO_ADVANCE_ON_ASSIGN");
        env::remove_var("HOUSING_VACATE_ON_REASSIGN");
        env::remove_var("HOUSING_DORM_RATE");
        env::remove_var("HOUSING_APARTMENT_RATE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.housing, HousingConfig::default());

        let policy = config.housing.policy();
        assert!(policy.auto_advance_on_assign);
        assert_eq!(policy.reassignment, ReassignPolicy::VacatePrevious);
        assert_eq!(policy.rent, RentSchedule::default());
    }

    #[test]
    fn reads_housing_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("HOUSING_AUTO_ADVANCE_ON_ASSIGN", "off");
        env::set_var("HOUSING_VACATE_ON_REASSIGN", "FALSE");
        env::set_var("HOUSING_DORM_RATE", " 12 ");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Test);
        let policy = config.housing.policy();
        assert!(!policy.auto_advance_on_assign);
        assert_eq!(policy.reassignment, ReassignPolicy::KeepPrevious);
        assert_eq!(policy.rent.dorm_rate_per_sq_ft, 12);
        assert_eq!(policy.rent.apartment_rate_per_bedroom, 300);
    }

    #[test]
    fn rejects_unparseable_flag_and_rate() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("HOUSING_AUTO_ADVANCE_ON_ASSIGN", "sometimes");
        let err = AppConfig::load().expect_err("flag should be rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidFlag {
                name: "HOUSING_AUTO_ADVANCE_ON_ASSIGN",
                ..
            }
        ));

        reset_env();
        env::set_var("HOUSING_APARTMENT_RATE", "0");
        let err = AppConfig::load().expect_err("zero rate should be rejected");
        reset_env();
        assert!(err.to_string().contains("HOUSING_APARTMENT_RATE"));
    }

    #[test]
    fn rejects_rates_that_could_overflow_rent() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("HOUSING_DORM_RATE", u64::MAX.to_string());
        let err = AppConfig::load().expect_err("oversized rate should be rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidRate {
                name: "HOUSING_DORM_RATE",
                ..
            }
        ));

        env::set_var("HOUSING_DORM_RATE", u32::MAX.to_string());
        let config = AppConfig::load().expect("largest rate accepted");
        reset_env();
        assert_eq!(config.housing.dorm_rate_per_sq_ft, u64::from(u32::MAX));
    }
}
