// --- File: crates/bookit_config/src/models.rs ---

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Raised when a configured value cannot be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValueError {
    #[error("unknown time zone: {0}")]
    TimeZone(String),
    #[error("invalid clock time for {field}: {value} (expected HH:MM)")]
    ClockTime { field: &'static str, value: String },
    #[error("business hours are empty: opening {open} is not before closing {close}")]
    EmptyWindow { open: String, close: String },
}

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://data/bookit.db, loaded via BOOKIT__DATABASE__URL or DATABASE_URL
}

// --- Booking Config ---
/// The single shared calendar: the civil zone every booking is interpreted in
/// and the daily opening window.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// IANA zone name, e.g. "Asia/Jakarta"
    pub time_zone: String,
    /// Opening time, HH:MM
    pub open_time: String,
    /// Closing time, HH:MM
    pub close_time: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            time_zone: "Asia/Jakarta".to_string(),
            open_time: "09:00".to_string(),
            close_time: "17:00".to_string(),
        }
    }
}

impl BookingConfig {
    pub fn zone(&self) -> Result<Tz, ConfigValueError> {
        Tz::from_str(&self.time_zone).map_err(|_| ConfigValueError::TimeZone(self.time_zone.clone()))
    }

    pub fn open(&self) -> Result<NaiveTime, ConfigValueError> {
        parse_clock("open_time", &self.open_time)
    }

    pub fn close(&self) -> Result<NaiveTime, ConfigValueError> {
        parse_clock("close_time", &self.close_time)
    }

    /// Validates all three values at once; used at startup so a typo fails loudly.
    pub fn validate(&self) -> Result<(Tz, NaiveTime, NaiveTime), ConfigValueError> {
        let zone = self.zone()?;
        let open = self.open()?;
        let close = self.close()?;
        if open >= close {
            return Err(ConfigValueError::EmptyWindow {
                open: self.open_time.clone(),
                close: self.close_time.clone(),
            });
        }
        Ok((zone, open, close))
    }
}

fn parse_clock(field: &'static str, value: &str) -> Result<NaiveTime, ConfigValueError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ConfigValueError::ClockTime {
        field,
        value: value.to_string(),
    })
}

// --- Identity Provider Config ---
// anon_key is usually supplied as "secret_from_env" and injected from AUTH_ANON_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub provider_url: String, // Mandatory, e.g. https://<project>.supabase.co
    pub anon_key: String,     // Mandatory
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default = "default_auth_timeout")]
    pub timeout_secs: u64,
}

fn default_auth_timeout() -> u64 {
    5
}

// --- CORS Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age_secs: u64,
}

fn default_cors_max_age() -> u64 {
    12 * 60 * 60
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            max_age_secs: default_cors_max_age(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub cors: CorsConfig,
}
