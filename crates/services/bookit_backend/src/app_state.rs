// --- File: crates/services/bookit_backend/src/app_state.rs ---
use bookit_auth::AuthState;
use bookit_booking::{BookingService, BusinessHours};
use bookit_common::BookitError;
use bookit_config::AppConfig;
use bookit_db::{DbClient, ReservationRepository, SqlReservationRepository};
use std::sync::Arc;
use tracing::{info, warn};

/// Used when the configuration has no `database` section.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/bookit.db";

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub bookings: Arc<BookingService<SqlReservationRepository>>,
    pub auth: Arc<AuthState>,
}

impl AppState {
    /// Wire up storage, the booking service and authentication from `config`.
    ///
    /// Fails on an invalid booking window, an unreachable database or an
    /// unbuildable identity client. The reservations table is created if
    /// missing.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, BookitError> {
        let hours = BusinessHours::from_config(&config.booking)
            .map_err(|e| BookitError::ConfigError(e.to_string()))?;

        let db_client = match config.database.as_ref() {
            Some(database) => DbClient::from_config(database).await?,
            None => {
                warn!("No database configured, falling back to {}", DEFAULT_DATABASE_URL);
                DbClient::from_url(DEFAULT_DATABASE_URL).await?
            }
        };
        info!("Connected to {}", db_client);

        let repository = SqlReservationRepository::new(db_client);
        repository.init_schema().await?;

        let auth = AuthState::from_config(&config)?;

        Ok(Self::from_parts(config, repository, hours, auth))
    }

    /// Assemble state from already built parts (used by tests).
    pub fn from_parts(
        config: Arc<AppConfig>,
        repository: SqlReservationRepository,
        hours: BusinessHours,
        auth: AuthState,
    ) -> Self {
        Self {
            config,
            bookings: Arc::new(BookingService::new(Arc::new(repository), hours)),
            auth: Arc::new(auth),
        }
    }
}
