//! Reservation storage for Bookit
//!
//! This crate owns the connection pool ([`DbClient`]) and the
//! [`ReservationRepository`] trait with two implementations: a SQL one over
//! the SQLx `Any` driver and an in-memory one for tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use bookit_db::{DbClient, ReservationRepository, SqlReservationRepository};
//!
//! async fn setup_db() -> Result<SqlReservationRepository, Box<dyn std::error::Error>> {
//!     let db_client = DbClient::from_url("sqlite://data/bookit.db").await?;
//!     let repository = SqlReservationRepository::new(db_client);
//!     repository.init_schema().await?;
//!     Ok(repository)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

pub use client::{DbBackend, DbClient};
pub use error::DbError;
pub use repositories::{
    MemoryReservationRepository, ReservationRepository, SqlReservationRepository,
};
