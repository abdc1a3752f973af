// --- File: crates/bookit_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;    // Error taxonomy shared by every crate
pub mod http;     // HTTP response mapping and outbound client helpers
pub mod logging;  // Logging utilities
pub mod models;   // Shared data structures
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{BookitError, HttpStatusCode};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};
