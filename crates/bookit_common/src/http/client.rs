// --- File: crates/bookit_common/src/http/client.rs ---
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Creates a new HTTP client with custom configuration.
///
/// Every outbound call in Bookit goes through a client built here so that a
/// hung peer can never hold a request open past `timeout`.
///
/// # Arguments
///
/// * `timeout` - Total time allowed per request, connect included
/// * `follow_redirects` - Whether the client should follow redirects
pub fn create_client(timeout: Duration, follow_redirects: bool) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(if follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}
