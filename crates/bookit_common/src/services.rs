// --- File: crates/bookit_common/src/services.rs ---
//! Service abstractions for external collaborators.

use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result.
///
/// Used by object-safe service traits (e.g. the identity verifier) that are
/// stored as `Arc<dyn Trait>` in router state.
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;
