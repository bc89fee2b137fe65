pub mod client;
pub mod remote;

use std::sync::Arc;

pub use client::{TokenValidator, ValidationError};
pub use remote::HttpTokenValidator;

/// Shared handle stored in `AppState`; a trait object so tests can swap in
/// a canned validator.
pub type SharedValidator = Arc<dyn TokenValidator>;
