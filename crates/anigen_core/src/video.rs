//! Rendered video reference.

use serde::{Deserialize, Serialize};

/// Opaque path or URL returned by the render service.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct VideoReference(String);

impl VideoReference {
    /// Borrow the reference as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
