//! Correlation-ID is a UUID to use for correlating the logs of one user flow
//! with the store calls it issued.

use http::{HeaderMap, HeaderValue};
use uuid::{fmt::Hyphenated, Uuid};

/// Correlation-ID for correlating logs together
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct CorrelationId(Uuid);

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl CorrelationId {
    pub const HEADER_NAME: &'static str = "correlation-id";

    pub fn new() -> Self {
        CorrelationId(Uuid::new_v4())
    }

    pub fn insert_into_header_map(
        &self,
        h: &mut HeaderMap,
    ) -> Result<(), http::header::InvalidHeaderValue> {
        h.insert(
            Self::HEADER_NAME,
            HeaderValue::from_str(
                self.as_hyphenated()
                    .encode_lower(&mut Uuid::encode_buffer()),
            )?,
        );
        Ok(())
    }

    pub fn as_hyphenated(&self) -> Hyphenated {
        self.0.hyphenated()
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}
