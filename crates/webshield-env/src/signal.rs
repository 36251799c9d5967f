use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single probe could not produce a value.
///
/// Every accessor on [`crate::Environment`] returns one of these instead of
/// panicking or bubbling an opaque failure; the collector maps them onto
/// [`Signal`] sentinels so one broken capability never aborts a collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("capability is not supported by this environment")]
    Unsupported,
    #[error("capability is present but currently unavailable")]
    Unavailable,
    #[error("permission query was refused")]
    Denied,
    #[error("probe failed: {0}")]
    Failed(String),
}

pub type ProbeResult<T> = Result<T, ProbeError>;

/// A signal value or the sentinel recorded when it could not be read.
///
/// Sentinels keep "absent" distinguishable from a real value: an environment
/// without a battery API reads differently from one whose battery query
/// errored out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Signal<T> {
    Value(T),
    Unsupported,
    Unavailable,
    Error,
}

impl<T> Signal<T> {
    /// The concrete value, if the probe produced one.
    pub fn value(&self) -> Option<&T> {
        match self {
            Signal::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Signal::Value(_))
    }
}

impl<T> From<ProbeResult<T>> for Signal<T> {
    fn from(result: ProbeResult<T>) -> Self {
        match result {
            Ok(value) => Signal::Value(value),
            Err(ProbeError::Unsupported) => Signal::Unsupported,
            Err(ProbeError::Unavailable) | Err(ProbeError::Denied) => Signal::Unavailable,
            Err(ProbeError::Failed(_)) => Signal::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_errors_map_to_sentinels() {
        assert_eq!(Signal::from(Ok(7_u32)), Signal::Value(7));
        assert_eq!(Signal::<u32>::from(Err(ProbeError::Unsupported)), Signal::Unsupported);
        assert_eq!(Signal::<u32>::from(Err(ProbeError::Unavailable)), Signal::Unavailable);
        assert_eq!(Signal::<u32>::from(Err(ProbeError::Denied)), Signal::Unavailable);
        assert_eq!(
            Signal::<u32>::from(Err(ProbeError::Failed("boom".into()))),
            Signal::Error
        );
    }

    #[test]
    fn sentinel_serialization_is_tagged() {
        let json = serde_json::to_string(&Signal::Value(true)).unwrap();
        assert_eq!(json, r#"{"state":"value","value":true}"#);
        let json = serde_json::to_string(&Signal::<bool>::Unavailable).unwrap();
        assert_eq!(json, r#"{"state":"unavailable"}"#);
    }
}
