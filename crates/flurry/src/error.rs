//! Error types for field construction and frame ticks.

use thiserror::Error;

/// Errors raised while building a field, a strategy pairing, or a scene config.
/// All of these surface before the first frame runs.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A buffer's length does not match the particle count.
    #[error("{buffer} buffer holds {actual} values, expected {expected}")]
    LengthMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The host asked for a negative number of particles.
    #[error("particle count must be non-negative, got {0}")]
    NegativeCount(i64),
    /// A generator produced a seed that disagrees with its declared layout.
    #[error("particle {index} disagrees with the field layout on `{attribute}`")]
    InconsistentSeed {
        index: usize,
        attribute: &'static str,
    },
    /// A motion strategy was paired with a field lacking a buffer it writes.
    #[error("{strategy} motion needs a {buffer} buffer")]
    MissingBuffer {
        strategy: &'static str,
        buffer: &'static str,
    },
    /// A scene config value is out of range.
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),
    /// A scene config could not be parsed.
    #[error("scene config is not valid JSON: {0}")]
    Config(#[from] serde_json::Error),
}

/// Errors that reject a single frame. The host's frame loop decides whether to
/// keep scheduling ticks.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TickError {
    #[error("animation has not been started")]
    NotStarted,
    #[error("animation was torn down")]
    TornDown,
    #[error("host time {0} is not finite")]
    NonFiniteTime(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_names_the_buffer() {
        let err = FieldError::LengthMismatch {
            buffer: "colors",
            expected: 9,
            actual: 6,
        };
        assert_eq!(err.to_string(), "colors buffer holds 6 values, expected 9");
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FieldError = parse.into();
        assert!(matches!(err, FieldError::Config(_)));
    }
}
