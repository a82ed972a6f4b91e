use thiserror::Error;

/// Errors produced by shadow computation and its input validation.
///
/// Every variant is a deterministic function of the input; nothing here
/// represents a transient condition worth retrying.
#[derive(Debug, Error)]
pub enum ShadowError {
    /// Contradictory or incomplete configuration (time spec, sun override).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A time range would expand into more points than allowed.
    #[error("time range too large: would generate {points} points, maximum is {max}")]
    RangeTooLarge { points: i64, max: i64 },

    /// Latitude or longitude outside its valid range.
    #[error("coordinate out of range: {0}")]
    CoordinateRange(String),

    /// Unknown unit name or incompatible units in arithmetic.
    #[error("unit error: {0}")]
    Unit(String),

    /// Degenerate geometry (e.g. a zero-length wall has no bearing).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A naive timestamp where an aware one is required and no default
    /// timezone is configured, or a timestamp that does not exist in the
    /// target zone.
    #[error("timezone error: {0}")]
    Timezone(String),
}

pub type Result<T> = std::result::Result<T, ShadowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = ShadowError::RangeTooLarge {
            points: 86401,
            max: 1000,
        };
        assert_eq!(
            e.to_string(),
            "time range too large: would generate 86401 points, maximum is 1000"
        );
        let e = ShadowError::Unit("unknown unit: furlongs".to_string());
        assert!(e.to_string().contains("furlongs"));
    }
}
