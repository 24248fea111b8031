use thiserror::Error;

/// Contract violations detected while turning raw provider data into rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// A numeric series does not line up with the time grid.
    #[error("hourly series '{series}' has {actual} values but the time grid has {expected} slots")]
    LengthMismatch {
        series: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("hourly interval must be a positive number of seconds, got {0}")]
    InvalidInterval(i64),

    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),
}
