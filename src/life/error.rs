use std::fmt;

/// Reasons the core refuses a request. A rejected request never changes state.
#[derive(Debug, Clone, PartialEq)]
pub enum LifeError {
    /// A grid dimension was zero.
    InvalidSize { height: usize, width: usize },
    /// The requested grid exceeds the configured display bounds.
    SizeTooLarge {
        height: usize,
        width: usize,
        max_height: usize,
        max_width: usize,
    },
    /// Tick interval must be a positive, finite number of seconds.
    InvalidTickInterval(f64),
    /// User text that could not be read as a number.
    Unparsable(String),
}

impl fmt::Display for LifeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifeError::InvalidSize { height, width } => {
                write!(f, "grid size {height}x{width} is invalid, both sides must be at least 1")
            }
            LifeError::SizeTooLarge {
                height,
                width,
                max_height,
                max_width,
            } => write!(
                f,
                "grid size {height}x{width} exceeds the maximum of {max_height}x{max_width}"
            ),
            LifeError::InvalidTickInterval(secs) => {
                write!(f, "tick interval {secs} is invalid, it must be greater than 0 seconds")
            }
            LifeError::Unparsable(text) => write!(f, "'{text}' is not a valid number"),
        }
    }
}

impl std::error::Error for LifeError {}

/// Checks a tick interval in seconds.
pub fn validate_tick_interval(secs: f64) -> Result<f64, LifeError> {
    if secs.is_finite() && secs > 0.0 {
        Ok(secs)
    } else {
        Err(LifeError::InvalidTickInterval(secs))
    }
}
