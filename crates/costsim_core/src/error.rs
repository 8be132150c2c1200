use std::fmt;

/// Errors raised when a sampler or item is given parameters outside its domain
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidParameterError {
    /// The three-point estimate is not ordered `min <= mode <= max` or is not finite
    Estimate { min: f64, mode: f64, max: f64 },
    /// Occurrence probability outside `[0, 1]`
    Probability(f64),
    /// PERT shape parameter must be finite and non-negative
    Shape(f64),
    /// A simulation needs at least one trial
    ZeroTrials,
}

impl fmt::Display for InvalidParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidParameterError::Estimate { min, mode, max } => write!(
                f,
                "invalid estimate (min={min}, mode={mode}, max={max}): ensure min <= mode <= max"
            ),
            InvalidParameterError::Probability(p) => {
                write!(f, "probability {p} must be between 0 and 1")
            }
            InvalidParameterError::Shape(lambda) => {
                write!(f, "shape parameter {lambda} must be finite and non-negative")
            }
            InvalidParameterError::ZeroTrials => write!(f, "trial count must be at least 1"),
        }
    }
}

impl std::error::Error for InvalidParameterError {}

/// Errors related to building item collections
#[derive(Debug, Clone, PartialEq)]
pub enum ItemError {
    DuplicateName(String),
    Invalid {
        name: String,
        source: InvalidParameterError,
    },
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemError::DuplicateName(name) => write!(f, "item '{name}' is defined more than once"),
            ItemError::Invalid { name, source } => write!(f, "item '{name}': {source}"),
        }
    }
}

impl std::error::Error for ItemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ItemError::Invalid { source, .. } => Some(source),
            ItemError::DuplicateName(_) => None,
        }
    }
}

/// Errors from running a stage or combining stage outputs
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Parameter(InvalidParameterError),
    /// Sampling failed for a named item
    Item {
        name: String,
        source: InvalidParameterError,
    },
    /// Sample arrays of different lengths cannot be combined
    LengthMismatch { expected: usize, found: usize },
    /// Combination requires at least one sample array
    NothingToCombine,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Parameter(e) => write!(f, "{e}"),
            SimulationError::Item { name, source } => {
                write!(f, "sampling item '{name}' failed: {source}")
            }
            SimulationError::LengthMismatch { expected, found } => write!(
                f,
                "cannot combine sample arrays of length {expected} and {found}"
            ),
            SimulationError::NothingToCombine => write!(f, "no sample arrays to combine"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Parameter(e) => Some(e),
            SimulationError::Item { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<InvalidParameterError> for SimulationError {
    fn from(e: InvalidParameterError) -> Self {
        SimulationError::Parameter(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_estimate_error_reports_triple() {
        let err = InvalidParameterError::Estimate {
            min: 10.0,
            mode: 5.0,
            max: 20.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("min=10"));
        assert!(msg.contains("mode=5"));
        assert!(msg.contains("max=20"));
    }

    #[test]
    fn test_item_error_source_chain() {
        let err = SimulationError::Item {
            name: "permit_issues".to_string(),
            source: InvalidParameterError::Probability(1.5),
        };
        assert!(err.to_string().contains("permit_issues"));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "probability 1.5 must be between 0 and 1");
    }
}
