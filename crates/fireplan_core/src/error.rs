use std::fmt;

/// Errors raised while turning raw configuration into a [`crate::config::SimulationConfig`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// One of the required scenarios (standard / optimistic / pessimistic) is absent
    MissingScenario(&'static str),
    /// A scenario name was referenced that the scenario table does not define
    UnknownScenario(String),
    /// A section is enabled but one of its required keys is absent
    MissingField {
        section: &'static str,
        field: &'static str,
    },
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// A child names a school type that has no row in the education cost table
    UnknownSchoolType {
        stage: &'static str,
        kind: String,
    },
    InvalidDate {
        field: &'static str,
        value: String,
    },
    /// A pension plan names a household member that does not exist
    UnknownMember(String),
    /// Pension type other than employee, national or fixed
    UnknownPensionType(String),
    /// The YAML document could not be parsed
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingScenario(name) => {
                write!(f, "required scenario '{name}' is missing")
            }
            ConfigError::UnknownScenario(name) => write!(f, "unknown scenario '{name}'"),
            ConfigError::MissingField { section, field } => {
                write!(f, "section '{section}' is enabled but '{field}' is missing")
            }
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => write!(f, "invalid value {value} for '{field}': {reason}"),
            ConfigError::UnknownSchoolType { stage, kind } => {
                write!(f, "no {stage} cost defined for school type '{kind}'")
            }
            ConfigError::InvalidDate { field, value } => {
                write!(f, "invalid date '{value}' for '{field}'")
            }
            ConfigError::UnknownMember(name) => {
                write!(f, "pension plan refers to unknown household member '{name}'")
            }
            ConfigError::UnknownPensionType(kind) => write!(f, "unknown pension type '{kind}'"),
            ConfigError::Parse(msg) => write!(f, "failed to parse configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors related to return generation
#[derive(Debug, Clone, PartialEq)]
pub enum MarketError {
    InvalidDistributionParameters {
        model: &'static str,
        mean: f64,
        std_dev: f64,
        reason: &'static str,
    },
    /// A generated return was NaN or infinite
    NonFiniteReturn { month: usize },
}

impl fmt::Display for MarketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketError::InvalidDistributionParameters {
                model,
                mean,
                std_dev,
                reason,
            } => write!(
                f,
                "invalid {model} parameters (mean={mean}, std_dev={std_dev}): {reason}"
            ),
            MarketError::NonFiniteReturn { month } => {
                write!(f, "generated return for month {month} is not finite")
            }
        }
    }
}

impl std::error::Error for MarketError {}

/// Top-level error for a simulation run
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Config(ConfigError),
    Market(MarketError),
    /// A single Monte Carlo trial could not be completed
    TrialFailed { trial: usize, reason: String },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Config(e) => write!(f, "configuration error: {e}"),
            SimulationError::Market(e) => write!(f, "market error: {e}"),
            SimulationError::TrialFailed { trial, reason } => {
                write!(f, "trial {trial} failed: {reason}")
            }
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(e) => Some(e),
            SimulationError::Market(e) => Some(e),
            SimulationError::TrialFailed { .. } => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::Config(e)
    }
}

impl From<MarketError> for SimulationError {
    fn from(e: MarketError) -> Self {
        SimulationError::Market(e)
    }
}

impl From<serde_saphyr::Error> for ConfigError {
    fn from(e: serde_saphyr::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
