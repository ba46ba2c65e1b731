//! Error types for configuration and solving.

use std::fmt;

/// Errors that can occur when loading or validating a [`DcfrConfig`](super::DcfrConfig).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A discount exponent is NaN or infinite.
    InvalidExponent(&'static str, f64),
    /// The configuration file could not be read.
    Io(String),
    /// The configuration could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidExponent(name, value) => {
                write!(f, "{} exponent {} is not a finite number", name, value)
            }
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised while building the public tree or evaluating a profile.
///
/// All of these point at a malformed game or a mismatched strategy profile;
/// none of them are retried.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The solver configuration was rejected.
    Config(ConfigError),
    /// A public history was reached with two different action counts.
    ShapeMismatch {
        /// Debug rendering of the public history.
        history: String,
        /// Action count recorded when the history was first seen.
        expected: usize,
        /// Conflicting action count.
        actual: usize,
    },
    /// A decision node reported a player other than 0 or 1.
    InvalidPlayer {
        /// Debug rendering of the public history.
        history: String,
        /// The reported player.
        player: usize,
    },
    /// A non-terminal node exposed no actions.
    NoActions {
        /// Debug rendering of the public history.
        history: String,
    },
    /// A strategy profile has no matrix for a reachable public history.
    MissingHistory {
        /// Debug rendering of the public history.
        history: String,
    },
    /// One public history labels several decision nodes, so a per-node best
    /// response would see information the player does not have.
    AmbiguousPublicHistory {
        /// Debug rendering of the public history.
        history: String,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Config(e) => write!(f, "invalid configuration: {}", e),
            SolverError::ShapeMismatch {
                history,
                expected,
                actual,
            } => write!(
                f,
                "public history {} has {} actions, previously seen with {}",
                history, actual, expected
            ),
            SolverError::InvalidPlayer { history, player } => {
                write!(f, "public history {} is acted on by player {}", history, player)
            }
            SolverError::NoActions { history } => {
                write!(f, "non-terminal public history {} has no actions", history)
            }
            SolverError::MissingHistory { history } => {
                write!(f, "strategy profile has no entry for public history {}", history)
            }
            SolverError::AmbiguousPublicHistory { history } => write!(
                f,
                "public history {} labels more than one decision node",
                history
            ),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SolverError {
    fn from(e: ConfigError) -> Self {
        SolverError::Config(e)
    }
}

/// Renders a public history for error messages.
pub(crate) fn describe<H: fmt::Debug>(history: &H) -> String {
    format!("{:?}", history)
}
