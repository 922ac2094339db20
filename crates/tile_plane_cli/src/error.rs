use thiserror::Error;
use tile_plane::{DirectionError, RuleError};

/// A command line that could not be executed. The interpreter reports it
/// and moves on to the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("{verb} Invalid operation")]
    UnknownOperation { verb: String },

    #[error("Invalid number of arguments: `{verb}` takes {expected}, got {got}")]
    Arity {
        verb: String,
        expected: usize,
        got: usize,
    },

    #[error("invalid number `{token}`")]
    InvalidNumber { token: String },

    #[error(transparent)]
    InvalidDirection(#[from] DirectionError),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

impl CommandError {
    #[must_use]
    pub fn arity(verb: &str, expected: usize, got: usize) -> Self {
        Self::Arity {
            verb: verb.to_string(),
            expected,
            got,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Failure of the interpreter process itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_message_names_the_verb() {
        let err = CommandError::arity("C", 4, 2);
        assert_eq!(
            err.to_string(),
            "Invalid number of arguments: `C` takes 4, got 2"
        );
    }

    #[test]
    fn rule_errors_pass_through() {
        let err = CommandError::from(RuleError::Overweight { sum: 12 });
        assert_eq!(err.to_string(), RuleError::Overweight { sum: 12 }.to_string());
    }
}
