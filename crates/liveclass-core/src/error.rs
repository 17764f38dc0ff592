use thiserror::Error;

use crate::session::Role;

/// A required field was left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please enter your name")]
    MissingName,
    #[error("please enter your code")]
    MissingCode,
    #[error("please enter a class code")]
    MissingClassCode,
    #[error("a doubt cannot be empty")]
    EmptyDoubt,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The in-flight login was replaced by a newer request or cancelled by logout.
    #[error("login request was superseded")]
    Superseded,
    #[error("only a signed-in {required} can do that")]
    Forbidden { required: Role },
}

impl SessionError {
    /// Errors the user has to see and act on, as opposed to internal outcomes.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, SessionError::Superseded)
    }
}
