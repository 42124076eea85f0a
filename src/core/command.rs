use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Rejected {
        message: String,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            CommandError::DuplicateKey { message } => { message.as_str() }
            CommandError::NotFound { message } => { message.as_str() }
            CommandError::Rejected { message } => { message.as_str() }
            CommandError::Serialization { message } => { message.as_str() }
            CommandError::Validation { message, .. } => { message.as_str() }
            CommandError::Runtime { message, .. } => { message.as_str() }
        }
    }
}

pub trait Command<Request, Response> {
    fn execute(&mut self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::InvalidReference { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::AlreadyIssued { message } => {
                CommandError::Rejected { message }
            }
            LibraryError::NotBorrowed { message } => {
                CommandError::Rejected { message }
            }
            LibraryError::InconsistentState { message } => {
                CommandError::Rejected { message }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code }
            }
        }
    }
}
