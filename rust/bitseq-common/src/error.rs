use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn unsupported_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::UnsupportedOperation { name: name.into() }.into())
    }

    pub fn structural_change(expected: u64, actual: u64) -> Error {
        Error(ErrorKind::StructuralChange { expected, actual }.into())
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("unsupported operation {name}")]
    UnsupportedOperation { name: String },

    #[error(
        "sequence was structurally modified (generation {actual}, view expected {expected})"
    )]
    StructuralChange { expected: u64, actual: u64 },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
