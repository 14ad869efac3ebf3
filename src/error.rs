use std::io;

/// What went wrong with a single instruction, independent of where it sits in the source.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("unresolved label `{0}`")]
    UnresolvedLabel(String),
    #[error("malformed operand `{token}`: expected {expected}")]
    MalformedOperand { token: String, expected: &'static str },
    #[error("`{mnemonic}` takes {expected} operand(s), found {found}")]
    MissingOperand {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("line {line}: {kind}")]
    Source { line: usize, kind: ErrorKind },
    #[error("{} errors, first: {}", .0.len(), .0.first().map(ToString::to_string).unwrap_or_default())]
    Many(Vec<AsmError>),
    #[error("resource failure: {0}")]
    Resource(#[from] io::Error),
}

impl AsmError {
    pub fn at(line: usize, kind: ErrorKind) -> Self {
        AsmError::Source { line, kind }
    }

    /// The instruction-level cause, for errors that have exactly one.
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            AsmError::Source { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::Source { line, .. } => Some(*line),
            _ => None,
        }
    }
}
