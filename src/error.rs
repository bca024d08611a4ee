use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised when the engine is driven incorrectly, plus the
/// orchestration-level failure outcomes.
///
/// Propagation failure and search failure are *not* errors: they are
/// reported as ordinary results (`success == false`) and recovered by
/// backtracking. Everything in this enum signals either a bug in the
/// calling code (construction, value and protocol variants) or a final
/// orchestration outcome (`NoSolution` and friends).
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("delta record mismatch between {left} and {right}")]
    RecordMismatch { left: String, right: String },

    #[error("duplicate variable {name}")]
    DuplicateVariable { name: String },

    #[error("unknown variable {name}")]
    UnknownVariable { name: String },

    #[error("value {value} is not in the domain of {variable}")]
    ValueNotInDomain { variable: String, value: String },

    #[error("value {value} is not a member of the domain")]
    AbsentDomainValue { value: String },

    #[error("cannot remove {value} from {variable} while it is assigned")]
    RemoveAssigned { variable: String, value: String },

    #[error("domain operation on variable {variable} failed")]
    DomainOperation {
        variable: String,
        #[source]
        source: Box<Error>,
    },

    #[error("no deltas to revert")]
    RevertUnderflow,

    #[error("checkpoint {checkpoint} is beyond the record depth {depth}")]
    StaleCheckpoint { checkpoint: usize, depth: usize },

    #[error("no solution found")]
    NoSolution,

    #[error("solved state is invalid")]
    InvalidSolution,

    #[error("solved state does not satisfy the problem")]
    UnsatisfiedSolution,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<SolverError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<SolverError> for Error {
    fn from(inner: SolverError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}

impl Error {
    /// The underlying [`SolverError`], for matching in callers and tests.
    pub fn solver_error(&self) -> &SolverError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}
