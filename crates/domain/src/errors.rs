use thiserror::Error;

use crate::error_record::ErrorRecord;

/// Failures of the pool builder.
///
/// Each variant carries a stable numeric code (see [`PoolError::code`]) so the
/// failure can be mirrored into an [`ErrorRecord`] for callers that inspect
/// codes rather than types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Null node name")]
    InvalidHostname,

    #[error("getaddrinfo failed")]
    Resolution { reason: String },

    #[error("inet_ntop returned null pointer")]
    MeasureFormat { reason: String },

    #[error("pool allocation failed")]
    PoolAllocation { bytes: usize },

    #[error("pool->ip_iu allocation failed")]
    RecordAllocation { bytes: usize },

    #[error("inet_ntop returned null pointer")]
    FillFormat { reason: String },

    #[error("address count exceeds family counter")]
    CounterOverflow { family: &'static str },
}

impl PoolError {
    pub fn code(&self) -> i32 {
        match self {
            PoolError::InvalidHostname => 1,
            PoolError::Resolution { .. } => 2,
            PoolError::MeasureFormat { .. } => 3,
            PoolError::PoolAllocation { .. } => 4,
            PoolError::RecordAllocation { .. } => 5,
            PoolError::FillFormat { .. } => 6,
            PoolError::CounterOverflow { .. } => 7,
        }
    }

    /// Underlying cause reported by the collaborator, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            PoolError::Resolution { reason }
            | PoolError::MeasureFormat { reason }
            | PoolError::FillFormat { reason } => Some(reason),
            _ => None,
        }
    }

    /// Mirror this failure into a caller-owned record. Last writer wins.
    pub fn report_into(&self, target: Option<&mut ErrorRecord>) {
        crate::error_record::report(target, self.code(), Some(&self.to_string()));
    }
}

impl From<&PoolError> for ErrorRecord {
    fn from(err: &PoolError) -> Self {
        let mut record = ErrorRecord::default();
        err.report_into(Some(&mut record));
        record
    }
}
