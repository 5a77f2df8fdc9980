use crate::commands::EcStatus;

/// Result type used throughout the crate.
pub type Result<T, E = EcError> = std::result::Result<T, E>;

/// Represents an error raised while talking to the EC or serving an attribute.
///
/// Every variant maps onto the negative errno reported back to the attribute
/// framework, see [`EcError::code`]:
///
/// ```
/// use ec_sysfs::{EcError, EcStatus};
///
/// let err = EcError::Device(EcStatus::InvalidCommand);
/// assert_eq!(err.code(), -libc::EOPNOTSUPP);
/// ```
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcError {
    /// The transient command buffer could not be allocated.
    #[error("out of memory allocating command buffer")]
    OutOfMemory,
    /// The transport failed to move the command, carrying its negative status.
    #[error("transport failure (status {0})")]
    Transport(i32),
    /// The transport succeeded but the EC reported a failure result.
    #[error("EC reported {0:?}")]
    Device(EcStatus),
    /// The EC returned a different number of bytes than the response layout holds.
    #[error("response size mismatch (expected {expected} bytes, got {actual})")]
    ResponseSize {
        /// Bytes the response layout holds.
        expected: usize,
        /// Bytes the transport reported.
        actual: usize,
    },
    /// User input could not be parsed, or named no action.
    #[error("invalid argument")]
    InvalidArgument,
    /// A numeric input does not fit the target integer type.
    #[error("value out of range")]
    OutOfRange,
    /// The attribute produced no output.
    #[error("I/O error")]
    Io,
    /// The attribute is read-only.
    #[error("permission denied")]
    AccessDenied,
    /// No attribute by that name is shown on this device.
    #[error("no such attribute")]
    NotFound,
    /// The attribute node rejected an attribute file, carrying its status.
    #[error("failed to create attribute (status {0})")]
    Attach(i32),
}

impl EcError {
    /// Get the negative errno for this error.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            EcError::OutOfMemory => -libc::ENOMEM,
            EcError::Transport(status) | EcError::Attach(status) => *status,
            EcError::Device(status) => status.errno(),
            EcError::ResponseSize { .. } => -libc::EPROTO,
            EcError::InvalidArgument => -libc::EINVAL,
            EcError::OutOfRange => -libc::ERANGE,
            EcError::Io => -libc::EIO,
            EcError::AccessDenied => -libc::EACCES,
            EcError::NotFound => -libc::ENOENT,
        }
    }
}

/// Convert a raw transport status into a [`Result`].
///
/// Non-negative statuses are byte counts, negative ones are transport failures.
macro_rules! try_xfer {
    ($expr:expr) => {
        match $expr {
            status if status < 0 => Err(crate::error::EcError::Transport(status)),
            // non-negative, so the cast is lossless
            count => Ok(count as usize),
        }
    };
}

pub(crate) use try_xfer;
