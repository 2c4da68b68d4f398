use core::fmt;

/// Errors returned by [`TouchSensor`](crate::TouchSensor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// `init` was called on a sensor that is already initialized.
    AlreadyInitialized,
    /// No transport has been attached.
    MissingDependency,
    /// The resolution or the gains are not positive.
    InvalidConfiguration,
    /// The transport reported a failure.
    Communication(E),
    /// Both pressure taps read the same value during the handshake.
    HandshakeFailure,
    /// `read` was called before a successful `init`.
    NotInitialized,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AlreadyInitialized => write!(f, "touch sensor is already initialized"),
            Error::MissingDependency => write!(f, "no transport attached"),
            Error::InvalidConfiguration => write!(f, "invalid resolution or gain"),
            Error::Communication(error) => write!(f, "transfer failed: {:?}", error),
            Error::HandshakeFailure => write!(f, "touch controller did not respond"),
            Error::NotInitialized => write!(f, "touch sensor is not initialized"),
        }
    }
}
