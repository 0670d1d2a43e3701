//! Typed error types for the print client.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Connector failures, categorized by where they happened.
///
/// These surface unchanged through
/// [`TsplError::Connector`](tspl_toolchain_core::TsplError::Connector).
/// Nothing in this crate retries; [`PrintError::is_transient()`] only tells
/// the caller whether trying again could help.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    // -- Connection --
    /// The printer actively refused the connection (e.g. port not open).
    #[error("connection refused: {addr}")]
    ConnectionRefused {
        /// The address that was attempted.
        addr: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// TCP connect timed out before the printer responded.
    #[error("connection timed out: {addr} ({timeout:?})")]
    ConnectionTimeout {
        /// The address that was attempted.
        addr: String,
        /// The configured timeout that elapsed.
        timeout: Duration,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Connection failed for a reason other than refusal or timeout.
    #[error("connection failed: {addr}")]
    ConnectionFailed {
        /// The address that was attempted.
        addr: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    // -- Address --
    /// DNS resolution found no addresses for the given hostname.
    #[error("no address found for hostname: {0}")]
    NoAddressFound(String),

    // -- Files --
    /// The output file or device node could not be opened.
    #[error("cannot open {}", path.display())]
    OpenFailed {
        /// The path that was attempted.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    // -- I/O --
    /// Writing data to the printer failed.
    #[error("write failed: {0}")]
    WriteFailed(#[source] io::Error),

    /// The connector was already finalized; the job is closed.
    #[error("connector already finalized")]
    Finalized,

    // -- Serial-specific --
    /// A serial port transport error occurred.
    #[error("serial port error: {0}")]
    SerialError(String),

    // -- Configuration --
    /// An invalid configuration was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PrintError {
    /// Returns `true` if the failure is likely transient (a later attempt
    /// on a fresh connection might succeed).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PrintError::ConnectionTimeout { .. } | PrintError::WriteFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors() {
        assert!(
            PrintError::ConnectionTimeout {
                addr: "x".into(),
                timeout: Duration::from_secs(1),
                source: io::Error::new(io::ErrorKind::TimedOut, "test"),
            }
            .is_transient()
        );
        assert!(
            PrintError::WriteFailed(io::Error::new(io::ErrorKind::BrokenPipe, "test"))
                .is_transient()
        );
    }

    #[test]
    fn permanent_errors() {
        assert!(
            !PrintError::ConnectionRefused {
                addr: "x".into(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "test"),
            }
            .is_transient()
        );
        assert!(!PrintError::NoAddressFound("x".into()).is_transient());
        assert!(
            !PrintError::OpenFailed {
                path: "/nope".into(),
                source: io::Error::new(io::ErrorKind::NotFound, "test"),
            }
            .is_transient()
        );
        assert!(!PrintError::Finalized.is_transient());
        assert!(!PrintError::SerialError("x".into()).is_transient());
        assert!(!PrintError::InvalidConfig("x".into()).is_transient());
    }

    #[test]
    fn open_failed_names_path() {
        let err = PrintError::OpenFailed {
            path: "/dev/usb/lp9".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "test"),
        };
        assert_eq!(err.to_string(), "cannot open /dev/usb/lp9");
    }
}
