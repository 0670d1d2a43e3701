//! File and stdout connector.
//!
//! Writes go straight to the file, which may also be a printer device node
//! such as `/dev/usb/lp0`. [`finalize`](Connector::finalize) flushes and
//! closes the handle.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tspl_toolchain_core::{Connector, EncoderId};

use crate::{PrintError, PrinterConfig, trace_payload};

#[derive(Debug)]
enum Sink {
    File(File),
    Stdout,
}

/// Connector writing to a file, device node, or standard output.
#[derive(Debug)]
pub struct FileConnector {
    sink: Option<Sink>,
    path: Option<PathBuf>,
    config: PrinterConfig,
    owner: Option<EncoderId>,
}

impl FileConnector {
    /// Create (or truncate) `path` and write the job into it.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::OpenFailed`] if the file cannot be created.
    pub fn create(path: impl AsRef<Path>, config: PrinterConfig) -> Result<Self, PrintError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| PrintError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "output file opened");
        Ok(Self {
            sink: Some(Sink::File(file)),
            path: Some(path.to_path_buf()),
            config,
            owner: None,
        })
    }

    /// Write the job to standard output.
    pub fn stdout(config: PrinterConfig) -> Self {
        Self {
            sink: Some(Sink::Stdout),
            path: None,
            config,
            owner: None,
        }
    }

    /// The output path, or `None` for stdout.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether `finalize` has been called.
    pub fn is_finalized(&self) -> bool {
        self.sink.is_none()
    }
}

impl Connector for FileConnector {
    type Error = PrintError;

    fn write(&mut self, payload: &[u8]) -> Result<(), PrintError> {
        let sink = self.sink.as_mut().ok_or(PrintError::Finalized)?;
        trace_payload(&self.config, "file", payload);
        let result = match sink {
            Sink::File(f) => f.write_all(payload),
            Sink::Stdout => io::stdout().lock().write_all(payload),
        };
        result.map_err(PrintError::WriteFailed)
    }

    fn finalize(&mut self) -> Result<(), PrintError> {
        let sink = self.sink.take().ok_or(PrintError::Finalized)?;
        let result = match sink {
            Sink::File(mut f) => f.flush().and_then(|()| f.sync_all()),
            Sink::Stdout => io::stdout().lock().flush(),
        };
        result.map_err(PrintError::WriteFailed)
    }

    fn owner(&self) -> Option<EncoderId> {
        self.owner
    }

    fn set_owner(&mut self, owner: Option<EncoderId>) {
        self.owner = owner;
    }
}
