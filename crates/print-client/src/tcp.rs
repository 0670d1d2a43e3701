//! Raw TCP connector (port 9100 / JetDirect / RAW).
//!
//! Provides [`TcpConnector`], a synchronous, write-only TCP transport.

use std::io::{self, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use socket2::{SockRef, TcpKeepalive};
use tspl_toolchain_core::{Connector, EncoderId};

use crate::addr::resolve_printer_addr;
use crate::{PrintError, PrinterConfig, trace_payload};

/// A synchronous TCP connection to a label printer's raw port.
///
/// Each write is flushed immediately. [`finalize`](Connector::finalize)
/// shuts down the write half so the printer sees end-of-job; later writes
/// fail with [`PrintError::Finalized`].
#[derive(Debug)]
pub struct TcpConnector {
    stream: TcpStream,
    config: PrinterConfig,
    addr: SocketAddr,
    finalized: bool,
    owner: Option<EncoderId>,
}

impl TcpConnector {
    /// Connect to a printer at the given address.
    ///
    /// The address can be any format accepted by [`resolve_printer_addr`]:
    /// `IP`, `IP:PORT`, `hostname`, `hostname:PORT`. Port defaults to 9100.
    ///
    /// Configures the socket with TCP_NODELAY, TCP keepalive (60s interval),
    /// and the write timeout from [`PrinterConfig`].
    ///
    /// # Errors
    ///
    /// Returns an address, configuration, or connection error.
    pub fn connect(addr: &str, config: PrinterConfig) -> Result<Self, PrintError> {
        config.validate()?;
        let socket_addr = resolve_printer_addr(addr)?;
        let stream = open_stream(&socket_addr, &config)?;
        tracing::debug!(%socket_addr, "connected to printer");

        Ok(Self {
            stream,
            config,
            addr: socket_addr,
            finalized: false,
            owner: None,
        })
    }

    /// Return the resolved socket address this connector is connected to.
    pub fn remote_addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Connector for TcpConnector {
    type Error = PrintError;

    fn write(&mut self, payload: &[u8]) -> Result<(), PrintError> {
        if self.finalized {
            return Err(PrintError::Finalized);
        }
        trace_payload(&self.config, "tcp", payload);
        self.stream
            .write_all(payload)
            .map_err(PrintError::WriteFailed)?;
        self.stream.flush().map_err(PrintError::WriteFailed)
    }

    fn finalize(&mut self) -> Result<(), PrintError> {
        if self.finalized {
            return Err(PrintError::Finalized);
        }
        self.finalized = true;
        self.stream.flush().map_err(PrintError::WriteFailed)?;
        self.stream
            .shutdown(Shutdown::Write)
            .map_err(PrintError::WriteFailed)?;
        tracing::debug!(addr = %self.addr, "job finalized");
        Ok(())
    }

    fn owner(&self) -> Option<EncoderId> {
        self.owner
    }

    fn set_owner(&mut self, owner: Option<EncoderId>) {
        self.owner = owner;
    }
}

impl Drop for TcpConnector {
    fn drop(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

// ── Helpers ────────────────────────────────────────────────────────────

/// Open a TCP connection and configure the stream (nodelay, keepalive, timeout).
fn open_stream(addr: &SocketAddr, config: &PrinterConfig) -> Result<TcpStream, PrintError> {
    let stream = TcpStream::connect_timeout(addr, config.timeouts.connect).map_err(|e| {
        match e.kind() {
            io::ErrorKind::ConnectionRefused => PrintError::ConnectionRefused {
                addr: addr.to_string(),
                source: e,
            },
            io::ErrorKind::TimedOut => PrintError::ConnectionTimeout {
                addr: addr.to_string(),
                timeout: config.timeouts.connect,
                source: e,
            },
            _ => PrintError::ConnectionFailed {
                addr: addr.to_string(),
                source: e,
            },
        }
    })?;

    configure_stream(&stream, config).map_err(|e| PrintError::ConnectionFailed {
        addr: addr.to_string(),
        source: e,
    })?;
    Ok(stream)
}

/// Configure TCP_NODELAY, keepalive, and the write timeout on a stream.
fn configure_stream(stream: &TcpStream, config: &PrinterConfig) -> io::Result<()> {
    // Commands are small; don't let Nagle hold them back.
    stream.set_nodelay(true)?;
    configure_keepalive(stream, Duration::from_secs(60))?;
    stream.set_write_timeout(Some(config.timeouts.write))?;
    Ok(())
}

/// Configure TCP keepalive on a `TcpStream` via `socket2`.
fn configure_keepalive(stream: &TcpStream, interval: Duration) -> io::Result<()> {
    let keepalive = TcpKeepalive::new().with_time(interval);

    #[cfg(any(target_os = "linux", target_os = "macos"))]
    let keepalive = keepalive.with_interval(interval);

    SockRef::from(stream).set_tcp_keepalive(&keepalive)?;
    Ok(())
}
