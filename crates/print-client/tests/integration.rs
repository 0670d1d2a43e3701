//! Integration tests for the TCP connector against a mock TCP server.

use std::io::Read;
use std::net::{SocketAddr, TcpListener};
use std::thread;
use std::time::Duration;

use tspl_toolchain_core::{Barcode, Connector, Encoder, Text, TsplError, Unit};
use tspl_toolchain_print_client::{PrintError, PrinterConfig, TcpConnector};

// ── Mock printer server ─────────────────────────────────────────────────

/// A mock printer that runs on a background thread, accepts one connection
/// and records everything until the client closes its write half.
struct MockPrinterServer {
    addr: SocketAddr,
    handle: Option<thread::JoinHandle<Vec<u8>>>,
}

impl MockPrinterServer {
    fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream
                .set_read_timeout(Some(Duration::from_secs(5)))
                .unwrap();

            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                match stream.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => received.extend_from_slice(&buf[..n]),
                    Err(_) => break,
                }
            }
            received
        });

        Self {
            addr,
            handle: Some(handle),
        }
    }

    /// Wait for the mock server thread to finish and return the received data.
    fn received_data(mut self) -> Vec<u8> {
        self.handle.take().unwrap().join().unwrap()
    }
}

fn fast_config() -> PrinterConfig {
    let mut cfg = PrinterConfig::default();
    cfg.timeouts.connect = Duration::from_secs(2);
    cfg.timeouts.write = Duration::from_secs(2);
    cfg
}

// ── Tests ────────────────────────────────────────────────────────────────

#[test]
fn encoder_job_reaches_printer() {
    let server = MockPrinterServer::start();
    let addr = format!("127.0.0.1:{}", server.addr.port());

    let mut conn = TcpConnector::connect(&addr, fast_config()).unwrap();
    let mut enc = Encoder::new(&mut conn, 38, 20, Unit::Millimeters).unwrap();
    enc.set_text(&Text::new("Rs. 750").at(300, 68).scale(12, 12))
        .unwrap();
    enc.set_barcode(&Barcode::new("2024123030").at(33, 304).height(20).widths(2, 4))
        .unwrap();
    enc.set_print(1, 1).unwrap();
    enc.close().unwrap();
    drop(enc);
    drop(conn);

    let received = String::from_utf8(server.received_data()).unwrap();
    assert_eq!(
        received,
        "SIZE 38 mm 20 mm\r\n\
         DIRECTION 1\r\n\
         CLS\r\n\
         TEXT 300,68,\"0\",0,12,12,1,\"Rs. 750\"\r\n\
         BARCODE 33,304,\"128\",20,0,0,2,4, \"2024123030\"\r\n\
         PRINT 1,1\r\n\
         EOP"
    );
}

#[test]
fn finalize_ends_the_stream() {
    let server = MockPrinterServer::start();
    let addr = format!("127.0.0.1:{}", server.addr.port());

    let mut conn = TcpConnector::connect(&addr, fast_config()).unwrap();
    conn.write(b"CLS\r\n").unwrap();
    conn.finalize().unwrap();

    // The server sees EOF after finalize even though `conn` is still alive.
    let received = server.received_data();
    assert_eq!(received, b"CLS\r\n");

    assert!(matches!(conn.write(b"CLS\r\n"), Err(PrintError::Finalized)));
}

#[test]
fn connector_errors_pass_through_encoder() {
    let server = MockPrinterServer::start();
    let addr = format!("127.0.0.1:{}", server.addr.port());

    let mut conn = TcpConnector::connect(&addr, fast_config()).unwrap();
    let mut enc = Encoder::new(&mut conn, 4, 3, Unit::Native).unwrap();
    enc.close().unwrap();

    let err = enc.set_print(1, 1).unwrap_err();
    assert!(matches!(err, TsplError::Connector(PrintError::Finalized)));
    drop(enc);
    drop(conn);
    let _ = server.received_data();
}

#[test]
fn invalid_parameter_sends_nothing() {
    let server = MockPrinterServer::start();
    let addr = format!("127.0.0.1:{}", server.addr.port());

    let mut conn = TcpConnector::connect(&addr, fast_config()).unwrap();
    let err = Encoder::new(&mut conn, 0, 3, Unit::Native).unwrap_err();
    assert!(err.is_caller_error());
    drop(conn);

    assert!(server.received_data().is_empty());
}

#[test]
fn connect_to_nonexistent_server_fails() {
    // Use a port that's very likely not listening
    let result = TcpConnector::connect("127.0.0.1:19999", fast_config());
    match result {
        Err(PrintError::ConnectionRefused { .. } | PrintError::ConnectionFailed { .. }) => {
            // expected
        }
        Err(other) => panic!("expected connection error, got: {other:?}"),
        Ok(_) => panic!("expected connection error, but connect succeeded"),
    }
}

#[test]
fn zero_timeout_is_rejected_before_connecting() {
    let mut cfg = fast_config();
    cfg.timeouts.connect = Duration::ZERO;
    let result = TcpConnector::connect("127.0.0.1:9", cfg);
    assert!(matches!(result, Err(PrintError::InvalidConfig(_))));
}

#[test]
fn remote_addr_returns_connected_address() {
    let server = MockPrinterServer::start();
    let addr = format!("127.0.0.1:{}", server.addr.port());

    let conn = TcpConnector::connect(&addr, fast_config()).unwrap();
    assert_eq!(conn.remote_addr(), server.addr);
    drop(conn);
    let _ = server.received_data();
}

#[test]
fn send_large_payload() {
    let server = MockPrinterServer::start();
    let addr = format!("127.0.0.1:{}", server.addr.port());

    let long_text = "X".repeat(100_000);
    let mut conn = TcpConnector::connect(&addr, fast_config()).unwrap();
    let mut enc = Encoder::new(&mut conn, 100, 100, Unit::Millimeters).unwrap();
    enc.set_text(&Text::new(&long_text)).unwrap();
    drop(enc);
    drop(conn);

    let received = server.received_data();
    assert!(received.len() > long_text.len());
    assert!(received.ends_with(b"\"\r\n"));
}
