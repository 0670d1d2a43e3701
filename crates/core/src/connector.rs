//! The contract between the encoder and whatever delivers its bytes.
//!
//! A [`Connector`] accepts payloads in order and commits a job on
//! [`finalize`](Connector::finalize). It also remembers which encoder, if
//! any, currently owns it. That back-reference is a plain [`EncoderId`], not
//! a pointer, so neither side keeps the other alive.

use std::cell::RefCell;
use std::fmt;
use std::num::NonZeroU64;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

// ── Encoder identity ────────────────────────────────────────────────────

/// Process-unique identity of an [`Encoder`](crate::Encoder) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncoderId(NonZeroU64);

impl EncoderId {
    /// Allocate a fresh id. Ids are never reused within a process.
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        let raw = NEXT.fetch_add(1, Ordering::Relaxed);
        // The counter starts at 1 and would need 2^64 encoders to wrap.
        Self(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }
}

impl fmt::Display for EncoderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encoder#{}", self.0)
    }
}

// ── Trait ───────────────────────────────────────────────────────────────

/// Deliver encoded commands to a printer, file, or buffer.
pub trait Connector {
    /// Error surfaced by this connector. The encoder propagates it unchanged.
    type Error;

    /// Append `payload` to the outgoing job. Call order must be preserved.
    fn write(&mut self, payload: &[u8]) -> Result<(), Self::Error>;

    /// Commit the job. Some connectors deliver nothing until this is called.
    fn finalize(&mut self) -> Result<(), Self::Error>;

    /// The encoder currently bound to this connector, if any.
    fn owner(&self) -> Option<EncoderId>;

    /// Record (or clear) the encoder bound to this connector.
    fn set_owner(&mut self, owner: Option<EncoderId>);
}

impl<C: Connector + ?Sized> Connector for &mut C {
    type Error = C::Error;

    fn write(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        (**self).write(payload)
    }

    fn finalize(&mut self) -> Result<(), Self::Error> {
        (**self).finalize()
    }

    fn owner(&self) -> Option<EncoderId> {
        (**self).owner()
    }

    fn set_owner(&mut self, owner: Option<EncoderId>) {
        (**self).set_owner(owner);
    }
}

/// Shared handle: several encoders may hold clones, but only one can be
/// bound to the underlying connector at a time.
impl<C: Connector + ?Sized> Connector for Rc<RefCell<C>> {
    type Error = C::Error;

    fn write(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        self.borrow_mut().write(payload)
    }

    fn finalize(&mut self) -> Result<(), Self::Error> {
        self.borrow_mut().finalize()
    }

    fn owner(&self) -> Option<EncoderId> {
        self.borrow().owner()
    }

    fn set_owner(&mut self, owner: Option<EncoderId>) {
        self.borrow_mut().set_owner(owner);
    }
}

// ── In-memory connector ─────────────────────────────────────────────────

/// The connector was already finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("connector already finalized")]
pub struct ConnectorClosed;

/// Connector that keeps everything written to it in memory.
///
/// Each `write` call is kept as a separate chunk so callers can inspect
/// exactly how the output was split.
#[derive(Debug, Default)]
pub struct MemoryConnector {
    chunks: Vec<Vec<u8>>,
    finalized: bool,
    owner: Option<EncoderId>,
}

impl MemoryConnector {
    /// An empty, open connector.
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes, in order.
    pub fn chunks(&self) -> &[Vec<u8>] {
        &self.chunks
    }

    /// Concatenation of all writes.
    pub fn data(&self) -> Vec<u8> {
        self.chunks.concat()
    }

    /// Concatenation of all writes, lossily decoded as UTF-8.
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.data()).into_owned()
    }

    /// Whether `finalize` has been called.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

impl Connector for MemoryConnector {
    type Error = ConnectorClosed;

    fn write(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        if self.finalized {
            return Err(ConnectorClosed);
        }
        self.chunks.push(payload.to_vec());
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), Self::Error> {
        if self.finalized {
            return Err(ConnectorClosed);
        }
        self.finalized = true;
        Ok(())
    }

    fn owner(&self) -> Option<EncoderId> {
        self.owner
    }

    fn set_owner(&mut self, owner: Option<EncoderId>) {
        self.owner = owner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = EncoderId::next();
        let b = EncoderId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn memory_connector_keeps_chunks_in_order() {
        let mut c = MemoryConnector::new();
        c.write(b"SIZE 4 3\r\n").unwrap();
        c.write(b"EOP").unwrap();
        assert_eq!(c.chunks().len(), 2);
        assert_eq!(c.as_string(), "SIZE 4 3\r\nEOP");
    }

    #[test]
    fn memory_connector_rejects_writes_after_finalize() {
        let mut c = MemoryConnector::new();
        c.finalize().unwrap();
        assert!(c.is_finalized());
        assert_eq!(c.write(b"CLS\r\n"), Err(ConnectorClosed));
        assert_eq!(c.finalize(), Err(ConnectorClosed));
    }

    fn write_and_claim<C: Connector>(mut c: C, id: EncoderId) -> Option<EncoderId>
    where
        C::Error: fmt::Debug,
    {
        c.write(b"CLS\r\n").unwrap();
        c.set_owner(Some(id));
        c.owner()
    }

    #[test]
    fn borrowed_connector_forwards() {
        let mut c = MemoryConnector::new();
        let id = EncoderId::next();
        assert_eq!(write_and_claim(&mut c, id), Some(id));
        assert_eq!(c.as_string(), "CLS\r\n");
        assert_eq!(c.owner(), Some(id));
    }

    #[test]
    fn shared_connector_forwards() {
        let shared = Rc::new(RefCell::new(MemoryConnector::new()));
        let mut handle = Rc::clone(&shared);
        handle.write(b"CLS\r\n").unwrap();
        handle.finalize().unwrap();
        assert!(shared.borrow().is_finalized());
        assert_eq!(shared.borrow().as_string(), "CLS\r\n");
    }
}
