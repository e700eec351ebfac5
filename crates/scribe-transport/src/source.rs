//! Packet source abstraction

use std::collections::VecDeque;

use bytes::Bytes;

use scribe_core::ScribeResult;

/// A blocking source of raw transfers.
///
/// Transfers are returned as read, without any length check; deciding whether
/// a transfer is a valid packet belongs to the decoder. A hardware backend
/// (the reference arm reports on bulk IN endpoint 0x81) implements this trait.
pub trait PacketSource {
    /// Block until the next transfer. `Ok(None)` once the source is exhausted.
    fn read_packet(&mut self) -> ScribeResult<Option<Bytes>>;

    /// Human-readable name for logs
    fn describe(&self) -> String;
}

impl<S: PacketSource + ?Sized> PacketSource for Box<S> {
    fn read_packet(&mut self) -> ScribeResult<Option<Bytes>> {
        (**self).read_packet()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Queue of transfers served in order
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    queue: VecDeque<Bytes>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transfer: impl Into<Bytes>) {
        self.queue.push_back(transfer.into());
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<T: Into<Bytes>> FromIterator<T> for MemorySource {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        MemorySource {
            queue: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl PacketSource for MemorySource {
    fn read_packet(&mut self) -> ScribeResult<Option<Bytes>> {
        Ok(self.queue.pop_front())
    }

    fn describe(&self) -> String {
        format!("memory ({} queued)", self.queue.len())
    }
}
