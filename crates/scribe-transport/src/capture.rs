//! Capture files
//!
//! A capture is a flat sequence of records:
//! - Bytes 0-1: transfer length N (u16, LE)
//! - Bytes 2..2+N: the transfer, verbatim
//!
//! Transfers are stored whatever their length, so a capture can reproduce
//! short or oversized reads as well as valid packets.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use bytes::Bytes;

use scribe_core::{ScribeError, ScribeResult};

use crate::PacketSource;

/// Size of the per-record length prefix
pub const RECORD_PREFIX_SIZE: usize = 2;

/// Largest transfer a record can hold
pub const MAX_RECORD_LEN: usize = u16::MAX as usize;

fn io_error(e: std::io::Error) -> ScribeError {
    ScribeError::Transport(e.to_string())
}

/// Appends transfers to a capture
pub struct CaptureWriter<W: Write> {
    writer: BufWriter<W>,
    records: u64,
}

impl CaptureWriter<File> {
    /// Create (or truncate) a capture file
    pub fn create(path: impl AsRef<Path>) -> ScribeResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(io_error)?;
        tracing::info!("Recording capture to {}", path.display());
        Ok(Self::new(file))
    }
}

impl<W: Write> CaptureWriter<W> {
    pub fn new(writer: W) -> Self {
        CaptureWriter {
            writer: BufWriter::new(writer),
            records: 0,
        }
    }

    /// Append one transfer
    pub fn write_packet(&mut self, transfer: &[u8]) -> ScribeResult<()> {
        if transfer.len() > MAX_RECORD_LEN {
            return Err(ScribeError::Capture(format!(
                "Transfer too large: {} > {}",
                transfer.len(),
                MAX_RECORD_LEN
            )));
        }

        let len = transfer.len() as u16;
        self.writer.write_all(&len.to_le_bytes()).map_err(io_error)?;
        self.writer.write_all(transfer).map_err(io_error)?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn flush(&mut self) -> ScribeResult<()> {
        self.writer.flush().map_err(io_error)
    }

    /// Flush and return the underlying writer
    pub fn finish(self) -> ScribeResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| ScribeError::Transport(e.error().to_string()))
    }
}

/// Replays the transfers of a capture in recorded order
pub struct ReplaySource<R: Read> {
    reader: BufReader<R>,
    label: String,
    records: u64,
}

impl ReplaySource<File> {
    /// Open a capture file
    pub fn open(path: impl AsRef<Path>) -> ScribeResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(io_error)?;
        tracing::info!("Replaying capture {}", path.display());
        Ok(Self::from_reader(file, path.display().to_string()))
    }
}

impl<R: Read> ReplaySource<R> {
    pub fn from_reader(reader: R, label: impl Into<String>) -> Self {
        ReplaySource {
            reader: BufReader::new(reader),
            label: label.into(),
            records: 0,
        }
    }

    /// Number of records replayed so far
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Read the length prefix; `None` on a clean end of capture
    fn read_prefix(&mut self) -> ScribeResult<Option<usize>> {
        let mut prefix = [0u8; RECORD_PREFIX_SIZE];
        let mut filled = 0;

        while filled < RECORD_PREFIX_SIZE {
            match self.reader.read(&mut prefix[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => {
                    return Err(ScribeError::Capture(format!(
                        "Truncated length prefix after record {}",
                        self.records
                    )))
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(io_error(e)),
            }
        }

        Ok(Some(u16::from_le_bytes(prefix) as usize))
    }
}

impl<R: Read> PacketSource for ReplaySource<R> {
    fn read_packet(&mut self) -> ScribeResult<Option<Bytes>> {
        let Some(len) = self.read_prefix()? else {
            tracing::debug!("Capture {} exhausted after {} records", self.label, self.records);
            return Ok(None);
        };

        let mut transfer = vec![0u8; len];
        self.reader.read_exact(&mut transfer).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => ScribeError::Capture(format!(
                "Record {} truncated: expected {} bytes",
                self.records, len
            )),
            _ => io_error(e),
        })?;

        self.records += 1;
        Ok(Some(Bytes::from(transfer)))
    }

    fn describe(&self) -> String {
        format!("capture {}", self.label)
    }
}
