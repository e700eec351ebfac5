//! Encoder packet decoding
//!
//! A packet is exactly 33 bytes. The five axis counts are signed 32-bit
//! little-endian integers at byte offsets 2, 6, 10, 14 and 18. The bytes
//! around them carry device framing whose meaning is not defined here; they
//! are neither validated nor interpreted, and no checksum is checked.

use bytes::Bytes;

use scribe_core::{EncoderReading, ScribeError, ScribeResult, AXIS_COUNT};

/// Packet size in bytes
pub const PACKET_SIZE: usize = 33;

/// Size of one encoder count on the wire
pub const COUNT_SIZE: usize = 4;

/// Byte offset of each axis count, in axis order
pub const COUNT_OFFSETS: [usize; AXIS_COUNT] = [2, 6, 10, 14, 18];

/// Stateless decoder for encoder packets
#[derive(Clone, Copy, Debug, Default)]
pub struct PacketDecoder;

impl PacketDecoder {
    /// Decode the five encoder counts from a raw transfer
    pub fn decode(buf: &[u8]) -> ScribeResult<EncoderReading> {
        check_len(buf.len())?;
        Ok(read_counts(buf))
    }

    /// Write the counts of `reading` at their wire offsets.
    ///
    /// Bytes outside the count windows are left untouched.
    pub fn encode(reading: &EncoderReading, buf: &mut [u8]) -> ScribeResult<()> {
        check_len(buf.len())?;
        write_counts(reading, buf);
        Ok(())
    }

    /// Encode into a fresh zero-framed packet
    pub fn to_bytes(reading: &EncoderReading) -> [u8; PACKET_SIZE] {
        let mut buf = [0u8; PACKET_SIZE];
        write_counts(reading, &mut buf);
        buf
    }
}

#[inline]
fn check_len(actual: usize) -> ScribeResult<()> {
    if actual != PACKET_SIZE {
        return Err(ScribeError::InvalidPacketLength {
            expected: PACKET_SIZE,
            actual,
        });
    }
    Ok(())
}

// Caller guarantees buf.len() == PACKET_SIZE
#[inline]
fn read_counts(buf: &[u8]) -> EncoderReading {
    EncoderReading(COUNT_OFFSETS.map(|o| {
        i32::from_le_bytes([buf[o], buf[o + 1], buf[o + 2], buf[o + 3]])
    }))
}

#[inline]
fn write_counts(reading: &EncoderReading, buf: &mut [u8]) {
    for (&offset, count) in COUNT_OFFSETS.iter().zip(reading.counts()) {
        buf[offset..offset + COUNT_SIZE].copy_from_slice(&count.to_le_bytes());
    }
}

/// A length-checked encoder packet
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawPacket(Bytes);

impl RawPacket {
    /// Wrap a transfer, rejecting any length other than [`PACKET_SIZE`]
    pub fn new(bytes: impl Into<Bytes>) -> ScribeResult<Self> {
        let bytes = bytes.into();
        check_len(bytes.len())?;
        Ok(RawPacket(bytes))
    }

    /// Build a packet carrying `reading` with zeroed framing bytes
    pub fn from_reading(reading: &EncoderReading) -> Self {
        RawPacket(Bytes::copy_from_slice(&PacketDecoder::to_bytes(reading)))
    }

    /// Decoded encoder counts. Cannot fail: the length was checked on construction.
    pub fn reading(&self) -> EncoderReading {
        read_counts(&self.0)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl TryFrom<Bytes> for RawPacket {
    type Error = ScribeError;

    fn try_from(bytes: Bytes) -> ScribeResult<Self> {
        RawPacket::new(bytes)
    }
}

impl TryFrom<&[u8]> for RawPacket {
    type Error = ScribeError;

    fn try_from(buf: &[u8]) -> ScribeResult<Self> {
        RawPacket::new(Bytes::copy_from_slice(buf))
    }
}

impl AsRef<[u8]> for RawPacket {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
