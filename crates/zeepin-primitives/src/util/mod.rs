//! Utility types for binary serialization.
//!
//! Provides CompactSize VarInt encoding/decoding, the `ByteReader` and
//! `ByteWriter` cursors used by the transaction and program codecs, and
//! hex helpers (`reverse_hex`, `hex_to_bytes`) shared across the SDK.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A CompactSize variable-length integer.
///
/// Used as the length prefix for payload code, invocation and verification
/// scripts, and the signature count when reading a transaction. The encoding
/// uses 1, 3, 5, or 9 bytes depending on the magnitude of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Decode a VarInt from a byte slice.
    ///
    /// # Arguments
    /// * `data` - Byte slice starting with a VarInt encoding.
    ///
    /// # Returns
    /// A tuple of `(VarInt, bytes_consumed)`, or `TruncatedInput` if the slice
    /// ends before the encoding does.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let mut reader = ByteReader::new(data);
        let value = reader.read_varint()?;
        Ok((value, reader.position()))
    }

    /// Return the wire-format byte length of this VarInt.
    ///
    /// # Returns
    /// 1, 3, 5, or 9 depending on the value.
    pub fn length(&self) -> usize {
        if self.0 < 0xfd {
            1
        } else if self.0 <= 0xffff {
            3
        } else if self.0 <= 0xffff_ffff {
            5
        } else {
            9
        }
    }

    /// Encode the VarInt into a new byte vector.
    ///
    /// # Returns
    /// A `Vec<u8>` of 1, 3, 5, or 9 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let v = self.0;
        let mut buf = Vec::with_capacity(self.length());
        if v < 0xfd {
            buf.push(v as u8);
        } else if v <= 0xffff {
            buf.push(0xfd);
            buf.extend_from_slice(&(v as u16).to_le_bytes());
        } else if v <= 0xffff_ffff {
            buf.push(0xfe);
            buf.extend_from_slice(&(v as u32).to_le_bytes());
        } else {
            buf.push(0xff);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// ByteReader
// ---------------------------------------------------------------------------

/// A cursor over a byte slice for reading wire-format data.
///
/// Every read is bounds-checked; reading past the end yields
/// `PrimitivesError::TruncatedInput` and leaves the position unchanged.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or an error if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        let end = self.pos.checked_add(n).ok_or(PrimitivesError::TruncatedInput)?;
        if end > self.data.len() {
            return Err(PrimitivesError::TruncatedInput);
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Read a fixed-size array and advance the position.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PrimitivesError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read bytes up to (not including) the next NUL byte, consuming the NUL.
    ///
    /// # Returns
    /// The bytes before the terminator, or `TruncatedInput` if no NUL byte
    /// remains in the input.
    pub fn read_null_terminated(&mut self) -> Result<&'a [u8], PrimitivesError> {
        let rest = &self.data[self.pos..];
        let idx = rest
            .iter()
            .position(|b| *b == 0)
            .ok_or(PrimitivesError::TruncatedInput)?;
        let out = &rest[..idx];
        self.pos += idx + 1;
        Ok(out)
    }

    /// Read a VarInt length followed by that many bytes.
    pub fn read_var_bytes(&mut self) -> Result<&'a [u8], PrimitivesError> {
        let len = self.read_varint()?.value();
        let len = usize::try_from(len).map_err(|_| PrimitivesError::VarIntTooLarge)?;
        self.read_bytes(len)
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Read a little-endian u16 and advance the position by 2 bytes.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32 and advance the position by 4 bytes.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64 and advance the position by 8 bytes.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a CompactSize VarInt and advance the position accordingly.
    ///
    /// # Returns
    /// The decoded `VarInt`, or `TruncatedInput` if the tag announces more
    /// bytes than remain.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let start = self.pos;
        let result = match self.read_u8()? {
            0xff => self.read_u64_le(),
            0xfe => self.read_u32_le().map(u64::from),
            0xfd => self.read_u16_le().map(u64::from),
            b => Ok(u64::from(b)),
        };
        match result {
            Ok(v) => Ok(VarInt(v)),
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }

    /// Step the cursor back by `n` bytes.
    pub fn unread(&mut self, n: usize) -> Result<(), PrimitivesError> {
        if n > self.pos {
            return Err(PrimitivesError::InvalidParameter(format!(
                "cannot unread {} bytes at position {}",
                n, self.pos
            )));
        }
        self.pos -= n;
        Ok(())
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

// ---------------------------------------------------------------------------
// ByteWriter
// ---------------------------------------------------------------------------

/// An append-only buffer for building wire-format data.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        ByteWriter { buf: Vec::new() }
    }

    /// Create an empty writer with pre-allocated capacity.
    pub fn with_capacity(cap: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(cap),
        }
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u16_le(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u32_le(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u64_le(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_varint(&mut self, v: VarInt) {
        self.buf.extend_from_slice(&v.to_bytes());
    }

    /// Write a VarInt length prefix followed by `data`.
    pub fn write_var_bytes(&mut self, data: &[u8]) {
        self.write_varint(VarInt::from(data.len()));
        self.write_bytes(data);
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// ---------------------------------------------------------------------------
// Hex helpers
// ---------------------------------------------------------------------------

/// Decode a hex string, rejecting odd lengths and non-hex characters.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>, PrimitivesError> {
    if hex_str.len() % 2 != 0 {
        return Err(PrimitivesError::Format(format!(
            "hex string has odd length {}",
            hex_str.len()
        )));
    }
    Ok(hex::decode(hex_str)?)
}

/// Reverse the byte order of a hex string (two hex digits per byte).
///
/// `reverse_hex("abcdef") == "efcdab"`. Odd-length input fails with
/// `PrimitivesError::Format`.
pub fn reverse_hex(hex_str: &str) -> Result<String, PrimitivesError> {
    let mut bytes = hex_to_bytes(hex_str)?;
    bytes.reverse();
    Ok(hex::encode(bytes))
}

/// Hex-encode `n` as `width` little-endian bytes.
///
/// Values that need more than `width` bytes fail with `InvalidParameter`.
pub fn num_to_hex(n: u64, width: usize) -> Result<String, PrimitivesError> {
    let bytes = n.to_le_bytes();
    if width > bytes.len() || bytes[width..].iter().any(|b| *b != 0) {
        return Err(PrimitivesError::InvalidParameter(format!(
            "{} does not fit in {} bytes",
            n, width
        )));
    }
    Ok(hex::encode(&bytes[..width]))
}

/// Hex-encode the UTF-8 bytes of a string.
pub fn str_to_hex(s: &str) -> String {
    hex::encode(s.as_bytes())
}

/// Draw `n` bytes from the OS random number generator.
pub fn random_bytes(n: usize) -> Vec<u8> {
    let mut out = vec![0u8; n];
    OsRng.fill_bytes(&mut out);
    out
}
