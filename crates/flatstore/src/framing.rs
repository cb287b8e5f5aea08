use std::fmt;

use crate::{Error, Result, SIZE_OF_U64};

/// How a blob's payload length is recorded on disk.
///
/// - `LengthPrefixed`: an 8-byte `u64` in **NATIVE byte order** precedes the payload
/// - `None`: the file holds the payload only, so the reader must know its size
///
/// Neither layout is portable across systems with different endianness or type layouts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framing {
    None,
    #[default]
    LengthPrefixed,
}

impl Framing {
    /// Number of bytes written before the payload.
    #[inline]
    pub const fn header_len(self) -> usize {
        match self {
            Self::None => 0,
            Self::LengthPrefixed => SIZE_OF_U64,
        }
    }

    /// Encodes the header for a payload of `len` bytes.
    #[inline]
    pub fn encode_header(self, len: usize) -> Option<[u8; SIZE_OF_U64]> {
        match self {
            Self::None => None,
            Self::LengthPrefixed => Some((len as u64).to_ne_bytes()),
        }
    }

    /// Decodes a length prefix, `bytes` being however many were available.
    pub fn decode_header(bytes: &[u8]) -> Result<u64> {
        let arr: [u8; SIZE_OF_U64] = bytes.try_into().map_err(|_| Error::Truncated {
            expected: SIZE_OF_U64,
            actual: bytes.len(),
        })?;
        Ok(u64::from_ne_bytes(arr))
    }

    /// Total size of a blob holding `payload_len` bytes.
    #[inline]
    pub const fn blob_len(self, payload_len: usize) -> usize {
        self.header_len() + payload_len
    }
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::LengthPrefixed => write!(f, "length-prefixed"),
        }
    }
}
