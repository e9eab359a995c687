//! Length-prefixed byte strings, using the Bitcoin-style variable-length
//! integer as the prefix:
//!
//! | length                | prefix                               |
//! | --------------------- | ------------------------------------ |
//! | `< 0xfd`              | the length as a single byte          |
//! | `<= 0xffff`           | `0xfd` + 2 bytes little-endian       |
//! | `<= 0xffff_ffff`      | `0xfe` + 4 bytes little-endian       |
//! | otherwise             | `0xff` + 8 bytes little-endian       |
//!
//! Decoding is strict: every prefix must use the smallest tier able to hold
//! its value.

use thiserror::Error;

pub const MARKER_U16: u8 = 0xfd;
pub const MARKER_U32: u8 = 0xfe;
pub const MARKER_U64: u8 = 0xff;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("truncated length prefix! marker: {marker:#04x}, needs {needed} more bytes, {available} available")]
    TruncatedPrefix {
        marker: u8,
        needed: usize,
        available: usize,
    },

    #[error("malformed length! declared: {declared}, available: {available}")]
    MalformedLength { declared: u64, available: usize },

    #[error("non-canonical length prefix! marker: {marker:#04x}, value: {value}")]
    NonCanonicalPrefix { marker: u8, value: u64 },

    #[error("invalid payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("bytes length does not match address")]
    AddressLength { actual: usize },

    #[error("address is not left-padded with zeros")]
    NotLeftPadded,

    #[error("incorrect length for {ty}! expecting: {expect}, got: {actual}")]
    IncorrectLength {
        ty: &'static str,
        expect: usize,
        actual: usize,
    },

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl CodecError {
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::TruncatedPrefix { .. } => "TruncatedPrefix",
            Self::MalformedLength { .. } => "MalformedLength",
            Self::NonCanonicalPrefix { .. } => "NonCanonicalPrefix",
            Self::InvalidPayload { .. } => "InvalidPayload",
            Self::AddressLength { .. } => "InvalidAddressLength",
            Self::NotLeftPadded => "NotLeftPadded",
            Self::IncorrectLength { .. } => "IncorrectLength",
            Self::InvalidHex(_) => "InvalidHex",
        }
    }
}

pub type CodecResult<T> = core::result::Result<T, CodecError>;

// ---------------------------------- varint -----------------------------------

/// A variable-length unsigned integer, tagged by its width tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarInt {
    /// Values below `0xfd`, stored inline in the marker byte.
    Inline(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

impl VarInt {
    /// Pick the smallest tier that holds the value.
    pub fn new(value: u64) -> Self {
        if value < MARKER_U16 as u64 {
            Self::Inline(value as u8)
        } else if value <= u16::MAX as u64 {
            Self::U16(value as u16)
        } else if value <= u32::MAX as u64 {
            Self::U32(value as u32)
        } else {
            Self::U64(value)
        }
    }

    pub fn value(self) -> u64 {
        match self {
            Self::Inline(v) => v as u64,
            Self::U16(v) => v as u64,
            Self::U32(v) => v as u64,
            Self::U64(v) => v,
        }
    }

    /// Number of bytes this value occupies on the wire, marker included.
    pub fn encoded_len(self) -> usize {
        match self {
            Self::Inline(_) => 1,
            Self::U16(_) => 3,
            Self::U32(_) => 5,
            Self::U64(_) => 9,
        }
    }

    pub fn encode_into(self, buf: &mut Vec<u8>) {
        match self {
            Self::Inline(v) => buf.push(v),
            Self::U16(v) => {
                buf.push(MARKER_U16);
                buf.extend_from_slice(&v.to_le_bytes());
            },
            Self::U32(v) => {
                buf.push(MARKER_U32);
                buf.extend_from_slice(&v.to_le_bytes());
            },
            Self::U64(v) => {
                buf.push(MARKER_U64);
                buf.extend_from_slice(&v.to_le_bytes());
            },
        }
    }

    /// Decode a value starting at `offset`. Returns the value and the offset
    /// right after it.
    pub fn decode(buf: &[u8], offset: usize) -> CodecResult<(Self, usize)> {
        let marker = *buf.get(offset).ok_or(CodecError::TruncatedPrefix {
            marker: 0,
            needed: 1,
            available: 0,
        })?;
        let rest = &buf[offset + 1..];

        let varint = match marker {
            MARKER_U16 => Self::U16(u16::from_le_bytes(take::<2>(marker, rest)?)),
            MARKER_U32 => Self::U32(u32::from_le_bytes(take::<4>(marker, rest)?)),
            MARKER_U64 => Self::U64(u64::from_le_bytes(take::<8>(marker, rest)?)),
            inline => Self::Inline(inline),
        };

        if Self::new(varint.value()) != varint {
            return Err(CodecError::NonCanonicalPrefix {
                marker,
                value: varint.value(),
            });
        }

        Ok((varint, offset + varint.encoded_len()))
    }
}

fn take<const N: usize>(marker: u8, rest: &[u8]) -> CodecResult<[u8; N]> {
    rest.get(..N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(CodecError::TruncatedPrefix {
            marker,
            needed: N,
            available: rest.len(),
        })
}

// --------------------------------- var bytes ---------------------------------

/// Prefix `data` with its length.
pub fn encode_var_bytes(data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(VarInt::new(data.len() as u64).encoded_len() + data.len());
    write_var_bytes(&mut buf, data);
    buf
}

/// Append `data`, prefixed with its length, to the buffer.
pub fn write_var_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    VarInt::new(data.len() as u64).encode_into(buf);
    buf.extend_from_slice(data);
}

/// Read one length-prefixed byte string starting at `offset`. Returns the
/// byte string and the offset right after it.
pub fn decode_var_bytes(buf: &[u8], offset: usize) -> CodecResult<(&[u8], usize)> {
    let (len, start) = VarInt::decode(buf, offset)?;
    let available = buf.len() - start;

    let len = usize::try_from(len.value())
        .ok()
        .filter(|&len| len <= available)
        .ok_or(CodecError::MalformedLength {
            declared: len.value(),
            available,
        })?;

    Ok((&buf[start..start + len], start + len))
}

/// Reads consecutive length-prefixed fields off a payload, and checks that the
/// payload is consumed exactly.
pub struct VarBytesReader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> VarBytesReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn next_field(&mut self) -> CodecResult<&'a [u8]> {
        let (field, offset) = decode_var_bytes(self.buf, self.offset)?;
        self.offset = offset;
        Ok(field)
    }

    /// Ensure no unconsumed bytes remain.
    pub fn finish(self) -> CodecResult<()> {
        if self.offset != self.buf.len() {
            return Err(CodecError::invalid_payload(format!(
                "{} trailing bytes after the last field",
                self.buf.len() - self.offset
            )));
        }

        Ok(())
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex, proptest::prelude::*, test_case::test_case};

    #[test_case(0, &hex!("00"); "zero")]
    #[test_case(0xfc, &hex!("fc"); "largest inline")]
    #[test_case(0xfd, &hex!("fdfd00"); "smallest u16")]
    #[test_case(0xffff, &hex!("fdffff"); "largest u16")]
    #[test_case(0x10000, &hex!("fe00000100"); "smallest u32")]
    #[test_case(0x1_0000_0000, &hex!("ff0000000001000000"); "smallest u64")]
    fn varint_tiers(value: u64, wire: &[u8]) {
        let mut buf = Vec::new();
        VarInt::new(value).encode_into(&mut buf);
        assert_eq!(buf, wire);

        let (decoded, offset) = VarInt::decode(wire, 0).unwrap();
        assert_eq!(decoded.value(), value);
        assert_eq!(offset, wire.len());
    }

    #[test_case(&hex!("fd"), CodecError::TruncatedPrefix { marker: 0xfd, needed: 2, available: 0 }; "u16 without bytes")]
    #[test_case(&hex!("fe0100"), CodecError::TruncatedPrefix { marker: 0xfe, needed: 4, available: 2 }; "u32 short")]
    #[test_case(&hex!("ff01"), CodecError::TruncatedPrefix { marker: 0xff, needed: 8, available: 1 }; "u64 short")]
    #[test_case(&hex!("fd0500"), CodecError::NonCanonicalPrefix { marker: 0xfd, value: 5 }; "non minimal u16")]
    #[test_case(&hex!("03aabb"), CodecError::MalformedLength { declared: 3, available: 2 }; "body shorter than declared")]
    #[test_case(&[], CodecError::TruncatedPrefix { marker: 0, needed: 1, available: 0 }; "empty buffer")]
    fn decoding_malformed_input(buf: &[u8], expect: CodecError) {
        assert_eq!(decode_var_bytes(buf, 0).unwrap_err(), expect);
    }

    #[test]
    fn decoding_at_offset() {
        let mut buf = encode_var_bytes(b"hello");
        write_var_bytes(&mut buf, b"");
        write_var_bytes(&mut buf, &[0xab; 300]);

        let (first, offset) = decode_var_bytes(&buf, 0).unwrap();
        assert_eq!(first, b"hello");

        let (second, offset) = decode_var_bytes(&buf, offset).unwrap();
        assert!(second.is_empty());

        let (third, offset) = decode_var_bytes(&buf, offset).unwrap();
        assert_eq!(third, &[0xab; 300]);
        assert_eq!(offset, buf.len());
    }

    #[test]
    fn reader_rejects_trailing_bytes() {
        let mut buf = encode_var_bytes(b"field");
        buf.push(0x00);
        buf.push(0x01);

        let mut reader = VarBytesReader::new(&buf);
        assert_eq!(reader.next_field().unwrap(), b"field");
        assert_eq!(reader.next_field().unwrap(), b"");
        assert!(matches!(
            reader.finish(),
            Err(CodecError::InvalidPayload { .. })
        ));
    }

    proptest! {
        #[test]
        fn var_bytes_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..70_000)) {
            let encoded = encode_var_bytes(&data);
            let (decoded, offset) = decode_var_bytes(&encoded, 0).unwrap();

            prop_assert_eq!(decoded, data.as_slice());
            prop_assert_eq!(offset, encoded.len());
        }

        #[test]
        fn varint_roundtrip(value in any::<u64>()) {
            let varint = VarInt::new(value);
            let mut buf = Vec::new();
            varint.encode_into(&mut buf);

            prop_assert_eq!(buf.len(), varint.encoded_len());
            prop_assert_eq!(VarInt::decode(&buf, 0).unwrap(), (varint, buf.len()));
        }
    }
}
