use {
    crate::{keccak256, CodecError},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, Deserialize, Deserializer, Serialize, Serializer},
    std::{
        fmt::{self, Debug, Display},
        ops::Deref,
        str::FromStr,
    },
};

/// Implements the hex string representation shared by all fixed-length byte
/// types: `0x`-prefixed lowercase hex for `Display` and serde, and parsing
/// that accepts the prefix optionally.
macro_rules! impl_fixed_bytes {
    ($ty:ident, $len:expr) => {
        impl $ty {
            pub const LENGTH: usize = $len;

            pub const ZERO: Self = Self([0; $len]);

            pub const fn from_inner(inner: [u8; $len]) -> Self {
                Self(inner)
            }

            pub const fn inner(&self) -> &[u8; $len] {
                &self.0
            }

            pub const fn into_inner(self) -> [u8; $len] {
                self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|&b| b == 0)
            }
        }

        impl Deref for $ty {
            type Target = [u8];

            fn deref(&self) -> &[u8] {
                &self.0
            }
        }

        impl AsRef<[u8]> for $ty {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}({self})", stringify!($ty))
            }
        }

        impl FromStr for $ty {
            type Err = CodecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                let bytes = hex::decode(s).map_err(|err| CodecError::InvalidHex(err.to_string()))?;
                let inner = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| CodecError::IncorrectLength {
                        ty: stringify!($ty),
                        expect: $len,
                        actual: bytes.len(),
                    })?;
                Ok(Self(inner))
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = <String as Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

// ----------------------------------- addr ------------------------------------

/// An account or contract address: 20 bytes, the same format as Ethereum.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize,
)]
pub struct Addr([u8; 20]);

impl_fixed_bytes!(Addr, 20);

impl Addr {
    /// Interpret a byte string as an address. The byte string must be exactly
    /// 20 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| CodecError::AddressLength {
                actual: bytes.len(),
            })
    }

    /// Derive the address of a contract as the last 20 bytes of
    /// `keccak256(deployer | salt)`.
    pub fn derive(deployer: Addr, salt: &[u8]) -> Self {
        let mut preimage = Vec::with_capacity(Self::LENGTH + salt.len());
        preimage.extend_from_slice(&deployer.0);
        preimage.extend_from_slice(salt);
        let hash = keccak256(&preimage);
        let mut bytes = [0; Self::LENGTH];
        bytes.copy_from_slice(&hash[12..]);
        Self(bytes)
    }

    /// Generate a mock address for use in testing.
    pub const fn mock(index: u8) -> Self {
        let mut bytes = [0; Self::LENGTH];
        bytes[Self::LENGTH - 1] = index;
        Self(bytes)
    }
}

// ---------------------------------- addr32 -----------------------------------

/// A 32-byte identity on a remote domain. Domains with shorter addresses
/// left-pad them with zeros.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize,
)]
pub struct Addr32([u8; 32]);

impl_fixed_bytes!(Addr32, 32);

impl From<Addr> for Addr32 {
    fn from(addr: Addr) -> Self {
        let mut addr32 = [0; 32];
        addr32[12..].copy_from_slice(&addr.0);
        Self(addr32)
    }
}

impl TryFrom<Addr32> for Addr {
    type Error = CodecError;

    fn try_from(addr32: Addr32) -> Result<Self, CodecError> {
        if addr32.0[..12].iter().any(|&b| b != 0) {
            return Err(CodecError::NotLeftPadded);
        }

        let mut addr = [0; 20];
        addr.copy_from_slice(&addr32.0[12..]);

        Ok(Addr(addr))
    }
}

// --------------------------------- hash256 -----------------------------------

/// A 32-byte digest.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize,
)]
pub struct Hash256([u8; 32]);

impl_fixed_bytes!(Hash256, 32);

// ----------------------------------- tests -----------------------------------
