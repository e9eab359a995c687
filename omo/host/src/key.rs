use {
    crate::{StdError, StdResult},
    omo_types::{Addr, Hash256},
};

/// A type that can be used as the key of a [`Map`](crate::Map) or an element
/// of a [`Set`](crate::Set).
///
/// The encoding must preserve ordering, so that iterating the storage in byte
/// order yields keys in their natural order.
pub trait MapKey: Sized {
    fn to_key_bytes(&self) -> Vec<u8>;

    fn from_key_bytes(bytes: &[u8]) -> StdResult<Self>;
}

impl MapKey for Addr {
    fn to_key_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }

    fn from_key_bytes(bytes: &[u8]) -> StdResult<Self> {
        Addr::from_slice(bytes).map_err(StdError::deserialize::<Self>)
    }
}

impl MapKey for Hash256 {
    fn to_key_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }

    fn from_key_bytes(bytes: &[u8]) -> StdResult<Self> {
        bytes
            .try_into()
            .map(Hash256::from_inner)
            .map_err(StdError::deserialize::<Self>)
    }
}

macro_rules! impl_integer_key {
    ($($t:ty),+) => {
        $(
            impl MapKey for $t {
                fn to_key_bytes(&self) -> Vec<u8> {
                    self.to_be_bytes().to_vec()
                }

                fn from_key_bytes(bytes: &[u8]) -> StdResult<Self> {
                    bytes
                        .try_into()
                        .map(<$t>::from_be_bytes)
                        .map_err(StdError::deserialize::<Self>)
                }
            }
        )+
    };
}

impl_integer_key!(u32, u64);

impl MapKey for (Addr, u32) {
    fn to_key_bytes(&self) -> Vec<u8> {
        let mut bytes = self.0.to_vec();
        bytes.extend_from_slice(&self.1.to_be_bytes());
        bytes
    }

    fn from_key_bytes(bytes: &[u8]) -> StdResult<Self> {
        if bytes.len() != Addr::LENGTH + 4 {
            return Err(StdError::deserialize::<Self>(format!(
                "expecting {} bytes, got {}",
                Addr::LENGTH + 4,
                bytes.len()
            )));
        }

        let (addr, int) = bytes.split_at(Addr::LENGTH);

        Ok((Addr::from_key_bytes(addr)?, u32::from_key_bytes(int)?))
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    #[test_case(0; "zero")]
    #[test_case(1; "one")]
    #[test_case(u32::MAX; "max")]
    fn u32_keys(value: u32) {
        let bytes = value.to_key_bytes();
        assert_eq!(u32::from_key_bytes(&bytes).unwrap(), value);
    }

    #[test]
    fn integer_keys_preserve_order() {
        assert!(255u32.to_key_bytes() < 256u32.to_key_bytes());
    }

    #[test]
    fn tuple_keys() {
        let key = (Addr::mock(3), 7u32);
        let bytes = key.to_key_bytes();

        assert_eq!(bytes.len(), 24);
        assert_eq!(<(Addr, u32)>::from_key_bytes(&bytes).unwrap(), key);
        assert!(<(Addr, u32)>::from_key_bytes(&bytes[1..]).is_err());
    }
}
