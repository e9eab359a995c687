use {
    k256::ecdsa::SigningKey,
    omo_types::{address_of, keccak256, sign_digest, Addr, Hash256, SIGNATURE_LENGTH},
    rand::rngs::OsRng,
};

/// Something that has an address.
pub trait Addressable {
    fn address(&self) -> Addr;
}

impl Addressable for Addr {
    fn address(&self) -> Addr {
        *self
    }
}

/// An externally owned account with a secp256k1 key, able to act as an
/// attester.
#[derive(Clone)]
pub struct TestAccount {
    sk: SigningKey,
    address: Addr,
}

impl TestAccount {
    pub fn new_random() -> Self {
        Self::from_signing_key(SigningKey::random(&mut OsRng))
    }

    pub fn from_signing_key(sk: SigningKey) -> Self {
        let address = address_of(sk.verifying_key());

        Self { sk, address }
    }

    pub fn sign_digest(&self, digest: &Hash256) -> [u8; SIGNATURE_LENGTH] {
        sign_digest(&self.sk, digest).unwrap()
    }

    /// Sign the keccak256 hash of a message.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        self.sign_digest(&keccak256(message))
    }
}

impl Addressable for TestAccount {
    fn address(&self) -> Addr {
        self.address
    }
}

/// Have each signer sign the message, and concatenate the signatures in
/// ascending order of signer address.
pub fn attest<'a, I>(message: &[u8], signers: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a TestAccount>,
{
    let mut signers = signers.into_iter().collect::<Vec<_>>();
    signers.sort_by_key(|signer| signer.address());

    signers
        .into_iter()
        .flat_map(|signer| signer.sign(message))
        .collect()
}
