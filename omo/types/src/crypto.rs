use {
    crate::{Addr, Hash256},
    k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey},
    sha3::{Digest, Keccak256},
    thiserror::Error,
};

/// Length of a recoverable secp256k1 signature: `r | s | v`.
pub const SIGNATURE_LENGTH: usize = 65;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("invalid signature: {reason}")]
    InvalidSignature { reason: String },

    #[error("invalid recovery id! must be 27 or 28, got: {v}")]
    InvalidRecoveryId { v: u8 },

    #[error("failed to recover public key: {reason}")]
    RecoveryFailed { reason: String },
}

impl CryptoError {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidSignature { .. } => "InvalidSignature",
            Self::InvalidRecoveryId { .. } => "InvalidRecoveryId",
            Self::RecoveryFailed { .. } => "RecoveryFailed",
        }
    }
}

pub fn keccak256(data: &[u8]) -> Hash256 {
    Hash256::from_inner(Keccak256::digest(data).into())
}

/// Recovers the identity that produced a signature over a digest.
///
/// The quorum verifier only cares about the recovered identity, so this is
/// kept as a capability that can be swapped out in tests.
pub trait SignerRecovery {
    fn recover(&self, digest: &Hash256, signature: &[u8; SIGNATURE_LENGTH])
        -> Result<Addr, CryptoError>;
}

/// Ethereum-style secp256k1 recovery: the signer's address is the last 20
/// bytes of the keccak256 hash of its uncompressed public key.
#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1;

impl SignerRecovery for Secp256k1 {
    fn recover(
        &self,
        digest: &Hash256,
        signature: &[u8; SIGNATURE_LENGTH],
    ) -> Result<Addr, CryptoError> {
        let sig = Signature::from_slice(&signature[..64]).map_err(|err| {
            CryptoError::InvalidSignature {
                reason: err.to_string(),
            }
        })?;

        // Ethereum uses recovery IDs 27, 28 instead of 0, 1.
        let v = signature[64];
        let recovery_id = v
            .checked_sub(27)
            .and_then(RecoveryId::from_byte)
            .filter(|id| !id.is_x_reduced())
            .ok_or(CryptoError::InvalidRecoveryId { v })?;

        let vk = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id).map_err(|err| {
            CryptoError::RecoveryFailed {
                reason: err.to_string(),
            }
        })?;

        Ok(address_of(&vk))
    }
}

/// Derive the address of a public key.
pub fn address_of(vk: &VerifyingKey) -> Addr {
    // We need the _uncompressed_ public key for deriving address!
    let pk = vk.to_encoded_point(false);
    let pk_hash = keccak256(&pk.as_bytes()[1..]);
    let mut addr = [0; Addr::LENGTH];
    addr.copy_from_slice(&pk_hash[12..]);
    Addr::from_inner(addr)
}

/// Sign a prehashed digest, producing a 65-byte signature with an Ethereum
/// style recovery byte.
pub fn sign_digest(
    sk: &SigningKey,
    digest: &Hash256,
) -> Result<[u8; SIGNATURE_LENGTH], CryptoError> {
    let (sig, recovery_id) = sk.sign_prehash_recoverable(digest).map_err(|err| {
        CryptoError::InvalidSignature {
            reason: err.to_string(),
        }
    })?;

    let mut bytes = [0; SIGNATURE_LENGTH];
    bytes[..64].copy_from_slice(&sig.to_bytes());
    bytes[64] = recovery_id.to_byte() + 27;

    Ok(bytes)
}

// ----------------------------------- tests -----------------------------------
