//! Verification of M-of-N attestations.
//!
//! An attestation is a concatenation of 65-byte recoverable signatures over a
//! message digest, with no separators. The signers recovered from it must
//! appear in strictly ascending order; this rules out duplicates in the same
//! single pass.

use {
    omo_types::{Addr, CryptoError, Hash256, SignerRecovery, SIGNATURE_LENGTH},
    std::collections::BTreeSet,
    thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuorumError {
    #[error("Invalid attestation length")]
    InvalidAttestationLength { length: usize },

    #[error("Invalid signature order or dupe")]
    InvalidSignatureOrderOrDupe { previous: Addr, signer: Addr },

    #[error("Invalid signature: not attester")]
    UnauthorizedSigner { signer: Addr },

    #[error("quorum not met! threshold: {threshold}, valid signatures: {count}")]
    QuorumNotMet { threshold: u32, count: usize },

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl QuorumError {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidAttestationLength { .. } => "InvalidAttestationLength",
            Self::InvalidSignatureOrderOrDupe { .. } => "InvalidSignatureOrderOrDupe",
            Self::UnauthorizedSigner { .. } => "UnauthorizedSigner",
            Self::QuorumNotMet { .. } => "QuorumNotMet",
            Self::Crypto(err) => err.reason(),
        }
    }

    /// Whether resubmitting with more signatures could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::QuorumNotMet { .. })
    }
}

/// Split an attestation into its signature records.
pub fn split_attestation(
    attestation: &[u8],
) -> Result<impl Iterator<Item = &[u8; SIGNATURE_LENGTH]>, QuorumError> {
    if attestation.is_empty() || attestation.len() % SIGNATURE_LENGTH != 0 {
        return Err(QuorumError::InvalidAttestationLength {
            length: attestation.len(),
        });
    }

    Ok(attestation
        .chunks_exact(SIGNATURE_LENGTH)
        .filter_map(|chunk| chunk.try_into().ok()))
}

/// Verify an attestation over `digest`. Returns the number of valid signatures.
///
/// Has no side effects. A threshold larger than the attester set is a
/// misconfiguration that makes every attestation fail with `QuorumNotMet`.
pub fn verify<R>(
    recovery: &R,
    digest: &Hash256,
    attestation: &[u8],
    attesters: &BTreeSet<Addr>,
    threshold: u32,
) -> Result<usize, QuorumError>
where
    R: SignerRecovery + ?Sized,
{
    let mut previous: Option<Addr> = None;
    let mut count = 0;

    for signature in split_attestation(attestation)? {
        let signer = recovery.recover(digest, signature)?;

        if let Some(previous) = previous {
            if signer <= previous {
                return Err(QuorumError::InvalidSignatureOrderOrDupe { previous, signer });
            }
        }

        if !attesters.contains(&signer) {
            return Err(QuorumError::UnauthorizedSigner { signer });
        }

        previous = Some(signer);
        count += 1;
    }

    if count < threshold as usize {
        return Err(QuorumError::QuorumNotMet { threshold, count });
    }

    Ok(count)
}

// ----------------------------------- tests -----------------------------------
