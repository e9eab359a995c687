use {
    crate::print_json_pretty,
    anyhow::{bail, ensure},
    clap::Subcommand,
    k256::ecdsa::SigningKey,
    omo_types::{
        address_of, keccak256, sign_digest, Addr, Hash256, HexBinary, Secp256k1, SignerRecovery,
        SIGNATURE_LENGTH,
    },
    serde::Serialize,
    std::collections::BTreeSet,
};

#[derive(Subcommand)]
pub enum AttestCmd {
    /// Sign a payload's digest with an attester key
    Sign {
        /// secp256k1 private key in hex encoding
        #[arg(long)]
        key: HexBinary,
        /// Payload in hex encoding
        payload: HexBinary,
    },
    /// Combine individual signatures into an attestation
    Aggregate {
        /// Payload in hex encoding
        #[arg(long)]
        payload: HexBinary,
        /// 65-byte signatures in hex encoding, in any order
        #[arg(required = true)]
        signatures: Vec<HexBinary>,
    },
    /// Check an attestation against an attester set, as the bridge would
    Verify {
        /// Payload in hex encoding
        #[arg(long)]
        payload: HexBinary,
        /// Attestation in hex encoding
        #[arg(long)]
        attestation: HexBinary,
        /// Address of an attester; repeat for each
        #[arg(long = "attester", required = true)]
        attesters: Vec<Addr>,
        /// Minimum number of valid signatures
        #[arg(long, default_value_t = 1)]
        threshold: u32,
    },
}

#[derive(Serialize)]
struct Signed {
    signer: Addr,
    digest: Hash256,
    signature: HexBinary,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Aggregated {
    pub signers: Vec<Addr>,
    pub attestation: HexBinary,
}

#[derive(Serialize)]
struct Verified {
    valid_signatures: usize,
}

impl AttestCmd {
    pub fn run(self) -> anyhow::Result<()> {
        match self {
            AttestCmd::Sign { key, payload } => {
                let sk = SigningKey::from_slice(&key)?;
                let digest = keccak256(&payload);
                let signature = sign_digest(&sk, &digest)?;

                print_json_pretty(Signed {
                    signer: address_of(sk.verifying_key()),
                    digest,
                    signature: signature.into(),
                })
            },
            AttestCmd::Aggregate {
                payload,
                signatures,
            } => {
                let aggregated = aggregate(&keccak256(&payload), &signatures)?;

                tracing::info!(signers = aggregated.signers.len(), "Aggregated attestation");

                print_json_pretty(aggregated)
            },
            AttestCmd::Verify {
                payload,
                attestation,
                attesters,
                threshold,
            } => {
                let attesters = attesters.into_iter().collect::<BTreeSet<_>>();
                let digest = keccak256(&payload);

                match omo_quorum::verify(&Secp256k1, &digest, &attestation, &attesters, threshold)
                {
                    Ok(valid_signatures) => print_json_pretty(Verified { valid_signatures }),
                    Err(err) => {
                        tracing::warn!(
                            reason = err.reason(),
                            retryable = err.is_retryable(),
                            "Attestation rejected"
                        );

                        bail!(err);
                    },
                }
            },
        }
    }
}

/// Order signatures by recovered signer, the order the bridge requires, and
/// concatenate them.
pub fn aggregate(digest: &Hash256, signatures: &[HexBinary]) -> anyhow::Result<Aggregated> {
    let mut records = Vec::with_capacity(signatures.len());

    for signature in signatures {
        let signature = <[u8; SIGNATURE_LENGTH]>::try_from(&signature[..]).map_err(|_| {
            anyhow::anyhow!(
                "signature must be {SIGNATURE_LENGTH} bytes, got {}",
                signature.len()
            )
        })?;
        let signer = Secp256k1.recover(digest, &signature)?;

        records.push((signer, signature));
    }

    records.sort_by_key(|(signer, _)| *signer);

    for pair in records.windows(2) {
        ensure!(pair[0].0 != pair[1].0, "duplicate signer: {}", pair[0].0);
    }

    Ok(Aggregated {
        signers: records.iter().map(|(signer, _)| *signer).collect(),
        attestation: records
            .iter()
            .flat_map(|(_, signature)| *signature)
            .collect::<Vec<_>>()
            .into(),
    })
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex, test_case::test_case};

    // Hardhat's first three default accounts.
    const KEYS: [[u8; 32]; 3] = [
        hex!("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"),
        hex!("59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d"),
        hex!("5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdeec365"),
    ];

    fn sign_all(digest: &Hash256, indexes: &[usize]) -> Vec<HexBinary> {
        indexes
            .iter()
            .map(|&i| {
                let sk = SigningKey::from_slice(&KEYS[i]).unwrap();
                sign_digest(&sk, digest).unwrap().into()
            })
            .collect()
    }

    fn addresses() -> BTreeSet<Addr> {
        KEYS.iter()
            .map(|key| address_of(SigningKey::from_slice(key).unwrap().verifying_key()))
            .collect()
    }

    #[test_case(&[0, 1, 2]; "in order")]
    #[test_case(&[2, 0, 1]; "shuffled")]
    #[test_case(&[1]; "single")]
    fn aggregated_attestations_verify(indexes: &[usize]) {
        let digest = keccak256(b"payload");

        let aggregated = aggregate(&digest, &sign_all(&digest, indexes)).unwrap();

        assert!(aggregated.signers.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(aggregated.attestation.len(), indexes.len() * SIGNATURE_LENGTH);
        assert_eq!(
            omo_quorum::verify(
                &Secp256k1,
                &digest,
                &aggregated.attestation,
                &addresses(),
                indexes.len() as u32,
            ),
            Ok(indexes.len())
        );
    }

    #[test]
    fn duplicate_signer() {
        let digest = keccak256(b"payload");

        let err = aggregate(&digest, &sign_all(&digest, &[1, 0, 1])).unwrap_err();
        assert!(err.to_string().contains("duplicate signer"));
    }

    #[test]
    fn wrong_signature_length() {
        let digest = keccak256(b"payload");

        let err = aggregate(&digest, &[vec![0; 64].into()]).unwrap_err();
        assert!(err.to_string().contains("must be 65 bytes"));
    }
}
