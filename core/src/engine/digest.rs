// Copyright (c) 2022-2023 The MobileCoin Foundation

use serde::Serialize;
use sha2::{Digest, Sha256, Sha512_256};

use stellar_hw_proto::{ops::Operation, tx::StellarSignTx};

use super::Error;

/// Transaction digest, a running hash over the network id, the transaction
/// header, and each operation in the order received.
///
/// The [Engine][super::Engine] signs the final digest, hosts can recompute
/// this via [transaction_digest] to verify returned signatures.
#[derive(Clone, PartialEq, Eq)]
pub struct TxDigest([u8; 32]);

impl TxDigest {
    /// Create a new digest, seeded with the network id
    /// (SHA-256 of the network passphrase)
    pub fn new(network_passphrase: &str) -> Self {
        let mut b = [0u8; 32];
        b.copy_from_slice(Sha256::digest(network_passphrase.as_bytes()).as_ref());
        Self(b)
    }

    /// Update digest with a new header or operation
    pub fn update<T: Serialize>(&mut self, v: &T) -> Result<&Self, Error> {
        let encoded = serde_cbor::to_vec(v).map_err(|_| Error::EncodingFailed)?;
        let h = Sha512_256::digest(&encoded);

        let mut d = Sha512_256::new();

        // Prior state
        d.update(self.0);

        // New object
        d.update(h);

        self.0.copy_from_slice(d.finalize().as_ref());

        Ok(self)
    }

    /// Fetch digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Compute the digest signed for a transaction header and operations
///
/// The header must be populated as sent to the device
/// (`network_passphrase`, `address_n`, `num_operations`).
pub fn transaction_digest(tx: &StellarSignTx, ops: &[Operation]) -> Result<TxDigest, Error> {
    let mut d = TxDigest::new(&tx.network_passphrase);

    d.update(tx)?;
    for op in ops {
        d.update(op)?;
    }

    Ok(d)
}

/// Debug format [TxDigest] as hex
impl core::fmt::Debug for TxDigest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for b in &self.0[..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Display [TxDigest] as hex
impl core::fmt::Display for TxDigest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for b in &self.0[..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use stellar_hw_proto::{ops::StellarBumpSequenceOp, TESTNET_NETWORK_PASSPHRASE};

    use super::*;

    fn header(n: u32) -> StellarSignTx {
        let mut tx = StellarSignTx::new(
            "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF",
            100,
            1,
        );
        tx.network_passphrase = TESTNET_NETWORK_PASSPHRASE.to_string();
        tx.num_operations = n;
        tx
    }

    fn bump(n: u64) -> Operation {
        Operation::BumpSequence(StellarBumpSequenceOp {
            source_account: None,
            bump_to: n,
        })
    }

    #[test]
    fn network_id() {
        // Well known testnet network id
        let d = TxDigest::new(TESTNET_NETWORK_PASSPHRASE);
        assert_eq!(
            d.to_string(),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
    }

    #[test]
    fn digest_binds_order() {
        let tx = header(2);

        let a = transaction_digest(&tx, &[bump(1), bump(2)]).unwrap();
        let b = transaction_digest(&tx, &[bump(2), bump(1)]).unwrap();
        let c = transaction_digest(&tx, &[bump(1), bump(2)]).unwrap();

        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn digest_binds_network() {
        let mut tx = header(0);
        let a = transaction_digest(&tx, &[]).unwrap();

        tx.network_passphrase = "Other network".to_string();
        let b = transaction_digest(&tx, &[]).unwrap();

        assert_ne!(a, b);
    }
}
