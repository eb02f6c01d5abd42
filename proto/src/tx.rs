// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transaction signing messages

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::helpers::hex_opt;

/// Transaction memo types
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Debug,
    Display,
    EnumString,
    TryFromPrimitive,
    IntoPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u32)]
#[serde(rename_all = "snake_case")]
pub enum MemoType {
    None = 0,
    Text = 1,
    Id = 2,
    Hash = 3,
    Return = 4,
}

impl Default for MemoType {
    fn default() -> Self {
        Self::None
    }
}

/// Maximum length of a text memo (bytes)
pub const MEMO_TEXT_MAX_LEN: usize = 28;

/// Length of hash and return memos (bytes)
pub const MEMO_HASH_LEN: usize = 32;

/// Transaction header, sent once to start a signing operation
///
/// `num_operations` declares how many operations will follow,
/// the device requests each of these in turn via [`StellarTxOpRequest`].
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct StellarSignTx {
    /// BIP32 derivation path for the signing key
    #[serde(default)]
    pub address_n: Vec<u32>,

    /// Network passphrase, hashed to form the network id
    #[serde(default)]
    pub network_passphrase: String,

    /// Transaction source account (StrKey)
    pub source_account: String,

    /// Transaction fee (stroops)
    pub fee: u32,

    /// Source account sequence number
    pub sequence_number: u64,

    #[serde(default)]
    pub timebounds_start: u32,
    #[serde(default)]
    pub timebounds_end: u32,

    #[serde(default)]
    pub memo_type: MemoType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_id: Option<u64>,

    /// Memo hash, used for both [MemoType::Hash] and [MemoType::Return]
    #[serde(default, with = "hex_opt", skip_serializing_if = "Option::is_none")]
    pub memo_hash: Option<Vec<u8>>,

    /// Number of operations to follow
    #[serde(default)]
    pub num_operations: u32,
}

impl StellarSignTx {
    /// Create a new transaction header with no memo or timebounds
    pub fn new(source_account: impl Into<String>, fee: u32, sequence_number: u64) -> Self {
        Self {
            source_account: source_account.into(),
            fee,
            sequence_number,
            ..Default::default()
        }
    }

    /// Set a text memo
    pub fn with_memo_text(mut self, text: impl Into<String>) -> Self {
        self.memo_type = MemoType::Text;
        self.memo_text = Some(text.into());
        self
    }

    /// Set an id memo
    pub fn with_memo_id(mut self, id: u64) -> Self {
        self.memo_type = MemoType::Id;
        self.memo_id = Some(id);
        self
    }

    /// Set a hash memo
    pub fn with_memo_hash(mut self, hash: [u8; MEMO_HASH_LEN]) -> Self {
        self.memo_type = MemoType::Hash;
        self.memo_hash = Some(hash.to_vec());
        self
    }

    /// Set transaction timebounds
    pub fn with_timebounds(mut self, start: u32, end: u32) -> Self {
        self.timebounds_start = start;
        self.timebounds_end = end;
        self
    }
}

/// Device request for the next transaction operation
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct StellarTxOpRequest {}

/// Signed transaction, returned once all operations are consumed
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarSignedTx {
    /// ed25519 public key of the signing account
    #[serde(with = "hex::serde")]
    pub public_key: Vec<u8>,

    /// ed25519 signature
    #[serde(with = "hex::serde")]
    pub signature: Vec<u8>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn memo_type_values() {
        assert_eq!(u32::from(MemoType::Return), 4);
        assert_eq!(MemoType::try_from(2u32).unwrap(), MemoType::Id);
        assert!(MemoType::try_from(5u32).is_err());
    }

    #[test]
    fn header_json() {
        let tx = StellarSignTx::new(
            "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF",
            100,
            42,
        )
        .with_memo_hash([0xab; 32]);

        let s = serde_json::to_string(&tx).unwrap();
        assert!(s.contains(r#""memo_type":"hash""#));
        assert!(s.contains(&"ab".repeat(32)));
        assert!(!s.contains("memo_text"));

        let d: StellarSignTx = serde_json::from_str(&s).unwrap();
        assert_eq!(d, tx);
    }
}
