// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transaction operation messages
//!
//! Each operation is sent individually in response to a
//! [`StellarTxOpRequest`][crate::tx::StellarTxOpRequest].
//! Amounts are in stroops, see [amount][crate::amount] for conversions.
//! Serialized amounts may also be given as decimal strings (eg. `"10.5"`).

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    helpers::{hex_opt, stroops},
    Message, MessageType,
};

/// Asset types
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
pub enum AssetType {
    Native = 0,
    Alphanum4 = 1,
    Alphanum12 = 2,
}

impl AssetType {
    /// Select the credit asset type for an asset code
    pub fn for_code(code: &str) -> Self {
        match code.len() {
            0..=4 => AssetType::Alphanum4,
            _ => AssetType::Alphanum12,
        }
    }

    /// Check an asset code length is valid for this type
    pub fn accepts_code(&self, code: &str) -> bool {
        match self {
            AssetType::Native => code.is_empty(),
            AssetType::Alphanum4 => (1..=4).contains(&code.len()),
            AssetType::Alphanum12 => (5..=12).contains(&code.len()),
        }
    }
}

/// Signer key types for [`StellarSetOptionsOp`]
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
pub enum SignerKeyType {
    Ed25519 = 0,
    PreAuthTx = 1,
    HashX = 2,
}

bitflags::bitflags! {
    /// Account flags for [`StellarSetOptionsOp`] `set_flags` / `clear_flags`
    pub struct AccountFlags: u32 {
        const AUTH_REQUIRED = 1 << 0;
        const AUTH_REVOCABLE = 1 << 1;
        const AUTH_IMMUTABLE = 1 << 2;
    }
}

/// Asset descriptor
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarAssetType {
    #[serde(rename = "type")]
    pub asset_type: AssetType,

    /// Asset code, credit assets only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Issuing account (StrKey), credit assets only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl StellarAssetType {
    /// Native asset (lumens)
    pub fn native() -> Self {
        Self {
            asset_type: AssetType::Native,
            code: None,
            issuer: None,
        }
    }

    /// Credit asset, type selected by code length
    pub fn credit(code: impl Into<String>, issuer: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            asset_type: AssetType::for_code(&code),
            code: Some(code),
            issuer: Some(issuer.into()),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarCreateAccountOp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    pub new_account: String,
    #[serde(with = "stroops")]
    pub starting_balance: i64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarPaymentOp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    pub destination_account: String,
    pub asset: StellarAssetType,
    #[serde(with = "stroops")]
    pub amount: i64,
}

/// Path payment (strict receive)
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarPathPaymentOp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    pub send_asset: StellarAssetType,
    #[serde(with = "stroops")]
    pub send_max: i64,
    pub destination_account: String,
    pub destination_asset: StellarAssetType,
    #[serde(with = "stroops")]
    pub destination_amount: i64,
    #[serde(default)]
    pub paths: Vec<StellarAssetType>,
}

/// Manage sell offer, an `offer_id` of zero creates a new offer
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarManageOfferOp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    pub selling_asset: StellarAssetType,
    pub buying_asset: StellarAssetType,
    #[serde(with = "stroops")]
    pub amount: i64,
    pub price_n: u32,
    pub price_d: u32,
    #[serde(default)]
    pub offer_id: u64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarCreatePassiveOfferOp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    pub selling_asset: StellarAssetType,
    pub buying_asset: StellarAssetType,
    #[serde(with = "stroops")]
    pub amount: i64,
    pub price_n: u32,
    pub price_d: u32,
}

/// Set account options, unset fields are left unchanged
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StellarSetOptionsOp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inflation_destination_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_flags: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_flags: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_type: Option<SignerKeyType>,
    #[serde(with = "hex_opt", skip_serializing_if = "Option::is_none")]
    pub signer_key: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_weight: Option<u32>,
}

impl StellarSetOptionsOp {
    /// Flags to be set, `None` where unknown bits are present
    pub fn set_flags(&self) -> Option<AccountFlags> {
        AccountFlags::from_bits(self.set_flags.unwrap_or(0))
    }

    /// Flags to be cleared, `None` where unknown bits are present
    pub fn clear_flags(&self) -> Option<AccountFlags> {
        AccountFlags::from_bits(self.clear_flags.unwrap_or(0))
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarChangeTrustOp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    pub asset: StellarAssetType,
    pub limit: u64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarAllowTrustOp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    pub trusted_account: String,
    pub asset_type: AssetType,
    pub asset_code: String,
    pub is_authorized: bool,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarAccountMergeOp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    pub destination_account: String,
}

/// Set or clear (where `value` is `None`) an account data entry
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarManageDataOp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    pub key: String,
    #[serde(default, with = "hex_opt", skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarBumpSequenceOp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    pub bump_to: u64,
}

/// Transaction operation, one element of the operations following a
/// [`StellarSignTx`][crate::tx::StellarSignTx] header
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    CreateAccount(StellarCreateAccountOp),
    Payment(StellarPaymentOp),
    PathPayment(StellarPathPaymentOp),
    ManageOffer(StellarManageOfferOp),
    CreatePassiveOffer(StellarCreatePassiveOfferOp),
    SetOptions(StellarSetOptionsOp),
    ChangeTrust(StellarChangeTrustOp),
    AllowTrust(StellarAllowTrustOp),
    AccountMerge(StellarAccountMergeOp),
    ManageData(StellarManageDataOp),
    BumpSequence(StellarBumpSequenceOp),
}

impl Operation {
    /// Fetch the operation source account, if overridden
    pub fn source_account(&self) -> Option<&str> {
        let s = match self {
            Operation::CreateAccount(o) => &o.source_account,
            Operation::Payment(o) => &o.source_account,
            Operation::PathPayment(o) => &o.source_account,
            Operation::ManageOffer(o) => &o.source_account,
            Operation::CreatePassiveOffer(o) => &o.source_account,
            Operation::SetOptions(o) => &o.source_account,
            Operation::ChangeTrust(o) => &o.source_account,
            Operation::AllowTrust(o) => &o.source_account,
            Operation::AccountMerge(o) => &o.source_account,
            Operation::ManageData(o) => &o.source_account,
            Operation::BumpSequence(o) => &o.source_account,
        };
        s.as_deref()
    }

    /// Fetch the amount transferred or offered by this operation, in stroops
    ///
    /// Path payments report the amount delivered to the destination.
    pub fn amount(&self) -> Option<i64> {
        match self {
            Operation::CreateAccount(o) => Some(o.starting_balance),
            Operation::Payment(o) => Some(o.amount),
            Operation::PathPayment(o) => Some(o.destination_amount),
            Operation::ManageOffer(o) => Some(o.amount),
            Operation::CreatePassiveOffer(o) => Some(o.amount),
            _ => None,
        }
    }

    /// Fetch the [MessageType] used to send this operation
    pub fn message_type(&self) -> MessageType {
        match self {
            Operation::CreateAccount(_) => MessageType::StellarCreateAccountOp,
            Operation::Payment(_) => MessageType::StellarPaymentOp,
            Operation::PathPayment(_) => MessageType::StellarPathPaymentOp,
            Operation::ManageOffer(_) => MessageType::StellarManageOfferOp,
            Operation::CreatePassiveOffer(_) => MessageType::StellarCreatePassiveOfferOp,
            Operation::SetOptions(_) => MessageType::StellarSetOptionsOp,
            Operation::ChangeTrust(_) => MessageType::StellarChangeTrustOp,
            Operation::AllowTrust(_) => MessageType::StellarAllowTrustOp,
            Operation::AccountMerge(_) => MessageType::StellarAccountMergeOp,
            Operation::ManageData(_) => MessageType::StellarManageDataOp,
            Operation::BumpSequence(_) => MessageType::StellarBumpSequenceOp,
        }
    }
}

impl From<Operation> for Message {
    fn from(op: Operation) -> Self {
        match op {
            Operation::CreateAccount(o) => o.into(),
            Operation::Payment(o) => o.into(),
            Operation::PathPayment(o) => o.into(),
            Operation::ManageOffer(o) => o.into(),
            Operation::CreatePassiveOffer(o) => o.into(),
            Operation::SetOptions(o) => o.into(),
            Operation::ChangeTrust(o) => o.into(),
            Operation::AllowTrust(o) => o.into(),
            Operation::AccountMerge(o) => o.into(),
            Operation::ManageData(o) => o.into(),
            Operation::BumpSequence(o) => o.into(),
        }
    }
}

/// Convert operation messages back to [Operation]s,
/// returning the original message for non-operation types
impl TryFrom<Message> for Operation {
    type Error = Message;

    fn try_from(m: Message) -> Result<Self, Self::Error> {
        let op = match m {
            Message::StellarCreateAccountOp(o) => Operation::CreateAccount(o),
            Message::StellarPaymentOp(o) => Operation::Payment(o),
            Message::StellarPathPaymentOp(o) => Operation::PathPayment(o),
            Message::StellarManageOfferOp(o) => Operation::ManageOffer(o),
            Message::StellarCreatePassiveOfferOp(o) => Operation::CreatePassiveOffer(o),
            Message::StellarSetOptionsOp(o) => Operation::SetOptions(o),
            Message::StellarChangeTrustOp(o) => Operation::ChangeTrust(o),
            Message::StellarAllowTrustOp(o) => Operation::AllowTrust(o),
            Message::StellarAccountMergeOp(o) => Operation::AccountMerge(o),
            Message::StellarManageDataOp(o) => Operation::ManageData(o),
            Message::StellarBumpSequenceOp(o) => Operation::BumpSequence(o),
            other => return Err(other),
        };
        Ok(op)
    }
}
