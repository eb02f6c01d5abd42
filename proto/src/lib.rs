// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Protocol / message definitions for Stellar hardware wallet communication
//!
//! This module provides the message catalog used between a host and a
//! Stellar signing device, along with the helpers required to build and
//! check messages (StrKey account ids, BIP32 paths, amounts).
//!
//! Wire encoding is provided by the transport, messages here are plain typed
//! objects identified by [MessageType].
//!
//! ## Signing
//!
//! Transactions are signed incrementally, the device cannot hold an entire
//! transaction so pulls operations one at a time:
//!
//! 1. Host sends a [`StellarSignTx`] header describing the transaction
//! 2. Device replies with [`StellarTxOpRequest`] for each operation it is ready to receive
//! 3. Host responds to each request with the next [`Operation`]
//! 4. Device replies with [`StellarSignedTx`] once all declared operations have been consumed
//!

pub mod address;
pub mod amount;
pub mod failure;
pub mod ops;
pub mod path;
pub mod prelude;
pub mod strkey;
pub mod tx;

mod helpers;
mod macros;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter, EnumString};

use macros::stellar_messages;
use prelude::*;

/// Default BIP32 path for Stellar accounts (SEP-0005)
pub const DEFAULT_BIP32_PATH: &str = "m/44h/148h/0h";

/// Public network passphrase
pub const PUBLIC_NETWORK_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Test network passphrase
pub const TESTNET_NETWORK_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Network passphrase used where none is specified
pub const DEFAULT_NETWORK_PASSPHRASE: &str = PUBLIC_NETWORK_PASSPHRASE;

/// Message type identifiers
#[derive(
    Copy, Clone, PartialEq, Eq, Debug, Display, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
)]
#[repr(u16)]
pub enum MessageType {
    Failure = 3,
    StellarSignTx = 202,
    StellarTxOpRequest = 203,
    StellarGetAddress = 207,
    StellarAddress = 208,
    StellarCreateAccountOp = 210,
    StellarPaymentOp = 211,
    StellarPathPaymentOp = 212,
    StellarManageOfferOp = 213,
    StellarCreatePassiveOfferOp = 214,
    StellarSetOptionsOp = 215,
    StellarChangeTrustOp = 216,
    StellarAllowTrustOp = 217,
    StellarAccountMergeOp = 218,
    // 219 is reserved for the unsupported inflation operation
    StellarManageDataOp = 220,
    StellarBumpSequenceOp = 221,
    StellarSignedTx = 230,
}

stellar_messages!(
    // General
    Failure,
    // Addresses
    StellarGetAddress,
    StellarAddress,
    // Transaction signing
    StellarSignTx,
    StellarTxOpRequest,
    StellarSignedTx,
    // Operations
    StellarCreateAccountOp,
    StellarPaymentOp,
    StellarPathPaymentOp,
    StellarManageOfferOp,
    StellarCreatePassiveOfferOp,
    StellarSetOptionsOp,
    StellarChangeTrustOp,
    StellarAllowTrustOp,
    StellarAccountMergeOp,
    StellarManageDataOp,
    StellarBumpSequenceOp,
);

/// Errors parsing protocol values
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// Invalid base32 encoding
    #[error("invalid StrKey encoding")]
    InvalidEncoding,

    /// Unexpected version byte
    #[error("unexpected StrKey version byte ({0:#04x})")]
    InvalidVersion(u8),

    /// Checksum mismatch
    #[error("StrKey checksum mismatch")]
    InvalidChecksum,

    /// Invalid key or payload length
    #[error("invalid length")]
    InvalidLength,

    /// Invalid BIP32 path
    #[error("invalid derivation path: '{0}'")]
    InvalidPath(String),

    /// Invalid decimal amount
    #[error("invalid amount: '{0}'")]
    InvalidAmount(String),
}
