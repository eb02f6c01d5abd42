// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Stellar hardware wallet core
//!
//! This provides a common [Engine][engine::Engine] implementing the device
//! side of the Stellar signing protocol, used as the in-process simulator
//! for host testing.
//!
//! Interactions with the [Engine][engine::Engine] are performed by passing
//! request [Message][proto::Message]s to [`Engine::update`][engine::Engine::update]
//! and returning the response messages to the caller.
//!
//! ## Operations
//!
//! ### Requesting addresses
//!
//! A [`StellarGetAddress`][proto::address::StellarGetAddress] request returns
//! a [`StellarAddress`][proto::address::StellarAddress] containing the StrKey
//! account id for the provided BIP32 path.
//!
//! ### Signing a transaction
//!
//! 1. Issue [`StellarSignTx`][proto::tx::StellarSignTx] with the transaction header
//!    and the number of operations to follow
//! 2. For each [`StellarTxOpRequest`][proto::tx::StellarTxOpRequest] response, send the
//!    next operation message
//! 3. Once all declared operations are received the engine responds with a
//!    [`StellarSignedTx`][proto::tx::StellarSignedTx] containing the public key and signature
//!
//! Any failure returns the engine to an error state, requiring a new
//! [`StellarSignTx`][proto::tx::StellarSignTx] to restart signing.
//!
//! Signatures are computed over a [`TxDigest`][engine::TxDigest] of the
//! header and operations, see [`transaction_digest`][engine::transaction_digest].

pub use stellar_hw_proto::{self as proto};

pub mod engine;

pub mod helpers;
