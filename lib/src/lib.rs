// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Stellar hardware wallet API library (and CLI)
//!
//! [DeviceHandle] provides address requests and transaction signing over a
//! [Transport], with the multi-step signing protocol driven by
//! [SigningExchange].
//!
//! With the `sim` feature [SimTransport][transport::SimTransport] runs an
//! in-process software signer for testing.

/// Re-export `stellar-hw-proto` for consumers
pub use stellar_hw_proto::{self as proto};

pub mod transport;
pub use transport::Transport;

pub mod exchange;
pub use exchange::{run_signing_exchange, Classify, ExchangeState, Reply, SigningExchange};

mod handle;
pub use handle::DeviceHandle;

mod error;
pub use error::Error;

mod request;
pub use request::{SignRequest, SignResponse};
