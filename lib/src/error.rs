// Copyright (c) 2022-2023 The MobileCoin Foundation

use core::fmt::Debug;
use std::fmt::Display;

use stellar_hw_proto::{failure::FailureType, MessageType};

use crate::exchange::ExchangeState;

/// Stellar hardware wallet API Error Type, generic over transport errors
#[derive(Debug, thiserror::Error)]
pub enum Error<E: Display + Debug> {
    /// Device response not valid for the current exchange state
    #[error("Protocol violation (state: {state}, received: {received})")]
    ProtocolViolation {
        state: ExchangeState,
        received: String,
    },

    /// Device requested more operations than were declared
    #[error("Device requested more than the {declared} declared operations")]
    OperationsExhausted { declared: usize },

    /// Device returned a signature before consuming all operations
    #[error("Signature returned with {remaining} operations unsent")]
    PrematureSignature { remaining: usize },

    /// Transport error (including receive timeouts)
    #[error("Transport error {0}")]
    Transport(E),

    /// Device returned a failure in response to a request
    #[error("Device failure: {message} ({code})")]
    Failure { code: FailureType, message: String },

    /// Unexpected response message
    #[error("Unexpected response ({0})")]
    UnexpectedResponse(MessageType),

    /// Invalid key in response
    #[error("Invalid key object")]
    InvalidKey,

    /// Malformed signature in response
    #[error("Invalid signature")]
    InvalidSignature,

    /// Operation count exceeds the header `num_operations` range
    #[error("Too many operations ({0})")]
    TooManyOperations(usize),
}
