// Copyright (c) 2022-2023 The MobileCoin Foundation

use stellar_hw_proto::failure::{Failure, FailureType};

/// [Engine][super::Engine] errors
#[derive(Copy, Clone, PartialEq, Debug, thiserror::Error)]
#[repr(u8)]
pub enum Error {
    /// Invalid or non-Stellar derivation path
    #[error("invalid derivation path")]
    InvalidPath = 0x00,

    /// Network passphrase missing
    #[error("network passphrase missing")]
    InvalidNetwork = 0x01,

    /// Invalid StrKey account id
    #[error("invalid account id")]
    InvalidAccount = 0x02,

    /// Memo type and memo fields disagree
    #[error("invalid memo")]
    InvalidMemo = 0x03,

    /// Timebounds end before start
    #[error("invalid timebounds")]
    InvalidTimebounds = 0x04,

    /// Non-positive or out of range amount
    #[error("invalid amount")]
    InvalidAmount = 0x05,

    /// Invalid asset code or issuer
    #[error("invalid asset")]
    InvalidAsset = 0x06,

    /// Zero price numerator or denominator
    #[error("invalid price")]
    InvalidPrice = 0x07,

    /// Unknown account flags
    #[error("invalid account flags")]
    InvalidFlags = 0x08,

    /// Signer fields incomplete or key length invalid
    #[error("invalid signer")]
    InvalidSigner = 0x09,

    /// Invalid weight, threshold, or home domain
    #[error("invalid account options")]
    InvalidOptions = 0x0a,

    /// Data entry key or value length invalid
    #[error("invalid data entry")]
    InvalidData = 0x0b,

    /// Message not valid in the current state
    #[error("unexpected message")]
    UnexpectedMessage = 0x0c,

    /// Digest encoding failed
    #[error("message encoding failed")]
    EncodingFailed = 0x0d,
}

impl From<Error> for FailureType {
    fn from(e: Error) -> Self {
        match e {
            Error::UnexpectedMessage => FailureType::UnexpectedMessage,
            Error::EncodingFailed => FailureType::ProcessError,
            _ => FailureType::DataError,
        }
    }
}

/// Convert engine errors to [Failure] responses
impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        Failure::new(FailureType::from(e), e.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn failure_codes() {
        let f = Failure::from(Error::UnexpectedMessage);
        assert_eq!(f.code, FailureType::UnexpectedMessage);
        assert_eq!(f.message, "unexpected message");

        let f = Failure::from(Error::InvalidMemo);
        assert_eq!(f.code, FailureType::DataError);

        assert_eq!(Error::InvalidData as u8, 0x0b);
    }
}
