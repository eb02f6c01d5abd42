// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Signing request / response objects for file based signing

use serde::{Deserialize, Serialize};

use stellar_hw_proto::{
    ops::Operation,
    strkey,
    tx::{StellarSignTx, StellarSignedTx},
    Error,
};

/// Transaction signing request, a header and the operations to follow
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SignRequest {
    pub tx: StellarSignTx,
    pub operations: Vec<Operation>,
}

/// Transaction signing response
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SignResponse {
    /// Signing account (StrKey)
    pub account: String,

    #[serde(with = "hex::serde")]
    pub public_key: Vec<u8>,

    #[serde(with = "hex::serde")]
    pub signature: Vec<u8>,
}

impl TryFrom<StellarSignedTx> for SignResponse {
    type Error = Error;

    fn try_from(s: StellarSignedTx) -> Result<Self, Self::Error> {
        let k = <[u8; 32]>::try_from(s.public_key.as_slice()).map_err(|_| Error::InvalidLength)?;

        Ok(Self {
            account: strkey::encode_account_id(&k),
            public_key: s.public_key,
            signature: s.signature,
        })
    }
}
