// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Address request / response messages

use serde::{Deserialize, Serialize};

/// Request the account id for a given BIP32 path
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct StellarGetAddress {
    /// BIP32 derivation path
    pub address_n: Vec<u32>,

    /// Display the address on the device for confirmation
    #[serde(default)]
    pub show_display: bool,
}

impl StellarGetAddress {
    /// Create a new [`StellarGetAddress`] request
    pub fn new(address_n: &[u32], show_display: bool) -> Self {
        Self {
            address_n: address_n.to_vec(),
            show_display,
        }
    }
}

/// Account id response, StrKey (`G...`) encoded
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StellarAddress {
    pub address: String,
}
