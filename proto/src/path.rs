// Copyright (c) 2022-2023 The MobileCoin Foundation

//! BIP32 derivation paths
//!
//! Paths are written as `m/44h/148h/0h`, with `h` or `'` marking
//! hardened indices.

use core::{fmt::Display, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Hardened index flag
pub const HARDENED: u32 = 1 << 31;

/// SEP-0005 purpose index (unhardened)
pub const PURPOSE: u32 = 44;

/// SLIP-0044 coin type for Stellar (unhardened)
pub const COIN_TYPE: u32 = 148;

/// BIP32 derivation path
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Bip32Path(pub Vec<u32>);

impl Bip32Path {
    /// Stellar account path (`m/44'/148'/account'`)
    pub fn account(account: u32) -> Self {
        Self(vec![
            PURPOSE | HARDENED,
            COIN_TYPE | HARDENED,
            account | HARDENED,
        ])
    }

    /// Check whether all path components are hardened
    pub fn is_hardened(&self) -> bool {
        self.0.iter().all(|i| i & HARDENED != 0)
    }

    /// Check this is a valid Stellar account path
    pub fn is_stellar_account(&self) -> bool {
        self.0.len() == 3
            && self.is_hardened()
            && self.0[0] == PURPOSE | HARDENED
            && self.0[1] == COIN_TYPE | HARDENED
    }
}

impl Deref for Bip32Path {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u32]> for Bip32Path {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

impl From<Vec<u32>> for Bip32Path {
    fn from(v: Vec<u32>) -> Self {
        Self(v)
    }
}

impl FromStr for Bip32Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPath(s.to_string());

        let mut parts = s.trim().split('/');
        if parts.next() != Some("m") {
            return Err(invalid());
        }

        let mut path = vec![];
        for p in parts {
            let (index, hardened) = match p.strip_suffix(|c: char| c == 'h' || c == '\'') {
                Some(v) => (v, true),
                None => (p, false),
            };

            let index = u32::from_str(index).map_err(|_| invalid())?;
            if index & HARDENED != 0 {
                return Err(invalid());
            }

            path.push(match hardened {
                true => index | HARDENED,
                false => index,
            });
        }

        Ok(Self(path))
    }
}

impl Display for Bip32Path {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "m")?;
        for i in &self.0 {
            match i & HARDENED != 0 {
                true => write!(f, "/{}h", i & !HARDENED)?,
                false => write!(f, "/{i}")?,
            }
        }
        Ok(())
    }
}
