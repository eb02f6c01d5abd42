// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Field validation for headers and operations

use stellar_hw_proto::{
    ops::*,
    path::Bip32Path,
    strkey,
    tx::{MemoType, StellarSignTx, MEMO_HASH_LEN, MEMO_TEXT_MAX_LEN},
};

use super::Error;

/// Maximum number of intermediate assets in a path payment
pub const MAX_PAYMENT_PATHS: usize = 5;

/// Maximum data entry key and value length
pub const MAX_DATA_LEN: usize = 64;

/// Maximum home domain length
pub const MAX_HOME_DOMAIN_LEN: usize = 32;

/// Signer key length (all signer types)
pub const SIGNER_KEY_LEN: usize = 32;

/// Check a path is a hardened Stellar account path (`m/44'/148'/x'`)
pub fn path(p: &[u32]) -> Result<(), Error> {
    match Bip32Path::from(p.to_vec()).is_stellar_account() {
        true => Ok(()),
        false => Err(Error::InvalidPath),
    }
}

pub fn account(s: &str) -> Result<(), Error> {
    strkey::decode_account_id(s)
        .map(|_| ())
        .map_err(|_| Error::InvalidAccount)
}

pub fn source_account(s: Option<&str>) -> Result<(), Error> {
    match s {
        Some(v) => account(v),
        None => Ok(()),
    }
}

fn positive(v: i64) -> Result<(), Error> {
    match v > 0 {
        true => Ok(()),
        false => Err(Error::InvalidAmount),
    }
}

fn price(n: u32, d: u32) -> Result<(), Error> {
    match n != 0 && d != 0 {
        true => Ok(()),
        false => Err(Error::InvalidPrice),
    }
}

fn byte(v: Option<u32>) -> Result<(), Error> {
    match v {
        Some(v) if v > u8::MAX as u32 => Err(Error::InvalidOptions),
        _ => Ok(()),
    }
}

pub fn asset(a: &StellarAssetType) -> Result<(), Error> {
    match a.asset_type {
        AssetType::Native => match (a.code.as_deref(), &a.issuer) {
            (None | Some(""), None) => Ok(()),
            _ => Err(Error::InvalidAsset),
        },
        t => {
            let code = a.code.as_deref().unwrap_or("");
            if !t.accepts_code(code) || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(Error::InvalidAsset);
            }

            match &a.issuer {
                Some(i) if strkey::is_account_id(i) => Ok(()),
                _ => Err(Error::InvalidAsset),
            }
        }
    }
}

/// Check transaction header fields
pub fn header(tx: &StellarSignTx) -> Result<(), Error> {
    path(&tx.address_n)?;

    if tx.network_passphrase.is_empty() {
        return Err(Error::InvalidNetwork);
    }

    account(&tx.source_account)?;

    if tx.timebounds_end != 0 && tx.timebounds_end < tx.timebounds_start {
        return Err(Error::InvalidTimebounds);
    }

    match tx.memo_type {
        MemoType::None => Ok(()),
        MemoType::Text => match &tx.memo_text {
            Some(t) if t.len() <= MEMO_TEXT_MAX_LEN => Ok(()),
            _ => Err(Error::InvalidMemo),
        },
        MemoType::Id => match tx.memo_id {
            Some(_) => Ok(()),
            None => Err(Error::InvalidMemo),
        },
        MemoType::Hash | MemoType::Return => match &tx.memo_hash {
            Some(h) if h.len() == MEMO_HASH_LEN => Ok(()),
            _ => Err(Error::InvalidMemo),
        },
    }
}

/// Check operation fields
pub fn operation(op: &Operation) -> Result<(), Error> {
    source_account(op.source_account())?;

    match op {
        Operation::CreateAccount(o) => {
            account(&o.new_account)?;
            positive(o.starting_balance)
        }
        Operation::Payment(o) => {
            account(&o.destination_account)?;
            asset(&o.asset)?;
            positive(o.amount)
        }
        Operation::PathPayment(o) => {
            asset(&o.send_asset)?;
            positive(o.send_max)?;
            account(&o.destination_account)?;
            asset(&o.destination_asset)?;
            positive(o.destination_amount)?;

            if o.paths.len() > MAX_PAYMENT_PATHS {
                return Err(Error::InvalidAsset);
            }
            o.paths.iter().try_for_each(asset)
        }
        Operation::ManageOffer(o) => {
            asset(&o.selling_asset)?;
            asset(&o.buying_asset)?;

            // Zero amount deletes an existing offer
            if o.amount < 0 || (o.amount == 0 && o.offer_id == 0) {
                return Err(Error::InvalidAmount);
            }
            price(o.price_n, o.price_d)
        }
        Operation::CreatePassiveOffer(o) => {
            asset(&o.selling_asset)?;
            asset(&o.buying_asset)?;
            positive(o.amount)?;
            price(o.price_n, o.price_d)
        }
        Operation::SetOptions(o) => set_options(o),
        Operation::ChangeTrust(o) => match o.asset.asset_type {
            AssetType::Native => Err(Error::InvalidAsset),
            _ => asset(&o.asset),
        },
        Operation::AllowTrust(o) => {
            account(&o.trusted_account)?;

            match o.asset_type != AssetType::Native
                && o.asset_type.accepts_code(&o.asset_code)
                && o.asset_code.bytes().all(|b| b.is_ascii_alphanumeric())
            {
                true => Ok(()),
                false => Err(Error::InvalidAsset),
            }
        }
        Operation::AccountMerge(o) => account(&o.destination_account),
        Operation::ManageData(o) => {
            if o.key.is_empty() || o.key.len() > MAX_DATA_LEN {
                return Err(Error::InvalidData);
            }
            match &o.value {
                Some(v) if v.len() > MAX_DATA_LEN => Err(Error::InvalidData),
                _ => Ok(()),
            }
        }
        Operation::BumpSequence(o) => match o.bump_to > i64::MAX as u64 {
            true => Err(Error::InvalidAmount),
            false => Ok(()),
        },
    }
}

fn set_options(o: &StellarSetOptionsOp) -> Result<(), Error> {
    source_account(o.inflation_destination_account.as_deref())?;

    if o.set_flags().is_none() || o.clear_flags().is_none() {
        return Err(Error::InvalidFlags);
    }

    byte(o.master_weight)?;
    byte(o.low_threshold)?;
    byte(o.medium_threshold)?;
    byte(o.high_threshold)?;

    if let Some(d) = &o.home_domain {
        if d.len() > MAX_HOME_DOMAIN_LEN {
            return Err(Error::InvalidOptions);
        }
    }

    // Signer fields must be provided together
    match (&o.signer_type, &o.signer_key, &o.signer_weight) {
        (None, None, None) => Ok(()),
        (Some(_), Some(k), Some(w)) if k.len() == SIGNER_KEY_LEN && *w <= u8::MAX as u32 => {
            Ok(())
        }
        _ => Err(Error::InvalidSigner),
    }
}
