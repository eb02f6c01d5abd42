// Copyright (c) 2022-2023 The MobileCoin Foundation

//! StrKey account id encoding (SEP-0023)
//!
//! An account id is the base32 encoding (no padding) of a version byte,
//! the 32-byte ed25519 public key, and a CRC16-XModem checksum
//! (little endian) over both.

use crc::{Crc, CRC_16_XMODEM};
use data_encoding::BASE32_NOPAD;

use crate::Error;

/// Version byte for ed25519 account ids (`G...`)
pub const VERSION_ACCOUNT_ID: u8 = 6 << 3;

/// Version byte for ed25519 secret seeds (`S...`)
pub const VERSION_SEED: u8 = 18 << 3;

/// Encoded length of an account id
pub const ACCOUNT_ID_LEN: usize = 56;

const KEY_LEN: usize = 32;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Encode an ed25519 public key as a StrKey account id
pub fn encode_account_id(public_key: &[u8; KEY_LEN]) -> String {
    encode(VERSION_ACCOUNT_ID, public_key)
}

/// Decode a StrKey account id to an ed25519 public key
pub fn decode_account_id(s: &str) -> Result<[u8; KEY_LEN], Error> {
    decode(VERSION_ACCOUNT_ID, s)
}

/// Check whether a string is a valid StrKey account id
pub fn is_account_id(s: &str) -> bool {
    decode_account_id(s).is_ok()
}

fn encode(version: u8, key: &[u8; KEY_LEN]) -> String {
    let mut buff = [0u8; 1 + KEY_LEN + 2];
    buff[0] = version;
    buff[1..][..KEY_LEN].copy_from_slice(key);

    let checksum = CRC16.checksum(&buff[..1 + KEY_LEN]);
    buff[1 + KEY_LEN..].copy_from_slice(&checksum.to_le_bytes());

    BASE32_NOPAD.encode(&buff)
}

fn decode(version: u8, s: &str) -> Result<[u8; KEY_LEN], Error> {
    if s.len() != ACCOUNT_ID_LEN {
        return Err(Error::InvalidLength);
    }

    let buff = BASE32_NOPAD
        .decode(s.as_bytes())
        .map_err(|_| Error::InvalidEncoding)?;
    if buff.len() != 1 + KEY_LEN + 2 {
        return Err(Error::InvalidLength);
    }

    if buff[0] != version {
        return Err(Error::InvalidVersion(buff[0]));
    }

    let (payload, checksum) = buff.split_at(1 + KEY_LEN);
    if CRC16.checksum(payload).to_le_bytes() != checksum {
        return Err(Error::InvalidChecksum);
    }

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&payload[1..]);
    Ok(key)
}
