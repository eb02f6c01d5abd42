#![allow(unused)]

use std::str::FromStr;

use bip39::{Language, Mnemonic, Seed};
use log::LevelFilter;

use stellar_hw_core::{
    engine::Engine,
    helpers::SeedDriver,
    proto::{
        ops::*,
        path::Bip32Path,
        tx::{StellarSignTx, StellarSignedTx},
        Message, TESTNET_NETWORK_PASSPHRASE,
    },
};

/// SEP-0005 test mnemonic (test 1)
pub const MNEMONIC: &str =
    "illness spike retreat truth genius clock brain pass fit cave bargain toe";

/// SEP-0005 accounts for [MNEMONIC]
pub const ACCOUNTS: &[&str] = &[
    "GDRXE2BQUC3AZNPVFSCEZ76NJ3WWL25FYFK6RGZGIEKWE4SOOHSUJUJ6",
    "GBAW5XGWORWVFE2XTJYDTLDHXTY2Q2MO73HYCGB3XMFMQ562Q2W2GJQX",
    "GAY5PRAHJ2HIYBYCLZXTHID6SPVELOOYH2LBPH3LD4RUMXUW3DOYTLXW",
];

pub fn setup_logging() {
    let log_level = match std::env::var("LOG_LEVEL").map(|v| LevelFilter::from_str(&v)) {
        Ok(Ok(l)) => l,
        _ => LevelFilter::Debug,
    };

    let _ = simplelog::SimpleLogger::init(log_level, simplelog::Config::default());
}

/// Setup an engine using the SEP-0005 test mnemonic
pub fn engine() -> Engine<SeedDriver> {
    let m = Mnemonic::from_phrase(MNEMONIC, Language::English).unwrap();
    let seed = Seed::new(&m, "");

    let mut b = [0u8; 64];
    b.copy_from_slice(seed.as_bytes());

    Engine::new(SeedDriver::new(&b))
}

/// Build a header for the provided account and operations
pub fn header(account: u32, num_operations: usize) -> StellarSignTx {
    let mut tx = StellarSignTx::new(ACCOUNTS[account as usize], 100, 4_294_967_296)
        .with_memo_text("hello")
        .with_timebounds(0, 1_700_000_000);

    tx.address_n = Bip32Path::account(account).0;
    tx.network_passphrase = TESTNET_NETWORK_PASSPHRASE.to_string();
    tx.num_operations = num_operations as u32;
    tx
}

/// Example operations, one of each kind
pub fn operations() -> Vec<Operation> {
    let issuer = ACCOUNTS[2].to_string();
    let usd = StellarAssetType::credit("USD", issuer.clone());

    vec![
        Operation::CreateAccount(StellarCreateAccountOp {
            source_account: None,
            new_account: ACCOUNTS[1].to_string(),
            starting_balance: 10_000_000,
        }),
        Operation::Payment(StellarPaymentOp {
            source_account: None,
            destination_account: ACCOUNTS[1].to_string(),
            asset: StellarAssetType::native(),
            amount: 5_000_000,
        }),
        Operation::PathPayment(StellarPathPaymentOp {
            source_account: None,
            send_asset: StellarAssetType::native(),
            send_max: 20_000_000,
            destination_account: ACCOUNTS[1].to_string(),
            destination_asset: usd.clone(),
            destination_amount: 1_000_000,
            paths: vec![StellarAssetType::credit("EURT", issuer.clone())],
        }),
        Operation::ManageOffer(StellarManageOfferOp {
            source_account: None,
            selling_asset: StellarAssetType::native(),
            buying_asset: usd.clone(),
            amount: 1_000_000,
            price_n: 1,
            price_d: 4,
            offer_id: 0,
        }),
        Operation::CreatePassiveOffer(StellarCreatePassiveOfferOp {
            source_account: None,
            selling_asset: usd.clone(),
            buying_asset: StellarAssetType::native(),
            amount: 1_000_000,
            price_n: 4,
            price_d: 1,
        }),
        Operation::SetOptions(StellarSetOptionsOp {
            home_domain: Some("example.com".to_string()),
            set_flags: Some(AccountFlags::AUTH_REQUIRED.bits()),
            signer_type: Some(SignerKeyType::Ed25519),
            signer_key: Some(vec![0x11; 32]),
            signer_weight: Some(1),
            ..Default::default()
        }),
        Operation::ChangeTrust(StellarChangeTrustOp {
            source_account: None,
            asset: usd,
            limit: u64::MAX >> 1,
        }),
        Operation::AllowTrust(StellarAllowTrustOp {
            source_account: Some(issuer),
            trusted_account: ACCOUNTS[0].to_string(),
            asset_type: AssetType::Alphanum4,
            asset_code: "USD".to_string(),
            is_authorized: true,
        }),
        Operation::ManageData(StellarManageDataOp {
            source_account: None,
            key: "config".to_string(),
            value: Some(b"value".to_vec()),
        }),
        Operation::BumpSequence(StellarBumpSequenceOp {
            source_account: None,
            bump_to: 4_294_967_300,
        }),
        Operation::AccountMerge(StellarAccountMergeOp {
            source_account: None,
            destination_account: ACCOUNTS[1].to_string(),
        }),
    ]
}

/// Drive the engine through a complete signing operation
pub fn sign(
    e: &mut Engine<SeedDriver>,
    tx: &StellarSignTx,
    ops: &[Operation],
) -> anyhow::Result<StellarSignedTx> {
    let mut r = e.update(&tx.clone().into())?;

    for op in ops {
        match r {
            Message::StellarTxOpRequest(_) => (),
            _ => anyhow::bail!("unexpected response: {:?}", r),
        }
        r = e.update(&op.clone().into())?;
    }

    match r {
        Message::StellarSignedTx(s) => Ok(s),
        _ => anyhow::bail!("unexpected response: {:?}", r),
    }
}
