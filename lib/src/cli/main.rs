// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Command line utility for Stellar address requests and transaction signing
//! against the bundled device simulator

use std::time::Duration;

use bip39::{Language, Mnemonic, Seed};
use clap::{Parser, Subcommand};
use log::{debug, info, LevelFilter};
use zeroize::Zeroize;

use stellar_hw::{
    proto::{
        amount::format_amount, path::Bip32Path, DEFAULT_BIP32_PATH, DEFAULT_NETWORK_PASSPHRASE,
    },
    transport::SimTransport,
    DeviceHandle, SignRequest, SignResponse,
};

mod helpers;
use helpers::*;

/// Stellar hardware wallet command line utility
#[derive(Clone, PartialEq, Debug, Parser)]
struct Options {
    /// BIP39 mnemonic for the simulated device
    #[clap(long, env = "STELLAR_HW_MNEMONIC", hide_env_values = true)]
    mnemonic: String,

    /// Timeout for device requests (seconds)
    #[clap(long, default_value = "2")]
    request_timeout_s: u64,

    /// Timeout for user interaction (seconds)
    #[clap(long, default_value = "10")]
    user_timeout_s: u64,

    /// Subcommand to execute
    #[clap(subcommand)]
    cmd: Actions,

    /// Enable verbose logging
    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, PartialEq, Debug, Subcommand)]
#[non_exhaustive]
enum Actions {
    /// Fetch the account id for a BIP32 path
    GetAddress {
        /// BIP32 derivation path
        #[clap(long, default_value = DEFAULT_BIP32_PATH)]
        path: Bip32Path,

        /// Display the address on the device
        #[clap(long)]
        show_display: bool,
    },

    /// Sign a transaction from a JSON signing request
    SignTx {
        /// Signing request file (`.json`)
        #[clap(long)]
        input: String,

        /// Signing response file (`.json`), printed to stdout if omitted
        #[clap(long)]
        output: Option<String>,

        /// BIP32 derivation path
        #[clap(long, default_value = DEFAULT_BIP32_PATH)]
        path: Bip32Path,

        /// Network passphrase
        #[clap(long, default_value = DEFAULT_NETWORK_PASSPHRASE)]
        network_passphrase: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let mut args = Options::parse();

    // Setup logging
    simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default())?;

    // Setup simulated device from mnemonic
    let mnemonic = Mnemonic::from_phrase(args.mnemonic.trim(), Language::English)
        .map_err(|e| anyhow::anyhow!("invalid mnemonic: {}", e))?;
    args.mnemonic.zeroize();

    let mut seed = [0u8; 64];
    seed.copy_from_slice(Seed::new(&mnemonic, "").as_bytes());

    let t = DeviceHandle::from(SimTransport::new(&seed)).with_timeouts(
        Duration::from_secs(args.request_timeout_s),
        Duration::from_secs(args.user_timeout_s),
    );
    seed.zeroize();

    debug!("Executing command: {:?}", args.cmd);

    match args.cmd {
        Actions::GetAddress { path, show_display } => {
            info!("requesting address for path: {}", path);

            let address = t.get_address(&path, show_display).await?;

            info!("address: {}", address);
        }
        Actions::SignTx {
            input,
            output,
            path,
            network_passphrase,
        } => {
            // Read in signing request
            debug!("Loading signing request from '{}'", input);
            let req: SignRequest = read_input(&input).await?;

            info!(
                "signing transaction for {} ({} operations, path: {})",
                req.tx.source_account,
                req.operations.len(),
                path
            );

            for (i, op) in req.operations.iter().enumerate() {
                match op.amount() {
                    Some(a) => info!("  {}: {} ({})", i, op.message_type(), format_amount(a)),
                    None => info!("  {}: {}", i, op.message_type()),
                }
            }

            let signed = t
                .sign_tx(req.tx, req.operations, &path, &network_passphrase)
                .await?;

            let resp = SignResponse::try_from(signed)?;

            info!("signed by: {}", resp.account);

            write_output(output.as_deref(), &resp).await?;
        }
    }

    Ok(())
}
