#![allow(unused)]

use std::{collections::VecDeque, str::FromStr, time::Duration};

use async_trait::async_trait;
use bip39::{Language, Mnemonic, Seed};
use log::{debug, LevelFilter};
use simplelog::SimpleLogger;

use stellar_hw::{
    proto::{ops::*, tx::StellarSignTx, Message},
    transport::SimTransport,
    DeviceHandle, Transport,
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

    let _ = SimpleLogger::init(log_level, simplelog::Config::default());
}

/// Setup a simulator transport using the SEP-0005 test mnemonic
pub fn sim() -> SimTransport {
    let m = Mnemonic::from_phrase(MNEMONIC, Language::English).unwrap();
    let seed = Seed::new(&m, "");

    let mut b = [0u8; 64];
    b.copy_from_slice(seed.as_bytes());

    SimTransport::new(&b)
}

/// Setup a device handle over the simulator
pub fn sim_handle() -> DeviceHandle<SimTransport> {
    DeviceHandle::from(sim())
}

/// Transport replying from a fixed script, recording sent messages
pub struct ScriptedTransport {
    pub replies: VecDeque<Message>,
    pub sent: Vec<Message>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Message>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            sent: vec![],
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    type Message = Message;
    type Error = String;

    async fn send(&mut self, msg: Message) -> Result<(), String> {
        debug!("scripted send: {:?}", msg.message_type());
        self.sent.push(msg);
        Ok(())
    }

    async fn receive(&mut self, timeout: Duration) -> Result<Message, String> {
        self.replies
            .pop_front()
            .ok_or_else(|| format!("no reply within {timeout:?}"))
    }
}

/// Build a transaction header with no memo
pub fn header(source: &str) -> StellarSignTx {
    StellarSignTx::new(source, 100, 1234)
}

/// Build `n` payment operations with distinct amounts
pub fn payments(n: usize) -> Vec<Operation> {
    (0..n)
        .map(|i| {
            Operation::Payment(StellarPaymentOp {
                source_account: None,
                destination_account: ACCOUNTS[1].to_string(),
                asset: StellarAssetType::native(),
                amount: (i as i64 + 1) * 10_000_000,
            })
        })
        .collect()
}
