// Copyright (c) 2022-2023 The MobileCoin Foundation

//! The [Engine] implements the device side of the Stellar signing protocol.
//!
//! This handles request [Message] inputs and returns response messages to
//! the caller, see [proto][crate::proto] for message definitions.

use ed25519_dalek::{Signer, SigningKey};
use strum::Display;
use zeroize::Zeroize;

use stellar_hw_proto::{
    address::{StellarAddress, StellarGetAddress},
    failure::Failure,
    ops::Operation,
    strkey,
    tx::{StellarSignTx, StellarSignedTx, StellarTxOpRequest},
    Message,
};

pub mod check;

mod digest;
pub use digest::{transaction_digest, TxDigest};

mod error;
pub use error::Error;

/// Engine internal state enumeration
#[derive(Copy, Clone, PartialEq, Debug, Display)]
pub enum State {
    /// Idle state, no transaction running
    Init,
    /// Receiving transaction operations
    Operations { declared: u32, received: u32 },
    /// Transaction signed
    Complete,
    /// Transaction failed
    Error,
}

/// [Engine] provides hardware-independent support for Stellar wallet operations
pub struct Engine<DRV: Driver> {
    state: State,

    address_n: Vec<u32>,

    digest: Option<TxDigest>,

    drv: DRV,
}

/// [`Driver`] trait provides platform support for [`Engine`] instances
pub trait Driver {
    /// SLIP-0010 derivation for ed25519 keys
    fn slip10_derive_ed25519(&self, path: &[u32]) -> [u8; 32];
}

impl<T: Driver> Driver for &mut T {
    fn slip10_derive_ed25519(&self, path: &[u32]) -> [u8; 32] {
        T::slip10_derive_ed25519(self, path)
    }
}

impl<DRV: Driver> Engine<DRV> {
    /// Create a new engine instance with the provided driver
    pub fn new(drv: DRV) -> Self {
        Self {
            state: State::Init,
            address_n: Vec::new(),
            digest: None,
            drv,
        }
    }

    /// Handle incoming request messages
    pub fn update(&mut self, msg: &Message) -> Result<Message, Error> {
        #[cfg(feature = "log")]
        log::debug!("event: {:?} (state: {})", msg.message_type(), self.state);

        let r = match (self.state, msg) {
            // Address requests are valid in any state
            (_, Message::StellarGetAddress(req)) => return self.get_address(req),

            // A new header (re)starts transaction signing
            (_, Message::StellarSignTx(tx)) => self.tx_init(tx),

            // Operations following the header
            (State::Operations { declared, received }, m) => {
                match Operation::try_from(m.clone()) {
                    Ok(op) => self.tx_operation(&op, declared, received),
                    Err(_) => Err(Error::UnexpectedMessage),
                }
            }

            _ => Err(Error::UnexpectedMessage),
        };

        if let Err(_e) = &r {
            #[cfg(feature = "log")]
            log::error!("{:?} failed: {} (state: {})", msg.message_type(), _e, self.state);

            self.reset();
            self.state = State::Error;
        }

        r
    }

    /// Handle incoming request messages, returning [Failure] responses on error
    pub fn process(&mut self, msg: &Message) -> Message {
        match self.update(msg) {
            Ok(r) => r,
            Err(e) => Failure::from(e).into(),
        }
    }

    /// Fetch the current engine state
    pub fn state(&self) -> State {
        self.state
    }

    /// Reset engine state, discarding any running transaction
    pub fn reset(&mut self) {
        self.state = State::Init;
        self.address_n.clear();
        self.digest = None;
    }

    /// Fetch the StrKey account id for a given path
    pub fn account_id(&self, path: &[u32]) -> Result<String, Error> {
        check::path(path)?;

        let k = self.signing_key(path);
        let account = strkey::encode_account_id(&k.verifying_key().to_bytes());

        Ok(account)
    }

    fn get_address(&mut self, req: &StellarGetAddress) -> Result<Message, Error> {
        let address = self.account_id(&req.address_n)?;

        if req.show_display {
            #[cfg(feature = "log")]
            log::info!("display address: {}", address);
        }

        Ok(StellarAddress { address }.into())
    }

    fn tx_init(&mut self, tx: &StellarSignTx) -> Result<Message, Error> {
        // Clear any prior transaction state
        self.reset();

        check::header(tx)?;

        let mut digest = TxDigest::new(&tx.network_passphrase);
        digest.update(tx)?;

        self.address_n = tx.address_n.clone();
        self.digest = Some(digest);

        match tx.num_operations {
            0 => self.tx_sign(),
            n => {
                self.state = State::Operations {
                    declared: n,
                    received: 0,
                };
                Ok(StellarTxOpRequest {}.into())
            }
        }
    }

    fn tx_operation(
        &mut self,
        op: &Operation,
        declared: u32,
        received: u32,
    ) -> Result<Message, Error> {
        check::operation(op)?;

        let digest = self.digest.as_mut().ok_or(Error::UnexpectedMessage)?;
        digest.update(op)?;

        let received = received + 1;

        #[cfg(feature = "log")]
        log::debug!("operation {}/{}: {}", received, declared, op.message_type());

        match received < declared {
            true => {
                self.state = State::Operations { declared, received };
                Ok(StellarTxOpRequest {}.into())
            }
            false => self.tx_sign(),
        }
    }

    fn tx_sign(&mut self) -> Result<Message, Error> {
        let digest = self.digest.take().ok_or(Error::UnexpectedMessage)?;

        // Signing keys are zeroized on drop
        let k = self.signing_key(&self.address_n);
        let public_key = k.verifying_key().to_bytes().to_vec();
        let signature = k.sign(digest.as_bytes()).to_bytes().to_vec();

        #[cfg(feature = "log")]
        log::debug!("signed digest: {}", digest);

        self.address_n.clear();
        self.state = State::Complete;

        Ok(StellarSignedTx {
            public_key,
            signature,
        }
        .into())
    }

    fn signing_key(&self, path: &[u32]) -> SigningKey {
        let mut secret = self.drv.slip10_derive_ed25519(path);
        let k = SigningKey::from_bytes(&secret);
        secret.zeroize();
        k
    }
}
