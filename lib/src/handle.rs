// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Handle for connected Stellar devices
//!
//! This provides methods for interacting with the device
//! and is generic over [Transport]

use std::{
    fmt::{Debug, Display},
    sync::Arc,
    time::Duration,
};

use ed25519_dalek::{Signature, VerifyingKey};
use log::debug;
use tokio::sync::Mutex;

use stellar_hw_proto::{
    address::StellarGetAddress,
    ops::Operation,
    tx::{StellarSignTx, StellarSignedTx},
    Message,
};

use crate::{exchange::SigningExchange, Error, Transport};

/// Stellar handle for a connected [Transport].
///
/// Each request holds the transport lock for its whole duration,
/// so a signing exchange completes or fails before any other
/// request is issued.
pub struct DeviceHandle<T: Transport> {
    /// Transport for device communication
    t: Arc<Mutex<T>>,
    /// Timeout for user acknowledgements
    user_timeout: Duration,
    /// Timeout for requests
    request_timeout: Duration,
}

impl<T: Transport> Clone for DeviceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            t: self.t.clone(),
            user_timeout: self.user_timeout,
            request_timeout: self.request_timeout,
        }
    }
}

/// Create a [DeviceHandle] wrapper from a type implementing [Transport]
impl<T: Transport> From<T> for DeviceHandle<T> {
    fn from(t: T) -> Self {
        Self {
            t: Arc::new(Mutex::new(t)),
            user_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(2),
        }
    }
}

impl<T: Transport<Message = Message> + Send> DeviceHandle<T> {
    /// Set request and user interaction timeouts
    pub fn with_timeouts(mut self, request_timeout: Duration, user_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self.user_timeout = user_timeout;
        self
    }

    /// Helper to fetch user interaction timeout
    pub fn user_timeout(&self) -> Duration {
        self.user_timeout
    }

    /// Helper to fetch request timeout
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Issue a single request and await the response
    pub async fn call(
        &self,
        req: impl Into<Message>,
        timeout: Duration,
    ) -> Result<Message, Error<T::Error>> {
        let req = req.into();
        let mut t = self.t.lock().await;

        debug!("Request: {}", req.message_type());

        t.send(req).await.map_err(Error::Transport)?;
        let resp = t.receive(timeout).await.map_err(Error::Transport)?;

        debug!("Response: {}", resp.message_type());

        Ok(resp)
    }

    /// Fetch the StrKey account id for the provided BIP32 path,
    /// optionally displaying the address on the device
    pub async fn get_address(
        &self,
        address_n: &[u32],
        show_display: bool,
    ) -> Result<String, Error<T::Error>> {
        debug!("Requesting address for path: {:?}", address_n);

        // Displaying the address requires user interaction
        let timeout = match show_display {
            true => self.user_timeout,
            false => self.request_timeout,
        };

        let resp = self
            .call(StellarGetAddress::new(address_n, show_display), timeout)
            .await?;

        match resp {
            Message::StellarAddress(a) => Ok(a.address),
            Message::Failure(f) => Err(Error::Failure {
                code: f.code,
                message: f.message,
            }),
            m => Err(Error::UnexpectedResponse(m.message_type())),
        }
    }

    /// Sign a transaction, sending the header and then each operation
    /// on request of the device.
    ///
    /// The header `address_n`, `network_passphrase` and `num_operations`
    /// fields are overwritten from the provided arguments.
    pub async fn sign_tx(
        &self,
        mut tx: StellarSignTx,
        operations: Vec<Operation>,
        address_n: &[u32],
        network_passphrase: &str,
    ) -> Result<StellarSignedTx, Error<T::Error>> {
        tx.network_passphrase = network_passphrase.to_string();
        tx.address_n = address_n.to_vec();
        tx.num_operations = operation_count(operations.len())?;

        debug!(
            "Signing transaction for {} ({} operations)",
            tx.source_account, tx.num_operations
        );

        let mut x = SigningExchange::new(tx, operations).with_timeout(self.user_timeout);

        let signed = {
            let mut t = self.t.lock().await;
            x.run(&mut *t).await?
        };

        // Check the returned key and signature are well formed
        let public_key = <[u8; 32]>::try_from(signed.public_key.as_slice())
            .map_err(|_| Error::InvalidKey)?;
        VerifyingKey::from_bytes(&public_key).map_err(|_| Error::InvalidKey)?;

        Signature::from_slice(&signed.signature).map_err(|_| Error::InvalidSignature)?;

        Ok(signed)
    }
}

/// Convert an operation count to the header `num_operations` field
fn operation_count<E: Display + Debug>(n: usize) -> Result<u32, Error<E>> {
    u32::try_from(n).map_err(|_| Error::TooManyOperations(n))
}
