//! Transport abstraction for device communication
//!
// Copyright (c) 2022-2023 The MobileCoin Foundation

use std::{
    fmt::{Debug, Display},
    time::Duration,
};

use async_trait::async_trait;

#[cfg(feature = "sim")]
pub use sim::{SimError, SimTransport};

/// Transport for exchanging framed messages with a device.
///
/// Implementations must preserve message ordering, and are responsible for
/// framing / encoding messages on the wire.
#[async_trait]
pub trait Transport {
    /// Message type carried by the transport
    type Message: Send;

    /// Transport error type, receive timeouts are reported via this error
    type Error: Display + Debug + Send;

    /// Send a message to the device
    async fn send(&mut self, msg: Self::Message) -> Result<(), Self::Error>;

    /// Receive the next message from the device, waiting up to `timeout`
    async fn receive(&mut self, timeout: Duration) -> Result<Self::Message, Self::Error>;
}

/// Forward [Transport] for mutable references
#[async_trait]
impl<T: Transport + Send> Transport for &mut T {
    type Message = T::Message;
    type Error = T::Error;

    async fn send(&mut self, msg: Self::Message) -> Result<(), Self::Error> {
        T::send(self, msg).await
    }

    async fn receive(&mut self, timeout: Duration) -> Result<Self::Message, Self::Error> {
        T::receive(self, timeout).await
    }
}

#[cfg(feature = "sim")]
mod sim {
    use std::{collections::VecDeque, time::Duration};

    use async_trait::async_trait;
    use log::trace;

    use stellar_hw_core::{
        engine::{Engine, State},
        helpers::SeedDriver,
    };
    use stellar_hw_proto::Message;

    use super::Transport;

    /// In-process simulator transport, passing messages to a software
    /// signing [Engine]
    pub struct SimTransport {
        engine: Engine<SeedDriver>,
        responses: VecDeque<Message>,
    }

    /// Simulator transport errors
    #[derive(Clone, PartialEq, Debug, thiserror::Error)]
    pub enum SimError {
        /// No response available within the timeout
        #[error("no response within {0:?}")]
        Timeout(Duration),
    }

    impl SimTransport {
        /// Create a new simulator transport using the provided BIP39 seed
        pub fn new(seed: &[u8; 64]) -> Self {
            Self {
                engine: Engine::new(SeedDriver::new(seed)),
                responses: VecDeque::new(),
            }
        }

        /// Fetch the simulated engine state
        pub fn state(&self) -> State {
            self.engine.state()
        }
    }

    #[async_trait]
    impl Transport for SimTransport {
        type Message = Message;
        type Error = SimError;

        async fn send(&mut self, msg: Message) -> Result<(), SimError> {
            trace!("sim request: {:?}", msg);

            let resp = self.engine.process(&msg);
            self.responses.push_back(resp);

            Ok(())
        }

        async fn receive(&mut self, timeout: Duration) -> Result<Message, SimError> {
            let resp = self
                .responses
                .pop_front()
                .ok_or(SimError::Timeout(timeout))?;

            trace!("sim response: {:?}", resp);

            Ok(resp)
        }
    }
}
