// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Multi-step signing exchange
//!
//! Devices cannot hold a complete transaction, so signing is driven as a
//! bounded request / continuation protocol:
//!
//! 1. The host sends the transaction header, declaring `N` operations
//! 2. Each time the device replies with a request for the next operation,
//!    the host sends the next pending operation
//! 3. The device replies with a signed result once all `N` operations
//!    have been consumed
//!
//! Operations are only removed from the pending queue once the device has
//! asked for them, and every step performs exactly one send and one receive.
//! Any deviation fails the exchange, there are no retries.

use std::{collections::VecDeque, fmt::Debug, time::Duration};

use log::{debug, warn};
use strum::Display;

use stellar_hw_proto::{tx::StellarSignedTx, Message};

use crate::{Error, Transport};

/// Default timeout for each device response, allowing for user interaction
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Signing exchange state
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
pub enum ExchangeState {
    /// Header sent, awaiting the first device response
    AwaitingHeaderAck,
    /// Sending operations on device request
    SendingOperations,
    /// Signed result received
    Done,
    /// Exchange failed
    Failed,
}

/// Device reply classification
#[derive(Clone, PartialEq, Debug)]
pub enum Reply<R> {
    /// Device requests the next operation
    RequestNext,
    /// Device returned the signed result
    Signed(R),
    /// Any other message, described for error reporting
    Unexpected(String),
}

/// Classify device replies for the [SigningExchange]
pub trait Classify {
    /// Signed result type
    type Signed;

    fn classify(self) -> Reply<Self::Signed>;
}

impl Classify for Message {
    type Signed = StellarSignedTx;

    fn classify(self) -> Reply<Self::Signed> {
        match self {
            Message::StellarTxOpRequest(_) => Reply::RequestNext,
            Message::StellarSignedTx(s) => Reply::Signed(s),
            Message::Failure(f) => Reply::Unexpected(format!("Failure ({})", f)),
            m => Reply::Unexpected(m.message_type().to_string()),
        }
    }
}

/// Signing exchange, drives a header and pending operations through the
/// signing protocol over a [Transport]
pub struct SigningExchange<H, O> {
    header: Option<H>,
    pending: VecDeque<O>,
    declared: usize,
    state: ExchangeState,
    timeout: Duration,
}

impl<H, O> SigningExchange<H, O> {
    /// Create a new exchange for the provided header and operations,
    /// the header must declare the number of operations provided
    pub fn new(header: H, operations: impl IntoIterator<Item = O>) -> Self {
        let pending: VecDeque<_> = operations.into_iter().collect();

        Self {
            header: Some(header),
            declared: pending.len(),
            pending,
            state: ExchangeState::AwaitingHeaderAck,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the timeout for each device response
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch the current exchange state
    pub fn state(&self) -> ExchangeState {
        self.state
    }

    /// Fetch the number of operations not yet sent
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Run the exchange to completion
    ///
    /// An exchange may only be run once, subsequent calls fail
    /// with [`Error::ProtocolViolation`].
    pub async fn run<T>(
        &mut self,
        t: &mut T,
    ) -> Result<<T::Message as Classify>::Signed, Error<T::Error>>
    where
        T: Transport + Send,
        T::Message: Classify + From<H> + From<O>,
    {
        let header = match self.header.take() {
            Some(h) => h,
            None => {
                return Err(Error::ProtocolViolation {
                    state: self.state,
                    received: "nothing (exchange already run)".to_string(),
                })
            }
        };

        debug!("Sending header ({} operations)", self.declared);

        t.send(header.into())
            .await
            .map_err(|e| self.fail(Error::Transport(e)))?;
        let mut resp = t
            .receive(self.timeout)
            .await
            .map_err(|e| self.fail(Error::Transport(e)))?;

        loop {
            match resp.classify() {
                Reply::RequestNext => {
                    self.state = ExchangeState::SendingOperations;

                    // Device wants more than we declared
                    let op = match self.pending.pop_front() {
                        Some(op) => op,
                        None => {
                            return Err(self.fail(Error::OperationsExhausted {
                                declared: self.declared,
                            }))
                        }
                    };

                    debug!(
                        "Sending operation {}/{}",
                        self.declared - self.pending.len(),
                        self.declared
                    );

                    t.send(op.into())
                        .await
                        .map_err(|e| self.fail(Error::Transport(e)))?;
                    resp = t
                        .receive(self.timeout)
                        .await
                        .map_err(|e| self.fail(Error::Transport(e)))?;
                }
                Reply::Signed(r) => {
                    if !self.pending.is_empty() {
                        return Err(self.fail(Error::PrematureSignature {
                            remaining: self.pending.len(),
                        }));
                    }

                    debug!("Signing complete");
                    self.state = ExchangeState::Done;

                    return Ok(r);
                }
                Reply::Unexpected(received) => {
                    return Err(self.fail(Error::ProtocolViolation {
                        state: self.state,
                        received,
                    }));
                }
            }
        }
    }

    fn fail<E: std::fmt::Display + Debug>(&mut self, e: Error<E>) -> Error<E> {
        warn!("Signing exchange failed in state {}: {}", self.state, e);
        self.state = ExchangeState::Failed;
        e
    }
}

/// Run a [SigningExchange] for the provided header and operations,
/// using the [DEFAULT_TIMEOUT]
pub async fn run_signing_exchange<T, H, O>(
    t: &mut T,
    header: H,
    operations: impl IntoIterator<Item = O>,
) -> Result<<T::Message as Classify>::Signed, Error<T::Error>>
where
    T: Transport + Send,
    T::Message: Classify + From<H> + From<O>,
{
    SigningExchange::new(header, operations).run(t).await
}

#[cfg(test)]
mod test {
    use async_trait::async_trait;

    use super::*;

    /// Minimal protocol for exercising the exchange
    #[derive(Clone, PartialEq, Debug)]
    enum Msg {
        Header(usize),
        Op(u8),
        Next,
        Signed(u64),
        Other,
    }

    impl From<usize> for Msg {
        fn from(n: usize) -> Self {
            Msg::Header(n)
        }
    }

    impl From<u8> for Msg {
        fn from(v: u8) -> Self {
            Msg::Op(v)
        }
    }

    impl Classify for Msg {
        type Signed = u64;

        fn classify(self) -> Reply<u64> {
            match self {
                Msg::Next => Reply::RequestNext,
                Msg::Signed(v) => Reply::Signed(v),
                m => Reply::Unexpected(format!("{m:?}")),
            }
        }
    }

    /// Transport replying from a fixed script
    struct Script {
        replies: VecDeque<Msg>,
        sent: Vec<Msg>,
    }

    impl Script {
        fn new(replies: &[Msg]) -> Self {
            Self {
                replies: replies.iter().cloned().collect(),
                sent: vec![],
            }
        }
    }

    #[async_trait]
    impl Transport for Script {
        type Message = Msg;
        type Error = String;

        async fn send(&mut self, msg: Msg) -> Result<(), String> {
            self.sent.push(msg);
            Ok(())
        }

        async fn receive(&mut self, _timeout: Duration) -> Result<Msg, String> {
            self.replies.pop_front().ok_or_else(|| "timeout".to_string())
        }
    }

    #[tokio::test]
    async fn header_only() {
        let mut t = Script::new(&[Msg::Signed(7)]);
        let mut x = SigningExchange::new(0usize, Vec::<u8>::new());

        assert_eq!(x.run(&mut t).await.unwrap(), 7);
        assert_eq!(x.state(), ExchangeState::Done);
        assert_eq!(t.sent, vec![Msg::Header(0)]);
    }

    #[tokio::test]
    async fn operations_in_order() {
        let mut t = Script::new(&[Msg::Next, Msg::Next, Msg::Next, Msg::Signed(1)]);
        let mut x = SigningExchange::new(3usize, [1u8, 2, 3]);

        assert_eq!(x.run(&mut t).await.unwrap(), 1);
        assert_eq!(x.remaining(), 0);
        assert_eq!(
            t.sent,
            vec![Msg::Header(3), Msg::Op(1), Msg::Op(2), Msg::Op(3)]
        );
    }

    #[tokio::test]
    async fn exhausted() {
        let mut t = Script::new(&[Msg::Next, Msg::Next]);
        let mut x = SigningExchange::new(1usize, [1u8]);

        let r = x.run(&mut t).await;
        assert!(matches!(r, Err(Error::OperationsExhausted { declared: 1 })));
        assert_eq!(x.state(), ExchangeState::Failed);
        assert_eq!(t.sent.len(), 2);
    }

    #[tokio::test]
    async fn premature() {
        let mut t = Script::new(&[Msg::Next, Msg::Signed(1)]);
        let mut x = SigningExchange::new(3usize, [1u8, 2, 3]);

        let r = x.run(&mut t).await;
        assert!(matches!(r, Err(Error::PrematureSignature { remaining: 2 })));
        assert_eq!(x.state(), ExchangeState::Failed);
    }

    #[tokio::test]
    async fn violation() {
        let mut t = Script::new(&[Msg::Other]);
        let mut x = SigningExchange::new(1usize, [1u8]);

        match x.run(&mut t).await {
            Err(Error::ProtocolViolation { state, received }) => {
                assert_eq!(state, ExchangeState::AwaitingHeaderAck);
                assert_eq!(received, "Other");
            }
            r => panic!("unexpected result: {r:?}"),
        }
        assert_eq!(x.remaining(), 1);

        // Exchanges can not be re-run
        let r = x.run(&mut t).await;
        assert!(matches!(r, Err(Error::ProtocolViolation { .. })));
    }

    #[tokio::test]
    async fn transport_error() {
        let mut t = Script::new(&[Msg::Next]);

        let r = run_signing_exchange(&mut t, 2usize, [1u8, 2]).await;
        match r {
            Err(Error::Transport(e)) => assert_eq!(e, "timeout"),
            r => panic!("unexpected result: {r:?}"),
        }
    }
}
