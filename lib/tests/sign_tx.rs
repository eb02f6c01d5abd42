//! End-to-end address and signing requests against the simulator

use std::time::Duration;

use ed25519_dalek::{Signature, SigningKey, VerifyingKey};

use stellar_hw::{
    proto::{
        failure::FailureType,
        ops::{Operation, StellarManageDataOp},
        path::Bip32Path,
        tx::StellarSignedTx,
        TESTNET_NETWORK_PASSPHRASE,
    },
    DeviceHandle, Error, SignResponse,
};
use stellar_hw_core::engine::{transaction_digest, State};

mod helpers;
use helpers::*;

#[tokio::test]
async fn get_address() -> anyhow::Result<()> {
    setup_logging();

    let h = sim_handle();

    for (i, a) in ACCOUNTS.iter().enumerate() {
        let p = Bip32Path::account(i as u32);
        assert_eq!(&h.get_address(&p, i == 0).await?, a);
    }

    // Device failures are returned to the caller
    match h.get_address(&[44, 148, 0], false).await {
        Err(Error::Failure { code, .. }) => assert_eq!(code, FailureType::DataError),
        r => panic!("unexpected result: {r:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn sign_payments() -> anyhow::Result<()> {
    setup_logging();

    let h = sim_handle().with_timeouts(Duration::from_secs(1), Duration::from_secs(5));
    let path = Bip32Path::account(0);

    let tx = header(ACCOUNTS[0]).with_memo_id(77);
    let ops = payments(3);

    let signed = h
        .sign_tx(tx.clone(), ops.clone(), &path, TESTNET_NETWORK_PASSPHRASE)
        .await?;

    let resp = SignResponse::try_from(signed)?;
    assert_eq!(resp.account, ACCOUNTS[0]);

    // Rebuild the header as sent to verify the signature
    let mut sent = tx;
    sent.address_n = path.0.clone();
    sent.network_passphrase = TESTNET_NETWORK_PASSPHRASE.to_string();
    sent.num_operations = 3;

    let d = transaction_digest(&sent, &ops)?;

    let mut public_key = [0u8; 32];
    public_key.copy_from_slice(&resp.public_key);
    let k = VerifyingKey::from_bytes(&public_key)?;
    k.verify_strict(d.as_bytes(), &Signature::from_slice(&resp.signature)?)?;

    Ok(())
}

#[tokio::test]
async fn sign_without_operations() -> anyhow::Result<()> {
    setup_logging();

    let h = sim_handle();
    let path = Bip32Path::account(2);

    let signed = h
        .sign_tx(header(ACCOUNTS[2]), vec![], &path, TESTNET_NETWORK_PASSPHRASE)
        .await?;

    assert_eq!(SignResponse::try_from(signed)?.account, ACCOUNTS[2]);

    Ok(())
}

#[tokio::test]
async fn rejected_operation() -> anyhow::Result<()> {
    setup_logging();

    let mut t = sim();

    let op = Operation::ManageData(StellarManageDataOp {
        source_account: None,
        key: "k".repeat(65),
        value: None,
    });
    let mut ops = payments(1);
    ops.push(op);

    let h = DeviceHandle::from(&mut t);
    let r = h
        .sign_tx(
            header(ACCOUNTS[0]),
            ops,
            &Bip32Path::account(0),
            TESTNET_NETWORK_PASSPHRASE,
        )
        .await;

    match r {
        Err(Error::ProtocolViolation { received, .. }) => {
            assert!(received.contains("invalid data entry"), "{received}")
        }
        r => panic!("unexpected result: {r:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn concurrent_requests_serialized() -> anyhow::Result<()> {
    setup_logging();

    let h = sim_handle();
    let path = Bip32Path::account(1);

    // Interleaved requests each complete against a consistent device state
    let (a, b, c) = tokio::join!(
        h.sign_tx(header(ACCOUNTS[1]), payments(4), &path, TESTNET_NETWORK_PASSPHRASE),
        h.get_address(&path, false),
        h.sign_tx(header(ACCOUNTS[1]), payments(2), &path, TESTNET_NETWORK_PASSPHRASE),
    );

    assert_eq!(SignResponse::try_from(a?)?.account, ACCOUNTS[1]);
    assert_eq!(b?, ACCOUNTS[1]);
    assert_eq!(SignResponse::try_from(c?)?.account, ACCOUNTS[1]);

    Ok(())
}

#[tokio::test]
async fn engine_state_after_signing() -> anyhow::Result<()> {
    setup_logging();

    let mut t = sim();

    {
        let h = DeviceHandle::from(&mut t);
        h.sign_tx(
            header(ACCOUNTS[0]),
            payments(2),
            &Bip32Path::account(0),
            TESTNET_NETWORK_PASSPHRASE,
        )
        .await?;
    }

    assert_eq!(t.state(), State::Complete);

    Ok(())
}

#[tokio::test]
async fn malformed_signed_response() {
    setup_logging();

    let public_key = SigningKey::from_bytes(&[7u8; 32]).verifying_key().to_bytes();
    let path = Bip32Path::account(0);

    // Truncated signature
    let reply = StellarSignedTx {
        public_key: public_key.to_vec(),
        signature: vec![2u8; 10],
    };
    let h = DeviceHandle::from(ScriptedTransport::new([reply.into()]));

    let r = h
        .sign_tx(header(ACCOUNTS[0]), vec![], &path, TESTNET_NETWORK_PASSPHRASE)
        .await;
    assert!(matches!(r, Err(Error::InvalidSignature)), "{r:?}");

    // Truncated public key
    let reply = StellarSignedTx {
        public_key: public_key[..16].to_vec(),
        signature: vec![2u8; 64],
    };
    let h = DeviceHandle::from(ScriptedTransport::new([reply.into()]));

    let r = h
        .sign_tx(header(ACCOUNTS[0]), vec![], &path, TESTNET_NETWORK_PASSPHRASE)
        .await;
    assert!(matches!(r, Err(Error::InvalidKey)), "{r:?}");
}
