//! Prelude to simplify downstream use of protocol objects
//!

pub use crate::{
    address::{StellarAddress, StellarGetAddress},
    failure::{Failure, FailureType},
    ops::{
        AccountFlags, AssetType, Operation, SignerKeyType, StellarAccountMergeOp,
        StellarAllowTrustOp, StellarAssetType, StellarBumpSequenceOp, StellarChangeTrustOp,
        StellarCreateAccountOp, StellarCreatePassiveOfferOp, StellarManageDataOp,
        StellarManageOfferOp, StellarPathPaymentOp, StellarPaymentOp, StellarSetOptionsOp,
    },
    path::Bip32Path,
    tx::{MemoType, StellarSignTx, StellarSignedTx, StellarTxOpRequest},
    Message, MessageType,
};
