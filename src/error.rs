//! Error taxonomy for the voucher pipeline.
//!
//! Only two categories ever reach the caller: a missing/invalid payload
//! (rejected before any drawing begins) and an encoder failure. Lenient
//! field parsing and asset-load failures are recovered internally.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoucherError {
    #[error("no booking record supplied (payload is absent, null, or not an object)")]
    MissingRecord,

    #[error("failed to parse booking payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("failed to encode PDF: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VoucherError>;
