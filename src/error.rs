//! Unified error types for the address-check core
//!
//! Every internal failure funnels through `CheckAddressError`; the
//! orchestrator flattens it into a diagnostic `FailureReason` so the
//! plugin boundary only ever sees a boolean.

use serde::Serialize;
use thiserror::Error;

/// Internal failure raised while re-deriving and re-encoding an address
#[derive(Debug, Error)]
pub enum CheckAddressError {
    #[error("cannot parse serialized derivation path: {0}")]
    PathParse(String),

    #[error("public key derivation failed: {0}")]
    Derivation(String),

    #[error("address encoding failed: {0}")]
    Encoding(String),
}

impl CheckAddressError {
    /// Diagnostic reason reported alongside a failed verification
    pub fn reason(&self) -> FailureReason {
        match self {
            CheckAddressError::PathParse(_) => FailureReason::PathParseFailed,
            CheckAddressError::Derivation(_) => FailureReason::DerivationFailed,
            CheckAddressError::Encoding(_) => FailureReason::EncodingFailed,
        }
    }
}

/// Why a verification did not match (log-only; never part of the trust decision)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    PathParseFailed,
    DerivationFailed,
    EncodingFailed,
    StringMismatch,
}

// Conversions from library error types

impl From<bitcoin::bip32::Error> for CheckAddressError {
    fn from(e: bitcoin::bip32::Error) -> Self {
        CheckAddressError::Derivation(format!("BIP32 error: {}", e))
    }
}

impl From<bitcoin::secp256k1::Error> for CheckAddressError {
    fn from(e: bitcoin::secp256k1::Error) -> Self {
        CheckAddressError::Derivation(format!("Secp256k1 error: {}", e))
    }
}

impl From<bech32::Error> for CheckAddressError {
    fn from(e: bech32::Error) -> Self {
        CheckAddressError::Encoding(format!("Bech32 error: {}", e))
    }
}

/// Result type alias for address-check operations
pub type CheckAddressResult<T> = Result<T, CheckAddressError>;
