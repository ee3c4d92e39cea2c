//! Serialized BIP32 derivation path parsing
//!
//! Wire layout: one count byte, then that many 32-bit indices in
//! big-endian order. The hardened bit (0x8000_0000) travels inside the
//! raw index and is opaque to this crate.

use crate::error::{CheckAddressError, CheckAddressResult};
use std::fmt;

/// Maximum derivation depth the device accepts
pub const MAX_PATH_DEPTH: usize = 10;

/// Hardened derivation flag
pub const HARDENED: u32 = 0x8000_0000;

/// A parsed derivation path, immutable after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bip32Path {
    indices: Vec<u32>,
}

impl Bip32Path {
    /// Parse the device wire format (count byte + big-endian u32 indices)
    pub fn parse(bytes: &[u8]) -> CheckAddressResult<Self> {
        let &depth = bytes
            .first()
            .ok_or_else(|| CheckAddressError::PathParse("empty path buffer".into()))?;
        let depth = depth as usize;

        if depth == 0 {
            return Err(CheckAddressError::PathParse("zero-length path".into()));
        }
        if depth > MAX_PATH_DEPTH {
            return Err(CheckAddressError::PathParse(format!(
                "path depth {} exceeds maximum {}",
                depth, MAX_PATH_DEPTH
            )));
        }
        if bytes.len() != 1 + 4 * depth {
            return Err(CheckAddressError::PathParse(format!(
                "expected {} bytes for depth {}, got {}",
                1 + 4 * depth,
                depth,
                bytes.len()
            )));
        }

        let indices = bytes[1..]
            .chunks_exact(4)
            .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(Self { indices })
    }

    /// Build a path from raw indices (hardened bit included by the caller)
    pub fn from_indices(indices: Vec<u32>) -> CheckAddressResult<Self> {
        if indices.is_empty() || indices.len() > MAX_PATH_DEPTH {
            return Err(CheckAddressError::PathParse(format!(
                "invalid path depth {}",
                indices.len()
            )));
        }
        Ok(Self { indices })
    }

    /// Serialize back into the device wire format
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + 4 * self.indices.len());
        out.push(self.indices.len() as u8);
        for index in &self.indices {
            out.extend_from_slice(&index.to_be_bytes());
        }
        out
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn depth(&self) -> usize {
        self.indices.len()
    }
}

impl fmt::Display for Bip32Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            if index & HARDENED != 0 {
                write!(f, "/{}'", index & !HARDENED)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}

impl From<&Bip32Path> for bitcoin::bip32::DerivationPath {
    fn from(path: &Bip32Path) -> Self {
        path.indices
            .iter()
            .map(|&index| bitcoin::bip32::ChildNumber::from(index))
            .collect::<Vec<_>>()
            .into()
    }
}
