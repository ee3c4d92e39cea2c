//! Public key derivation and compression
//!
//! The child-key derivation primitive belongs to the execution
//! environment (on device it is the secure element), so it sits behind
//! the `KeySource` trait. `XprivKeySource` is the software
//! implementation backed by secp256k1 BIP32 derivation.

use crate::error::{CheckAddressError, CheckAddressResult};
use crate::path::Bip32Path;
use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::secp256k1::Secp256k1;
use bitcoin::Network;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An uncompressed SEC1 public key point (0x04 prefix, x, y)
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PublicKeyPoint([u8; 65]);

impl PublicKeyPoint {
    pub fn from_bytes(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }
}

/// A 33-byte compressed public key (parity prefix + x-coordinate)
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CompressedPublicKey([u8; 33]);

impl CompressedPublicKey {
    pub fn from_bytes(bytes: [u8; 33]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }
}

impl std::fmt::Debug for CompressedPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompressedPublicKey({})", hex::encode(self.0))
    }
}

/// Compress an uncompressed point: keep x, set the prefix byte from the
/// parity of y. Deterministic, no failure mode for a valid point.
pub fn compress(point: &PublicKeyPoint) -> CompressedPublicKey {
    let raw = point.as_bytes();
    let mut out = [0u8; 33];
    out[0] = if raw[64] & 1 == 0 { 0x02 } else { 0x03 };
    out[1..].copy_from_slice(&raw[1..33]);
    CompressedPublicKey(out)
}

/// Trusted derivation primitive, injected so tests run without hardware
pub trait KeySource {
    /// Derive the public key point for the given path
    fn derive_public_key(&self, path: &Bip32Path) -> CheckAddressResult<PublicKeyPoint>;
}

/// Software key source over a BIP32 master extended private key
pub struct XprivKeySource {
    master: Xpriv,
}

impl XprivKeySource {
    /// Build from a master seed (the device's root secret in tests)
    pub fn from_seed(seed: &[u8]) -> CheckAddressResult<Self> {
        let master = Xpriv::new_master(Network::Bitcoin, seed)?;
        Ok(Self { master })
    }

    pub fn from_xpriv(master: Xpriv) -> Self {
        Self { master }
    }
}

impl KeySource for XprivKeySource {
    fn derive_public_key(&self, path: &Bip32Path) -> CheckAddressResult<PublicKeyPoint> {
        let secp = Secp256k1::new();
        let derivation: DerivationPath = path.into();
        let mut derived = self.master.derive_priv(&secp, &derivation)?;
        let public_key = derived.private_key.public_key(&secp);
        derived.private_key.non_secure_erase();
        Ok(PublicKeyPoint(public_key.serialize_uncompressed()))
    }
}
