//! Address encoding dispatch
//!
//! Turns a compressed public key into the textual address the host
//! claims to hold, in one of four formats. The selector byte values are
//! the ones the plugin protocol puts in front of the serialized path.

use crate::cashaddr;
use crate::derive::CompressedPublicKey;
use crate::error::{CheckAddressError, CheckAddressResult};
use bitcoin::hashes::{sha256d, Hash};
use serde::{Deserialize, Serialize};

/// Device output buffer is 51 bytes including the terminator
pub const MAX_ADDRESS_LENGTH: usize = 50;

/// Address format requested by the host, one selector byte on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressFormat {
    /// Base58Check P2PKH
    Legacy,
    /// Witness program wrapped in a Base58Check P2SH address
    P2shSegwit,
    /// Bech32 witness v0 address
    NativeSegwit,
    /// CashAddr public-key-hash address
    CashAddr,
}

impl AddressFormat {
    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            0x00 => Some(AddressFormat::Legacy),
            0x01 => Some(AddressFormat::P2shSegwit),
            0x02 => Some(AddressFormat::NativeSegwit),
            0x03 => Some(AddressFormat::CashAddr),
            _ => None,
        }
    }

    pub fn selector(self) -> u8 {
        match self {
            AddressFormat::Legacy => 0x00,
            AddressFormat::P2shSegwit => 0x01,
            AddressFormat::NativeSegwit => 0x02,
            AddressFormat::CashAddr => 0x03,
        }
    }
}

/// Per-coin address parameters, fixed for a deployment and read-only here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinConfig {
    pub p2pkh_version: u8,
    pub p2sh_version: u8,
    pub native_segwit_prefix: Option<String>,
}

/// Encode the compressed key into the requested format
pub fn encode_address(
    key: &CompressedPublicKey,
    format: AddressFormat,
    coin: &CoinConfig,
) -> CheckAddressResult<String> {
    let key_hash = hash160(key.as_bytes());

    let address = match format {
        AddressFormat::Legacy => base58check(coin.p2pkh_version, &key_hash),
        AddressFormat::P2shSegwit => {
            // The P2SH payload is the hash of the witness script, not of
            // the key: version 0, push-20, key hash
            let mut witness_script = [0u8; 22];
            witness_script[0] = 0x00;
            witness_script[1] = 0x14;
            witness_script[2..].copy_from_slice(&key_hash);
            base58check(coin.p2sh_version, &hash160(&witness_script))
        }
        AddressFormat::NativeSegwit => {
            let hrp = coin.native_segwit_prefix.as_deref().ok_or_else(|| {
                CheckAddressError::Encoding("coin has no native segwit prefix".into())
            })?;
            segwit_address(hrp, &key_hash)?
        }
        AddressFormat::CashAddr => cashaddr::encode(&key_hash)?,
    };

    if address.len() > MAX_ADDRESS_LENGTH {
        return Err(CheckAddressError::Encoding(format!(
            "encoded address is {} chars, buffer holds {}",
            address.len(),
            MAX_ADDRESS_LENGTH
        )));
    }

    Ok(address)
}

/// hash160 = RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    bitcoin::hashes::hash160::Hash::hash(data).to_byte_array()
}

/// Base58Check: version byte, payload, 4-byte double-SHA256 checksum
fn base58check(version: u8, payload: &[u8; 20]) -> String {
    let mut data = Vec::with_capacity(25);
    data.push(version);
    data.extend_from_slice(payload);

    let checksum = sha256d::Hash::hash(&data);
    data.extend_from_slice(&checksum[..4]);

    bs58::encode(data).into_string()
}

/// Bech32 segwit address, witness version 0
fn segwit_address(hrp: &str, program: &[u8; 20]) -> CheckAddressResult<String> {
    use bech32::ToBase32;

    let mut data = vec![bech32::u5::try_from_u8(0)?];
    data.extend(program.to_base32());
    Ok(bech32::encode(hrp, data, bech32::Variant::Bech32)?)
}
