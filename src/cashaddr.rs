//! CashAddr encoding for public-key-hash payloads
//!
//! Base32 scheme with a 40-bit BCH checksum computed over the lowered
//! `bitcoincash` prefix plus the payload. The device emits the address
//! body without the `bitcoincash:` prefix; the prefix only participates
//! in the checksum.

use crate::error::{CheckAddressError, CheckAddressResult};

const PREFIX: &str = "bitcoincash";
const CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Version byte for a P2PKH payload of 160 bits
const VERSION_P2PKH: u8 = 0x00;

/// Encode a 20-byte public key hash as a CashAddr string (no prefix)
pub fn encode(hash: &[u8; 20]) -> CheckAddressResult<String> {
    let mut payload = Vec::with_capacity(21);
    payload.push(VERSION_P2PKH);
    payload.extend_from_slice(hash);

    let mut data = convert_bits(&payload, 8, 5, true);
    let checksum = checksum(PREFIX, &data);
    data.extend_from_slice(&checksum);

    if data.iter().any(|&value| value >= 32) {
        // convert_bits and checksum both emit 5-bit groups; anything
        // else would index past the charset
        return Err(CheckAddressError::Encoding(
            "cashaddr group out of range".into(),
        ));
    }

    Ok(data.iter().map(|&value| CHARSET[value as usize] as char).collect())
}

/// Regroup bits, padding the tail when requested
fn convert_bits(data: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> Vec<u8> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut result = Vec::new();
    let max_value = (1u32 << to_bits) - 1;

    for &byte in data {
        acc = (acc << from_bits) | (byte as u32);
        bits += from_bits;
        while bits >= to_bits {
            bits -= to_bits;
            result.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad && bits > 0 {
        result.push(((acc << (to_bits - bits)) & max_value) as u8);
    }

    result
}

/// 40-bit BCH checksum over prefix + separator + payload
fn checksum(prefix: &str, payload: &[u8]) -> [u8; 8] {
    let mut values = Vec::with_capacity(prefix.len() + 1 + payload.len() + 8);
    for c in prefix.chars() {
        values.push((c as u8) & 0x1f);
    }
    values.push(0);
    values.extend_from_slice(payload);
    values.extend_from_slice(&[0u8; 8]);

    let polymod = polymod(&values) ^ 1;

    let mut checksum = [0u8; 8];
    for (i, slot) in checksum.iter_mut().enumerate() {
        *slot = ((polymod >> (5 * (7 - i))) & 0x1f) as u8;
    }
    checksum
}

fn polymod(values: &[u8]) -> u64 {
    const GENERATORS: [u64; 5] = [
        0x98f2bc8e61,
        0x79b76d99e2,
        0xf33e5fb3c4,
        0xae2eabe2a8,
        0x1e4f43e470,
    ];

    let mut c: u64 = 1;
    for &value in values {
        let c0 = c >> 35;
        c = ((c & 0x07ffffffff) << 5) ^ (value as u64);
        for (i, &generator) in GENERATORS.iter().enumerate() {
            if (c0 >> i) & 1 != 0 {
                c ^= generator;
            }
        }
    }
    c
}
