//! C-ABI exports for host integration
//!
//! One entry point, mirroring the plugin boundary: JSON request in,
//! boolean out. Malformed input is a failed verification, never a
//! crash.

use crate::derive::XprivKeySource;
use crate::encode::CoinConfig;
use crate::verify::{check_address, CheckAddressParams};
use bitcoin::bip32::Xpriv;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::str::FromStr;

#[derive(serde::Deserialize)]
struct CheckAddressRequest {
    /// Hex: format selector byte followed by the serialized path
    address_parameters: String,
    address_to_check: String,
    /// Base58 extended private key standing in for the device root
    master_xprv: String,
    coin: CoinConfig,
}

/// Verify a claimed address against its derivation path.
///
/// `json_input` must be a null-terminated JSON `CheckAddressRequest`.
/// Returns `true` only when the path provably produces the address.
#[unsafe(no_mangle)]
pub extern "C" fn addrcheck_check_address(json_input: *const c_char) -> bool {
    let c_str = unsafe {
        if json_input.is_null() {
            return false;
        }
        CStr::from_ptr(json_input)
    };

    let json_str = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return false,
    };

    let request: CheckAddressRequest = match serde_json::from_str(json_str) {
        Ok(r) => r,
        Err(_) => return false,
    };

    let address_parameters = match hex::decode(&request.address_parameters) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let master = match Xpriv::from_str(&request.master_xprv) {
        Ok(xprv) => xprv,
        Err(_) => return false,
    };
    let keys = XprivKeySource::from_xpriv(master);

    let params = CheckAddressParams {
        address_parameters: &address_parameters,
        address_to_check: &request.address_to_check,
    };

    check_address(&params, &request.coin, &keys).matched
}
