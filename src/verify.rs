//! Verification orchestrator
//!
//! Runs one check end to end: parse the serialized path, derive and
//! compress the public key, encode it in the claimed format, compare
//! byte for byte. Every failure collapses to "not matched"; the reason
//! is kept only for diagnostics.

use crate::derive::{compress, KeySource};
use crate::encode::{encode_address, AddressFormat, CoinConfig};
use crate::error::FailureReason;
use crate::path::Bip32Path;
use serde::Serialize;

/// Debug logging macro that only prints in debug builds
#[cfg(debug_assertions)]
macro_rules! debug_log {
    ($($arg:tt)*) => { eprintln!($($arg)*) }
}
#[cfg(not(debug_assertions))]
macro_rules! debug_log {
    ($($arg:tt)*) => {}
}

/// One verification request from the host
#[derive(Debug, Clone, Copy)]
pub struct CheckAddressParams<'a> {
    /// Format selector byte followed by the serialized derivation path
    pub address_parameters: &'a [u8],
    /// The address the host claims belongs to that path
    pub address_to_check: &'a str,
}

/// Outcome of one verification; only `matched` crosses the trust boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub matched: bool,
    pub reason: Option<FailureReason>,
}

impl CheckResult {
    fn matched() -> Self {
        Self {
            matched: true,
            reason: None,
        }
    }

    fn rejected(reason: FailureReason) -> Self {
        Self {
            matched: false,
            reason: Some(reason),
        }
    }

    /// Fast exit for an absent address; not a failure, so no reason
    fn no_address() -> Self {
        Self {
            matched: false,
            reason: None,
        }
    }
}

/// Verify that the claimed address is the one the path derives to.
///
/// Stateless and synchronous; every buffer lives for this call only.
pub fn check_address(
    params: &CheckAddressParams<'_>,
    coin: &CoinConfig,
    keys: &dyn KeySource,
) -> CheckResult {
    if params.address_to_check.is_empty() {
        debug_log!("No address to check");
        return CheckResult::no_address();
    }

    // First byte is the format selector, the rest is the path
    let Some((&selector, serialized_path)) = params.address_parameters.split_first() else {
        debug_log!("Address parameters are empty");
        return CheckResult::rejected(FailureReason::PathParseFailed);
    };

    let path = match Bip32Path::parse(serialized_path) {
        Ok(path) => path,
        Err(e) => {
            debug_log!("Can't parse path: {}", e);
            return CheckResult::rejected(e.reason());
        }
    };

    let key = match keys.derive_public_key(&path) {
        Ok(point) => compress(&point),
        Err(e) => {
            debug_log!("Can't derive public key for {}: {}", path, e);
            return CheckResult::rejected(e.reason());
        }
    };

    let Some(format) = AddressFormat::from_selector(selector) else {
        debug_log!("Unknown address format selector 0x{:02x}", selector);
        return CheckResult::rejected(FailureReason::EncodingFailed);
    };

    let address = match encode_address(&key, format, coin) {
        Ok(address) => address,
        Err(e) => {
            debug_log!("Can't create address from given public key: {}", e);
            return CheckResult::rejected(e.reason());
        }
    };

    // Length-exact, byte-exact, case-sensitive
    if address.as_bytes() != params.address_to_check.as_bytes() {
        debug_log!("Addresses don't match");
        return CheckResult::rejected(FailureReason::StringMismatch);
    }

    debug_log!("Addresses match");
    CheckResult::matched()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::PublicKeyPoint;
    use crate::error::{CheckAddressError, CheckAddressResult};
    use crate::path::HARDENED;

    /// Key source that always refuses, for failure-path tests
    struct FailingKeySource;

    impl KeySource for FailingKeySource {
        fn derive_public_key(&self, _path: &Bip32Path) -> CheckAddressResult<PublicKeyPoint> {
            Err(CheckAddressError::Derivation("hardware fault".into()))
        }
    }

    /// Key source that panics if touched, to prove fast exits skip it
    struct UnreachableKeySource;

    impl KeySource for UnreachableKeySource {
        fn derive_public_key(&self, _path: &Bip32Path) -> CheckAddressResult<PublicKeyPoint> {
            panic!("derivation must not run");
        }
    }

    fn coin() -> CoinConfig {
        CoinConfig {
            p2pkh_version: 0x00,
            p2sh_version: 0x05,
            native_segwit_prefix: Some("bc".to_string()),
        }
    }

    fn parameters(selector: u8, indices: Vec<u32>) -> Vec<u8> {
        let mut out = vec![selector];
        out.extend(Bip32Path::from_indices(indices).unwrap().to_bytes());
        out
    }

    #[test]
    fn test_empty_address_fast_exits_without_deriving() {
        let params = CheckAddressParams {
            address_parameters: &parameters(0x00, vec![HARDENED, 0]),
            address_to_check: "",
        };
        let result = check_address(&params, &coin(), &UnreachableKeySource);
        assert!(!result.matched);
        assert_eq!(result.reason, None);
    }

    #[test]
    fn test_empty_parameters_report_path_parse_failure() {
        let params = CheckAddressParams {
            address_parameters: &[],
            address_to_check: "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH",
        };
        let result = check_address(&params, &coin(), &UnreachableKeySource);
        assert!(!result.matched);
        assert_eq!(result.reason, Some(FailureReason::PathParseFailed));
    }

    #[test]
    fn test_selector_only_reports_path_parse_failure() {
        let params = CheckAddressParams {
            address_parameters: &[0x00],
            address_to_check: "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH",
        };
        let result = check_address(&params, &coin(), &UnreachableKeySource);
        assert_eq!(result.reason, Some(FailureReason::PathParseFailed));
    }

    #[test]
    fn test_derivation_fault_is_reported() {
        let params = CheckAddressParams {
            address_parameters: &parameters(0x00, vec![HARDENED, 0]),
            address_to_check: "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH",
        };
        let result = check_address(&params, &coin(), &FailingKeySource);
        assert!(!result.matched);
        assert_eq!(result.reason, Some(FailureReason::DerivationFailed));
    }

    #[test]
    fn test_unknown_selector_is_encoding_failure() {
        let source = crate::derive::XprivKeySource::from_seed(&[7u8; 64]).unwrap();
        let params = CheckAddressParams {
            address_parameters: &parameters(0x09, vec![HARDENED, 0]),
            address_to_check: "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH",
        };
        let result = check_address(&params, &coin(), &source);
        assert_eq!(result.reason, Some(FailureReason::EncodingFailed));
    }
}
