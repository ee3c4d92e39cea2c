//! Address-check core for a hardware-wallet companion plugin
//!
//! Given a derivation path and an address the host claims to own, this
//! crate re-derives the public key for that path, re-encodes it in the
//! claimed format, and confirms byte-exact equality. The derivation
//! side is the trust anchor: a compromised host cannot substitute an
//! address the device never controlled.
//!
//! # Architecture
//!
//! - **path**: serialized BIP32 path parsing
//! - **derive**: key derivation seam (`KeySource`) and compression
//! - **encode**: four-way address-format dispatch (legacy base58,
//!   P2SH-wrapped segwit, native segwit, CashAddr)
//! - **cashaddr**: the CashAddr base32/BCH-checksum encoder
//! - **verify**: the orchestrator producing a single boolean
//! - **ffi**: C-ABI entry point for the host process
//!
//! # Security
//!
//! Key material is call-scoped and zeroized on drop via `zeroize`.
//! Diagnostic failure reasons never feed the trust decision; callers
//! only ever see the match boolean.
//!
//! # Example
//!
//! ```rust,ignore
//! use addrcheck::{check_address, CheckAddressParams, CoinConfig, XprivKeySource};
//!
//! let keys = XprivKeySource::from_seed(&seed)?;
//! let result = check_address(&params, &coin_config, &keys);
//! assert!(result.matched);
//! ```

pub mod cashaddr;
pub mod derive;
pub mod encode;
pub mod error;
pub mod ffi;
pub mod path;
pub mod verify;

// Re-export the working set for callers and tests
pub use derive::{compress, CompressedPublicKey, KeySource, PublicKeyPoint, XprivKeySource};
pub use encode::{encode_address, AddressFormat, CoinConfig, MAX_ADDRESS_LENGTH};
pub use error::{CheckAddressError, CheckAddressResult, FailureReason};
pub use path::{Bip32Path, HARDENED, MAX_PATH_DEPTH};
pub use verify::{check_address, CheckAddressParams, CheckResult};
