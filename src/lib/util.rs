// Kaspa Ledger Client
// Written in 2026 by
//   The Kaspa Ledger contributors
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! # Miscellaneous Functions

use std::str::FromStr;

use miniscript::bitcoin::bip32;

use crate::constants::apdu::ledger::MAX_BIP32_PATH_LEN;
use crate::error::ValidationError;

/// Parses a BIP32 derivation path such as `44'/111111'/0'/0/0`
///
/// The leading `m/` is optional. Paths deeper than the device supports
/// are rejected here rather than when building the request.
pub fn parse_path(s: &str) -> Result<bip32::DerivationPath, ValidationError> {
    let s = s.trim();
    let full = if s == "m" || s.starts_with("m/") {
        s.to_owned()
    } else {
        format!("m/{}", s)
    };
    let path = bip32::DerivationPath::from_str(&full)
        .map_err(|e| ValidationError::Path(format!("{}: {}", s, e)))?;
    let depth = path.as_ref().len();
    if depth > MAX_BIP32_PATH_LEN {
        return Err(ValidationError::PathTooLong(depth));
    }
    Ok(path)
}
