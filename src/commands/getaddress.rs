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

//! `getaddress`
//!
//! Asks the device for the address at a derivation path
//!

use anyhow::Context;
use kaspa_ledger::{parse_path, Dongle};
use serde::Deserialize;

/// Gets an address
pub struct GetAddress;

/// Which address to get
#[derive(Deserialize)]
pub struct Options {
    /// BIP32 path, e.g. `44'/111111'/0'/0/0`
    path: String,
    /// Whether to show the address on the device for confirmation
    #[serde(default)]
    display: bool,
}

impl super::Command for GetAddress {
    type Options = Options;

    fn execute<D: Dongle>(options: Self::Options, dongle: &mut D) -> anyhow::Result<()> {
        let path = parse_path(&options.path)
            .with_context(|| format!("parsing path {}", options.path))?;
        if options.display {
            println!("Please confirm the address on the device.");
        }
        let address = dongle
            .get_address(&path, options.display)
            .with_context(|| format!("getting address at {}", path))?;
        println!("{}", hex::encode(address));
        Ok(())
    }
}
