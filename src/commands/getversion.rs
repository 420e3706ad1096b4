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

//! `getversion`
//!
//! Queries the version of the Kaspa app
//!

use anyhow::Context;
use kaspa_ledger::Dongle;
use serde::Deserialize;

/// Gets the app version
pub struct GetVersion;

/// Takes no options
#[derive(Deserialize)]
pub struct Options {}

impl super::Command for GetVersion {
    type Options = Options;

    fn execute<D: Dongle>(_: Self::Options, dongle: &mut D) -> anyhow::Result<()> {
        let version = dongle.get_version().context("getting app version")?;
        println!("{}", version);
        Ok(())
    }
}
