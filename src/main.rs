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

//! # Kaspa Ledger
//!
//! Command-line front end to the Kaspa app on a Ledger device
//!

mod commands;

use anyhow::Context;
use kaspa_ledger::constants::apdu::ledger::sw;
use kaspa_ledger::{hid, ledger, Dongle, Error};
use log::debug;
use std::{env, process, time::Duration};

/// Environment variable overriding the HID read timeout
const TIMEOUT_ENV: &str = "KASPA_LEDGER_TIMEOUT_MS";

/// Friendlier explanation of the status words a user can do something about
fn status_hint(status: u16) -> Option<&'static str> {
    match status {
        sw::DENY => Some("The request was refused on the device."),
        sw::DONGLE_LOCKED => Some("Please unlock the dongle."),
        sw::APP_NOT_OPEN | sw::CLA_NOT_SUPPORTED => {
            Some("Device did not understand the request. Is the Kaspa app open?")
        }
        sw::INS_NOT_SUPPORTED => Some("The Kaspa app does not support this request. Is it up to date?"),
        sw::WRONG_P1P2 => Some("We sent a bad P1 or P2 to the dongle. This is a bug."),
        sw::WRONG_DATA_LENGTH => Some("We sent a bad length to the dongle. This is a bug."),
        sw::WRONG_RESPONSE_LENGTH => Some("The device could not fit its reply in one APDU."),
        sw::TX_PARSING_FAIL => Some("The device could not parse the transaction."),
        sw::TX_HASH_FAIL | sw::TX_SIGN_FAIL => Some("The device failed while signing the transaction."),
        _ => None,
    }
}

/// Reads the timeout override, if any
fn configured_timeout() -> anyhow::Result<Option<Duration>> {
    match env::var(TIMEOUT_ENV) {
        Ok(ms) => {
            let ms = ms
                .trim()
                .parse()
                .with_context(|| format!("parsing {}={}", TIMEOUT_ENV, ms))?;
            Ok(Some(Duration::from_millis(ms)))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", TIMEOUT_ENV)),
    }
}

fn run() -> anyhow::Result<()> {
    let hid_api = hid::Api::new().context("initializing hidapi")?;
    let mut dongle = ledger::NanoS::get(&hid_api).context("finding dongle")?;
    if let Some(timeout) = configured_timeout()? {
        debug!("HID read timeout set to {:?}", timeout);
        dongle.set_timeout(timeout);
    }

    // Sanity check that the Kaspa app is there before doing anything else
    let version = dongle.get_version().context("getting app version")?;
    eprintln!("Kaspa app version {}", version);

    commands::execute_from_args(&mut dongle)
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        if let Some(&Error::ResponseBadStatus { status, .. }) = e.downcast_ref::<Error>() {
            if let Some(hint) = status_hint(status) {
                eprintln!("{}", hint);
            }
        }
        process::exit(1);
    }
}
