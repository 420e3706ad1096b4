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

//! `signmessage`
//!
//! Signs a text message with the key of one of our addresses
//!

use anyhow::Context;
use kaspa_ledger::{AddressType, Dongle, ValidationError};
use serde::Deserialize;
use std::convert::TryFrom;

/// Signs a message
pub struct SignMessage;

/// What to sign, and with which key
#[derive(Deserialize)]
pub struct Options {
    message: String,
    #[serde(default)]
    address_type: i64,
    #[serde(default)]
    address_index: i64,
}

impl super::Command for SignMessage {
    type Options = Options;

    fn execute<D: Dongle>(options: Self::Options, dongle: &mut D) -> anyhow::Result<()> {
        let address_type = AddressType::from_int(options.address_type)
            .ok_or(ValidationError::AddressType(options.address_type))?;
        let address_index = u32::try_from(options.address_index)
            .map_err(|_| ValidationError::AddressIndex(options.address_index))?;

        println!("Please confirm the message on the device.");
        let sig = dongle
            .sign_message(&options.message, address_type, address_index)
            .context("signing message")?;
        println!("Signature:    {}", sig.signature_hex());
        println!("Message hash: {}", sig.message_hash_hex());
        Ok(())
    }
}
