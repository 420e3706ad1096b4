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

//! # Kaspa Ledger Library
//!
//! Host-side library for the Kaspa application on Ledger hardware wallets.
//! It builds transactions, streams them to the device piece by piece for
//! signing, and decodes the replies. Address lookup, message signing and
//! the version query are also supported.
//!
//! Devices are reached through the [`Dongle`] trait; [`ledger::NanoS`]
//! talks USB HID and [`replay::Replay`] answers from a recorded exchange.
//!

// Coding conventions
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

pub mod constants;
mod dongle;
mod error;
mod transaction;
mod util;

pub use dongle::message::{FirmwareVersion, MessageSignature};
pub use dongle::{ledger, message, replay, tx, Dongle};
pub use error::{Error, ProtocolError, ValidationError};
pub use transaction::{
    AddressType, ApiInput, ApiOutpoint, ApiOutput, ApiScriptPublicKey, ApiTransaction,
    ApiTransactionBody, Destination, Encodable, InputData, InputSignature, OutputData,
    Transaction, TransactionData, TransactionInput, TransactionOutput,
};
pub use util::parse_path;

// Re-export all the hidapi types because the double `hidapi::HidDevice`
// naming bugs me
/// Re-exports of types from `hidapi` with nicer names
pub mod hid {
    pub use hidapi::HidApi as Api;
    pub use hidapi::HidDevice as Device;
    pub use hidapi::HidError as Error;
}
