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

//! # Dongle
//!
//! Abstract API for communicating with the device
//!

use log::trace;
use miniscript::bitcoin::bip32;

use self::message::{Apdu, Command};
use crate::constants::apdu::ledger::sw;
use crate::transaction::{AddressType, InputSignature, Transaction};
use crate::Error;

pub mod ledger;
pub mod message;
pub mod replay;
pub mod tx;

/// Trait representing an abstract hardware wallet running the Kaspa app
pub trait Dongle {
    /// Sends a raw, fully encoded APDU to the device and returns the raw
    /// reply, status word included. Generally this function is never used
    /// directly.
    fn transmit(&mut self, apdu: &[u8]) -> Result<Vec<u8>, Error>;

    /// Sends a single APDU, returning the reply payload if the device
    /// answered with the OK status word
    fn send(&mut self, apdu: &Apdu) -> Result<Vec<u8>, Error> {
        let raw = apdu.encode()?;
        trace!("=> {}", hex::encode(&raw));
        let mut reply = self.transmit(&raw)?;
        trace!("<= {}", hex::encode(&reply));

        if reply.len() < 2 {
            return Err(Error::UnexpectedEof);
        }
        let sw_lo = reply.pop().unwrap_or_default();
        let sw_hi = reply.pop().unwrap_or_default();
        let status = u16::from_be_bytes([sw_hi, sw_lo]);
        if status == sw::OK {
            Ok(reply)
        } else {
            Err(Error::ResponseBadStatus {
                apdu: apdu.ins,
                status,
            })
        }
    }

    /// Runs a (possibly multi-APDU) command to completion
    fn exchange<C: Command>(&mut self, mut cmd: C) -> Result<C::Reply, Error> {
        while let Some(apdu) = cmd.encode_next() {
            let reply = self.send(&apdu)?;
            cmd.decode_reply(reply)?;
        }
        cmd.into_reply()
    }

    /// Queries the device for the version of the Kaspa app
    fn get_version(&mut self) -> Result<message::FirmwareVersion, Error> {
        self.exchange(message::GetVersion::new())
    }

    /// Queries the device for the address at a BIP32 path. The reply is
    /// returned exactly as the device sent it.
    fn get_address<P: AsRef<[bip32::ChildNumber]>>(
        &mut self,
        bip32_path: &P,
        display: bool,
    ) -> Result<Vec<u8>, Error> {
        let command = message::GetAddress::new(bip32_path, display)?;
        self.exchange(command)
    }

    /// Asks the device to sign every input of a transaction
    ///
    /// The transaction itself is not modified; merge the result with
    /// [`Transaction::apply_signatures`]. On error nothing has been
    /// signed as far as the caller is concerned, and the whole exchange
    /// must be restarted.
    fn sign_transaction(&mut self, tx: &Transaction) -> Result<Vec<InputSignature>, Error> {
        self.exchange(tx::SignTransaction::new(tx))
    }

    /// Asks the device to sign an arbitrary text message with the key
    /// of the given address
    fn sign_message(
        &mut self,
        message: &str,
        address_type: AddressType,
        address_index: u32,
    ) -> Result<message::MessageSignature, Error> {
        let command = message::SignMessage::new(message.as_bytes(), address_type, address_index)?;
        self.exchange(command)
    }
}
