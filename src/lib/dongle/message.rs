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

//! # Messages
//!
//! Structured versions of the APDU messages understood by the Kaspa app.
//! Transaction signing lives in its own module, since it is the only
//! exchange which spans more than one APDU.
//!

use std::fmt;

use miniscript::bitcoin::bip32;

use crate::constants::apdu::ledger::{self, p1, p2, Instruction};
use crate::error::{ProtocolError, ValidationError};
use crate::transaction::AddressType;
use crate::Error;

/// A message that can be received from the dongle
pub trait Response: Sized {
    /// Decode the message from a byte string, status word already stripped
    fn decode(data: &[u8]) -> Result<Self, Error>;
}

/// A message that can be sent to the dongle
pub trait Command {
    /// What the command yields once every APDU has been answered
    type Reply;

    /// Encodes the next APDU, or None if there are no remaining APDUs to send
    fn encode_next(&mut self) -> Option<Apdu>;

    /// Used to update a (potentially multipart) reply
    fn decode_reply(&mut self, data: Vec<u8>) -> Result<(), Error>;

    /// Pull the command apart into a fully assembled reply
    fn into_reply(self) -> Result<Self::Reply, Error>;
}

/// A single command APDU
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Apdu {
    /// Instruction
    pub ins: Instruction,
    /// First parameter byte
    pub p1: u8,
    /// Second parameter byte; for chunked commands, whether more follow
    pub p2: u8,
    /// Payload
    pub data: Vec<u8>,
}

impl Apdu {
    /// Constructor
    pub fn new(ins: Instruction, p1: u8, p2: u8, data: Vec<u8>) -> Apdu {
        Apdu { ins, p1, p2, data }
    }

    /// Encodes the APDU as `CLA INS P1 P2 Lc data`
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        if self.data.len() > ledger::MAX_PAYLOAD {
            return Err(Error::ApduTooLong {
                apdu: self.ins,
                len: self.data.len(),
            });
        }
        let mut ret = Vec::with_capacity(5 + self.data.len());
        ret.push(ledger::KASPA_CLA);
        ret.push(self.ins.into_u8());
        ret.push(self.p1);
        ret.push(self.p2);
        ret.push(self.data.len() as u8);
        ret.extend(&self.data);
        Ok(ret)
    }
}

/// Serializes a BIP32 path as a length byte followed by big-endian indices
pub fn serialize_path(path: &[bip32::ChildNumber]) -> Result<Vec<u8>, ValidationError> {
    if path.len() > ledger::MAX_BIP32_PATH_LEN {
        return Err(ValidationError::PathTooLong(path.len()));
    }
    let mut ret = Vec::with_capacity(1 + 4 * path.len());
    ret.push(path.len() as u8);
    for &childnum in path {
        ret.extend(u32::from(childnum).to_be_bytes());
    }
    Ok(ret)
}

/// GET VERSION message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetVersion {
    sent: bool,
    reply: Vec<u8>,
}

impl GetVersion {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
}

impl Command for GetVersion {
    type Reply = FirmwareVersion;

    fn encode_next(&mut self) -> Option<Apdu> {
        if self.sent {
            None
        } else {
            self.sent = true;
            Some(Apdu::new(Instruction::GetVersion, p1::NON_CONFIRM, p2::LAST, vec![]))
        }
    }

    fn decode_reply(&mut self, data: Vec<u8>) -> Result<(), Error> {
        self.reply = data;
        Ok(())
    }

    fn into_reply(self) -> Result<FirmwareVersion, Error> {
        FirmwareVersion::decode(&self.reply)
    }
}

/// Response to the GET VERSION message
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FirmwareVersion {
    /// Major version
    pub major_version: u8,
    /// Minor version
    pub minor_version: u8,
    /// Patch version
    pub patch_version: u8,
}

impl Response for FirmwareVersion {
    fn decode(data: &[u8]) -> Result<FirmwareVersion, Error> {
        match *data {
            [major, minor, patch] => Ok(FirmwareVersion {
                major_version: major,
                minor_version: minor,
                patch_version: patch,
            }),
            _ => Err(ProtocolError::ResponseWrongLength {
                apdu: Instruction::GetVersion,
                expected: 3..4,
                found: data.len(),
            }
            .into()),
        }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.major_version, self.minor_version, self.patch_version
        )
    }
}

/// GET ADDRESS message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAddress {
    sent: bool,
    reply: Vec<u8>,
    ser_path: Vec<u8>,
    display: bool,
}

impl GetAddress {
    /// Constructor. If `display` is set the device asks the user to
    /// confirm the address on screen before answering.
    pub fn new<P: AsRef<[bip32::ChildNumber]>>(
        bip32_path: &P,
        display: bool,
    ) -> Result<Self, ValidationError> {
        Ok(GetAddress {
            sent: false,
            reply: vec![],
            ser_path: serialize_path(bip32_path.as_ref())?,
            display,
        })
    }
}

impl Command for GetAddress {
    type Reply = Vec<u8>;

    fn encode_next(&mut self) -> Option<Apdu> {
        if self.sent {
            return None;
        }
        self.sent = true;

        let p1 = if self.display {
            p1::CONFIRM
        } else {
            p1::NON_CONFIRM
        };
        Some(Apdu::new(
            Instruction::GetAddress,
            p1,
            p2::LAST,
            self.ser_path.clone(),
        ))
    }

    fn decode_reply(&mut self, data: Vec<u8>) -> Result<(), Error> {
        self.reply = data;
        Ok(())
    }

    // The address is returned exactly as the device sent it
    fn into_reply(self) -> Result<Vec<u8>, Error> {
        Ok(self.reply)
    }
}

/// SIGN MESSAGE message
///
/// The whole message travels in a single APDU. The device can only
/// display around 120 characters (Nano S) or 200 (other models), which
/// is not checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignMessage<'msg> {
    sent: bool,
    reply: Vec<u8>,
    address_type: AddressType,
    address_index: u32,
    message: &'msg [u8],
}

impl<'msg> SignMessage<'msg> {
    /// Size of the fields preceding the message
    const HEADER_LEN: usize = 1 + 4 + 4;

    /// Constructor
    pub fn new(
        message: &'msg [u8],
        address_type: AddressType,
        address_index: u32,
    ) -> Result<Self, ValidationError> {
        if Self::HEADER_LEN + message.len() > ledger::MAX_PAYLOAD {
            return Err(ValidationError::MessageTooLong(message.len()));
        }
        Ok(SignMessage {
            sent: false,
            reply: vec![],
            address_type,
            address_index,
            message,
        })
    }

    fn payload(&self) -> Vec<u8> {
        let mut ret = Vec::with_capacity(Self::HEADER_LEN + self.message.len());
        ret.push(self.address_type.into_u8());
        ret.extend(self.address_index.to_be_bytes());
        // Length was bounded by the constructor
        ret.extend((self.message.len() as u32).to_be_bytes());
        ret.extend(self.message);
        ret
    }
}

impl Command for SignMessage<'_> {
    type Reply = MessageSignature;

    fn encode_next(&mut self) -> Option<Apdu> {
        if self.sent {
            None
        } else {
            self.sent = true;
            Some(Apdu::new(
                Instruction::SignMessage,
                p1::NON_CONFIRM,
                p2::LAST,
                self.payload(),
            ))
        }
    }

    fn decode_reply(&mut self, data: Vec<u8>) -> Result<(), Error> {
        self.reply = data;
        Ok(())
    }

    fn into_reply(self) -> Result<MessageSignature, Error> {
        MessageSignature::decode(&self.reply)
    }
}

/// Response to the SIGN MESSAGE message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSignature {
    /// The signature
    pub signature: Vec<u8>,
    /// Hash of the message, as computed by the device
    pub message_hash: Vec<u8>,
}

impl MessageSignature {
    /// Hex-encoded signature
    pub fn signature_hex(&self) -> String {
        hex::encode(&self.signature)
    }

    /// Hex-encoded message hash
    pub fn message_hash_hex(&self) -> String {
        hex::encode(&self.message_hash)
    }
}

impl Response for MessageSignature {
    fn decode(data: &[u8]) -> Result<MessageSignature, Error> {
        let wrong_length = |expected: usize| ProtocolError::ResponseWrongLength {
            apdu: Instruction::SignMessage,
            expected: expected..expected + 1,
            found: data.len(),
        };

        let sig_len = match data.first() {
            Some(&len) => usize::from(len),
            None => return Err(wrong_length(2).into()),
        };
        if data.len() < 2 + sig_len {
            return Err(wrong_length(2 + sig_len).into());
        }
        let hash_len = usize::from(data[1 + sig_len]);
        let expected_len = 2 + sig_len + hash_len;
        if data.len() != expected_len {
            return Err(wrong_length(expected_len).into());
        }

        Ok(MessageSignature {
            signature: data[1..1 + sig_len].to_vec(),
            message_hash: data[2 + sig_len..].to_vec(),
        })
    }
}
