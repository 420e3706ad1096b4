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

//! Device Encodings
//!
//! Fixed-width big-endian encodings of the transaction pieces which are
//! streamed to the Kaspa app. The layout is dictated by the app's parser.
//!

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

use super::{Destination, Transaction, TransactionInput, TransactionOutput};

/// Trait describing an object which can be encoded for the device
pub trait Encodable {
    /// Write the encoding to a writer
    fn write_to<W: Write>(&self, w: W) -> io::Result<()>;

    /// Encode into a fresh byte vector
    fn serialize(&self) -> Vec<u8> {
        let mut ret = vec![];
        self.write_to(&mut ret).expect("writing to a vec cannot fail");
        ret
    }
}

/// Header: version, output count, input count, change address type,
/// change address index, account
impl Encodable for Transaction {
    fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_u16::<BigEndian>(self.version)?;
        // Counts are bounded by 255 at construction
        w.write_u8(self.outputs.len() as u8)?;
        w.write_u8(self.inputs.len() as u8)?;
        w.write_u8(self.change_address_type.into_u8())?;
        w.write_u32::<BigEndian>(self.change_address_index)?;
        w.write_u32::<BigEndian>(self.account)
    }
}

impl Encodable for TransactionInput {
    fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_u64::<BigEndian>(self.value)?;
        w.write_all(&self.prev_tx_id)?;
        w.write_u8(self.address_type.into_u8())?;
        w.write_u32::<BigEndian>(self.address_index)?;
        w.write_u8(self.outpoint_index)
    }
}

impl Encodable for TransactionOutput {
    fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_u64::<BigEndian>(self.value)?;
        match self.destination {
            Destination::ScriptPublicKey(ref spk) => w.write_all(spk),
            Destination::Address {
                address_type,
                address_index,
            } => {
                w.write_u8(address_type.into_u8())?;
                w.write_u32::<BigEndian>(address_index)
            }
        }
    }
}
