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

//! Transaction Signing
//!
//! The Kaspa app accepts a transaction one piece at a time: first a
//! header, then every output, then every input. The reply to the final
//! input carries the first signature; the remaining signatures are
//! pulled out one by one with `NEXT_SIGNATURE` requests.
//!
//! The exchange is modelled as an explicit state machine so that the
//! order of requests is fixed by [`Phase::next`] rather than by the
//! order of calls.
//!

use log::debug;

use crate::constants::apdu::ledger::{p1, p2, Instruction};
use crate::constants::tx::{PATH_COUNT, SIGNATURE_LEN};
use crate::dongle::message::{Apdu, Command};
use crate::error::ProtocolError;
use crate::transaction::{Encodable, InputSignature, Transaction};
use crate::Error;

/// Where we are in the SIGN_TX exchange. Each phase names the request
/// which will be sent next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Transaction header, with the path count prefixed
    Header,
    /// The output with the given index
    Output(usize),
    /// The input with the given index
    Input(usize),
    /// Request for the next signature record
    NextSignature,
    /// Nothing left to send
    Done,
}

impl Phase {
    /// Whether the reply to this phase's request carries a signature record
    pub fn expects_signature(self, n_inputs: usize) -> bool {
        match self {
            Phase::Input(i) => i + 1 == n_inputs,
            Phase::NextSignature => true,
            Phase::Header | Phase::Output(_) | Phase::Done => false,
        }
    }

    /// The phase following this one. `more_signatures` is only consulted
    /// after a signature-bearing reply.
    pub fn next(self, n_outputs: usize, n_inputs: usize, more_signatures: bool) -> Phase {
        let first_input = if n_inputs > 0 {
            Phase::Input(0)
        } else {
            Phase::Done
        };
        let after_signature = if more_signatures {
            Phase::NextSignature
        } else {
            Phase::Done
        };

        match self {
            Phase::Header if n_outputs > 0 => Phase::Output(0),
            Phase::Header => first_input,
            Phase::Output(i) if i + 1 < n_outputs => Phase::Output(i + 1),
            Phase::Output(_) => first_input,
            Phase::Input(i) if i + 1 < n_inputs => Phase::Input(i + 1),
            Phase::Input(_) | Phase::NextSignature => after_signature,
            Phase::Done => Phase::Done,
        }
    }
}

/// A single signature record, as returned by the device
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureRecord {
    /// Whether the device has further signatures to hand out
    pub has_more: bool,
    /// The signature itself
    pub signature: InputSignature,
}

impl SignatureRecord {
    /// Parses `[has_more][input_index][sig_len][sig]`, optionally followed
    /// by `[sighash_len][sighash]`
    pub fn decode(data: &[u8]) -> Result<SignatureRecord, ProtocolError> {
        let truncated = || ProtocolError::ResponseWrongLength {
            apdu: Instruction::SignTx,
            expected: 3 + SIGNATURE_LEN..usize::max_value(),
            found: data.len(),
        };

        let (has_more, input, sig_len) = match *data {
            [has_more, input, sig_len, ..] => (has_more, input, sig_len),
            _ => return Err(truncated()),
        };
        if usize::from(sig_len) != SIGNATURE_LEN {
            return Err(ProtocolError::SignatureLength {
                input,
                len: sig_len,
            });
        }
        if data.len() < 3 + SIGNATURE_LEN {
            return Err(truncated());
        }

        let mut signature = [0; SIGNATURE_LEN];
        signature.copy_from_slice(&data[3..3 + SIGNATURE_LEN]);

        // Optional length-prefixed sighash
        let sighash = match data[3 + SIGNATURE_LEN..] {
            [] | [0] => None,
            [len, ref hash @ ..] if hash.len() == usize::from(len) => Some(hash.to_vec()),
            [len, ..] => {
                let full = 4 + SIGNATURE_LEN + usize::from(len);
                return Err(ProtocolError::ResponseWrongLength {
                    apdu: Instruction::SignTx,
                    expected: full..full + 1,
                    found: data.len(),
                });
            }
        };

        Ok(SignatureRecord {
            has_more: has_more != 0,
            signature: InputSignature {
                index: usize::from(input),
                signature,
                sighash,
            },
        })
    }
}

/// SIGN_TX exchange for a whole transaction
#[derive(Clone, Debug)]
pub struct SignTransaction<'tx> {
    tx: &'tx Transaction,
    /// Phase whose request goes out on the next call to `encode_next`
    phase: Phase,
    /// Phase whose reply `decode_reply` is waiting for
    pending: Option<Phase>,
    signatures: Vec<Option<InputSignature>>,
    n_records: usize,
}

impl<'tx> SignTransaction<'tx> {
    /// Constructor
    pub fn new(tx: &'tx Transaction) -> Self {
        SignTransaction {
            tx,
            phase: Phase::Header,
            pending: None,
            signatures: vec![None; tx.inputs().len()],
            n_records: 0,
        }
    }

    /// The phase whose request will be sent next
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Stores a signature record, returning whether more will follow
    fn record_signature(&mut self, data: &[u8]) -> Result<bool, ProtocolError> {
        let n_inputs = self.signatures.len();
        let record = SignatureRecord::decode(data)?;
        let index = record.signature.index;

        if index >= n_inputs {
            return Err(ProtocolError::SignatureIndex {
                input: index as u8,
                count: n_inputs,
            });
        }
        if self.signatures[index].is_some() {
            return Err(ProtocolError::DuplicateSignature(index as u8));
        }
        self.signatures[index] = Some(record.signature);
        self.n_records += 1;

        // Every input has been signed once; anything more is the device
        // misbehaving, and following it would never terminate
        if record.has_more && self.n_records >= n_inputs {
            return Err(ProtocolError::TooManySignatures(n_inputs));
        }
        Ok(record.has_more)
    }
}

impl Command for SignTransaction<'_> {
    type Reply = Vec<InputSignature>;

    fn encode_next(&mut self) -> Option<Apdu> {
        let tx = self.tx;
        let n_inputs = tx.inputs().len();
        let apdu = match self.phase {
            Phase::Header => {
                let mut data = vec![PATH_COUNT];
                data.extend(tx.serialize());
                Apdu::new(Instruction::SignTx, p1::HEADER, p2::MORE, data)
            }
            Phase::Output(i) => Apdu::new(
                Instruction::SignTx,
                p1::OUTPUTS,
                p2::MORE,
                tx.outputs()[i].serialize(),
            ),
            Phase::Input(i) => {
                let cont = if i + 1 == n_inputs { p2::LAST } else { p2::MORE };
                Apdu::new(Instruction::SignTx, p1::INPUTS, cont, tx.inputs()[i].serialize())
            }
            Phase::NextSignature => {
                Apdu::new(Instruction::SignTx, p1::NEXT_SIGNATURE, p2::LAST, vec![])
            }
            Phase::Done => return None,
        };
        self.pending = Some(self.phase);
        Some(apdu)
    }

    fn decode_reply(&mut self, data: Vec<u8>) -> Result<(), Error> {
        let sent = match self.pending.take() {
            Some(phase) => phase,
            None => return Err(ProtocolError::UnexpectedReply.into()),
        };
        let n_inputs = self.tx.inputs().len();

        let more_signatures = if sent.expects_signature(n_inputs) {
            self.record_signature(&data)?
        } else {
            // Intermediate replies carry nothing we use
            false
        };
        self.phase = sent.next(self.tx.outputs().len(), n_inputs, more_signatures);
        debug!("SIGN_TX phase {:?} -> {:?}", sent, self.phase);
        Ok(())
    }

    fn into_reply(self) -> Result<Vec<InputSignature>, Error> {
        self.signatures
            .into_iter()
            .enumerate()
            .map(|(n, sig)| sig.ok_or_else(|| Error::from(ProtocolError::MissingSignature(n))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{AddressType, TransactionInput, TransactionOutput};

    const PREV_TXID: &str = "40b022362f1a303518e2b49f86f87a317c87b514ca0f3d08ad2e7cf49d08cc70";
    const SPK: &str = "2011a7215f668e921013eb7aac9b7e64b9ec6e757c1b648e89388c919f676aa88cac";

    fn tx(n_inputs: usize, n_outputs: usize) -> Transaction {
        let input = TransactionInput::new(1100000, PREV_TXID, 0, AddressType::Receive, 0).unwrap();
        let output = TransactionOutput::to_script_public_key(1090000, SPK).unwrap();
        Transaction::new(0, vec![input; n_inputs], vec![output; n_outputs]).unwrap()
    }

    fn record(has_more: u8, index: u8, fill: u8, sighash: &[u8]) -> Vec<u8> {
        let mut ret = vec![has_more, index, 64];
        ret.extend(&[fill; 64]);
        if !sighash.is_empty() {
            ret.push(sighash.len() as u8);
            ret.extend(sighash);
        }
        ret
    }

    #[test]
    fn phase_order() {
        let mut phase = Phase::Header;
        let mut seen = vec![phase];
        while phase != Phase::Done {
            phase = phase.next(2, 3, phase == Phase::Input(2));
            seen.push(phase);
        }
        assert_eq!(
            seen,
            vec![
                Phase::Header,
                Phase::Output(0),
                Phase::Output(1),
                Phase::Input(0),
                Phase::Input(1),
                Phase::Input(2),
                Phase::NextSignature,
                Phase::Done,
            ],
        );
        assert!(!Phase::Input(1).expects_signature(3));
        assert!(Phase::Input(2).expects_signature(3));
        assert!(Phase::NextSignature.expects_signature(3));
    }

    #[test]
    fn request_sequence() {
        let tx = tx(2, 1);
        let mut cmd = SignTransaction::new(&tx);

        let header = cmd.encode_next().unwrap();
        assert_eq!((header.p1, header.p2), (p1::HEADER, p2::MORE));
        assert_eq!(header.data[0], PATH_COUNT);
        assert_eq!(&header.data[1..], &tx.serialize()[..]);
        cmd.decode_reply(vec![]).unwrap();

        let output = cmd.encode_next().unwrap();
        assert_eq!((output.p1, output.p2), (p1::OUTPUTS, p2::MORE));
        cmd.decode_reply(vec![]).unwrap();

        let input = cmd.encode_next().unwrap();
        assert_eq!((input.p1, input.p2), (p1::INPUTS, p2::MORE));
        cmd.decode_reply(vec![]).unwrap();

        let input = cmd.encode_next().unwrap();
        assert_eq!((input.p1, input.p2), (p1::INPUTS, p2::LAST));
        cmd.decode_reply(record(1, 1, 0xbb, &[])).unwrap();
        assert_eq!(cmd.phase(), Phase::NextSignature);

        let next = cmd.encode_next().unwrap();
        assert_eq!((next.p1, next.p2), (p1::NEXT_SIGNATURE, p2::LAST));
        assert!(next.data.is_empty());
        cmd.decode_reply(record(0, 0, 0xaa, &[0xcc; 32])).unwrap();
        assert_eq!(cmd.phase(), Phase::Done);
        assert_eq!(cmd.encode_next(), None);

        let sigs = cmd.into_reply().unwrap();
        assert_eq!(sigs.len(), 2);
        assert_eq!(sigs[0].index, 0);
        assert_eq!(sigs[0].signature, [0xaa; 64]);
        assert_eq!(sigs[0].sighash, Some(vec![0xcc; 32]));
        assert_eq!(sigs[1].index, 1);
        assert_eq!(sigs[1].sighash, None);
    }

    #[test]
    fn bad_signature_length() {
        let mut data = record(0, 0, 0xaa, &[]);
        data[2] = 63;
        assert_eq!(
            SignatureRecord::decode(&data),
            Err(ProtocolError::SignatureLength { input: 0, len: 63 }),
        );
    }

    #[test]
    fn sighash_length_mismatch() {
        let mut data = record(0, 0, 0xaa, &[0xcc; 32]);
        data.pop();
        match SignatureRecord::decode(&data) {
            Err(ProtocolError::ResponseWrongLength { expected, found: 99, .. }) => {
                assert_eq!(expected, 100..101);
            }
            res => panic!("unexpected {:?}", res),
        }

        // A zero length byte means no sighash
        let mut data = record(0, 0, 0xaa, &[]);
        data.push(0);
        assert_eq!(SignatureRecord::decode(&data).unwrap().signature.sighash, None);
    }

    #[test]
    fn truncated_record() {
        let data = record(0, 0, 0xaa, &[]);
        for len in &[0, 2, 66] {
            match SignatureRecord::decode(&data[..*len]) {
                Err(ProtocolError::ResponseWrongLength { found, .. }) => assert_eq!(found, *len),
                res => panic!("unexpected {:?}", res),
            }
        }
    }

    fn drive_to_signatures(cmd: &mut SignTransaction) {
        while !cmd.phase().expects_signature(cmd.signatures.len()) {
            cmd.encode_next().unwrap();
            cmd.decode_reply(vec![]).unwrap();
        }
        cmd.encode_next().unwrap();
    }

    #[test]
    fn bad_index() {
        let tx = tx(1, 1);
        let mut cmd = SignTransaction::new(&tx);
        drive_to_signatures(&mut cmd);
        match cmd.decode_reply(record(0, 1, 0xaa, &[])) {
            Err(Error::Protocol(ProtocolError::SignatureIndex { input: 1, count: 1 })) => {}
            res => panic!("unexpected {:?}", res),
        }
    }

    #[test]
    fn duplicate_signature() {
        let tx = tx(2, 1);
        let mut cmd = SignTransaction::new(&tx);
        drive_to_signatures(&mut cmd);
        cmd.decode_reply(record(1, 0, 0xaa, &[])).unwrap();
        cmd.encode_next().unwrap();
        match cmd.decode_reply(record(1, 0, 0xaa, &[])) {
            Err(Error::Protocol(ProtocolError::DuplicateSignature(0))) => {}
            res => panic!("unexpected {:?}", res),
        }
    }

    #[test]
    fn runaway_has_more() {
        let tx = tx(1, 1);
        let mut cmd = SignTransaction::new(&tx);
        drive_to_signatures(&mut cmd);
        match cmd.decode_reply(record(1, 0, 0xaa, &[])) {
            Err(Error::Protocol(ProtocolError::TooManySignatures(1))) => {}
            res => panic!("unexpected {:?}", res),
        }
    }

    #[test]
    fn missing_signature() {
        let tx = tx(2, 1);
        let mut cmd = SignTransaction::new(&tx);
        drive_to_signatures(&mut cmd);
        cmd.decode_reply(record(0, 1, 0xaa, &[])).unwrap();
        assert_eq!(cmd.encode_next(), None);
        match cmd.into_reply() {
            Err(Error::Protocol(ProtocolError::MissingSignature(0))) => {}
            res => panic!("unexpected {:?}", res),
        }
    }

    #[test]
    fn reply_without_request() {
        let tx = tx(1, 1);
        let mut cmd = SignTransaction::new(&tx);
        match cmd.decode_reply(vec![]) {
            Err(Error::Protocol(ProtocolError::UnexpectedReply)) => {}
            res => panic!("unexpected {:?}", res),
        }
    }
}
