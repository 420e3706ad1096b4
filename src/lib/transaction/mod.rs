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

//! # Transactions
//!
//! In-memory representation of a Kaspa transaction as the Ledger app
//! wants to see it: a header, a list of outputs and a list of inputs,
//! each of which knows how to encode itself for the device.
//!
//! Transactions can be built from typed values, where the Rust types
//! already rule out most bad inputs, or from loosely-typed
//! [`TransactionData`] (e.g. parsed from JSON), which is range-checked
//! field by field.
//!

mod api;
mod encode;

use std::convert::TryFrom;
use std::fmt;

use serde::Deserialize;

use crate::constants::tx::{MAX_ITEMS, MAX_SCRIPT_LEN, MIN_ACCOUNT, SIGNATURE_LEN, TXID_LEN};
use crate::error::ValidationError;

pub use self::api::{
    ApiInput, ApiOutpoint, ApiOutput, ApiScriptPublicKey, ApiTransaction, ApiTransactionBody,
};
pub use self::encode::Encodable;

/// Which derivation branch an address belongs to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressType {
    /// Externally visible receive addresses
    Receive,
    /// Internal change addresses
    Change,
}

impl AddressType {
    /// The byte used for this type on the wire
    pub fn into_u8(self) -> u8 {
        match self {
            AddressType::Receive => 0,
            AddressType::Change => 1,
        }
    }

    /// Interprets an arbitrary integer as an address type, if it is one
    pub fn from_int(n: i64) -> Option<AddressType> {
        match n {
            0 => Some(AddressType::Receive),
            1 => Some(AddressType::Change),
            _ => None,
        }
    }
}

impl Default for AddressType {
    fn default() -> Self {
        AddressType::Receive
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.into_u8(), f)
    }
}

/// Signature (and possibly sighash) the device produced for one input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputSignature {
    /// Index of the input this signature belongs to
    pub index: usize,
    /// The 64-byte Schnorr signature
    pub signature: [u8; SIGNATURE_LEN],
    /// Digest the device signed, if it chose to return it
    pub sighash: Option<Vec<u8>>,
}

impl InputSignature {
    /// Hex encoding of the signature
    pub fn signature_hex(&self) -> String {
        hex::encode(self.signature)
    }

    /// Hex encoding of the sighash, if any
    pub fn sighash_hex(&self) -> Option<String> {
        self.sighash.as_ref().map(hex::encode)
    }
}

/// A transaction input, i.e. a previous output of ours being spent
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    value: u64,
    prev_tx_id: [u8; TXID_LEN],
    outpoint_index: u8,
    address_type: AddressType,
    address_index: u32,
    signature: Option<[u8; SIGNATURE_LEN]>,
    sighash: Option<Vec<u8>>,
}

impl TransactionInput {
    /// Constructs a new unsigned input. `prev_tx_id` is the hex-encoded
    /// id of the transaction which created the output being spent.
    pub fn new(
        value: u64,
        prev_tx_id: &str,
        outpoint_index: u8,
        address_type: AddressType,
        address_index: u32,
    ) -> Result<Self, ValidationError> {
        let mut txid = [0; TXID_LEN];
        hex::decode_to_slice(prev_tx_id, &mut txid)
            .map_err(|e| ValidationError::PrevTxId(e.to_string()))?;
        Ok(TransactionInput {
            value,
            prev_tx_id: txid,
            outpoint_index,
            address_type,
            address_index,
            signature: None,
            sighash: None,
        })
    }

    /// Amount held by the output being spent
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Raw id of the transaction being spent from
    pub fn prev_tx_id(&self) -> &[u8; TXID_LEN] {
        &self.prev_tx_id
    }

    /// Hex-encoded id of the transaction being spent from
    pub fn prev_tx_id_hex(&self) -> String {
        hex::encode(self.prev_tx_id)
    }

    /// Index of the output being spent within its transaction
    pub fn outpoint_index(&self) -> u8 {
        self.outpoint_index
    }

    /// Derivation branch of the key controlling this input
    pub fn address_type(&self) -> AddressType {
        self.address_type
    }

    /// Derivation index of the key controlling this input
    pub fn address_index(&self) -> u32 {
        self.address_index
    }

    /// The device's signature, once signed
    pub fn signature(&self) -> Option<&[u8; SIGNATURE_LEN]> {
        self.signature.as_ref()
    }

    /// Hex-encoded signature, once signed
    pub fn signature_hex(&self) -> Option<String> {
        self.signature.map(hex::encode)
    }

    /// The digest the device signed, if it returned one
    pub fn sighash(&self) -> Option<&[u8]> {
        self.sighash.as_deref()
    }

    /// Hex-encoded sighash, if the device returned one
    pub fn sighash_hex(&self) -> Option<String> {
        self.sighash.as_ref().map(hex::encode)
    }

    /// Attaches a signature (and optional sighash) to this input
    pub fn set_signature(&mut self, signature: [u8; SIGNATURE_LEN], sighash: Option<Vec<u8>>) {
        self.signature = Some(signature);
        self.sighash = sighash;
    }
}

/// Where an output sends its coins
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// An explicit script, given as raw bytes
    ScriptPublicKey(Vec<u8>),
    /// One of the device's own addresses, which it derives itself
    Address {
        /// Derivation branch
        address_type: AddressType,
        /// Derivation index
        address_index: u32,
    },
}

/// A transaction output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    value: u64,
    destination: Destination,
}

impl TransactionOutput {
    /// Constructs a new output. Fails if `value` is zero, or if the
    /// script is empty or too long to send to the device.
    pub fn new(value: u64, destination: Destination) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::Value(0));
        }
        if let Destination::ScriptPublicKey(ref spk) = destination {
            if spk.is_empty() {
                return Err(ValidationError::OutputDestination);
            }
            if spk.len() > MAX_SCRIPT_LEN {
                return Err(ValidationError::ScriptPublicKeyTooLong(spk.len()));
            }
        }
        Ok(TransactionOutput { value, destination })
    }

    /// Constructs an output paying to a hex-encoded script public key
    pub fn to_script_public_key(value: u64, script_public_key: &str) -> Result<Self, ValidationError> {
        let spk = hex::decode(script_public_key)
            .map_err(|e| ValidationError::ScriptPublicKey(e.to_string()))?;
        TransactionOutput::new(value, Destination::ScriptPublicKey(spk))
    }

    /// Constructs an output paying to one of the device's own addresses
    pub fn to_address(
        value: u64,
        address_type: AddressType,
        address_index: u32,
    ) -> Result<Self, ValidationError> {
        TransactionOutput::new(
            value,
            Destination::Address {
                address_type,
                address_index,
            },
        )
    }

    /// Amount sent by this output
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Where the output sends its coins
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Raw script public key, if the output was given one
    pub fn script_public_key(&self) -> Option<&[u8]> {
        match self.destination {
            Destination::ScriptPublicKey(ref spk) => Some(spk),
            Destination::Address { .. } => None,
        }
    }
}

/// A transaction to be signed by the device
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    version: u16,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
    change_address_type: AddressType,
    change_address_index: u32,
    account: u32,
}

impl Transaction {
    /// Constructs a transaction using change address 0/0 and the first
    /// hardened account
    pub fn new(
        version: u16,
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
    ) -> Result<Self, ValidationError> {
        Transaction::with_change(
            version,
            inputs,
            outputs,
            AddressType::Receive,
            0,
            MIN_ACCOUNT,
        )
    }

    /// Constructs a transaction with an explicit change address and account
    pub fn with_change(
        version: u16,
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
        change_address_type: AddressType,
        change_address_index: u32,
        account: u32,
    ) -> Result<Self, ValidationError> {
        if inputs.is_empty() {
            return Err(ValidationError::NoInputs);
        }
        if inputs.len() > MAX_ITEMS {
            return Err(ValidationError::TooManyInputs(inputs.len()));
        }
        if outputs.is_empty() {
            return Err(ValidationError::NoOutputs);
        }
        if outputs.len() > MAX_ITEMS {
            return Err(ValidationError::TooManyOutputs(outputs.len()));
        }
        if account < MIN_ACCOUNT {
            return Err(ValidationError::Account(account.into()));
        }
        Ok(Transaction {
            version,
            inputs,
            outputs,
            change_address_type,
            change_address_index,
            account,
        })
    }

    /// Transaction version
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Inputs, in signing order
    pub fn inputs(&self) -> &[TransactionInput] {
        &self.inputs
    }

    /// Outputs, in signing order
    pub fn outputs(&self) -> &[TransactionOutput] {
        &self.outputs
    }

    /// Derivation branch of the change address
    pub fn change_address_type(&self) -> AddressType {
        self.change_address_type
    }

    /// Derivation index of the change address
    pub fn change_address_index(&self) -> u32 {
        self.change_address_index
    }

    /// Hardened account number the inputs are derived under
    pub fn account(&self) -> u32 {
        self.account
    }

    /// Whether every input carries a signature
    pub fn is_fully_signed(&self) -> bool {
        self.inputs.iter().all(|input| input.signature.is_some())
    }

    /// Merges signatures returned by the device into the inputs.
    ///
    /// All indices are checked before anything is written, so on error
    /// the transaction is left untouched.
    pub fn apply_signatures(&mut self, signatures: &[InputSignature]) -> Result<(), ValidationError> {
        let count = self.inputs.len();
        if let Some(bad) = signatures.iter().find(|sig| sig.index >= count) {
            return Err(ValidationError::SignatureIndex {
                index: bad.index,
                count,
            });
        }
        for sig in signatures {
            self.inputs[sig.index].set_signature(sig.signature, sig.sighash.clone());
        }
        Ok(())
    }
}

/// Loosely-typed input, as found in JSON
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputData {
    /// Amount, in sompi
    pub value: u128,
    /// Hex-encoded previous transaction id
    pub prev_tx_id: String,
    /// Index of the output being spent
    pub outpoint_index: i64,
    /// 0 for receive, 1 for change
    pub address_type: i64,
    /// Derivation index
    pub address_index: i64,
}

/// Loosely-typed output, as found in JSON
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputData {
    /// Amount, in sompi
    pub value: u128,
    /// Hex-encoded script public key
    #[serde(default)]
    pub script_public_key: Option<String>,
    /// 0 for receive, 1 for change
    #[serde(default)]
    pub address_type: Option<i64>,
    /// Derivation index
    #[serde(default)]
    pub address_index: Option<i64>,
}

/// Loosely-typed transaction, as found in JSON
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    /// Transaction version
    pub version: i64,
    /// Inputs
    pub inputs: Vec<InputData>,
    /// Outputs
    pub outputs: Vec<OutputData>,
    /// Change address type, defaulting to 0
    #[serde(default)]
    pub change_address_type: Option<i64>,
    /// Change address index, defaulting to 0
    #[serde(default)]
    pub change_address_index: Option<i64>,
    /// Account, defaulting to 0x80000000
    #[serde(default)]
    pub account: Option<i64>,
}

fn checked_value(value: u128) -> Result<u64, ValidationError> {
    match u64::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ValidationError::Value(value)),
    }
}

fn checked_u32(n: i64, err: fn(i64) -> ValidationError) -> Result<u32, ValidationError> {
    u32::try_from(n).map_err(|_| err(n))
}

impl TryFrom<InputData> for TransactionInput {
    type Error = ValidationError;

    fn try_from(data: InputData) -> Result<Self, ValidationError> {
        // Inputs can hold any 64-bit amount, including zero
        let value = u64::try_from(data.value).map_err(|_| ValidationError::Value(data.value))?;
        let outpoint_index = u8::try_from(data.outpoint_index)
            .map_err(|_| ValidationError::OutpointIndex(data.outpoint_index))?;
        let address_type = AddressType::from_int(data.address_type)
            .ok_or(ValidationError::AddressType(data.address_type))?;
        let address_index = checked_u32(data.address_index, ValidationError::AddressIndex)?;
        TransactionInput::new(
            value,
            &data.prev_tx_id,
            outpoint_index,
            address_type,
            address_index,
        )
    }
}

impl TryFrom<OutputData> for TransactionOutput {
    type Error = ValidationError;

    fn try_from(data: OutputData) -> Result<Self, ValidationError> {
        let value = checked_value(data.value)?;
        match (data.script_public_key, data.address_type, data.address_index) {
            (Some(spk), None, None) => TransactionOutput::to_script_public_key(value, &spk),
            (None, Some(ty), Some(idx)) => {
                let address_type =
                    AddressType::from_int(ty).ok_or(ValidationError::AddressType(ty))?;
                let address_index = checked_u32(idx, ValidationError::AddressIndex)?;
                TransactionOutput::to_address(value, address_type, address_index)
            }
            _ => Err(ValidationError::OutputDestination),
        }
    }
}

impl TryFrom<TransactionData> for Transaction {
    type Error = ValidationError;

    fn try_from(data: TransactionData) -> Result<Self, ValidationError> {
        let version = u16::try_from(data.version).map_err(|_| ValidationError::Version(data.version))?;
        let change_type = data.change_address_type.unwrap_or(0);
        let change_address_type = AddressType::from_int(change_type)
            .ok_or(ValidationError::ChangeAddressType(change_type))?;
        let change_address_index = checked_u32(
            data.change_address_index.unwrap_or(0),
            ValidationError::ChangeAddressIndex,
        )?;
        let account = checked_u32(
            data.account.unwrap_or_else(|| MIN_ACCOUNT.into()),
            ValidationError::Account,
        )?;

        let inputs = data
            .inputs
            .into_iter()
            .map(TransactionInput::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let outputs = data
            .outputs
            .into_iter()
            .map(TransactionOutput::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Transaction::with_change(
            version,
            inputs,
            outputs,
            change_address_type,
            change_address_index,
            account,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryInto;

    const PREV_TXID: &str = "40b022362f1a303518e2b49f86f87a317c87b514ca0f3d08ad2e7cf49d08cc70";
    const SPK: &str = "2011a7215f668e921013eb7aac9b7e64b9ec6e757c1b648e89388c919f676aa88cac";

    fn output(json: &str) -> Result<TransactionOutput, ValidationError> {
        let data: OutputData = serde_json::from_str(json).expect("parsing json");
        TransactionOutput::try_from(data)
    }

    fn transaction(change_type: i64, account: Option<i64>) -> Result<Transaction, ValidationError> {
        TransactionData {
            version: 0,
            inputs: vec![InputData {
                value: 1100000,
                prev_tx_id: PREV_TXID.into(),
                outpoint_index: 0,
                address_type: 0,
                address_index: 0,
            }],
            outputs: vec![OutputData {
                value: 1090000,
                script_public_key: Some(SPK.into()),
                ..Default::default()
            }],
            change_address_type: Some(change_type),
            change_address_index: None,
            account,
        }
        .try_into()
    }

    #[test]
    fn output_value_bounds() {
        assert_eq!(
            TransactionOutput::to_script_public_key(0, SPK),
            Err(ValidationError::Value(0)),
        );
        assert_eq!(
            output(&format!(r#"{{ "value": 0, "scriptPublicKey": "{}" }}"#, SPK)),
            Err(ValidationError::Value(0)),
        );
        assert_eq!(
            output(&format!(r#"{{ "value": 18446744073709551616, "scriptPublicKey": "{}" }}"#, SPK)),
            Err(ValidationError::Value(1u128 << 64)),
        );
        let max = output(&format!(r#"{{ "value": 18446744073709551615, "scriptPublicKey": "{}" }}"#, SPK))
            .expect("max value is fine");
        assert_eq!(max.value(), u64::max_value());
    }

    #[test]
    fn output_destinations() {
        let spk = output(&format!(r#"{{ "value": 1090000, "scriptPublicKey": "{}" }}"#, SPK))
            .expect("script output");
        assert_eq!(spk.script_public_key(), Some(&hex::decode(SPK).unwrap()[..]));

        let addr = output(r#"{ "value": 1090000, "addressType": 1, "addressIndex": 5 }"#)
            .expect("address output");
        assert_eq!(addr.script_public_key(), None);
        assert_eq!(
            *addr.destination(),
            Destination::Address {
                address_type: AddressType::Change,
                address_index: 5,
            },
        );

        // 0/0 is a perfectly good address
        output(r#"{ "value": 1090000, "addressType": 0, "addressIndex": 0 }"#)
            .expect("address 0/0");
    }

    #[test]
    fn output_bad_destinations() {
        let err = Err(ValidationError::OutputDestination);
        assert_eq!(output(r#"{ "value": 1090000 }"#), err);
        assert_eq!(output(r#"{ "value": 1090000, "addressType": 1 }"#), err);
        assert_eq!(output(r#"{ "value": 1090000, "addressIndex": 1 }"#), err);
        assert_eq!(
            output(&format!(
                r#"{{ "value": 1090000, "scriptPublicKey": "{}", "addressType": 1, "addressIndex": 1 }}"#,
                SPK,
            )),
            err,
        );

        assert_eq!(
            output(r#"{ "value": 1090000, "addressType": 2, "addressIndex": 5 }"#),
            Err(ValidationError::AddressType(2)),
        );
        assert_eq!(
            output(r#"{ "value": 1090000, "addressType": -1, "addressIndex": 5 }"#),
            Err(ValidationError::AddressType(-1)),
        );
        assert_eq!(
            output(r#"{ "value": 1090000, "addressType": 1, "addressIndex": -1 }"#),
            Err(ValidationError::AddressIndex(-1)),
        );
        assert_eq!(
            output(r#"{ "value": 1090000, "addressType": 1, "addressIndex": 4294967296 }"#),
            Err(ValidationError::AddressIndex(0x1_0000_0000)),
        );
        match output(r#"{ "value": 1090000, "scriptPublicKey": "20zz" }"#) {
            Err(ValidationError::ScriptPublicKey(_)) => {}
            res => panic!("unexpected {:?}", res),
        }

        // Empty scripts are no destination at all, whichever way they arrive
        assert_eq!(output(r#"{ "value": 1090000, "scriptPublicKey": "" }"#), err);
        assert_eq!(TransactionOutput::to_script_public_key(1090000, ""), err);
        assert_eq!(
            TransactionOutput::new(1090000, Destination::ScriptPublicKey(vec![])),
            err,
        );
    }

    #[test]
    fn script_length_limit() {
        let longest = TransactionOutput::to_script_public_key(1090000, &"ab".repeat(247))
            .expect("247-byte script");
        assert_eq!(longest.serialize().len(), 255);

        assert_eq!(
            TransactionOutput::to_script_public_key(1090000, &"ab".repeat(248)),
            Err(ValidationError::ScriptPublicKeyTooLong(248)),
        );
        assert_eq!(
            output(&format!(r#"{{ "value": 1090000, "scriptPublicKey": "{}" }}"#, "ab".repeat(300))),
            Err(ValidationError::ScriptPublicKeyTooLong(300)),
        );
    }

    #[test]
    fn change_address_type() {
        transaction(0, None).expect("change type 0");
        transaction(1, None).expect("change type 1");
        assert_eq!(transaction(2, None), Err(ValidationError::ChangeAddressType(2)));
    }

    #[test]
    fn account_range() {
        let tx = transaction(0, None).expect("default account");
        assert_eq!(tx.account(), 0x8000_0000);
        transaction(0, Some(0xFFFF_FFFF)).expect("top account");
        assert_eq!(
            transaction(0, Some(0x7FFF_FFFF)),
            Err(ValidationError::Account(0x7FFF_FFFF)),
        );
        assert_eq!(
            transaction(0, Some(0x1_0000_0000)),
            Err(ValidationError::Account(0x1_0000_0000)),
        );
    }

    #[test]
    fn header_field_ranges() {
        let mut data = TransactionData {
            version: 0x1_0000,
            inputs: vec![InputData {
                value: 1100000,
                prev_tx_id: PREV_TXID.into(),
                outpoint_index: 0,
                address_type: 0,
                address_index: 0,
            }],
            outputs: vec![OutputData {
                value: 1090000,
                script_public_key: Some(SPK.into()),
                ..Default::default()
            }],
            change_address_type: None,
            change_address_index: None,
            account: None,
        };
        assert_eq!(
            Transaction::try_from(data.clone()),
            Err(ValidationError::Version(0x1_0000)),
        );

        data.version = 0xFFFF;
        data.change_address_index = Some(0x1_0000_0000);
        assert_eq!(
            Transaction::try_from(data.clone()),
            Err(ValidationError::ChangeAddressIndex(0x1_0000_0000)),
        );

        data.change_address_index = Some(0xFFFF_FFFF);
        let tx = Transaction::try_from(data).expect("top of every range");
        assert_eq!(tx.version(), 0xFFFF);
        assert_eq!(tx.change_address_index(), 0xFFFF_FFFF);
    }

    #[test]
    fn input_field_ranges() {
        let input = |json: &str| -> Result<TransactionInput, ValidationError> {
            let data: InputData = serde_json::from_str(json).expect("parsing json");
            TransactionInput::try_from(data)
        };

        let ok = format!(
            r#"{{ "value": 0, "prevTxId": "{}", "outpointIndex": 255, "addressType": 1, "addressIndex": 7 }}"#,
            PREV_TXID,
        );
        assert_eq!(input(&ok).expect("zero-value input").outpoint_index(), 255);

        assert_eq!(
            input(&format!(
                r#"{{ "value": 1, "prevTxId": "{}", "outpointIndex": 256, "addressType": 0, "addressIndex": 0 }}"#,
                PREV_TXID,
            )),
            Err(ValidationError::OutpointIndex(256)),
        );
        assert_eq!(
            input(&format!(
                r#"{{ "value": 18446744073709551616, "prevTxId": "{}", "outpointIndex": 0, "addressType": 0, "addressIndex": 0 }}"#,
                PREV_TXID,
            )),
            Err(ValidationError::Value(1u128 << 64)),
        );

        // Negative amounts never make it past deserialization
        let negative = format!(
            r#"{{ "value": -1, "prevTxId": "{}", "outpointIndex": 0, "addressType": 0, "addressIndex": 0 }}"#,
            PREV_TXID,
        );
        assert!(serde_json::from_str::<InputData>(&negative).is_err());
    }

    #[test]
    fn bad_prev_txid() {
        for txid in &["", "40b0", &PREV_TXID[1..], "zz"] {
            match TransactionInput::new(1, txid, 0, AddressType::Receive, 0) {
                Err(ValidationError::PrevTxId(_)) => {}
                res => panic!("unexpected {:?} for {}", res, txid),
            }
        }
    }

    #[test]
    fn item_counts() {
        let input = TransactionInput::new(1, PREV_TXID, 0, AddressType::Receive, 0).unwrap();
        let output = TransactionOutput::to_script_public_key(1, SPK).unwrap();

        assert_eq!(
            Transaction::new(0, vec![], vec![output.clone()]),
            Err(ValidationError::NoInputs),
        );
        assert_eq!(
            Transaction::new(0, vec![input.clone()], vec![]),
            Err(ValidationError::NoOutputs),
        );
        assert_eq!(
            Transaction::new(0, vec![input.clone(); 256], vec![output.clone()]),
            Err(ValidationError::TooManyInputs(256)),
        );
        assert_eq!(
            Transaction::new(0, vec![input.clone()], vec![output.clone(); 256]),
            Err(ValidationError::TooManyOutputs(256)),
        );
        Transaction::new(0, vec![input; 255], vec![output; 255]).expect("255 of each");
    }

    #[test]
    fn apply_signatures() {
        let input = TransactionInput::new(1, PREV_TXID, 0, AddressType::Receive, 0).unwrap();
        let output = TransactionOutput::to_script_public_key(1, SPK).unwrap();
        let mut tx = Transaction::new(0, vec![input.clone(), input], vec![output]).unwrap();

        let sigs = vec![
            InputSignature { index: 1, signature: [1; 64], sighash: None },
            InputSignature { index: 2, signature: [2; 64], sighash: None },
        ];
        assert_eq!(
            tx.apply_signatures(&sigs),
            Err(ValidationError::SignatureIndex { index: 2, count: 2 }),
        );
        assert!(tx.inputs().iter().all(|i| i.signature().is_none()));

        let sigs = vec![
            InputSignature { index: 1, signature: [1; 64], sighash: Some(vec![0xaa; 32]) },
            InputSignature { index: 0, signature: [2; 64], sighash: None },
        ];
        tx.apply_signatures(&sigs).expect("applying");
        assert!(tx.is_fully_signed());
        assert_eq!(tx.inputs()[0].signature(), Some(&[2; 64]));
        assert_eq!(tx.inputs()[0].sighash(), None);
        assert_eq!(tx.inputs()[1].sighash_hex(), Some("aa".repeat(32)));
    }
}
