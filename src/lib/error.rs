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

//! # Error Handling

use crate::constants::apdu::ledger::Instruction;
use std::ops;
use thiserror::Error;

/// Kaspa Ledger error
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum Error {
    #[error("incorrect channel for APDU (expected {expected:?}, found {found:?})")]
    ApduWrongChannel { expected: u16, found: u16 },
    #[error("incorrect tag for APDU (expected {expected:?}, found {found:?})")]
    ApduWrongTag { expected: u8, found: u8 },
    #[error("incorrect sequence no for APDU (expected {expected:?}, found {found:?})")]
    ApduWrongSequence { expected: u16, found: u16 },
    #[error("{apdu} payload of {len} bytes does not fit in a single APDU")]
    ApduTooLong { apdu: Instruction, len: usize },
    #[error("no dongle detected")]
    DongleNotFound,
    #[error("more than one dongle detected")]
    DongleNotUnique,
    #[error("hidapi")]
    Hid(#[from] hidapi::HidError),
    #[error("invalid input")]
    Validation(#[from] ValidationError),
    #[error("unexpected reply from device")]
    Protocol(#[from] ProtocolError),
    #[error("device replied to {apdu} with bad status code {status:04X}")]
    ResponseBadStatus { apdu: Instruction, status: u16 },
    #[error("replay expected APDU {expected}, got {found}")]
    ReplayMismatch { expected: String, found: String },
    #[error("replay has no recorded reply left for APDU {0}")]
    ReplayExhausted(String),
    #[error("malformed replay record: {0}")]
    ReplayRecord(String),
    #[error("unexpected end-of-data")]
    UnexpectedEof,
    #[error("timed out waiting for the device")]
    Timeout,
}

/// Malformed construction input
///
/// Raised synchronously while building a transaction, an output, or a
/// device request. Nothing is ever partially constructed.
#[allow(missing_docs)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("address type must be 0 or 1, got {0}")]
    AddressType(i64),
    #[error("address index must be between 0x00000000 and 0xFFFFFFFF, got {0}")]
    AddressIndex(i64),
    #[error("change address type must be 0 or 1, got {0}")]
    ChangeAddressType(i64),
    #[error("change address index must be between 0x00000000 and 0xFFFFFFFF, got {0}")]
    ChangeAddressIndex(i64),
    #[error("account must be between 0x80000000 and 0xFFFFFFFF, got {0:#x}")]
    Account(i64),
    #[error("version must fit in 16 bits, got {0}")]
    Version(i64),
    #[error("value must be greater than 0 and at most 0xFFFFFFFFFFFFFFFF, got {0}")]
    Value(u128),
    #[error("outpoint index must fit in 8 bits, got {0}")]
    OutpointIndex(i64),
    #[error("previous transaction id must be 32 hex-encoded bytes ({0})")]
    PrevTxId(String),
    #[error("script public key must be hex-encoded ({0})")]
    ScriptPublicKey(String),
    #[error("script public key of {0} bytes does not fit in a single APDU (at most 247)")]
    ScriptPublicKeyTooLong(usize),
    #[error("output needs exactly one of scriptPublicKey or (addressType, addressIndex)")]
    OutputDestination,
    #[error("output {0} has no script public key to submit")]
    MissingScriptPublicKey(usize),
    #[error("transaction has no inputs")]
    NoInputs,
    #[error("transaction has no outputs")]
    NoOutputs,
    #[error("transaction has {0} inputs, at most 255 supported")]
    TooManyInputs(usize),
    #[error("transaction has {0} outputs, at most 255 supported")]
    TooManyOutputs(usize),
    #[error("signature for input {index} but transaction has {count} inputs")]
    SignatureIndex { index: usize, count: usize },
    #[error("derivation path has {0} components, at most 10 supported")]
    PathTooLong(usize),
    #[error("could not parse derivation path {0}")]
    Path(String),
    #[error("message of {0} bytes does not fit in a single APDU")]
    MessageTooLong(usize),
}

/// Device reply which violates the expected shape
#[allow(missing_docs)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("incorrect length for {apdu} response (expected {expected:?}, found {found:?})")]
    ResponseWrongLength {
        apdu: Instruction,
        expected: ops::Range<usize>,
        found: usize,
    },
    #[error("expected signature length is 64, received {len} for input {input}")]
    SignatureLength { input: u8, len: u8 },
    #[error("device returned a signature for input {input} of a {count}-input transaction")]
    SignatureIndex { input: u8, count: usize },
    #[error("device returned two signatures for input {0}")]
    DuplicateSignature(u8),
    #[error("device returned no signature for input {0}")]
    MissingSignature(usize),
    #[error("device kept signalling more signatures after all {0} inputs were signed")]
    TooManySignatures(usize),
    #[error("device replied after the signing exchange was complete")]
    UnexpectedReply,
}
