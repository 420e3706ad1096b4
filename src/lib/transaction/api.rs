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

//! REST API Projection
//!
//! The JSON shape accepted by the transaction submission endpoint of the
//! Kaspa REST API. This is unrelated to the device encoding.
//!

use serde::Serialize;

use super::{Transaction, TransactionInput, TransactionOutput};
use crate::constants::tx::{NATIVE_SUBNETWORK_ID, SIGHASH_ALL, SIGSCRIPT_PUSH};
use crate::error::ValidationError;

/// Top-level submission object
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApiTransaction {
    pub transaction: ApiTransactionBody,
}

/// The transaction itself
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTransactionBody {
    pub version: u16,
    pub inputs: Vec<ApiInput>,
    pub outputs: Vec<ApiOutput>,
    pub lock_time: u64,
    pub subnetwork_id: String,
}

/// A signed (or not yet signed) input
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInput {
    pub previous_outpoint: ApiOutpoint,
    pub signature_script: Option<String>,
    pub sequence: u64,
    pub sig_op_count: u8,
}

/// Reference to the output being spent
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOutpoint {
    pub transaction_id: String,
    pub index: u8,
}

/// An output
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOutput {
    pub amount: u64,
    pub script_public_key: ApiScriptPublicKey,
}

/// A versioned script
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiScriptPublicKey {
    pub version: u16,
    pub script_public_key: String,
}

impl TransactionInput {
    /// Projects the input onto the submission API's JSON shape
    pub fn to_api_json(&self) -> ApiInput {
        ApiInput {
            previous_outpoint: ApiOutpoint {
                transaction_id: self.prev_tx_id_hex(),
                index: self.outpoint_index,
            },
            signature_script: self
                .signature_hex()
                .map(|sig| format!("{}{}{}", SIGSCRIPT_PUSH, sig, SIGHASH_ALL)),
            sequence: 0,
            sig_op_count: 1,
        }
    }
}

impl TransactionOutput {
    /// Projects the output onto the submission API's JSON shape. Returns
    /// `None` for outputs to device-derived addresses, since the host
    /// does not know their script.
    pub fn to_api_json(&self) -> Option<ApiOutput> {
        self.script_public_key().map(|spk| ApiOutput {
            amount: self.value,
            script_public_key: ApiScriptPublicKey {
                version: 0,
                script_public_key: hex::encode(spk),
            },
        })
    }
}

impl Transaction {
    /// Converts this transaction to a JSON object that the Kaspa REST API
    /// will accept
    pub fn to_api_json(&self) -> Result<ApiTransaction, ValidationError> {
        let outputs = self
            .outputs
            .iter()
            .enumerate()
            .map(|(n, out)| out.to_api_json().ok_or(ValidationError::MissingScriptPublicKey(n)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ApiTransaction {
            transaction: ApiTransactionBody {
                version: self.version,
                inputs: self.inputs.iter().map(TransactionInput::to_api_json).collect(),
                outputs,
                lock_time: 0,
                subnetwork_id: NATIVE_SUBNETWORK_ID.to_owned(),
            },
        })
    }
}
