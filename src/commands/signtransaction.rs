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

//! `signtransaction`
//!
//! Has the device sign every input of a transaction, then prints the
//! signatures and the transaction in the form accepted by the REST API
//!

use anyhow::Context;
use kaspa_ledger::{Dongle, Transaction, TransactionData};
use serde::Deserialize;
use std::convert::TryFrom;

/// Signs a transaction
pub struct SignTransaction;

/// The transaction to sign
#[derive(Deserialize)]
pub struct Options {
    tx: TransactionData,
}

impl super::Command for SignTransaction {
    type Options = Options;

    fn execute<D: Dongle>(options: Self::Options, dongle: &mut D) -> anyhow::Result<()> {
        let mut tx = Transaction::try_from(options.tx).context("checking transaction")?;

        println!(
            "Signing transaction with {} inputs and {} outputs. Please confirm on the device.",
            tx.inputs().len(),
            tx.outputs().len(),
        );
        let signatures = dongle
            .sign_transaction(&tx)
            .context("signing transaction")?;
        for sig in &signatures {
            println!("Input {}: signature {}", sig.index, sig.signature_hex());
            if let Some(sighash) = sig.sighash_hex() {
                println!("         sighash {}", sighash);
            }
        }
        tx.apply_signatures(&signatures)
            .context("merging signatures into transaction")?;

        match tx.to_api_json() {
            Ok(json) => {
                println!();
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            // Address-form outputs are fine for signing but cannot be submitted as-is
            Err(e) => println!("Not printing submittable transaction: {}", e),
        }
        Ok(())
    }
}
