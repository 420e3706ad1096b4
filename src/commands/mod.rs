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

//! Argument Parsing
//!
//! Different subcommands supported by the command-line utility
//!

mod getaddress;
mod getversion;
mod signmessage;
mod signtransaction;

use anyhow::{self, Context};
use kaspa_ledger::Dongle;
use serde::de::DeserializeOwned;
use std::{borrow::Cow, env};

pub trait Command {
    type Options: DeserializeOwned;

    fn execute<D: Dongle>(options: Self::Options, dongle: &mut D) -> anyhow::Result<()>;
}

macro_rules! register_commands {
    ($($cmd_name:ident, $type_name:ident, $help:expr;)*) => {
        $(use $cmd_name::$type_name;)*

        fn usage<T>(name: &str) -> anyhow::Result<T> {
            eprintln!("Usage: {} <command> [options]", name);
            eprintln!("");
            eprintln!("Commands:");
            $(eprintln!("    {:16} {}", stringify!($cmd_name), $help);)*
            eprintln!("");
            eprintln!("Options are given as a single JSON object.");
            eprintln!("Set RUST_LOG=trace to see the APDUs exchanged with the device.");
            Err(anyhow::Error::msg("bad invocation"))
        }

        /// Parse command-line arguments and execute them
        pub fn execute_from_args<D: Dongle>(
            dongle: &mut D,
        ) -> anyhow::Result<()> {
            let mut args = env::args_os();
            let name = args.next();
            let name = match name.as_ref() {
                Some(name) => name.to_string_lossy(),
                None => usage("")?,
            };
            let cmd = args.next();
            let cmd = match cmd.as_ref() {
                Some(cmd) => cmd.to_string_lossy(),
                None => usage(&name)?,
            };
            let options = args.next();
            let options = options
                .as_ref()
                .map(|oss| oss.to_string_lossy())
                .unwrap_or(Cow::Borrowed("{}"));

            if args.next().is_some() {
                usage(&name)?
            }

            match cmd.as_ref() {
                $(stringify!($cmd_name) => {
                    let opts: <$type_name as Command>::Options = serde_json::from_str(&options)
                        .with_context(|| format!(
                            "deserializing options for {}",
                             stringify!($cmd_name),
                        ))?;
                    $type_name::execute(opts, dongle)?;
                }),*
                _ => usage(&name)?,
            }
            Ok(())
        }
    }
}

register_commands! {
    getversion, GetVersion, "";
    getaddress, GetAddress, "{ \"path\": string, \"display\": bool (optional) }";
    signtransaction, SignTransaction, "{ \"tx\": { \"version\": int, \"inputs\": [...], \"outputs\": [...] } }";
    signmessage, SignMessage, "{ \"message\": string, \"address_type\": int (optional), \"address_index\": int (optional) }";
}
