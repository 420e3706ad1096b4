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

//! # Constants
//!
//! Various constants
//!

/// HID-related constants
pub mod hid {
    /// USB vendor ID shared by all Ledger devices
    pub const LEDGER_VENDOR_ID: u16 = 0x2c97;
    /// HID usage page of the APDU interface
    pub const LEDGER_USAGE_PAGE: u16 = 0xffa0;
    /// Default time to wait for a single HID frame, in milliseconds
    pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
}

/// Communication constants
pub mod apdu {
    /// Ledger-specific APDU constants
    #[allow(missing_docs)]
    pub mod ledger {
        use std::fmt;

        pub const DEFAULT_CHANNEL: u16 = 0x0101;
        pub const TAG_APDU: u8 = 0x05;
        /// Maximum size an individual HID message can be
        pub const PACKET_SIZE: usize = 64;
        /// Maximum size of the payload of a single APDU
        pub const MAX_PAYLOAD: usize = 255;
        /// Deepest BIP32 path the app will derive
        pub const MAX_BIP32_PATH_LEN: usize = 10;

        pub const KASPA_CLA: u8 = 0xe0;

        /// Instructions understood by the Kaspa app
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum Instruction {
            GetVersion,
            GetAddress,
            SignTx,
            SignMessage,
        }

        impl Instruction {
            /// The INS byte of this instruction
            pub fn into_u8(self) -> u8 {
                match self {
                    Instruction::GetVersion => ins::GET_VERSION,
                    Instruction::GetAddress => ins::GET_ADDRESS,
                    Instruction::SignTx => ins::SIGN_TX,
                    Instruction::SignMessage => ins::SIGN_MESSAGE,
                }
            }
        }

        impl fmt::Display for Instruction {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                match *self {
                    Instruction::GetVersion => f.write_str("GET_VERSION"),
                    Instruction::GetAddress => f.write_str("GET_ADDRESS"),
                    Instruction::SignTx => f.write_str("SIGN_TX"),
                    Instruction::SignMessage => f.write_str("SIGN_MESSAGE"),
                }
            }
        }

        /// Instructions
        pub mod ins {
            pub const GET_VERSION: u8 = 0x04;
            pub const GET_ADDRESS: u8 = 0x05;
            pub const SIGN_TX: u8 = 0x06;
            pub const SIGN_MESSAGE: u8 = 0x07;
        }

        /// P1 values
        pub mod p1 {
            // GET_ADDRESS
            pub const NON_CONFIRM: u8 = 0x00;
            pub const CONFIRM: u8 = 0x01;
            // SIGN_TX
            pub const HEADER: u8 = 0x00;
            pub const OUTPUTS: u8 = 0x01;
            pub const INPUTS: u8 = 0x02;
            pub const NEXT_SIGNATURE: u8 = 0x03;
        }

        /// P2 values
        pub mod p2 {
            pub const LAST: u8 = 0x00;
            pub const MORE: u8 = 0x80;
        }

        /// Status Words
        pub mod sw {
            pub const OK: u16 = 0x9000;
            pub const DENY: u16 = 0x6985;
            pub const WRONG_P1P2: u16 = 0x6A86;
            pub const WRONG_DATA_LENGTH: u16 = 0x6A87;
            pub const INS_NOT_SUPPORTED: u16 = 0x6D00;
            pub const CLA_NOT_SUPPORTED: u16 = 0x6E00;
            pub const DONGLE_LOCKED: u16 = 0x5515;
            pub const APP_NOT_OPEN: u16 = 0x6E01;
            pub const WRONG_RESPONSE_LENGTH: u16 = 0xB000;
            pub const TX_PARSING_FAIL: u16 = 0xB010;
            pub const TX_HASH_FAIL: u16 = 0xB011;
            pub const TX_SIGN_FAIL: u16 = 0xB012;
        }
    }
}

/// Transaction encoding constants
pub mod tx {
    /// Number of derivation paths sent with a SIGN_TX header
    pub const PATH_COUNT: u8 = 1;
    /// Length in bytes of every signature produced by the device
    pub const SIGNATURE_LEN: usize = 64;
    /// Length in bytes of a previous-transaction id
    pub const TXID_LEN: usize = 32;
    /// Smallest (hardened) account number
    pub const MIN_ACCOUNT: u32 = 0x8000_0000;
    /// Maximum number of inputs or outputs, since the counts are a single byte
    pub const MAX_ITEMS: usize = 255;
    /// Longest script public key that fits in one OUTPUTS APDU after the
    /// 8-byte value
    pub const MAX_SCRIPT_LEN: usize = super::apdu::ledger::MAX_PAYLOAD - 8;
    /// Pushes the 65-byte signature-plus-sighash-type in a signature script
    pub const SIGSCRIPT_PUSH: &str = "41";
    /// SIGHASH_ALL
    pub const SIGHASH_ALL: &str = "01";
    /// Subnetwork id of native transactions
    pub const NATIVE_SUBNETWORK_ID: &str = "0000000000000000000000000000000000000000";
}
