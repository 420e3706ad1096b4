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

//! # Replay Dongle
//!
//! A fake device which answers from a recorded exchange, checking that
//! every APDU it receives is exactly the one recorded. Recordings are
//! plain text, one APDU per line:
//!
//! ```text
//! => e004000000
//! <= 0105069000
//! ```
//!
//! Blank lines are skipped. Replies include the status word.
//!

use std::collections::VecDeque;
use std::str::FromStr;

use crate::dongle::Dongle;
use crate::Error;

/// Dongle which replays a recorded exchange
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Replay {
    exchanges: VecDeque<(Vec<u8>, Vec<u8>)>,
}

impl Replay {
    /// Constructs an empty recording
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends an APDU and the reply it should get
    pub fn push(&mut self, apdu: Vec<u8>, reply: Vec<u8>) {
        self.exchanges.push_back((apdu, reply));
    }

    /// Whether every recorded exchange has been played back
    pub fn is_finished(&self) -> bool {
        self.exchanges.is_empty()
    }
}

fn decode_line(line: &str, prefix: &str) -> Result<Vec<u8>, Error> {
    let data = line
        .strip_prefix(prefix)
        .ok_or_else(|| Error::ReplayRecord(format!("expected `{}` in `{}`", prefix, line)))?;
    hex::decode(data.trim())
        .map_err(|e| Error::ReplayRecord(format!("bad hex in `{}`: {}", line, e)))
}

impl FromStr for Replay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let mut ret = Replay::new();
        let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());
        while let Some(line) = lines.next() {
            let apdu = decode_line(line, "=>")?;
            let reply = match lines.next() {
                Some(line) => decode_line(line, "<=")?,
                None => {
                    return Err(Error::ReplayRecord(format!(
                        "no reply recorded for `{}`",
                        line
                    )))
                }
            };
            ret.push(apdu, reply);
        }
        Ok(ret)
    }
}

impl Dongle for Replay {
    fn transmit(&mut self, apdu: &[u8]) -> Result<Vec<u8>, Error> {
        let (expected, reply) = self
            .exchanges
            .pop_front()
            .ok_or_else(|| Error::ReplayExhausted(hex::encode(apdu)))?;
        if expected != apdu {
            return Err(Error::ReplayMismatch {
                expected: hex::encode(expected),
                found: hex::encode(apdu),
            });
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let replay: Replay = "
            => e004000000
            <= 0105069000

            => e005000000
            <= 9000
        "
        .parse()
        .unwrap();
        let mut expected = Replay::new();
        expected.push(vec![0xe0, 0x04, 0x00, 0x00, 0x00], vec![0x01, 0x05, 0x06, 0x90, 0x00]);
        expected.push(vec![0xe0, 0x05, 0x00, 0x00, 0x00], vec![0x90, 0x00]);
        assert_eq!(replay, expected);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!("<= 9000".parse::<Replay>(), Err(Error::ReplayRecord(_))));
        assert!(matches!("=> e0040000".parse::<Replay>(), Err(Error::ReplayRecord(_))));
        assert!(matches!("=> e00400\n<= zz".parse::<Replay>(), Err(Error::ReplayRecord(_))));
    }

    #[test]
    fn transmit() {
        let mut replay: Replay = "=> e004000000\n<= 0105069000".parse().unwrap();
        match replay.transmit(&[0xe0, 0x05, 0x00, 0x00, 0x00]) {
            Err(Error::ReplayMismatch { expected, found }) => {
                assert_eq!(expected, "e004000000");
                assert_eq!(found, "e005000000");
            }
            res => panic!("unexpected {:?}", res),
        }

        let mut replay: Replay = "=> e004000000\n<= 0105069000".parse().unwrap();
        assert_eq!(
            replay.transmit(&[0xe0, 0x04, 0x00, 0x00, 0x00]).unwrap(),
            vec![0x01, 0x05, 0x06, 0x90, 0x00],
        );
        assert!(replay.is_finished());
        match replay.transmit(&[0xe0, 0x04, 0x00, 0x00, 0x00]) {
            Err(Error::ReplayExhausted(apdu)) => assert_eq!(apdu, "e004000000"),
            res => panic!("unexpected {:?}", res),
        }
    }
}
