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

//! # Ledger Dongle
//!
//! Specific support for Ledger-branded dongles, which carry APDUs over
//! USB HID in 64-byte frames
//!

use core::cmp;
use std::convert::TryFrom;
use std::time::Duration;

use log::debug;

use crate::constants::apdu::ledger::{DEFAULT_CHANNEL, PACKET_SIZE, TAG_APDU};
use crate::constants::hid::{DEFAULT_TIMEOUT_MS, LEDGER_USAGE_PAGE, LEDGER_VENDOR_ID};
use crate::dongle::Dongle;
use crate::{hid, Error};

/// A single HID frame
pub type Frame = [u8; PACKET_SIZE];

/// Structure representing the device
pub struct NanoS {
    hid_dev: hid::Device,
    timeout: Duration,
}

impl Dongle for NanoS {
    fn transmit(&mut self, apdu: &[u8]) -> Result<Vec<u8>, Error> {
        for frame in frame_apdu(apdu) {
            // hidapi expects the report number in front of the frame
            let mut report = [0u8; PACKET_SIZE + 1];
            report[1..].copy_from_slice(&frame);
            self.hid_dev.write(&report)?;
        }

        let mut reader = FrameReader::new();
        loop {
            let frame = self.read_frame()?;
            if reader.push(&frame)? {
                return Ok(reader.into_data());
            }
        }
    }
}

impl NanoS {
    /// Function to get a handle of the device. Errors out if the device
    /// cannot be accessed or if there are more than one potential devices.
    pub fn get(hid: &hid::Api) -> Result<NanoS, Error> {
        let mut found_dev = None;
        for hid_dev in hid.device_list() {
            if hid_dev.vendor_id() == LEDGER_VENDOR_ID
                && (hid_dev.interface_number() == 0 || hid_dev.usage_page() == LEDGER_USAGE_PAGE)
            {
                if found_dev.is_some() {
                    return Err(Error::DongleNotUnique);
                }
                found_dev = Some(hid_dev);
            }
        }

        match found_dev {
            Some(hid_dev) => {
                debug!(
                    "using Ledger device {:04x}:{:04x} ({})",
                    hid_dev.vendor_id(),
                    hid_dev.product_id(),
                    hid_dev.product_string().unwrap_or("unknown product"),
                );
                Ok(NanoS {
                    hid_dev: hid_dev.open_device(hid)?,
                    timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
                })
            }
            None => Err(Error::DongleNotFound),
        }
    }

    /// Sets how long to wait for each frame of a reply. Replies which
    /// need user confirmation on the device count against this too.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Reads one full frame from the device
    fn read_frame(&self) -> Result<Frame, Error> {
        let timeout_ms = i32::try_from(self.timeout.as_millis()).unwrap_or(i32::max_value());
        let mut data_frame = [0u8; PACKET_SIZE];
        let mut frame_ptr = &mut data_frame[..];
        while !frame_ptr.is_empty() {
            let n_read_bytes = self.hid_dev.read_timeout(frame_ptr, timeout_ms)?;
            if n_read_bytes == 0 {
                return Err(Error::Timeout);
            }
            frame_ptr = &mut frame_ptr[n_read_bytes..];
        }
        Ok(data_frame)
    }
}

/// Splits an encoded APDU into HID frames
///
/// Every frame starts with the channel, tag and a sequence number; the
/// first one additionally carries the total length. APDUs are at most
/// 260 bytes, well within the 16-bit length field.
pub fn frame_apdu(mut data: &[u8]) -> Vec<Frame> {
    assert!(data.len() <= usize::from(u16::max_value()));

    let mut frames = vec![];
    let mut sequence_no = 0u16;
    loop {
        let mut data_frame = [0u8; PACKET_SIZE];
        data_frame[0..2].copy_from_slice(&DEFAULT_CHANNEL.to_be_bytes());
        data_frame[2] = TAG_APDU;
        data_frame[3..5].copy_from_slice(&sequence_no.to_be_bytes());

        let header_len = if sequence_no == 0 {
            data_frame[5..7].copy_from_slice(&(data.len() as u16).to_be_bytes());
            7
        } else {
            5
        };
        let chunk_len = cmp::min(data.len(), PACKET_SIZE - header_len);
        data_frame[header_len..header_len + chunk_len].copy_from_slice(&data[..chunk_len]);
        data = &data[chunk_len..];
        frames.push(data_frame);

        if data.is_empty() {
            return frames;
        }
        sequence_no += 1;
    }
}

/// Reassembles a reply from a stream of HID frames
#[derive(Clone, Debug, Default)]
pub struct FrameReader {
    sequence_no: u16,
    remaining: usize,
    data: Vec<u8>,
}

impl FrameReader {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }

    /// Feeds the next frame in. Returns whether the reply is complete.
    pub fn push(&mut self, data_frame: &Frame) -> Result<bool, Error> {
        // Sanity check the frame
        let r_channel = u16::from_be_bytes([data_frame[0], data_frame[1]]);
        if r_channel != DEFAULT_CHANNEL {
            return Err(Error::ApduWrongChannel {
                expected: DEFAULT_CHANNEL,
                found: r_channel,
            });
        }
        let r_tag = data_frame[2];
        if r_tag != TAG_APDU {
            return Err(Error::ApduWrongTag {
                expected: TAG_APDU,
                found: r_tag,
            });
        }
        let r_sequence_no = u16::from_be_bytes([data_frame[3], data_frame[4]]);
        if r_sequence_no != self.sequence_no {
            return Err(Error::ApduWrongSequence {
                expected: self.sequence_no,
                found: r_sequence_no,
            });
        }

        // Extract the message
        let header_len = if self.sequence_no == 0 {
            self.remaining = usize::from(u16::from_be_bytes([data_frame[5], data_frame[6]]));
            self.data = Vec::with_capacity(self.remaining);
            7
        } else {
            5
        };
        let message_len = cmp::min(self.remaining, PACKET_SIZE - header_len);
        self.data
            .extend(&data_frame[header_len..header_len + message_len]);

        self.sequence_no = self.sequence_no.wrapping_add(1);
        self.remaining -= message_len;
        Ok(self.remaining == 0)
    }

    /// The reassembled reply
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
