//! # Overview
//!
//! `midi_parser` turns a raw stream of MIDI bytes, as read from a serial port, a USB endpoint or
//! a capture file, into typed MIDI messages.
//!
//! Usage is as simple as:
//!
//! ```rust
//! use midi_parser::{MessageFamily, MidiStream, StreamEvent};
//!
//! let mut stream = MidiStream::new();
//! stream.feed(&[0x90, 0x40, 0xF8, 0x7F], |ev| match ev {
//!     StreamEvent::Message(msg) if msg.family() == MessageFamily::NoteOn => {
//!         println!("note {} on channel {:?}", msg.data()[0], msg.channel());
//!     }
//!     StreamEvent::Message(msg) => println!("{}", msg.family().name()),
//!     _ => {}
//! });
//! ```
//!
//! The [`MidiStream`](struct.MidiStream.html) struct is the main type in the crate.
//! It keeps track of partially received messages across calls, so bytes may be fed in whatever
//! chunks the transport delivers them.
//!
//! # System exclusive payloads
//!
//! System exclusive frames may only carry 7-bit data bytes.
//! The [`encode_value`](fn.encode_value.html) and [`decode_value`](fn.decode_value.html)
//! functions pack arbitrary bytes into that range and back, and
//! [`encode_string`](fn.encode_string.html) and [`decode_string`](fn.decode_string.html) do the
//! same for text:
//!
//! ```rust
//! use midi_parser::{decode_ascii, decode_string, encode_string};
//!
//! let encoded = encode_string("hello");
//! assert!(encoded.iter().all(|&byte| byte < 0x80));
//! assert_eq!(decode_string(&encoded), "hello");
//!
//! // The lenient decoder masks off the top bit, the strict one refuses it
//! assert_eq!(decode_string(&[72, 1]), "H");
//! assert!(decode_ascii(&[72, 1]).is_err());
//! ```
//!
//! # About features
//!
//! - The `std` feature
//!
//!   Enabled by default.
//!   Disabling it with `default-features = false` makes the crate `no_std + alloc`.
//!
//! # Logging
//!
//! The stream reports what it does through `tracing`: every decoded message at `TRACE` level,
//! recovered stream errors (lost bytes, abandoned sysex frames) at `DEBUG` and dropped oversized
//! sysex frames at `WARN`.
//! No subscriber is installed by this crate.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

macro_rules! bail {
    ($err:expr) => {{
        return Err($err.into());
    }};
}
macro_rules! ensure {
    ($cond:expr, $err:expr) => {{
        if !$cond {
            bail!($err)
        }
    }};
}

/// All of the errors this crate produces.
#[macro_use]
mod error;

mod prelude {
    pub(crate) use alloc::{string::String, vec::Vec};
    pub(crate) use core::fmt;
}

mod buffer;
mod codec;
mod primitive;
mod status;
mod stream;

pub use crate::{
    buffer::{Buffer, DefaultBuffer},
    codec::{
        decode_ascii, decode_string, decode_value, encode_ascii, encode_string, encode_value,
        encoded_len,
    },
    error::{Error, ErrorKind, Result},
    status::{
        expected_data_length, family_of, is_channel_voice, is_status, is_system_realtime,
        MessageClass, MessageFamily,
    },
    stream::{DecodedMessage, MidiStream, StreamEvent, SysExMessage},
};

/// Exotically-sized integers used by the MIDI standard.
pub mod num {
    pub use crate::primitive::{u4, u7};
}
