//! Decoding of raw, undelimited MIDI byte streams, such as the bytes coming out of a serial port
//! or a 5-pin DIN cable.
//!
//! Bytes are fed one at a time (or in slices of any size) to a [`MidiStream`], which produces a
//! [`StreamEvent`] whenever a message completes.
//! The stream handles the quirks of live MIDI wires:
//!
//! - System Realtime bytes may show up anywhere, even between the data bytes of another message,
//!     and are reported immediately without disturbing the message in progress.
//! - System exclusive frames have no fixed length, and are collected until their `0xF7`
//!     terminator.
//!     A frame interrupted by another status byte is silently abandoned.
//! - Data bytes with no status byte to attach them to are reported as lost.
//!
//! None of these conditions is an error: the stream always recovers on its own.

use crate::{
    buffer::{Buffer, DefaultBuffer},
    prelude::*,
    primitive::{u4, u7},
    stack_buffer,
    status::{is_channel_voice, is_status, is_system_realtime, MessageFamily},
};
use tracing::{debug, trace, warn};

const SYSEX_START: u8 = 0xF0;
const SYSEX_END: u8 = 0xF7;

stack_buffer! {
    /// The data bytes of a decoded message, at most 2.
    struct MessageData([u8; 2]);
}

stack_buffer! {
    /// A status byte followed by up to two data bytes.
    struct MessageBuffer([u8; 3]);
}

/// A complete, fixed-length MIDI message.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct DecodedMessage {
    status: u8,
    data: MessageData,
}
impl DecodedMessage {
    /// Build a message out of its status byte and data bytes.
    ///
    /// Returns `None` if there are more than 2 data bytes.
    pub fn new(status: u8, data: &[u8]) -> Option<DecodedMessage> {
        let mut buf = MessageData::new();
        buf.push(data).ok()?;
        Some(DecodedMessage { status, data: buf })
    }

    /// The raw status byte, including the channel nibble for channel-voice messages.
    #[inline]
    pub fn status(&self) -> u8 {
        self.status
    }

    #[inline]
    pub fn family(&self) -> MessageFamily {
        MessageFamily::from_status(self.status)
    }

    /// The channel this message is addressed to.
    ///
    /// Only channel-voice messages have a channel.
    #[inline]
    pub fn channel(&self) -> Option<u4> {
        if is_channel_voice(self.status) {
            Some(u4::new(self.status))
        } else {
            None
        }
    }

    /// The bytes that followed the status byte.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }
}

/// A complete system-exclusive frame, without its `0xF0` and `0xF7` delimiters.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct SysExMessage {
    /// The first byte of the frame.
    pub manufacturer_id: u7,
    /// Every byte between the manufacturer id and the terminator.
    ///
    /// These are always data bytes (below `0x80`).
    /// Use [`decode_value`](fn.decode_value.html) to unpack payloads carrying full 8-bit values.
    pub payload: Vec<u8>,
}

/// Everything a [`MidiStream`](struct.MidiStream.html) can report.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum StreamEvent {
    /// A fixed-length message, including System Realtime and unrecognized messages.
    Message(DecodedMessage),
    /// A well-formed system-exclusive frame.
    SysEx(SysExMessage),
    /// A data byte that arrived without any status byte to attach it to.
    ///
    /// The `0xF7` terminator of an empty sysex frame (`F0 F7`), which carries no manufacturer id,
    /// is reported this way too.
    ///
    /// The rate of these events is a good indicator of the health of the connection.
    LostByte(u8),
    /// A system-exclusive frame grew past the capacity of the sysex buffer.
    ///
    /// The frame is dropped, and the rest of its data bytes are skipped.
    SysExOverflow {
        /// The first byte of the dropped frame, if it made it into the buffer.
        manufacturer_id: Option<u7>,
        /// How many bytes of the frame were buffered before overflowing.
        len: usize,
    },
}
impl StreamEvent {
    /// A short name identifying the kind of event.
    ///
    /// Messages are named after their [`MessageFamily`](enum.MessageFamily.html#method.name).
    pub fn name(&self) -> &'static str {
        match self {
            StreamEvent::Message(msg) => msg.family().name(),
            StreamEvent::SysEx(_) => "sysex",
            StreamEvent::LostByte(_) => "lost-byte",
            StreamEvent::SysExOverflow { .. } => "sysex-overflow",
        }
    }
}

/// What the stream is in the middle of.
#[derive(Clone, Debug, Hash)]
enum Pending {
    Idle,
    /// Waiting for the data bytes of a message.
    /// The first byte is always a status byte, and never `0xF0`.
    Message(MessageBuffer),
    /// Inside a sysex frame, collecting bytes into the sysex buffer.
    SysEx,
    /// Inside a sysex frame that no longer fits in the sysex buffer.
    Overflowed,
}

/// A streaming raw MIDI parser, taking raw, undelimited MIDI bytes, presumably from a cable.
///
/// The sysex buffer type `B` decides how large a system-exclusive frame may grow.
/// Read the module documentation for more info.
///
/// A stream is meant to be driven by a single writer; wrap it in a lock to share it.
#[derive(Clone, Debug, Hash)]
pub struct MidiStream<B = DefaultBuffer> {
    pending: Pending,
    sysex: B,
}
impl MidiStream {
    /// Create a fresh midi stream parser with the default sysex buffer.
    #[inline]
    pub fn new() -> MidiStream {
        MidiStream::default()
    }
}
impl<B: Default> Default for MidiStream<B> {
    #[inline]
    fn default() -> MidiStream<B> {
        MidiStream {
            pending: Pending::Idle,
            sysex: B::default(),
        }
    }
}
impl<B: Buffer> MidiStream<B> {
    /// Create a fresh midi stream parser using the given sysex buffer.
    #[inline]
    pub fn with_buffer(mut buf: B) -> MidiStream<B> {
        buf.clear();
        MidiStream {
            pending: Pending::Idle,
            sysex: buf,
        }
    }

    /// Whether there is no partial message or sysex frame in progress.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.pending, Pending::Idle)
    }

    /// Whether the stream is inside a system-exclusive frame.
    #[inline]
    pub fn in_sysex(&self) -> bool {
        matches!(self.pending, Pending::SysEx | Pending::Overflowed)
    }

    /// Discard any partial message or sysex frame, without reporting it.
    ///
    /// Useful when the transport is known to have lost bytes, for example after reconnecting.
    pub fn reset(&mut self) {
        if !self.is_idle() {
            debug!("discarding partial midi message");
        }
        self.end_message();
    }

    /// Feeds a single byte to the stream, calling the `handle_ev` closure if it completes an
    /// event.
    pub fn feed_byte(&mut self, byte: u8, mut handle_ev: impl FnMut(StreamEvent)) {
        if is_system_realtime(byte) {
            // These single-byte events are intended to transmit quick time-sensitive events,
            // and they are invisible to other messages: they can appear in between the status
            // and data bytes of other messages, or inside a sysex frame.
            trace!(status = byte, "realtime message");
            handle_ev(StreamEvent::Message(DecodedMessage {
                status: byte,
                data: MessageData::new(),
            }));
            return;
        }
        match self.pending {
            Pending::Idle if !is_status(byte) => {
                debug!(byte, "data byte without status, dropping it");
                handle_ev(StreamEvent::LostByte(byte));
                return;
            }
            Pending::SysEx | Pending::Overflowed => {
                if byte == SYSEX_END {
                    self.finish_sysex(handle_ev);
                    return;
                }
                if !is_status(byte) {
                    self.push_sysex(byte, handle_ev);
                    return;
                }
                // Another status byte interrupts the frame, and starts a new message
                debug!(status = byte, "sysex frame interrupted, abandoning it");
                self.end_message();
            }
            Pending::Idle | Pending::Message(_) => {}
        }
        self.accumulate(byte, handle_ev);
    }

    /// Feeds a slice of bytes to the stream, calling the `handle_ev` closure whenever a complete
    /// event is read.
    ///
    /// Calling `feed` with many small slices is equivalent to calling `feed` with one large
    /// concatenation of them all.
    ///
    /// Note that some calls to `feed` might produce no events, and others may produce as many as
    /// the amount of bytes fed in.
    pub fn feed(&mut self, bytes: &[u8], mut handle_ev: impl FnMut(StreamEvent)) {
        for &byte in bytes {
            self.feed_byte(byte, &mut handle_ev);
        }
    }

    /// Feeds a slice of bytes to the stream, collecting the produced events in order.
    pub fn decode(&mut self, bytes: &[u8]) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        self.feed(bytes, |ev| events.push(ev));
        events
    }

    /// Add a status or data byte to the message in progress, or start a new one.
    ///
    /// Only called outside of sysex frames.
    fn accumulate(&mut self, byte: u8, mut handle_ev: impl FnMut(StreamEvent)) {
        if let Pending::Message(buf) = &mut self.pending {
            // Never full: messages are emitted as soon as their data quota is fulfilled
            let _ = buf.push(&[byte]);
        } else if byte == SYSEX_START {
            self.pending = Pending::SysEx;
            return;
        } else {
            let mut buf = MessageBuffer::new();
            let _ = buf.push(&[byte]);
            self.pending = Pending::Message(buf);
        }

        if let Pending::Message(buf) = &self.pending {
            let raw = buf.as_slice();
            if raw.len() - 1 == MessageFamily::from_status(raw[0]).data_length() {
                let msg = DecodedMessage {
                    status: raw[0],
                    data: {
                        let mut data = MessageData::new();
                        let _ = data.push(&raw[1..]);
                        data
                    },
                };
                self.end_message();
                trace!(status = msg.status, data = ?msg.data(), "{}", msg.family().name());
                handle_ev(StreamEvent::Message(msg));
            }
        }
    }

    fn push_sysex(&mut self, byte: u8, mut handle_ev: impl FnMut(StreamEvent)) {
        if let Pending::Overflowed = self.pending {
            return;
        }
        if self.sysex.push(&[byte]).is_err() {
            let buffered = self.sysex.as_slice();
            let manufacturer_id = buffered.first().map(|&id| u7::new(id));
            let len = buffered.len();
            warn!(len, "sysex frame does not fit in the sysex buffer, dropping it");
            self.sysex.clear();
            self.pending = Pending::Overflowed;
            handle_ev(StreamEvent::SysExOverflow {
                manufacturer_id,
                len,
            });
        }
    }

    fn finish_sysex(&mut self, mut handle_ev: impl FnMut(StreamEvent)) {
        let in_frame = matches!(self.pending, Pending::SysEx);
        let msg = match self.sysex.as_slice().split_first() {
            Some((&id, payload)) if in_frame => Some(SysExMessage {
                manufacturer_id: u7::new(id),
                payload: payload.to_vec(),
            }),
            _ => None,
        };
        self.end_message();
        match msg {
            Some(msg) => {
                trace!(
                    manufacturer_id = msg.manufacturer_id.as_int(),
                    len = msg.payload.len(),
                    "sysex"
                );
                handle_ev(StreamEvent::SysEx(msg));
            }
            None if in_frame => {
                debug!("empty sysex frame terminated, reporting its end byte as lost");
                handle_ev(StreamEvent::LostByte(SYSEX_END));
            }
            None => debug!("overflowed sysex frame terminated"),
        }
    }

    /// Go back to idle, forgetting about any buffered bytes.
    #[inline]
    fn end_message(&mut self) {
        self.pending = Pending::Idle;
        self.sysex.clear();
    }
}
