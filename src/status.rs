//! Classification of MIDI status bytes, and how many data bytes follow each of them.
//!
//! Everything here is a plain `match`, so the tables cost nothing to build and can be shared
//! freely between decoders and threads.

/// The kind of message a status byte introduces.
///
/// Channel-voice families (`0x80..=0xEF`) are identified by the top nibble of the status byte,
/// the bottom nibble being the channel.
/// System families (`0xF0..=0xFF`) are identified by the whole byte.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum MessageFamily {
    NoteOff,
    NoteOn,
    /// Polyphonic key pressure, per note.
    PolyAftertouch,
    ControlChange,
    ProgramChange,
    /// Key pressure applied to the whole channel.
    ChannelAftertouch,
    PitchBend,
    /// Opens a system-exclusive frame.
    SysExStart,
    /// MIDI Time Code quarter frame.
    ///
    /// Note that the decoder treats this status as interleavable, like the real-time bytes, so
    /// it is always emitted on its own without its data byte.
    TimeCode,
    SongPosition,
    SongSelect,
    TuneRequest,
    /// Closes a system-exclusive frame.
    SysExEnd,
    TimingClock,
    Start,
    Continue,
    Stop,
    ActiveSensing,
    SystemReset,
    /// The undefined statuses `0xF4`, `0xF5`, `0xF9` and `0xFD`, or a data byte.
    Unknown,
}

/// Broad categories of MIDI messages.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum MessageClass {
    /// Messages addressed to one of the 16 channels.
    ChannelVoice,
    /// The sysex frame delimiters.
    SystemExclusive,
    SystemCommon,
    SystemRealtime,
    Unknown,
}

impl MessageFamily {
    /// Find out which family a status byte belongs to.
    ///
    /// Channel-voice bytes are masked with `0xF0` first, so every channel maps to the same family.
    /// Data bytes and undefined system bytes map to `Unknown`.
    pub const fn from_status(status: u8) -> MessageFamily {
        use self::MessageFamily::*;
        let status = if is_channel_voice(status) {
            status & 0xF0
        } else {
            status
        };
        match status {
            0x80 => NoteOff,
            0x90 => NoteOn,
            0xA0 => PolyAftertouch,
            0xB0 => ControlChange,
            0xC0 => ProgramChange,
            0xD0 => ChannelAftertouch,
            0xE0 => PitchBend,
            0xF0 => SysExStart,
            0xF1 => TimeCode,
            0xF2 => SongPosition,
            0xF3 => SongSelect,
            0xF6 => TuneRequest,
            0xF7 => SysExEnd,
            0xF8 => TimingClock,
            0xFA => Start,
            0xFB => Continue,
            0xFC => Stop,
            0xFE => ActiveSensing,
            0xFF => SystemReset,
            _ => Unknown,
        }
    }

    /// The canonical status byte for this family.
    ///
    /// Channel-voice families yield the status for channel 0.
    /// `Unknown` has no canonical status, and yields `None`.
    pub const fn status(self) -> Option<u8> {
        use self::MessageFamily::*;
        Some(match self {
            NoteOff => 0x80,
            NoteOn => 0x90,
            PolyAftertouch => 0xA0,
            ControlChange => 0xB0,
            ProgramChange => 0xC0,
            ChannelAftertouch => 0xD0,
            PitchBend => 0xE0,
            SysExStart => 0xF0,
            TimeCode => 0xF1,
            SongPosition => 0xF2,
            SongSelect => 0xF3,
            TuneRequest => 0xF6,
            SysExEnd => 0xF7,
            TimingClock => 0xF8,
            Start => 0xFA,
            Continue => 0xFB,
            Stop => 0xFC,
            ActiveSensing => 0xFE,
            SystemReset => 0xFF,
            Unknown => return None,
        })
    }

    /// How many data bytes follow a status byte of this family.
    ///
    /// Families without a fixed length (the sysex delimiters and `Unknown`) report 2, so that
    /// an unrecognized status buffers too much rather than too little.
    pub const fn data_length(self) -> usize {
        use self::MessageFamily::*;
        match self {
            TuneRequest | Start | Continue | Stop | ActiveSensing | SystemReset => 0,
            TimeCode | SongSelect | ProgramChange | ChannelAftertouch | TimingClock => 1,
            SongPosition | NoteOff | NoteOn | PolyAftertouch | ControlChange | PitchBend => 2,
            SysExStart | SysExEnd | Unknown => 2,
        }
    }

    pub const fn class(self) -> MessageClass {
        use self::MessageFamily::*;
        match self {
            NoteOff | NoteOn | PolyAftertouch | ControlChange | ProgramChange
            | ChannelAftertouch | PitchBend => MessageClass::ChannelVoice,
            SysExStart | SysExEnd => MessageClass::SystemExclusive,
            TimeCode | SongPosition | SongSelect | TuneRequest => MessageClass::SystemCommon,
            TimingClock | Start | Continue | Stop | ActiveSensing | SystemReset => {
                MessageClass::SystemRealtime
            }
            Unknown => MessageClass::Unknown,
        }
    }

    #[inline]
    pub const fn is_channel_voice(self) -> bool {
        matches!(self.class(), MessageClass::ChannelVoice)
    }

    /// A short, stable, human-readable name for the family.
    ///
    /// These double as event names for consumers that route events by string.
    pub const fn name(self) -> &'static str {
        use self::MessageFamily::*;
        match self {
            NoteOff => "note-off",
            NoteOn => "note-on",
            PolyAftertouch => "poly-at",
            ControlChange => "control-change",
            ProgramChange => "program-change",
            ChannelAftertouch => "channel-at",
            PitchBend => "pitch-bend",
            SysExStart => "sysex-start",
            TimeCode => "time-code",
            SongPosition => "song-pointer",
            SongSelect => "song-select",
            TuneRequest => "tune-request",
            SysExEnd => "sysex-end",
            TimingClock => "timing-clock",
            Start => "start",
            Continue => "continue",
            Stop => "stop",
            ActiveSensing => "active-sensing",
            SystemReset => "system-reset",
            Unknown => "midi-unknown",
        }
    }
}

/// Whether the byte has its top bit set, making it a status byte rather than a data byte.
#[inline]
pub const fn is_status(byte: u8) -> bool {
    byte >= 0x80
}

/// Whether the byte is a channel-voice status (`0x80..=0xEF`).
#[inline]
pub const fn is_channel_voice(byte: u8) -> bool {
    matches!(byte, 0x80..=0xEF)
}

/// Whether the byte may interrupt any message in progress without disturbing it.
///
/// Besides the System Realtime range (`0xF8..=0xFF`) this includes `0xF1`, the MIDI Time Code
/// quarter frame status, which is treated the same way.
/// As a consequence time code statuses are always emitted alone, never followed by their data
/// byte.
#[inline]
pub const fn is_system_realtime(byte: u8) -> bool {
    matches!(byte, 0xF8..=0xFF | 0xF1)
}

/// Shorthand for [`MessageFamily::from_status`](enum.MessageFamily.html#method.from_status).
#[inline]
pub const fn family_of(byte: u8) -> MessageFamily {
    MessageFamily::from_status(byte)
}

/// Shorthand for [`MessageFamily::data_length`](enum.MessageFamily.html#method.data_length).
#[inline]
pub const fn expected_data_length(family: MessageFamily) -> usize {
    family.data_length()
}
