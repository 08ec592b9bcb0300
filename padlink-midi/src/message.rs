//! Typed MIDI messages
//!
//! Every concrete message owns its raw wire bytes: a status byte followed by
//! one or two 7-bit data bytes. Accessors read straight out of that buffer,
//! so a message is always exactly what goes on the wire.

use heapless::Vec;

/// Largest channel-voice message (status + 2 data bytes)
pub const MAX_MESSAGE_SIZE: usize = 3;

/// Raw bytes of a single message
pub type RawBytes = Vec<u8, MAX_MESSAGE_SIZE>;

/// Message kind, valued as its status byte (high nibble for channel-voice kinds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MessageKind {
    // Channel voice
    NoteOff = 0x80,
    NoteOn = 0x90,
    PolyPressure = 0xA0,
    ControlChange = 0xB0,
    ProgramChange = 0xC0,
    ChannelPressure = 0xD0,
    PitchBend = 0xE0,

    // System common
    SysexStart = 0xF0,
    TimeCode = 0xF1,
    SongPosition = 0xF2,
    SongSelect = 0xF3,
    TuneRequest = 0xF6,
    SysexEnd = 0xF7,

    // System real-time
    TimingClock = 0xF8,
    Start = 0xFA,
    Continue = 0xFB,
    Stop = 0xFC,
    ActiveSensing = 0xFE,
    Reset = 0xFF,
}

impl MessageKind {
    /// The kinds this crate encodes, decodes and dispatches
    pub const CHANNEL_VOICE: [MessageKind; 7] = [
        MessageKind::NoteOff,
        MessageKind::NoteOn,
        MessageKind::PolyPressure,
        MessageKind::ControlChange,
        MessageKind::ProgramChange,
        MessageKind::ChannelPressure,
        MessageKind::PitchBend,
    ];

    /// Classify a status byte
    ///
    /// Returns `None` for data bytes (`< 0x80`) and for the status values the
    /// MIDI specification leaves undefined (0xF4, 0xF5, 0xF9, 0xFD).
    pub fn from_status(status: u8) -> Option<Self> {
        let kind = match status {
            0x80..=0xEF => return Self::from_status_nibble(status & 0xF0),
            0xF0 => MessageKind::SysexStart,
            0xF1 => MessageKind::TimeCode,
            0xF2 => MessageKind::SongPosition,
            0xF3 => MessageKind::SongSelect,
            0xF6 => MessageKind::TuneRequest,
            0xF7 => MessageKind::SysexEnd,
            0xF8 => MessageKind::TimingClock,
            0xFA => MessageKind::Start,
            0xFB => MessageKind::Continue,
            0xFC => MessageKind::Stop,
            0xFE => MessageKind::ActiveSensing,
            0xFF => MessageKind::Reset,
            _ => return None,
        };
        Some(kind)
    }

    fn from_status_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            0x80 => Some(MessageKind::NoteOff),
            0x90 => Some(MessageKind::NoteOn),
            0xA0 => Some(MessageKind::PolyPressure),
            0xB0 => Some(MessageKind::ControlChange),
            0xC0 => Some(MessageKind::ProgramChange),
            0xD0 => Some(MessageKind::ChannelPressure),
            0xE0 => Some(MessageKind::PitchBend),
            _ => None,
        }
    }

    /// Status value (channel 1 for channel-voice kinds)
    pub const fn status(self) -> u8 {
        self as u8
    }

    /// Returns true for kinds addressed to one of the 16 channels
    pub fn is_channel_voice(self) -> bool {
        self.status() < 0xF0
    }

    /// Number of data bytes following the status byte
    ///
    /// `None` for system kinds, which this crate does not decode.
    pub fn data_len(self) -> Option<usize> {
        match self {
            MessageKind::NoteOff
            | MessageKind::NoteOn
            | MessageKind::PolyPressure
            | MessageKind::ControlChange
            | MessageKind::PitchBend => Some(2),
            MessageKind::ProgramChange | MessageKind::ChannelPressure => Some(1),
            _ => None,
        }
    }
}

/// One of the 16 MIDI channels
///
/// Named 1-16 as on hardware; the wire ordinal is 0-15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Channel {
    Ch1,
    Ch2,
    Ch3,
    Ch4,
    Ch5,
    Ch6,
    Ch7,
    Ch8,
    Ch9,
    Ch10,
    Ch11,
    Ch12,
    Ch13,
    Ch14,
    Ch15,
    Ch16,
}

impl Channel {
    pub const ALL: [Channel; 16] = [
        Channel::Ch1,
        Channel::Ch2,
        Channel::Ch3,
        Channel::Ch4,
        Channel::Ch5,
        Channel::Ch6,
        Channel::Ch7,
        Channel::Ch8,
        Channel::Ch9,
        Channel::Ch10,
        Channel::Ch11,
        Channel::Ch12,
        Channel::Ch13,
        Channel::Ch14,
        Channel::Ch15,
        Channel::Ch16,
    ];

    /// Channel from its wire ordinal (0-15)
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Channel encoded in the low nibble of a status byte
    pub fn from_status(status: u8) -> Self {
        Self::ALL[(status & 0x0F) as usize]
    }

    /// Wire ordinal (0-15)
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Clear the top bit so a value is a valid MIDI data byte
#[inline]
pub const fn to_data_byte(value: u8) -> u8 {
    value & 0x7F
}

/// Build `[status, data...]` with every data byte masked to 7 bits
fn build_raw(kind: MessageKind, channel: Channel, data: &[u8]) -> RawBytes {
    let status = kind.status() | channel.index();
    let data = data.iter().take(MAX_MESSAGE_SIZE - 1).map(|&b| to_data_byte(b));

    // Bounded to MAX_MESSAGE_SIZE items, which is the buffer's capacity
    let mut raw = RawBytes::new();
    raw.extend(core::iter::once(status).chain(data));
    raw
}

macro_rules! channel_voice_message {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name {
            raw: RawBytes,
        }

        impl $name {
            pub const KIND: MessageKind = MessageKind::$kind;

            fn from_data(channel: Channel, data: &[u8]) -> Self {
                Self {
                    raw: build_raw(Self::KIND, channel, data),
                }
            }

            pub fn kind(&self) -> MessageKind {
                Self::KIND
            }

            pub fn channel(&self) -> Channel {
                Channel::from_status(self.raw[0])
            }

            /// Wire bytes, status byte first
            pub fn raw(&self) -> &[u8] {
                &self.raw
            }
        }

        impl From<$name> for Message {
            fn from(message: $name) -> Self {
                Message::$name(message)
            }
        }
    };
}

channel_voice_message! {
    /// Note released
    NoteOff => NoteOff
}

channel_voice_message! {
    /// Note struck
    NoteOn => NoteOn
}

channel_voice_message! {
    /// Per-note aftertouch
    PolyPressure => PolyPressure
}

channel_voice_message! {
    /// Controller value change
    ControlChange => ControlChange
}

channel_voice_message! {
    /// Patch selection
    ProgramChange => ProgramChange
}

channel_voice_message! {
    /// Channel-wide aftertouch
    ChannelPressure => ChannelPressure
}

channel_voice_message! {
    /// 14-bit pitch wheel position, sent LSB first
    PitchBend => PitchBend
}

impl NoteOff {
    pub fn new(channel: Channel, note: u8, velocity: u8) -> Self {
        Self::from_data(channel, &[note, velocity])
    }

    pub fn note(&self) -> u8 {
        self.raw[1]
    }

    pub fn velocity(&self) -> u8 {
        self.raw[2]
    }
}

impl NoteOn {
    pub fn new(channel: Channel, note: u8, velocity: u8) -> Self {
        Self::from_data(channel, &[note, velocity])
    }

    pub fn note(&self) -> u8 {
        self.raw[1]
    }

    pub fn velocity(&self) -> u8 {
        self.raw[2]
    }
}

impl PolyPressure {
    pub fn new(channel: Channel, note: u8, pressure: u8) -> Self {
        Self::from_data(channel, &[note, pressure])
    }

    pub fn note(&self) -> u8 {
        self.raw[1]
    }

    pub fn pressure(&self) -> u8 {
        self.raw[2]
    }
}

impl ControlChange {
    pub fn new(channel: Channel, control: u8, value: u8) -> Self {
        Self::from_data(channel, &[control, value])
    }

    pub fn control(&self) -> u8 {
        self.raw[1]
    }

    pub fn value(&self) -> u8 {
        self.raw[2]
    }
}

impl ProgramChange {
    pub fn new(channel: Channel, program: u8) -> Self {
        Self::from_data(channel, &[program])
    }

    pub fn program(&self) -> u8 {
        self.raw[1]
    }
}

impl ChannelPressure {
    pub fn new(channel: Channel, pressure: u8) -> Self {
        Self::from_data(channel, &[pressure])
    }

    pub fn pressure(&self) -> u8 {
        self.raw[1]
    }
}

impl PitchBend {
    /// Wheel centre position
    pub const CENTER: u16 = 0x2000;

    /// Largest 14-bit pitch value
    pub const MAX: u16 = 0x3FFF;

    /// Build from the two 7-bit halves as they appear on the wire
    pub fn new(channel: Channel, lsb: u8, msb: u8) -> Self {
        Self::from_data(channel, &[lsb, msb])
    }

    /// Build from a 14-bit value; bits above 13 are discarded
    pub fn from_value(channel: Channel, pitch: u16) -> Self {
        Self::new(channel, pitch as u8, (pitch >> 7) as u8)
    }

    /// Reassembled 14-bit value
    pub fn pitch(&self) -> u16 {
        u16::from(self.raw[1]) | (u16::from(self.raw[2]) << 7)
    }
}

/// A decoded channel-voice message
///
/// Two messages are equal exactly when their raw bytes are equal.
/// System kinds are never represented here; decoding one yields
/// [`DecodeError::Unsupported`](crate::DecodeError::Unsupported).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    NoteOff(NoteOff),
    NoteOn(NoteOn),
    PolyPressure(PolyPressure),
    ControlChange(ControlChange),
    ProgramChange(ProgramChange),
    ChannelPressure(ChannelPressure),
    PitchBend(PitchBend),
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::NoteOff(m) => m.kind(),
            Message::NoteOn(m) => m.kind(),
            Message::PolyPressure(m) => m.kind(),
            Message::ControlChange(m) => m.kind(),
            Message::ProgramChange(m) => m.kind(),
            Message::ChannelPressure(m) => m.kind(),
            Message::PitchBend(m) => m.kind(),
        }
    }

    pub fn channel(&self) -> Channel {
        Channel::from_status(self.raw()[0])
    }

    /// Wire bytes, status byte first
    pub fn raw(&self) -> &[u8] {
        match self {
            Message::NoteOff(m) => m.raw(),
            Message::NoteOn(m) => m.raw(),
            Message::PolyPressure(m) => m.raw(),
            Message::ControlChange(m) => m.raw(),
            Message::ProgramChange(m) => m.raw(),
            Message::ChannelPressure(m) => m.raw(),
            Message::PitchBend(m) => m.raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_byte_combines_kind_and_channel() {
        let msg = NoteOn::new(Channel::Ch2, 60, 100);
        assert_eq!(msg.raw(), &[0x91, 60, 100]);
        assert_eq!(msg.channel(), Channel::Ch2);
        assert_eq!(msg.note(), 60);
        assert_eq!(msg.velocity(), 100);
    }

    #[test]
    fn test_data_bytes_masked() {
        let msg = ControlChange::new(Channel::Ch1, 0x87, 0xFF);
        assert_eq!(msg.raw(), &[0xB0, 0x07, 0x7F]);
    }

    #[test]
    fn test_build_raw_caps_at_message_size() {
        let raw = build_raw(MessageKind::NoteOn, Channel::Ch4, &[0x90, 0x81, 0x42, 0x10]);
        assert_eq!(&raw[..], &[0x93, 0x10, 0x01]);
        assert_eq!(raw.len(), MAX_MESSAGE_SIZE);

        let raw = build_raw(MessageKind::ProgramChange, Channel::Ch1, &[]);
        assert_eq!(&raw[..], &[0xC0]);
    }

    #[test]
    fn test_single_data_byte_kinds() {
        let program = ProgramChange::new(Channel::Ch16, 0x85);
        assert_eq!(program.raw(), &[0xCF, 0x05]);
        assert_eq!(program.program(), 5);

        let pressure = ChannelPressure::new(Channel::Ch3, 64);
        assert_eq!(pressure.raw(), &[0xD2, 64]);
        assert_eq!(pressure.pressure(), 64);
    }

    #[test]
    fn test_pitch_bend_split() {
        let bend = PitchBend::from_value(Channel::Ch1, PitchBend::CENTER);
        assert_eq!(bend.raw(), &[0xE0, 0x00, 0x40]);
        assert_eq!(bend.pitch(), PitchBend::CENTER);

        let max = PitchBend::from_value(Channel::Ch1, PitchBend::MAX);
        assert_eq!(max.raw(), &[0xE0, 0x7F, 0x7F]);
        assert_eq!(max.pitch(), PitchBend::MAX);

        let halves = PitchBend::new(Channel::Ch1, 0x01, 0x02);
        assert_eq!(halves.pitch(), 0x101);
    }

    #[test]
    fn test_equality_is_raw_bytes() {
        let a: Message = NoteOn::new(Channel::Ch1, 60, 100).into();
        let b: Message = NoteOn::new(Channel::Ch1, 60 | 0x80, 100).into();
        assert_eq!(a, b);

        let off: Message = NoteOff::new(Channel::Ch1, 60, 100).into();
        assert_ne!(a, off);

        let other_channel: Message = NoteOn::new(Channel::Ch2, 60, 100).into();
        assert_ne!(a, other_channel);
    }

    #[test]
    fn test_message_accessors() {
        let msg: Message = PolyPressure::new(Channel::Ch10, 36, 90).into();
        assert_eq!(msg.kind(), MessageKind::PolyPressure);
        assert_eq!(msg.channel(), Channel::Ch10);
        assert_eq!(msg.raw(), &[0xA9, 36, 90]);
    }

    #[test]
    fn test_kind_from_status() {
        assert_eq!(MessageKind::from_status(0x93), Some(MessageKind::NoteOn));
        assert_eq!(MessageKind::from_status(0xEF), Some(MessageKind::PitchBend));
        assert_eq!(MessageKind::from_status(0xF8), Some(MessageKind::TimingClock));
        assert_eq!(MessageKind::from_status(0x7F), None);
        for reserved in [0xF4, 0xF5, 0xF9, 0xFD] {
            assert_eq!(MessageKind::from_status(reserved), None);
        }
    }

    #[test]
    fn test_kind_data_len() {
        assert_eq!(MessageKind::NoteOff.data_len(), Some(2));
        assert_eq!(MessageKind::ProgramChange.data_len(), Some(1));
        assert_eq!(MessageKind::Start.data_len(), None);
        assert!(MessageKind::CHANNEL_VOICE
            .iter()
            .all(|kind| kind.is_channel_voice() && kind.data_len().is_some()));
    }

    #[test]
    fn test_channel_index() {
        assert_eq!(Channel::from_index(0), Some(Channel::Ch1));
        assert_eq!(Channel::from_index(15), Some(Channel::Ch16));
        assert_eq!(Channel::from_index(16), None);
        assert_eq!(Channel::from_status(0x9A).index(), 10);
    }
}
