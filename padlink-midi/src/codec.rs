//! Decoding and encoding of channel-voice messages
//!
//! Decoding accepts exactly one message starting at the first byte. Running
//! status and system messages are not handled; both are reported as errors
//! rather than guessed at.

use crate::message::{
    Channel, ChannelPressure, ControlChange, Message, MessageKind, NoteOff, NoteOn, PitchBend,
    PolyPressure, ProgramChange,
};

/// Reasons a byte sequence does not decode to a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// No bytes at all
    Empty,
    /// First byte is a data byte (running status is not supported)
    NotStatusByte(u8),
    /// Status byte left undefined by the MIDI specification
    Reserved(u8),
    /// Fewer bytes than the kind requires
    Truncated {
        kind: MessageKind,
        expected: usize,
        actual: usize,
    },
    /// Valid system message this codec does not decode
    Unsupported(MessageKind),
}

/// Errors that can occur while encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Kind has no channel-voice encoding
    Unsupported(MessageKind),
    /// Output buffer too small for the message
    BufferTooSmall,
}

/// Decode a single message from the start of `bytes`
///
/// Bytes past the end of the message are ignored.
pub fn decode(bytes: &[u8]) -> Result<Message, DecodeError> {
    let (&status, data) = bytes.split_first().ok_or(DecodeError::Empty)?;

    if status < 0x80 {
        return Err(DecodeError::NotStatusByte(status));
    }

    let kind = MessageKind::from_status(status).ok_or(DecodeError::Reserved(status))?;
    let data_len = kind.data_len().ok_or(DecodeError::Unsupported(kind))?;

    if data.len() < data_len {
        return Err(DecodeError::Truncated {
            kind,
            expected: data_len + 1,
            actual: bytes.len(),
        });
    }

    let channel = Channel::from_status(status);
    let message = match kind {
        MessageKind::NoteOff => NoteOff::new(channel, data[0], data[1]).into(),
        MessageKind::NoteOn => NoteOn::new(channel, data[0], data[1]).into(),
        MessageKind::PolyPressure => PolyPressure::new(channel, data[0], data[1]).into(),
        MessageKind::ControlChange => ControlChange::new(channel, data[0], data[1]).into(),
        MessageKind::ProgramChange => ProgramChange::new(channel, data[0]).into(),
        MessageKind::ChannelPressure => ChannelPressure::new(channel, data[0]).into(),
        MessageKind::PitchBend => PitchBend::new(channel, data[0], data[1]).into(),
        // data_len() is None for every system kind
        _ => return Err(DecodeError::Unsupported(kind)),
    };

    Ok(message)
}

/// Decode a single message, discarding the reason on failure
pub fn parse(bytes: &[u8]) -> Option<Message> {
    decode(bytes).ok()
}

/// Build a channel-voice message from its kind and data fields
///
/// `data2` is ignored for kinds with a single data byte. Data bytes are
/// masked to 7 bits.
pub fn encode(
    kind: MessageKind,
    channel: Channel,
    data1: u8,
    data2: u8,
) -> Result<Message, EncodeError> {
    let message = match kind {
        MessageKind::NoteOff => NoteOff::new(channel, data1, data2).into(),
        MessageKind::NoteOn => NoteOn::new(channel, data1, data2).into(),
        MessageKind::PolyPressure => PolyPressure::new(channel, data1, data2).into(),
        MessageKind::ControlChange => ControlChange::new(channel, data1, data2).into(),
        MessageKind::ProgramChange => ProgramChange::new(channel, data1).into(),
        MessageKind::ChannelPressure => ChannelPressure::new(channel, data1).into(),
        MessageKind::PitchBend => PitchBend::new(channel, data1, data2).into(),
        _ => return Err(EncodeError::Unsupported(kind)),
    };
    Ok(message)
}

impl Message {
    /// Write this message's wire bytes into `buffer`
    ///
    /// Returns the number of bytes written
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        let raw = self.raw();
        if buffer.len() < raw.len() {
            return Err(EncodeError::BufferTooSmall);
        }
        buffer[..raw.len()].copy_from_slice(raw);
        Ok(raw.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode(&[]), Err(DecodeError::Empty));
        assert!(parse(&[]).is_none());
    }

    #[test]
    fn test_decode_data_byte_first() {
        assert_eq!(decode(&[0x3C, 0x40]), Err(DecodeError::NotStatusByte(0x3C)));
    }

    #[test]
    fn test_decode_reserved() {
        for status in [0xF4, 0xF5, 0xF9, 0xFD] {
            assert_eq!(decode(&[status]), Err(DecodeError::Reserved(status)));
        }
    }

    #[test]
    fn test_decode_truncated() {
        assert_eq!(
            decode(&[0x80]),
            Err(DecodeError::Truncated {
                kind: MessageKind::NoteOff,
                expected: 3,
                actual: 1,
            })
        );
        assert!(parse(&[0x90, 60]).is_none());
        assert!(parse(&[0xC0]).is_none());
    }

    #[test]
    fn test_decode_system_unsupported() {
        assert_eq!(
            decode(&[0xF8]),
            Err(DecodeError::Unsupported(MessageKind::TimingClock))
        );
        assert_eq!(
            decode(&[0xF0, 0x7E, 0x7F]),
            Err(DecodeError::Unsupported(MessageKind::SysexStart))
        );
    }

    #[test]
    fn test_decode_note_on() {
        let msg = decode(&[0x91, 60, 100]).unwrap();
        match msg {
            Message::NoteOn(note_on) => {
                assert_eq!(note_on.channel().index(), 1);
                assert_eq!(note_on.note(), 60);
                assert_eq!(note_on.velocity(), 100);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_decode_control_change() {
        let msg = decode(&[0xB0, 7, 127]).unwrap();
        assert_eq!(msg, ControlChange::new(Channel::Ch1, 7, 127).into());
        if let Message::ControlChange(cc) = msg {
            assert_eq!(cc.control(), 7);
            assert_eq!(cc.value(), 127);
        }
    }

    #[test]
    fn test_decode_single_data_byte() {
        assert_eq!(
            decode(&[0xC5, 12]).unwrap(),
            ProgramChange::new(Channel::Ch6, 12).into()
        );
        assert_eq!(
            decode(&[0xD0, 99]).unwrap(),
            ChannelPressure::new(Channel::Ch1, 99).into()
        );
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let msg = decode(&[0xE3, 0x00, 0x40, 0x90]).unwrap();
        assert_eq!(msg.raw(), &[0xE3, 0x00, 0x40]);
    }

    #[test]
    fn test_decode_masks_data_bytes() {
        let msg = decode(&[0x90, 0xBC, 0xE4]).unwrap();
        assert_eq!(msg.raw(), &[0x90, 0x3C, 0x64]);
    }

    #[test]
    fn test_encode_note_on() {
        let msg = encode(MessageKind::NoteOn, Channel::Ch2, 60, 100).unwrap();
        assert_eq!(msg.raw(), &[0x91, 60, 100]);
    }

    #[test]
    fn test_encode_ignores_second_byte_for_short_kinds() {
        let msg = encode(MessageKind::ProgramChange, Channel::Ch1, 3, 99).unwrap();
        assert_eq!(msg.raw(), &[0xC0, 3]);
    }

    #[test]
    fn test_encode_system_kind() {
        assert_eq!(
            encode(MessageKind::Start, Channel::Ch1, 0, 0),
            Err(EncodeError::Unsupported(MessageKind::Start))
        );
    }

    #[test]
    fn test_encode_into() {
        let msg: Message = PitchBend::from_value(Channel::Ch1, 0x2001).into();
        let mut buffer = [0u8; 4];
        assert_eq!(msg.encode_into(&mut buffer), Ok(3));
        assert_eq!(&buffer[..3], &[0xE0, 0x01, 0x40]);

        let mut small = [0u8; 2];
        assert_eq!(msg.encode_into(&mut small), Err(EncodeError::BufferTooSmall));
    }

    #[test]
    fn test_every_channel_voice_kind_roundtrips() {
        for kind in MessageKind::CHANNEL_VOICE {
            let msg = encode(kind, Channel::Ch9, 0x12, 0x34).unwrap();
            assert_eq!(msg.kind(), kind);
            assert_eq!(decode(msg.raw()), Ok(msg));
        }
    }
}
