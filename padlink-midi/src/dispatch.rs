//! Typed routing of decoded messages
//!
//! A [`MessageDispatcher`] holds at most one consumer per channel-voice kind.
//! [`MessageDispatcher::process`] decodes raw bytes and hands the typed
//! message to the matching consumer, which takes ownership of it.
//!
//! The routing `match` covers every [`Message`] variant, so adding a kind
//! without a route is a compile error rather than a silent drop.

use alloc::boxed::Box;

use crate::codec::{decode, DecodeError};
use crate::message::{
    ChannelPressure, ControlChange, Message, MessageKind, NoteOff, NoteOn, PitchBend,
    PolyPressure, ProgramChange,
};

type Consumer<'a, M> = Option<Box<dyn FnMut(M) + 'a>>;

/// Outcome of routing one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// A consumer was invoked
    Delivered(MessageKind),
    /// No consumer registered for this kind; message discarded
    Dropped(MessageKind),
    /// Bytes did not decode; nothing invoked
    Rejected(DecodeError),
}

/// Registry of one consumer per message kind
#[derive(Default)]
pub struct MessageDispatcher<'a> {
    note_off: Consumer<'a, NoteOff>,
    note_on: Consumer<'a, NoteOn>,
    poly_pressure: Consumer<'a, PolyPressure>,
    control_change: Consumer<'a, ControlChange>,
    program_change: Consumer<'a, ProgramChange>,
    channel_pressure: Consumer<'a, ChannelPressure>,
    pitch_bend: Consumer<'a, PitchBend>,
}

impl<'a> MessageDispatcher<'a> {
    /// Create a dispatcher with no consumers
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_note_off(&mut self, consumer: impl FnMut(NoteOff) + 'a) {
        self.note_off = Some(Box::new(consumer));
    }

    pub fn on_note_on(&mut self, consumer: impl FnMut(NoteOn) + 'a) {
        self.note_on = Some(Box::new(consumer));
    }

    pub fn on_poly_pressure(&mut self, consumer: impl FnMut(PolyPressure) + 'a) {
        self.poly_pressure = Some(Box::new(consumer));
    }

    pub fn on_control_change(&mut self, consumer: impl FnMut(ControlChange) + 'a) {
        self.control_change = Some(Box::new(consumer));
    }

    pub fn on_program_change(&mut self, consumer: impl FnMut(ProgramChange) + 'a) {
        self.program_change = Some(Box::new(consumer));
    }

    pub fn on_channel_pressure(&mut self, consumer: impl FnMut(ChannelPressure) + 'a) {
        self.channel_pressure = Some(Box::new(consumer));
    }

    pub fn on_pitch_bend(&mut self, consumer: impl FnMut(PitchBend) + 'a) {
        self.pitch_bend = Some(Box::new(consumer));
    }

    /// Remove the consumer for `kind`, if any
    ///
    /// System kinds never have a consumer; clearing one is a no-op.
    pub fn clear(&mut self, kind: MessageKind) {
        match kind {
            MessageKind::NoteOff => self.note_off = None,
            MessageKind::NoteOn => self.note_on = None,
            MessageKind::PolyPressure => self.poly_pressure = None,
            MessageKind::ControlChange => self.control_change = None,
            MessageKind::ProgramChange => self.program_change = None,
            MessageKind::ChannelPressure => self.channel_pressure = None,
            MessageKind::PitchBend => self.pitch_bend = None,
            _ => {}
        }
    }

    /// Check whether a consumer is registered for `kind`
    pub fn is_registered(&self, kind: MessageKind) -> bool {
        match kind {
            MessageKind::NoteOff => self.note_off.is_some(),
            MessageKind::NoteOn => self.note_on.is_some(),
            MessageKind::PolyPressure => self.poly_pressure.is_some(),
            MessageKind::ControlChange => self.control_change.is_some(),
            MessageKind::ProgramChange => self.program_change.is_some(),
            MessageKind::ChannelPressure => self.channel_pressure.is_some(),
            MessageKind::PitchBend => self.pitch_bend.is_some(),
            _ => false,
        }
    }

    /// Decode `bytes` and route the result
    ///
    /// At most one consumer runs, synchronously, before this returns.
    pub fn process(&mut self, bytes: &[u8]) -> Dispatch {
        match decode(bytes) {
            Ok(message) => self.dispatch(message),
            Err(error) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("midi: rejected {} bytes: {:?}", bytes.len(), error);
                Dispatch::Rejected(error)
            }
        }
    }

    /// Route an already-decoded message
    pub fn dispatch(&mut self, message: Message) -> Dispatch {
        let kind = message.kind();
        let delivered = match message {
            Message::NoteOff(m) => deliver(&mut self.note_off, m),
            Message::NoteOn(m) => deliver(&mut self.note_on, m),
            Message::PolyPressure(m) => deliver(&mut self.poly_pressure, m),
            Message::ControlChange(m) => deliver(&mut self.control_change, m),
            Message::ProgramChange(m) => deliver(&mut self.program_change, m),
            Message::ChannelPressure(m) => deliver(&mut self.channel_pressure, m),
            Message::PitchBend(m) => deliver(&mut self.pitch_bend, m),
        };

        if delivered {
            #[cfg(feature = "defmt")]
            defmt::trace!("midi: delivered {:?}", kind);
            Dispatch::Delivered(kind)
        } else {
            #[cfg(feature = "defmt")]
            defmt::trace!("midi: no consumer for {:?}, dropped", kind);
            Dispatch::Dropped(kind)
        }
    }
}

/// Hand `message` to `consumer`, or drop it if none is set
fn deliver<M>(consumer: &mut Consumer<'_, M>, message: M) -> bool {
    match consumer {
        Some(consumer) => {
            consumer(message);
            true
        }
        None => false,
    }
}
