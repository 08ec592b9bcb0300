//! MIDI message codec for Padlink controllers
//!
//! This crate translates between the typed channel-voice messages an
//! application works with and the raw bytes a controller sends or expects.
//!
//! # Wire Format
//!
//! ```text
//! ┌────────────────┬─────────┬─────────┐
//! │ STATUS         │ DATA 1  │ DATA 2  │
//! │ kind | channel │ 0–127   │ 0–127   │
//! └────────────────┴─────────┴─────────┘
//! ```
//!
//! ProgramChange and ChannelPressure carry a single data byte. System
//! messages (status `0xF0` and above) are recognised but not decoded.
//!
//! Decoded messages are routed to application code by a
//! [`MessageDispatcher`], which holds one consumer per message kind.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod codec;
pub mod dispatch;
pub mod message;
pub mod note;

pub use codec::{decode, encode, parse, DecodeError, EncodeError};
pub use dispatch::{Dispatch, MessageDispatcher};
pub use message::{
    Channel, ChannelPressure, ControlChange, Message, MessageKind, NoteOff, NoteOn, PitchBend,
    PolyPressure, ProgramChange, RawBytes, MAX_MESSAGE_SIZE,
};
pub use note::{Note, NoteName};
