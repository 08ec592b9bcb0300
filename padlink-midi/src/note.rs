//! Musical pitch to MIDI note number mapping

/// Lowest octave a [`Note`] can hold
pub const MIN_OCTAVE: i8 = -1;

/// Highest octave a [`Note`] can hold
pub const MAX_OCTAVE: i8 = 9;

/// Pitch class within an octave
///
/// Enharmonic spellings (D♭ for C♯ and so on) are associated constants that
/// share the sharp variant's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum NoteName {
    C = 0,
    CSharp = 1,
    D = 2,
    DSharp = 3,
    E = 4,
    F = 5,
    FSharp = 6,
    G = 7,
    GSharp = 8,
    A = 9,
    ASharp = 10,
    B = 11,
}

impl NoteName {
    pub const D_FLAT: NoteName = NoteName::CSharp;
    pub const E_FLAT: NoteName = NoteName::DSharp;
    pub const G_FLAT: NoteName = NoteName::FSharp;
    pub const A_FLAT: NoteName = NoteName::GSharp;
    pub const B_FLAT: NoteName = NoteName::ASharp;

    /// Semitone offset from C (0-11)
    pub const fn offset(self) -> u8 {
        self as u8
    }
}

/// A pitch: name plus octave
///
/// Octave is clamped to [`MIN_OCTAVE`]..=[`MAX_OCTAVE`] on construction.
/// Middle C is `Note::new(NoteName::C, 4)`, note number 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    name: NoteName,
    octave: i8,
}

impl Note {
    /// Create a note, clamping the octave into range
    pub fn new(name: NoteName, octave: i8) -> Self {
        Self {
            name,
            octave: octave.clamp(MIN_OCTAVE, MAX_OCTAVE),
        }
    }

    /// Replace the pitch class, keeping the octave
    pub fn set_name(&mut self, name: NoteName) {
        self.name = name;
    }

    pub fn name(&self) -> NoteName {
        self.name
    }

    pub fn octave(&self) -> i8 {
        self.octave
    }

    /// Note number: `(octave + 1) * 12 + offset`
    ///
    /// Not limited to the 7-bit MIDI range: notes above G9 yield 128..=131.
    /// Use [`Note::checked_value`] when the result goes on the wire.
    pub fn value(&self) -> u8 {
        // octave + 1 is in 0..=10 after clamping
        (self.octave + 1) as u8 * 12 + self.name.offset()
    }

    /// Note number, or `None` if it falls outside 0-127
    pub fn checked_value(&self) -> Option<u8> {
        let value = self.value();
        (value <= 0x7F).then_some(value)
    }
}
