//! Equal-tempered note table (A4 = 440 Hz), C4 through F5.

/// Number of entries in the note table.
pub const NOTE_COUNT: usize = 18;

/// Note frequencies in Hz, indexed by semitone above C4.
pub const NOTE_FREQUENCIES: [f32; NOTE_COUNT] = [
    261.63, 277.18, 293.66, 311.13, 329.63, 349.23, // C4-F4
    369.99, 392.00, 415.30, 440.00, 466.16, 493.88, // F#4-B4
    523.25, 554.37, 587.33, 622.25, 659.25, 698.46, // C5-F5
];

/// Look up a note frequency, clamping the index to the table.
pub const fn note_frequency(index: usize) -> f32 {
    let i = if index < NOTE_COUNT { index } else { NOTE_COUNT - 1 };
    NOTE_FREQUENCIES[i]
}
