//! Advance widths for the built-in Helvetica font.
//!
//! Standard PDF fonts are not embedded, so the renderer has no glyph data to
//! measure. Centring a label needs its width, which comes from the font's
//! published AFM metrics (units of 1/1000 em) for the printable ASCII range.

/// Points to millimetres.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Widths for `' '..='~'`, indexed by `byte - 0x20`.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' – '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0' – '?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@' – 'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P' – '_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`' – 'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p' – '~'
];

/// Width used for anything outside printable ASCII (same as a digit).
const FALLBACK_WIDTH: u16 = 556;

/// Advance width of `c` in 1/1000 em.
pub fn char_width(c: char) -> u16 {
    match c {
        ' '..='~' => HELVETICA_WIDTHS[c as usize - 0x20],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` set in Helvetica at `font_size_pt`, in millimetres.
pub fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    units as f32 / 1000.0 * font_size_pt * PT_TO_MM
}
