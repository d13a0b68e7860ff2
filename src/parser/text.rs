//! Control-code interpreter for HWP 5.x paragraph text.
//!
//! A `PARA_TEXT` payload is a run of little-endian UTF-16 code units. Values
//! below 32 are control codes: some stand alone in a single unit, the rest
//! ("extended" and "inline" controls) occupy eight units, the trailing seven
//! being object metadata that carries no text.

/// Units occupied by an extended or inline control.
const WIDE_CONTROL_UNITS: usize = 8;

/// How a code unit is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlClass {
    /// One unit, no text
    Char,
    /// Eight units, no text
    Wide,
    /// Eight units, emits the tab character
    Tab,
    /// Printable text
    Text,
}

impl ControlClass {
    fn of(code: u16) -> Self {
        match code {
            0 | 10 | 13 | 24..=31 => ControlClass::Char,
            1..=8 | 11 | 12 | 14..=23 => ControlClass::Wide,
            9 => ControlClass::Tab,
            _ => ControlClass::Text,
        }
    }
}

/// Decode a paragraph-text payload into plain text.
///
/// A trailing odd byte is ignored. Surrogate pairs are combined; a lone
/// surrogate becomes U+FFFD.
pub fn decode_para_text(raw: &[u8]) -> String {
    let units: Vec<u16> = raw
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();

    let mut text = String::with_capacity(units.len());
    let mut i = 0;
    while i < units.len() {
        let code = units[i];
        match ControlClass::of(code) {
            ControlClass::Char => i += 1,
            ControlClass::Wide => i += WIDE_CONTROL_UNITS,
            ControlClass::Tab => {
                text.push('\t');
                i += WIDE_CONTROL_UNITS;
            }
            ControlClass::Text => {
                let (ch, paired) = decode_unit(code, units.get(i + 1).copied());
                text.push(ch);
                i += if paired { 2 } else { 1 };
            }
        }
    }
    text
}

/// Decode one text unit, returning the char and whether `next` was used.
fn decode_unit(code: u16, next: Option<u16>) -> (char, bool) {
    match code {
        0xD800..=0xDBFF => match next {
            Some(low @ 0xDC00..=0xDFFF) => {
                let scalar =
                    0x10000 + ((u32::from(code) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                (
                    char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER),
                    true,
                )
            }
            _ => (char::REPLACEMENT_CHARACTER, false),
        },
        _ => (
            char::from_u32(u32::from(code)).unwrap_or(char::REPLACEMENT_CHARACTER),
            false,
        ),
    }
}
