//! Legacy character codes used by HWP 3.x.
//!
//! HWP 3.x stores text as 16-bit codes in its own code page. Hangul uses the
//! Johab layout (bit 15 set, then 5-bit initial / medial / final indices),
//! which maps onto Unicode syllables arithmetically. Hanja and symbol planes
//! need lookup tables and are reported as not representable by the default
//! codec; supply your own [`LegacyCodec`] to cover them.

/// Maps a legacy 16-bit code to UTF-8 text.
pub trait LegacyCodec {
    /// `None` means the code has no mapping.
    fn lookup(&self, code: u16) -> Option<String>;
}

impl<F> LegacyCodec for F
where
    F: Fn(u16) -> Option<String>,
{
    fn lookup(&self, code: u16) -> Option<String> {
        self(code)
    }
}

/// ASCII plus Johab Hangul.
#[derive(Debug, Default, Clone, Copy)]
pub struct JohabCodec;

const HANGUL_BASE: u32 = 0xAC00;
const MEDIAL_COUNT: u32 = 21;
const FINAL_COUNT: u32 = 28;

const FILL_INITIAL: u16 = 1;
const FILL_MEDIAL: u16 = 2;
const FILL_FINAL: u16 = 1;

/// Compatibility jamo for the 19 initial consonants.
const INITIAL_JAMO: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

const COMPAT_VOWEL_BASE: u32 = 0x314F;

fn initial_index(bits: u16) -> Option<u32> {
    match bits {
        2..=20 => Some(u32::from(bits - 2)),
        _ => None,
    }
}

fn medial_index(bits: u16) -> Option<u32> {
    match bits {
        3..=7 => Some(u32::from(bits - 3)),
        10..=15 => Some(u32::from(bits - 5)),
        18..=23 => Some(u32::from(bits - 7)),
        26..=29 => Some(u32::from(bits - 9)),
        _ => None,
    }
}

fn final_index(bits: u16) -> Option<u32> {
    match bits {
        FILL_FINAL => Some(0),
        2..=17 => Some(u32::from(bits - 1)),
        19..=29 => Some(u32::from(bits - 2)),
        _ => None,
    }
}

impl JohabCodec {
    fn decode_hangul(code: u16) -> Option<char> {
        let initial = (code >> 10) & 0x1F;
        let medial = (code >> 5) & 0x1F;
        let fin = code & 0x1F;

        match (initial, medial, fin) {
            (FILL_INITIAL, FILL_MEDIAL, FILL_FINAL) => None,
            (FILL_INITIAL, m, FILL_FINAL) => {
                char::from_u32(COMPAT_VOWEL_BASE + medial_index(m)?)
            }
            (i, FILL_MEDIAL, FILL_FINAL) => Some(INITIAL_JAMO[initial_index(i)? as usize]),
            (i, m, f) => {
                let l = initial_index(i)?;
                let v = medial_index(m)?;
                let t = final_index(f)?;
                char::from_u32(HANGUL_BASE + (l * MEDIAL_COUNT + v) * FINAL_COUNT + t)
            }
        }
    }
}

impl LegacyCodec for JohabCodec {
    fn lookup(&self, code: u16) -> Option<String> {
        match code {
            0x20..=0x7E => Some(char::from(code as u8).to_string()),
            0x8000..=0xFFFF => Self::decode_hangul(code).map(String::from),
            _ => None,
        }
    }
}
