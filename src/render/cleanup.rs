//! Text cleanup for plain-text export.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Unicode NFC normalization only
    Minimal,
    /// NFC, whitespace and blank-line cleanup
    #[default]
    Standard,
    /// Standard plus removal of private-use symbols
    Aggressive,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove U+FFFD left by undecodable units
    pub remove_replacement_char: bool,

    /// Remove Private Use Area characters (HWP symbol fonts map there)
    pub remove_pua: bool,

    /// Collapse runs of spaces and strip trailing whitespace per line
    pub normalize_whitespace: bool,

    /// Maximum consecutive blank lines (0 = unlimited)
    pub max_blank_lines: u8,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            remove_replacement_char: false,
            remove_pua: false,
            normalize_whitespace: false,
            max_blank_lines: 0,
        }
    }

    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_replacement_char: true,
            remove_pua: false,
            normalize_whitespace: true,
            max_blank_lines: 1,
        }
    }

    pub fn aggressive() -> Self {
        Self {
            remove_pua: true,
            ..Self::standard()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Compiled cleanup pipeline.
#[derive(Debug, Clone)]
pub struct CleanupPipeline {
    options: CleanupOptions,
    spaces: Regex,
    trailing: Regex,
    blank_lines: Option<Regex>,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Render(format!("cleanup pattern: {}", e)))
}

impl CleanupPipeline {
    pub fn new(options: CleanupOptions) -> Result<Self> {
        let blank_lines = match options.max_blank_lines {
            0 => None,
            n => Some(compile(&format!(r"\n{{{},}}", usize::from(n) + 2))?),
        };
        Ok(Self {
            spaces: compile(r"[ \u{3000}]{2,}")?,
            trailing: compile(r"(?m)[ \t]+$")?,
            blank_lines,
            options,
        })
    }

    /// Run every enabled step over `text`.
    pub fn process(&self, text: &str) -> String {
        let mut result: String = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        if self.options.remove_replacement_char || self.options.remove_pua {
            result.retain(|c| {
                !(self.options.remove_replacement_char && c == char::REPLACEMENT_CHARACTER
                    || self.options.remove_pua && is_private_use(c))
            });
        }

        if self.options.normalize_whitespace {
            result = result.replace("\r\n", "\n");
            result = self.spaces.replace_all(&result, " ").into_owned();
            result = self.trailing.replace_all(&result, "").into_owned();
        }

        if let Some(re) = &self.blank_lines {
            let keep = "\n".repeat(usize::from(self.options.max_blank_lines) + 1);
            result = re.replace_all(&result, keep.as_str()).into_owned();
        }

        result
    }
}

fn is_private_use(c: char) -> bool {
    matches!(c, '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}' | '\u{100000}'..='\u{10FFFD}')
}
