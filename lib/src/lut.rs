//! Character set lookup tables
//!
//! Each set is ordered from the sparsest glyph (index 0, always a space) to the
//! densest one. The mapper picks an index from a luminance value in [0, 1].

use crate::error::ConvertError;
use std::fmt;
use std::str::FromStr;

/// Three-step ramp of dots
pub const MINIMAL_CHARS: [char; 3] = [' ', '.', ':'];

/// Ten-step ramp mixing punctuation, operators and shade blocks
pub const STANDARD_CHARS: [char; 10] = [' ', '.', '·', ':', '-', '=', '≡', '≣', '▒', '▓'];

/// Five-step ramp of shade blocks
pub const BLOCK_CHARS: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Twelve-step ramp of box-drawing strokes
pub const LINE_CHARS: [char; 12] = [
    ' ', '╴', '╶', '─', '╵', '╰', '╭', '─', '╷', '╮', '╯', '│',
];

/// A named, immutable character ramp
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    Minimal,
    #[default]
    Standard,
    Blocks,
    Lines,
}

impl CharacterSet {
    /// Every registered set, in display order
    pub const ALL: [CharacterSet; 4] = [
        CharacterSet::Minimal,
        CharacterSet::Standard,
        CharacterSet::Blocks,
        CharacterSet::Lines,
    ];

    /// Registry name of the set
    pub fn name(self) -> &'static str {
        match self {
            CharacterSet::Minimal => "minimal",
            CharacterSet::Standard => "standard",
            CharacterSet::Blocks => "blocks",
            CharacterSet::Lines => "lines",
        }
    }

    /// Glyphs of the set, sparsest first
    pub fn chars(self) -> &'static [char] {
        match self {
            CharacterSet::Minimal => &MINIMAL_CHARS,
            CharacterSet::Standard => &STANDARD_CHARS,
            CharacterSet::Blocks => &BLOCK_CHARS,
            CharacterSet::Lines => &LINE_CHARS,
        }
    }

    /// Number of glyphs in the set
    pub fn len(self) -> usize {
        self.chars().len()
    }

    /// Always false, every set carries at least a space
    pub fn is_empty(self) -> bool {
        false
    }

    /// Human-readable label such as `blocks ( ░▒▓█)`
    pub fn label(self) -> String {
        format!("{} ({})", self.name(), self.chars().iter().collect::<String>())
    }

    /// Whether `ch` is one of this set's glyphs
    pub fn contains(self, ch: char) -> bool {
        self.chars().contains(&ch)
    }

    /// Glyph index for a luminance value
    ///
    /// Computes `floor(luminance * (len - 1))` and clamps it into the valid
    /// range, so out-of-range luminance (possible after a strong contrast
    /// boost) still selects the first or last glyph.
    ///
    /// # Arguments
    /// * `luminance` - Normalized luminance, nominally [0.0, 1.0]
    ///
    /// # Returns
    /// Index into [`CharacterSet::chars`]
    pub fn index_for(self, luminance: f64) -> usize {
        let last = self.len() - 1;
        let scaled = (luminance * last as f64).floor();
        if scaled.is_nan() || scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(last)
        }
    }

    /// Index reached by inverting `index`: `len - 1 - index`
    pub fn mirror(self, index: usize) -> usize {
        self.len() - 1 - index.min(self.len() - 1)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterSet {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CharacterSet::ALL
            .into_iter()
            .find(|set| set.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConvertError::UnknownCharacterSet(wanted.to_string()))
    }
}
