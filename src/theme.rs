//! Level themes: empty/filled/background colour triples drawn from fixed palettes.

use rand::Rng;
use ratatui::style::Color;
use thiserror::Error;

/// The three colours a level renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Empty playfield cells.
    pub empty: Color,
    /// Cells covered by landed pieces or the falling piece.
    pub filled: Color,
    /// Everything outside the board.
    pub background: Color,
}

/// Candidate empty-cell colours; one is picked per level-up.
const EMPTY_PALETTE: [Color; 6] = [
    Color::Rgb(0x1b, 0x49, 0x65),
    Color::Rgb(0x3a, 0x2d, 0x46),
    Color::Rgb(0x14, 0x34, 0x2b),
    Color::Rgb(0x4a, 0x1d, 0x2f),
    Color::Rgb(0x2d, 0x31, 0x42),
    Color::Rgb(0x3d, 0x2b, 0x1f),
];

/// Candidate filled-cell colours.
const FILLED_PALETTE: [Color; 6] = [
    Color::Rgb(0x5f, 0xa8, 0xd3),
    Color::Rgb(0xc7, 0x92, 0xea),
    Color::Rgb(0x62, 0xd2, 0xa2),
    Color::Rgb(0xe0, 0x6c, 0x8a),
    Color::Rgb(0xf2, 0xcc, 0x8f),
    Color::Rgb(0xee, 0x6c, 0x4d),
];

/// Candidate background colours.
const BACKGROUND_PALETTE: [Color; 6] = [
    Color::Rgb(0x00, 0x00, 0x00),
    Color::Rgb(0x0b, 0x13, 0x2b),
    Color::Rgb(0x1a, 0x14, 0x23),
    Color::Rgb(0x10, 0x14, 0x19),
    Color::Rgb(0x0f, 0x20, 0x18),
    Color::Rgb(0x16, 0x0a, 0x0f),
];

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("invalid hex colour: {0}")]
    InvalidHex(String),
}

impl Theme {
    /// Starting theme: dark blue cells on black.
    pub fn initial() -> Self {
        Self {
            empty: EMPTY_PALETTE[0],
            filled: FILLED_PALETTE[0],
            background: BACKGROUND_PALETTE[0],
        }
    }

    /// Theme for a new level: each colour drawn independently and uniformly
    /// from its palette.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            empty: EMPTY_PALETTE[rng.random_range(0..EMPTY_PALETTE.len())],
            filled: FILLED_PALETTE[rng.random_range(0..FILLED_PALETTE.len())],
            background: BACKGROUND_PALETTE[rng.random_range(0..BACKGROUND_PALETTE.len())],
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::initial()
    }
}

/// Parse a "#RRGGBB" colour (leading '#' optional).
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return Err(ThemeError::InvalidHex(s.to_string()));
    }
    let channel = |range| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ThemeError::InvalidHex(s.to_string()))
    };
    Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng as _, rngs::StdRng};

    #[test]
    fn test_parse_hex() {
        let c = parse_hex("#1b4965").unwrap();
        assert!(matches!(c, Color::Rgb(0x1b, 0x49, 0x65)));
        let c = parse_hex("5FA8D3").unwrap();
        assert!(matches!(c, Color::Rgb(0x5f, 0xa8, 0xd3)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("#fff").is_err());
        assert!(parse_hex("#zzzzzz").is_err());
        assert!(parse_hex("").is_err());
    }

    #[test]
    fn test_random_theme_stays_in_palettes() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..32 {
            let theme = Theme::random(&mut rng);
            assert!(EMPTY_PALETTE.contains(&theme.empty));
            assert!(FILLED_PALETTE.contains(&theme.filled));
            assert!(BACKGROUND_PALETTE.contains(&theme.background));
        }
    }
}
