use crate::pieces::{FillVariant, Side};

/// An RGB color used to render a side's pieces.
///
/// The engine never interprets colors; they only flow back out to the
/// rendering collaborator via [`GameConfig::color_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Game setup, immutable after construction.
///
/// Selects each side's cosmetic fill variant and render color. Rule logic
/// reads only the fill variants (to resolve glyphs at setup and promotion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub light_filled: bool,
    pub dark_filled: bool,
    pub light_color: Rgb,
    pub dark_color: Rgb,
}

impl GameConfig {
    /// Fill variant for the given side's glyphs.
    pub const fn fill_of(&self, side: Side) -> FillVariant {
        let filled = match side {
            Side::Light => self.light_filled,
            Side::Dark => self.dark_filled,
        };
        if filled {
            FillVariant::Filled
        } else {
            FillVariant::Outline
        }
    }

    /// Render color for the given side's pieces.
    pub const fn color_of(&self, side: Side) -> Rgb {
        match side {
            Side::Light => self.light_color,
            Side::Dark => self.dark_color,
        }
    }
}

impl Default for GameConfig {
    /// Outline glyphs for light, filled for dark, plain white/black colors.
    fn default() -> Self {
        Self {
            light_filled: false,
            dark_filled: true,
            light_color: Rgb::new(0xF0, 0xF0, 0xF0),
            dark_color: Rgb::new(0x20, 0x20, 0x20),
        }
    }
}
