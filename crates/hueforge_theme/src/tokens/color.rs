//! Color tokens for theming

use crate::theme::ColorMode;
use std::fmt::{Display, Formatter};

/// Prefix that marks a string as a token reference.
pub const TOKEN_SIGIL: char = '@';

/// Fallback for sigil strings that name no registered token.
pub const UNKNOWN_TOKEN_FALLBACK: &str = "#808080";

/// Semantic color token keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum ColorToken {
    // Surface colors
    Background,
    BackgroundSecondary,
    BackgroundTertiary,
    Surface,
    SurfaceElevated,

    // Text colors
    TextPrimary,
    TextSecondary,
    TextTertiary,
    TextInverse,

    // Border colors
    BorderPrimary,
    BorderSecondary,
    BorderSubtle,

    // Interactive states
    Hover,
    Pressed,
    Selected,
    Disabled,

    // Accent (data colors)
    Accent,
    AccentSecondary,
    AccentTertiary,
}

/// Token family; drives the fallback literal when a rule cannot resolve.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum TokenCategory {
    Surface,
    Text,
    Border,
    Interactive,
    Accent,
}

/// What a token points at inside the active palettes
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ShadeRef {
    /// Index into the neutral palette (0 = lightest, 11 = darkest)
    Neutral(usize),
    /// Index into the ordered data colors
    Data(usize),
}

impl Display for ShadeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neutral(i) => write!(f, "shade {i}"),
            Self::Data(i) => write!(f, "data {i}"),
        }
    }
}

impl ColorToken {
    /// Every registered token, in catalog order.
    pub fn all() -> &'static [ColorToken] {
        const TOKENS: [ColorToken; 19] = [
            ColorToken::Background,
            ColorToken::BackgroundSecondary,
            ColorToken::BackgroundTertiary,
            ColorToken::Surface,
            ColorToken::SurfaceElevated,
            ColorToken::TextPrimary,
            ColorToken::TextSecondary,
            ColorToken::TextTertiary,
            ColorToken::TextInverse,
            ColorToken::BorderPrimary,
            ColorToken::BorderSecondary,
            ColorToken::BorderSubtle,
            ColorToken::Hover,
            ColorToken::Pressed,
            ColorToken::Selected,
            ColorToken::Disabled,
            ColorToken::Accent,
            ColorToken::AccentSecondary,
            ColorToken::AccentTertiary,
        ];
        &TOKENS
    }

    /// Token name including the sigil, as stored in themes.
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "@background",
            Self::BackgroundSecondary => "@background-secondary",
            Self::BackgroundTertiary => "@background-tertiary",
            Self::Surface => "@surface",
            Self::SurfaceElevated => "@surface-elevated",
            Self::TextPrimary => "@text-primary",
            Self::TextSecondary => "@text-secondary",
            Self::TextTertiary => "@text-tertiary",
            Self::TextInverse => "@text-inverse",
            Self::BorderPrimary => "@border-primary",
            Self::BorderSecondary => "@border-secondary",
            Self::BorderSubtle => "@border-subtle",
            Self::Hover => "@hover",
            Self::Pressed => "@pressed",
            Self::Selected => "@selected",
            Self::Disabled => "@disabled",
            Self::Accent => "@accent",
            Self::AccentSecondary => "@accent-secondary",
            Self::AccentTertiary => "@accent-tertiary",
        }
    }

    /// Look a token up by its sigil-prefixed name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.name() == name)
    }

    pub fn category(self) -> TokenCategory {
        match self {
            Self::Background
            | Self::BackgroundSecondary
            | Self::BackgroundTertiary
            | Self::Surface
            | Self::SurfaceElevated => TokenCategory::Surface,
            Self::TextPrimary | Self::TextSecondary | Self::TextTertiary | Self::TextInverse => {
                TokenCategory::Text
            }
            Self::BorderPrimary | Self::BorderSecondary | Self::BorderSubtle => {
                TokenCategory::Border
            }
            Self::Hover | Self::Pressed | Self::Selected | Self::Disabled => {
                TokenCategory::Interactive
            }
            Self::Accent | Self::AccentSecondary | Self::AccentTertiary => TokenCategory::Accent,
        }
    }

    /// The palette slot this token selects in the given mode.
    ///
    /// Rules are static: the same token/mode pair selects the same index
    /// whichever palette is active.
    pub fn rule(self, mode: ColorMode) -> ShadeRef {
        use ShadeRef::{Data, Neutral};

        let (light, dark) = match self {
            Self::Background => (Neutral(0), Neutral(11)),
            Self::BackgroundSecondary => (Neutral(1), Neutral(10)),
            Self::BackgroundTertiary => (Neutral(2), Neutral(9)),
            Self::Surface => (Neutral(0), Neutral(10)),
            Self::SurfaceElevated => (Neutral(0), Neutral(9)),
            Self::TextPrimary => (Neutral(9), Neutral(1)),
            Self::TextSecondary => (Neutral(7), Neutral(3)),
            Self::TextTertiary => (Neutral(6), Neutral(5)),
            Self::TextInverse => (Neutral(0), Neutral(11)),
            Self::BorderPrimary => (Neutral(3), Neutral(8)),
            Self::BorderSecondary => (Neutral(4), Neutral(7)),
            Self::BorderSubtle => (Neutral(2), Neutral(9)),
            Self::Hover => (Neutral(1), Neutral(10)),
            Self::Pressed => (Neutral(2), Neutral(9)),
            Self::Selected => (Neutral(3), Neutral(8)),
            Self::Disabled => (Neutral(5), Neutral(6)),
            Self::Accent => (Data(0), Data(0)),
            Self::AccentSecondary => (Data(1), Data(1)),
            Self::AccentTertiary => (Data(2), Data(2)),
        };

        match mode {
            ColorMode::Light => light,
            ColorMode::Dark => dark,
        }
    }

    /// Literal substituted when the rule points past the active palette.
    pub fn fallback_hex(self, mode: ColorMode) -> &'static str {
        self.category().fallback_hex(mode)
    }
}

impl TokenCategory {
    pub fn fallback_hex(self, mode: ColorMode) -> &'static str {
        match (self, mode) {
            (Self::Surface, ColorMode::Light) => "#FFFFFF",
            (Self::Surface, ColorMode::Dark) => "#1B1A19",
            (Self::Text, ColorMode::Light) => "#252423",
            (Self::Text, ColorMode::Dark) => "#F3F2F1",
            (Self::Border, ColorMode::Light) => "#E1DFDD",
            (Self::Border, ColorMode::Dark) => "#3B3A39",
            (Self::Interactive, ColorMode::Light) => "#F3F2F1",
            (Self::Interactive, ColorMode::Dark) => "#323130",
            (Self::Accent, _) => "#118DFF",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::Text => "text",
            Self::Border => "border",
            Self::Interactive => "interactive",
            Self::Accent => "accent",
        }
    }
}

impl Display for ColorToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a string carries the token sigil.
pub fn is_token(value: &str) -> bool {
    value.starts_with(TOKEN_SIGIL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for token in ColorToken::all() {
            assert_eq!(ColorToken::from_name(token.name()), Some(*token));
            assert!(is_token(token.name()));
        }
        assert_eq!(ColorToken::from_name("text-primary"), None);
        assert_eq!(ColorToken::from_name("@no-such-token"), None);
    }

    #[test]
    fn neutral_rules_stay_within_twelve_shades() {
        for token in ColorToken::all() {
            for mode in [ColorMode::Light, ColorMode::Dark] {
                if let ShadeRef::Neutral(i) = token.rule(mode) {
                    assert!(i < 12, "{token} in {mode:?} selects {i}");
                }
            }
        }
    }

    #[test]
    fn text_flips_between_modes() {
        assert_eq!(
            ColorToken::TextPrimary.rule(ColorMode::Light),
            ShadeRef::Neutral(9)
        );
        assert_eq!(
            ColorToken::TextPrimary.rule(ColorMode::Dark),
            ShadeRef::Neutral(1)
        );
        assert_eq!(
            ColorToken::Accent.rule(ColorMode::Light),
            ColorToken::Accent.rule(ColorMode::Dark)
        );
    }
}
