//! Token resolution against the active palettes

use super::color::{is_token, ColorToken, ShadeRef, UNKNOWN_TOKEN_FALLBACK};
use crate::theme::ColorMode;

/// Palette context a token is resolved against.
#[derive(Clone, Copy, Debug)]
pub struct TokenContext<'a> {
    /// Neutral shades, lightest first
    pub neutral: &'a [String],
    /// Ordered data series colors
    pub data_colors: &'a [String],
}

impl<'a> TokenContext<'a> {
    pub fn new(neutral: &'a [String], data_colors: &'a [String]) -> Self {
        Self {
            neutral,
            data_colors,
        }
    }
}

/// Resolve a token string to a concrete hex value.
///
/// Returns `None` for strings without the sigil, for unknown token names,
/// and when the token's slot is out of range for the given palettes.
pub fn resolve_token(token: &str, mode: ColorMode, ctx: &TokenContext<'_>) -> Option<String> {
    if !is_token(token) {
        return None;
    }
    let token = ColorToken::from_name(token)?;
    let slot = match token.rule(mode) {
        ShadeRef::Neutral(i) => ctx.neutral.get(i),
        ShadeRef::Data(i) => ctx.data_colors.get(i),
    };
    slot.cloned()
}

/// Resolve a token, substituting the documented fallback when it cannot.
///
/// The second element is `false` when the fallback was used.
pub fn resolve_token_or_fallback(
    token: &str,
    mode: ColorMode,
    ctx: &TokenContext<'_>,
) -> (String, bool) {
    if let Some(hex) = resolve_token(token, mode, ctx) {
        return (hex, true);
    }
    let fallback = ColorToken::from_name(token)
        .map(|t| t.fallback_hex(mode))
        .unwrap_or(UNKNOWN_TOKEN_FALLBACK);
    (fallback.to_string(), false)
}
