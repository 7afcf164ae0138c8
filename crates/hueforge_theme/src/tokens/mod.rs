//! Design tokens for theming
//!
//! Tokens are symbolic color references (`@text-primary`, `@accent`, ...)
//! stored in a theme instead of literal hex values. Each token is a static
//! rule selecting either a neutral shade index or a data color index,
//! depending on the color mode.

mod color;
mod resolve;

pub use color::*;
pub use resolve::*;
