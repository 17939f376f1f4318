//! Per-pixel image filters.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W) | u8 | Single luminance channel, 0-255 |
//! | RGB8 / RGBA8 | (H, W, 3/4) | u8 | Input to grayscale conversion only |
//!
//! Edge detection works on grayscale only; color input is reduced with
//! [`grayscale::grayscale_u8`] first.

pub mod edge;
pub mod grayscale;
