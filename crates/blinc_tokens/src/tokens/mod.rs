//! Design token namespaces
//!
//! Tokens are the atomic values of a design system:
//! - Colors (per-mode scales and semantic roles)
//! - Typography (fonts, sizes, weights, line heights)
//! - Spacing
//! - Effects (shadows, radii, gradients, blur, opacity)
//! - Responsive breakpoints

mod color;
mod effects;
mod responsive;
mod typography;
mod value;

pub use color::*;
pub use effects::*;
pub use responsive::*;
pub use typography::*;
pub use value::*;
