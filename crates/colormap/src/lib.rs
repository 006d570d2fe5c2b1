//! 256-entry false-color lookup tables.
//!
//! Samples a piecewise-linear [`Palette`] (jet by default) into a
//! [`Colormap`], renders it as a C or Rust array literal, and maps depth
//! readings onto it.

pub mod depth;
pub mod error;
pub mod palette;
pub mod render;
pub mod table;

pub use depth::{DepthRange, INVALID_RAW_DEPTH};
pub use error::ColormapError;
pub use palette::{JET, Palette};
pub use render::{Language, RenderOptions, render};
pub use table::{COLORMAP_SIZE, ChannelOrder, Colormap};
