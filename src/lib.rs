//! Mosaix is a pixel-art mosaic rendering engine.
//!
//! The engine snapshots a raster source, then redraws it as one or more
//! grid-sampled layers of filled vector shapes (squares, circles, diamonds,
//! stars) composited onto a CPU raster surface:
//!
//! - Describe each layer with a [`PassConfig`]
//! - Bundle layers into [`PassOptions`] (one config or an ordered list)
//! - Render with [`render`] (surface in place) or [`process`] (images and
//!   video frames)
//!
//! ```no_run
//! use mosaix::{PassConfig, PassOptions, RenderOptions, Rendered, Shape, Target};
//!
//! # fn main() -> mosaix::MosaixResult<()> {
//! let input = mosaix::load_image("photo.png".as_ref())?;
//! let passes = PassOptions::List(vec![
//!     PassConfig { resolution: 32.0, ..PassConfig::default() },
//!     PassConfig { resolution: 16.0, shape: Shape::Circle, alpha: 0.5, ..PassConfig::default() },
//! ]);
//! let Rendered::Image(output) =
//!     mosaix::process(Target::Image(&input), &RenderOptions::default(), &passes)?
//! else {
//!     unreachable!()
//! };
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod raster;
pub mod render;
pub mod shapes;
pub mod source;
pub mod surface;

pub use crate::config::{OffsetSpec, PassConfig, PassOptions, ResolvedPass, Shape};
pub use crate::core::Rgba8;
pub use crate::error::{MosaixError, MosaixResult};
pub use crate::grid::{Cell, Cells, Grid};
pub use crate::raster::RasterBuffer;
pub use crate::render::{RenderOptions, render, render_onto, run_pass};
pub use crate::source::{Rendered, Target, load_image, process, render_buffer};
pub use crate::surface::Surface;
