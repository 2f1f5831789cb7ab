//! Output adapters
//!
//! Renderers only read the grid's flat cell sequence between generations.

pub mod framebuffer;
pub mod text;

use crate::error::Result;
use crate::grid::Grid;

pub use framebuffer::{Framebuffer, FramebufferRenderer, PixelSink};
pub use text::TextRenderer;

pub trait Renderer {
    /// Draw one completed generation
    fn draw(&mut self, grid: &Grid) -> Result<()>;
}
