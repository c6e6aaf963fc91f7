//! Render sinks: where composed frames go.

mod http;
mod terminal;

pub use http::{Endpoint, EndpointError, HttpSink};
pub use terminal::TerminalSink;

use crate::pixel::Pixel;

/// Receives one full frame per step.
///
/// Drawing is fire-and-forget: implementations report their own failures
/// (through `log`) and never hand them back to the game.
pub trait RenderSink {
    fn draw(&mut self, pixels: Vec<Pixel>);
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn draw(&mut self, pixels: Vec<Pixel>) {
        (**self).draw(pixels);
    }
}
