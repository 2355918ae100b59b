// es-renderer/src/renderer.rs
//
//! The interface the engine uses to drive a renderer, whatever its OpenGL ES generation.

use crate::{ColorFormat, DepthFormat, Error};

use euclid::default::Size2D;

/// A renderer that owns the render target backing an on-screen drawable.
pub trait Renderer {
    /// The platform surface this renderer draws into.
    type Drawable;

    /// Sizes the render target to the drawable, replacing any previous attachments.
    ///
    /// May be called any number of times, e.g. every time the layer is resized.
    fn bind_to_drawable(&mut self, drawable: &Self::Drawable) -> Result<(), Error>;

    /// Shows the rendered frame. May block until the display system accepts it.
    fn present_frame(&mut self) -> Result<(), Error>;

    /// The backing width in device pixels.
    fn current_width(&self) -> i32;

    /// The backing height in device pixels.
    fn current_height(&self) -> i32;

    #[inline]
    fn current_size(&self) -> Size2D<i32> {
        Size2D::new(self.current_width(), self.current_height())
    }

    fn color_format(&self) -> ColorFormat;

    fn depth_format(&self) -> DepthFormat;
}
