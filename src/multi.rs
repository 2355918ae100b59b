// es-renderer/src/multi.rs
//
//! A renderer abstraction that allows the choice of OpenGL ES generation at startup.

use crate::renderer::Renderer;
use crate::{ColorFormat, DepthFormat, Error};

use euclid::default::Size2D;
use log::info;

/// One of two renderers, chosen once when the engine starts.
///
/// Typically `Def` is the renderer for the newest generation the platform might support and
/// `Alt` is the fixed-function fallback.
#[derive(Debug)]
pub enum MultiRenderer<Def, Alt>
where
    Def: Renderer,
    Alt: Renderer,
{
    Default(Def),
    Alternate(Alt),
}

/// A drawable for one of the two renderer variants.
pub enum MultiDrawable<Def, Alt>
where
    Def: Renderer,
    Alt: Renderer,
{
    Default(Def::Drawable),
    Alternate(Alt::Drawable),
}

impl<Def, Alt> MultiRenderer<Def, Alt>
where
    Def: Renderer,
    Alt: Renderer,
{
    /// Builds the preferred variant, falling back to the other one if the platform doesn't
    /// support the preferred generation.
    ///
    /// Errors other than an unsupported API type or version are returned as is.
    pub fn select<FD, FA>(
        prefer_default: bool,
        create_default: FD,
        create_alternate: FA,
    ) -> Result<MultiRenderer<Def, Alt>, Error>
    where
        FD: FnOnce() -> Result<Def, Error>,
        FA: FnOnce() -> Result<Alt, Error>,
    {
        if prefer_default {
            match create_default() {
                Ok(renderer) => Ok(MultiRenderer::Default(renderer)),
                Err(Error::UnsupportedGLVersion) | Err(Error::UnsupportedGLType) => {
                    info!("falling back to the alternate renderer");
                    create_alternate().map(MultiRenderer::Alternate)
                }
                Err(err) => Err(err),
            }
        } else {
            match create_alternate() {
                Ok(renderer) => Ok(MultiRenderer::Alternate(renderer)),
                Err(Error::UnsupportedGLVersion) | Err(Error::UnsupportedGLType) => {
                    info!("falling back to the default renderer");
                    create_default().map(MultiRenderer::Default)
                }
                Err(err) => Err(err),
            }
        }
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        match *self {
            MultiRenderer::Default(_) => true,
            MultiRenderer::Alternate(_) => false,
        }
    }
}

impl<Def, Alt> Renderer for MultiRenderer<Def, Alt>
where
    Def: Renderer,
    Alt: Renderer,
{
    type Drawable = MultiDrawable<Def, Alt>;

    fn bind_to_drawable(&mut self, drawable: &MultiDrawable<Def, Alt>) -> Result<(), Error> {
        match (&mut *self, drawable) {
            (&mut MultiRenderer::Default(ref mut renderer), MultiDrawable::Default(drawable)) => {
                renderer.bind_to_drawable(drawable)
            }
            (
                &mut MultiRenderer::Alternate(ref mut renderer),
                MultiDrawable::Alternate(drawable),
            ) => renderer.bind_to_drawable(drawable),
            _ => Err(Error::IncompatibleDrawable),
        }
    }

    fn present_frame(&mut self) -> Result<(), Error> {
        match *self {
            MultiRenderer::Default(ref mut renderer) => renderer.present_frame(),
            MultiRenderer::Alternate(ref mut renderer) => renderer.present_frame(),
        }
    }

    fn current_width(&self) -> i32 {
        match *self {
            MultiRenderer::Default(ref renderer) => renderer.current_width(),
            MultiRenderer::Alternate(ref renderer) => renderer.current_width(),
        }
    }

    fn current_height(&self) -> i32 {
        match *self {
            MultiRenderer::Default(ref renderer) => renderer.current_height(),
            MultiRenderer::Alternate(ref renderer) => renderer.current_height(),
        }
    }

    fn current_size(&self) -> Size2D<i32> {
        match *self {
            MultiRenderer::Default(ref renderer) => renderer.current_size(),
            MultiRenderer::Alternate(ref renderer) => renderer.current_size(),
        }
    }

    fn color_format(&self) -> ColorFormat {
        match *self {
            MultiRenderer::Default(ref renderer) => renderer.color_format(),
            MultiRenderer::Alternate(ref renderer) => renderer.color_format(),
        }
    }

    fn depth_format(&self) -> DepthFormat {
        match *self {
            MultiRenderer::Default(ref renderer) => renderer.depth_format(),
            MultiRenderer::Alternate(ref renderer) => renderer.depth_format(),
        }
    }
}
