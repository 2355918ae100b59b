// es-renderer/src/fixed_function.rs
//
//! The renderer for the fixed-function OpenGL ES generation (1.x).

use crate::device::Device;
use crate::framebuffer::Framebuffer;
use crate::renderer::Renderer;
use crate::{ColorFormat, DepthFormat, Error, RendererAttributes, RendererState, SurfaceInfo};

use euclid::default::Size2D;
use log::{debug, error, warn};
use std::fmt::{self, Debug, Formatter};

/// Owns an OpenGL ES 1.x context and the render target it draws into.
///
/// The renderer starts out `Bound`: the context exists but there is nothing to draw into. Each
/// successful `bind_to_drawable()` makes it `Ready`. The framebuffer object is created by the
/// first bind and keeps its name until the renderer is destroyed; the renderbuffers are
/// recreated on every bind.
///
/// All methods must be called from the thread that renders. The renderer makes its context
/// current itself.
pub struct FixedFunctionRenderer<D>
where
    D: Device,
{
    device: D,
    context: D::Context,
    attributes: RendererAttributes,
    framebuffer: Option<Framebuffer<D::Framebuffer, D::Renderbuffer>>,
    state: RendererState,
}

impl<D> FixedFunctionRenderer<D>
where
    D: Device,
{
    /// Creates the context. No GPU memory is allocated until the first bind.
    pub fn new(
        mut device: D,
        attributes: RendererAttributes,
    ) -> Result<FixedFunctionRenderer<D>, Error> {
        if !attributes.version.is_fixed_function() {
            return Err(Error::UnsupportedGLVersion);
        }

        let context = device.create_context(&attributes)?;
        debug!(
            "created OpenGL ES {}.{} context, depth format {:?}",
            attributes.version.major, attributes.version.minor, attributes.depth_format
        );

        Ok(FixedFunctionRenderer {
            device,
            context,
            attributes,
            framebuffer: None,
            state: RendererState::Bound,
        })
    }

    /// Borrows the device this renderer was created with.
    #[inline]
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Borrows the context. The renderer keeps ownership.
    #[inline]
    pub fn context(&self) -> &D::Context {
        &self.context
    }

    #[inline]
    pub fn attributes(&self) -> &RendererAttributes {
        &self.attributes
    }

    #[inline]
    pub fn state(&self) -> RendererState {
        self.state
    }

    /// Describes the current render target, or returns `None` unless the renderer is `Ready`.
    pub fn surface_info(&self) -> Option<SurfaceInfo<D::Framebuffer, D::Renderbuffer>> {
        if self.state != RendererState::Ready {
            return None;
        }
        self.framebuffer.as_ref()?.info()
    }

    /// Releases the render target and the context.
    ///
    /// Each GPU object is released exactly once; calling this again does nothing. If the context
    /// can't be made current, the render target is left for the context's destruction to reclaim. Every other
    /// method fails with `RendererDestroyed` afterward.
    pub fn destroy(&mut self) -> Result<(), Error> {
        if self.state == RendererState::Destroyed {
            return Ok(());
        }
        self.state = RendererState::Destroyed;

        let made_current = self.device.make_context_current(&self.context);
        if let Some(mut framebuffer) = self.framebuffer.take() {
            match made_current {
                Ok(()) => framebuffer.destroy(&self.device, &self.context),
                Err(err) => {
                    // Object names are per context, so nothing may be deleted through another one.
                    warn!("leaving the render target to the context: {}", err);
                    framebuffer.forget();
                }
            }
        }
        self.device.destroy_context(&mut self.context)
    }

    fn check_alive(&self) -> Result<(), Error> {
        match self.state {
            RendererState::Destroyed => Err(Error::RendererDestroyed),
            RendererState::Bound | RendererState::Ready => Ok(()),
        }
    }
}

impl<D> Renderer for FixedFunctionRenderer<D>
where
    D: Device,
{
    type Drawable = D::Drawable;

    fn bind_to_drawable(&mut self, drawable: &D::Drawable) -> Result<(), Error> {
        self.check_alive()?;

        let requested_size = self.device.drawable_size(drawable);
        if requested_size.width <= 0 || requested_size.height <= 0 {
            warn!(
                "refusing to bind to a {}x{} drawable",
                requested_size.width, requested_size.height
            );
            return Err(Error::InvalidDrawableSize(requested_size));
        }

        self.device.make_context_current(&self.context)?;

        let framebuffer = match self.framebuffer {
            Some(ref mut framebuffer) => framebuffer,
            None => self
                .framebuffer
                .insert(Framebuffer::new(&self.device, &self.context)?),
        };

        self.state = RendererState::Bound;
        match framebuffer.attach_drawable(&self.device, &self.context, drawable, &self.attributes) {
            Ok(_) => {
                self.state = RendererState::Ready;
                Ok(())
            }
            Err(err) => {
                warn!("render target left unbound: {}", err);
                Err(err)
            }
        }
    }

    fn present_frame(&mut self) -> Result<(), Error> {
        self.check_alive()?;

        let color_renderbuffer = match self.framebuffer {
            Some(ref framebuffer) if self.state == RendererState::Ready => {
                framebuffer.color_renderbuffer()
            }
            _ => None,
        };
        let color_renderbuffer = match color_renderbuffer {
            Some(color_renderbuffer) => color_renderbuffer,
            None => {
                error!("present_frame() called with no render target bound");
                return Err(Error::NoSurfaceBound);
            }
        };

        self.device.make_context_current(&self.context)?;
        self.device.present_renderbuffer(&self.context, color_renderbuffer)
    }

    #[inline]
    fn current_width(&self) -> i32 {
        self.current_size().width
    }

    #[inline]
    fn current_height(&self) -> i32 {
        self.current_size().height
    }

    #[inline]
    fn current_size(&self) -> Size2D<i32> {
        match self.framebuffer {
            Some(ref framebuffer) => framebuffer.size(),
            None => Size2D::zero(),
        }
    }

    /// The format of the bound storage, or the requested one while nothing is bound.
    fn color_format(&self) -> ColorFormat {
        self.framebuffer
            .as_ref()
            .and_then(|framebuffer| framebuffer.color_format())
            .unwrap_or(self.attributes.color_format)
    }

    #[inline]
    fn depth_format(&self) -> DepthFormat {
        self.attributes.depth_format
    }
}

impl<D> Drop for FixedFunctionRenderer<D>
where
    D: Device,
{
    fn drop(&mut self) {
        if let Err(err) = self.destroy() {
            error!("failed to destroy renderer: {}", err);
        }
    }
}

impl<D> Debug for FixedFunctionRenderer<D>
where
    D: Device,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("FixedFunctionRenderer")
            .field("attributes", &self.attributes)
            .field("state", &self.state)
            .field("size", &self.current_size())
            .finish()
    }
}
