// es-renderer/src/renderbuffers.rs
//
//! The depth and stencil renderbuffers that sit next to the color renderbuffer.

use crate::device::{Attachment, Device};
use crate::{DepthFormat, Error};

use euclid::default::Size2D;
use std::thread;

pub(crate) enum DepthRenderbuffer<R> {
    Depth(Option<R>),
    // Fixed-function GL ES has no combined attachment point, so a packed renderbuffer is
    // attached to both the depth and the stencil slot.
    CombinedDepthStencil(Option<R>),
}

impl<R> Drop for DepthRenderbuffer<R> {
    fn drop(&mut self) {
        match *self {
            DepthRenderbuffer::Depth(None) | DepthRenderbuffer::CombinedDepthStencil(None) => {}
            _ => {
                if !thread::panicking() {
                    panic!("Should have destroyed the depth renderbuffer with `destroy()`!")
                }
            }
        }
    }
}

impl<R> DepthRenderbuffer<R>
where
    R: Copy,
{
    /// Allocates a depth renderbuffer, or returns `None` for `DepthFormat::None`.
    pub(crate) fn new<D>(
        device: &D,
        context: &D::Context,
        size: Size2D<i32>,
        depth_format: DepthFormat,
    ) -> Result<Option<DepthRenderbuffer<R>>, Error>
    where
        D: Device<Renderbuffer = R>,
    {
        let internal_format = match depth_format.internal_format() {
            None => return Ok(None),
            Some(internal_format) => internal_format,
        };

        let renderbuffer = device.create_renderbuffer(context)?;
        if let Err(err) = device.renderbuffer_storage(context, renderbuffer, internal_format, size)
        {
            device.destroy_renderbuffer(context, renderbuffer);
            return Err(err);
        }

        if depth_format.has_stencil() {
            Ok(Some(DepthRenderbuffer::CombinedDepthStencil(Some(renderbuffer))))
        } else {
            Ok(Some(DepthRenderbuffer::Depth(Some(renderbuffer))))
        }
    }

    #[inline]
    pub(crate) fn renderbuffer(&self) -> Option<R> {
        match *self {
            DepthRenderbuffer::Depth(renderbuffer)
            | DepthRenderbuffer::CombinedDepthStencil(renderbuffer) => renderbuffer,
        }
    }

    pub(crate) fn bind_to_framebuffer<D>(
        &self,
        device: &D,
        context: &D::Context,
        framebuffer: D::Framebuffer,
    ) where
        D: Device<Renderbuffer = R>,
    {
        match *self {
            DepthRenderbuffer::Depth(renderbuffer) => {
                device.attach_renderbuffer(context, framebuffer, Attachment::Depth, renderbuffer);
            }
            DepthRenderbuffer::CombinedDepthStencil(renderbuffer) => {
                device.attach_renderbuffer(context, framebuffer, Attachment::Depth, renderbuffer);
                device.attach_renderbuffer(context, framebuffer, Attachment::Stencil, renderbuffer);
            }
        }
    }

    /// Detaches the renderbuffer from the framebuffer and deletes it.
    pub(crate) fn destroy<D>(&mut self, device: &D, context: &D::Context, framebuffer: D::Framebuffer)
    where
        D: Device<Renderbuffer = R>,
    {
        match *self {
            DepthRenderbuffer::Depth(ref mut renderbuffer) => {
                if let Some(renderbuffer) = renderbuffer.take() {
                    device.attach_renderbuffer(context, framebuffer, Attachment::Depth, None);
                    device.destroy_renderbuffer(context, renderbuffer);
                }
            }
            DepthRenderbuffer::CombinedDepthStencil(ref mut renderbuffer) => {
                if let Some(renderbuffer) = renderbuffer.take() {
                    device.attach_renderbuffer(context, framebuffer, Attachment::Stencil, None);
                    device.attach_renderbuffer(context, framebuffer, Attachment::Depth, None);
                    device.destroy_renderbuffer(context, renderbuffer);
                }
            }
        }
    }

    /// Drops the handle without deleting the renderbuffer.
    pub(crate) fn forget(&mut self) {
        match *self {
            DepthRenderbuffer::Depth(ref mut renderbuffer)
            | DepthRenderbuffer::CombinedDepthStencil(ref mut renderbuffer) => *renderbuffer = None,
        }
    }
}
