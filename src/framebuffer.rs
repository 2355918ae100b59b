// es-renderer/src/framebuffer.rs
//
//! Encapsulates the OpenGL ES objects that make up the on-screen render target.
//!
//! iOS has no default framebuffer, so the framebuffer object, the color renderbuffer backed by
//! the layer, and the optional depth renderbuffer all have to be kept around. This object owns
//! them. The framebuffer object is created once and keeps its name for its whole life; only
//! the attachments are replaced when the drawable changes.

use crate::device::{Attachment, Device};
use crate::renderbuffers::DepthRenderbuffer;
use crate::{gl, AttachmentFlags, ColorFormat, Error, RendererAttributes, SurfaceInfo};

use euclid::default::Size2D;
use log::{debug, error};
use std::thread;

pub(crate) struct Framebuffer<F, R>
where
    R: Copy,
{
    framebuffer_object: Option<F>,
    color_renderbuffer: Option<R>,
    depth_renderbuffer: Option<DepthRenderbuffer<R>>,
    size: Size2D<i32>,
    color_format: Option<ColorFormat>,
}

impl<F, R> Drop for Framebuffer<F, R>
where
    R: Copy,
{
    fn drop(&mut self) {
        if self.framebuffer_object.is_some() && !thread::panicking() {
            panic!("Should have destroyed the framebuffer with `destroy()`!");
        }
    }
}

impl<F, R> Framebuffer<F, R>
where
    F: Copy,
    R: Copy,
{
    /// Creates a framebuffer object with nothing attached.
    pub(crate) fn new<D>(device: &D, context: &D::Context) -> Result<Framebuffer<F, R>, Error>
    where
        D: Device<Framebuffer = F, Renderbuffer = R>,
    {
        let framebuffer_object = device.create_framebuffer(context)?;
        Ok(Framebuffer {
            framebuffer_object: Some(framebuffer_object),
            color_renderbuffer: None,
            depth_renderbuffer: None,
            size: Size2D::zero(),
            color_format: None,
        })
    }

    #[inline]
    pub(crate) fn color_renderbuffer(&self) -> Option<R> {
        self.color_renderbuffer
    }

    /// The backing size of the current attachments; zero when nothing is attached.
    #[inline]
    pub(crate) fn size(&self) -> Size2D<i32> {
        self.size
    }

    /// The pixel format of the drawable's storage, while it is attached.
    #[inline]
    pub(crate) fn color_format(&self) -> Option<ColorFormat> {
        self.color_format
    }

    /// Builds a fresh set of attachments for the drawable.
    ///
    /// The previous attachments are released before anything new is allocated. If any step
    /// fails, whatever was allocated here is released again and the target is left with no
    /// attachments.
    pub(crate) fn attach_drawable<D>(
        &mut self,
        device: &D,
        context: &D::Context,
        drawable: &D::Drawable,
        attributes: &RendererAttributes,
    ) -> Result<Size2D<i32>, Error>
    where
        D: Device<Framebuffer = F, Renderbuffer = R>,
    {
        self.release_attachments(device, context);

        let result = self.attach_drawable_inner(device, context, drawable, attributes);
        if result.is_err() {
            self.release_attachments(device, context);
        }
        result
    }

    fn attach_drawable_inner<D>(
        &mut self,
        device: &D,
        context: &D::Context,
        drawable: &D::Drawable,
        attributes: &RendererAttributes,
    ) -> Result<Size2D<i32>, Error>
    where
        D: Device<Framebuffer = F, Renderbuffer = R>,
    {
        let framebuffer_object = self.framebuffer_object.ok_or(Error::RendererDestroyed)?;

        let color_renderbuffer = device.create_renderbuffer(context)?;
        self.color_renderbuffer = Some(color_renderbuffer);
        let storage = device.renderbuffer_storage_from_drawable(
            context,
            color_renderbuffer,
            drawable,
            attributes.color_format,
        )?;
        let size = storage.size;
        if size.width <= 0 || size.height <= 0 {
            error!("drawable storage came out {}x{}", size.width, size.height);
            return Err(Error::InvalidDrawableSize(size));
        }
        device.attach_renderbuffer(
            context,
            framebuffer_object,
            Attachment::Color,
            Some(color_renderbuffer),
        );
        self.size = size;
        self.color_format = Some(storage.color_format);
        debug!(
            "surface size: {}x{}, {:?}",
            size.width, size.height, storage.color_format
        );

        self.depth_renderbuffer =
            DepthRenderbuffer::new(device, context, size, attributes.depth_format)?;
        if let Some(ref depth_renderbuffer) = self.depth_renderbuffer {
            depth_renderbuffer.bind_to_framebuffer(device, context, framebuffer_object);
        }

        let status = device.framebuffer_status(context, framebuffer_object);
        if status != gl::FRAMEBUFFER_COMPLETE {
            error!("failed to make complete framebuffer object 0x{:x}", status);
            return Err(Error::FramebufferIncomplete(status));
        }

        Ok(size)
    }

    /// Detaches and deletes the color and depth renderbuffers, keeping the framebuffer object.
    pub(crate) fn release_attachments<D>(&mut self, device: &D, context: &D::Context)
    where
        D: Device<Framebuffer = F, Renderbuffer = R>,
    {
        let framebuffer_object = match self.framebuffer_object {
            Some(framebuffer_object) => framebuffer_object,
            None => return,
        };

        if let Some(mut depth_renderbuffer) = self.depth_renderbuffer.take() {
            depth_renderbuffer.destroy(device, context, framebuffer_object);
        }
        if let Some(color_renderbuffer) = self.color_renderbuffer.take() {
            device.attach_renderbuffer(context, framebuffer_object, Attachment::Color, None);
            device.destroy_renderbuffer(context, color_renderbuffer);
        }
        self.size = Size2D::zero();
        self.color_format = None;
    }

    pub(crate) fn info(&self) -> Option<SurfaceInfo<F, R>> {
        let framebuffer_object = self.framebuffer_object?;
        let color_renderbuffer = self.color_renderbuffer?;

        let mut attachments = AttachmentFlags::COLOR;
        let mut depth_renderbuffer = None;
        if let Some(ref depth) = self.depth_renderbuffer {
            attachments |= match *depth {
                DepthRenderbuffer::Depth(_) => AttachmentFlags::DEPTH,
                DepthRenderbuffer::CombinedDepthStencil(_) => {
                    AttachmentFlags::DEPTH | AttachmentFlags::STENCIL
                }
            };
            depth_renderbuffer = depth.renderbuffer();
        }

        Some(SurfaceInfo {
            size: self.size,
            color_format: self.color_format?,
            framebuffer_object,
            color_renderbuffer,
            depth_renderbuffer,
            attachments,
        })
    }

    /// Deletes every attachment and then the framebuffer object itself.
    pub(crate) fn destroy<D>(&mut self, device: &D, context: &D::Context)
    where
        D: Device<Framebuffer = F, Renderbuffer = R>,
    {
        self.release_attachments(device, context);
        if let Some(framebuffer_object) = self.framebuffer_object.take() {
            device.destroy_framebuffer(context, framebuffer_object);
        }
    }

    /// Drops every handle without deleting anything.
    ///
    /// For when the owning context can't be made current: the names would otherwise be deleted
    /// in whichever context is current instead. Destroying the context reclaims the objects.
    pub(crate) fn forget(&mut self) {
        if let Some(mut depth_renderbuffer) = self.depth_renderbuffer.take() {
            depth_renderbuffer.forget();
        }
        self.color_renderbuffer = None;
        self.framebuffer_object = None;
        self.size = Size2D::zero();
        self.color_format = None;
    }
}
