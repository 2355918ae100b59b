// es-renderer/src/device.rs
//
//! The abstract interface that all devices conform to.

use crate::{ColorFormat, Error, GLApi, RendererAttributes};
use euclid::default::Size2D;

use std::fmt::Debug;

/// A framebuffer attachment point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attachment {
    Color,
    Depth,
    Stencil,
}

/// The storage the platform bound to a drawable's color renderbuffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawableStorage {
    /// The allocated size in device pixels.
    pub size: Size2D<i32>,
    /// The pixel format the platform actually chose.
    pub color_format: ColorFormat,
}

/// A thread-local handle to the GPU API of one OpenGL ES generation.
///
/// Devices own nothing themselves: every object they create is handed back to the caller, who
/// must destroy it with the matching `destroy_*()` method on the same device. Methods other than
/// the context methods operate on whichever context is current on the calling thread.
pub trait Device {
    /// The context type associated with this device.
    type Context;
    /// The platform surface that supplies backing storage for the color renderbuffer.
    type Drawable;
    /// A framebuffer object name.
    type Framebuffer: Copy + Debug + PartialEq;
    /// A renderbuffer object name.
    type Renderbuffer: Copy + Debug + PartialEq;

    /// Returns the OpenGL API flavor that this device supports (OpenGL or OpenGL ES).
    fn gl_api(&self) -> GLApi;

    // context

    /// Creates a new context for the version in `attributes`.
    fn create_context(&mut self, attributes: &RendererAttributes) -> Result<Self::Context, Error>;

    /// Destroys a context. The context must not be used afterward.
    fn destroy_context(&mut self, context: &mut Self::Context) -> Result<(), Error>;

    /// Makes the context current on the calling thread.
    fn make_context_current(&self, context: &Self::Context) -> Result<(), Error>;

    // drawable

    /// Returns the drawable's current size in device pixels.
    fn drawable_size(&self, drawable: &Self::Drawable) -> Size2D<i32>;

    // objects

    fn create_framebuffer(&self, context: &Self::Context) -> Result<Self::Framebuffer, Error>;

    fn destroy_framebuffer(&self, context: &Self::Context, framebuffer: Self::Framebuffer);

    fn create_renderbuffer(&self, context: &Self::Context) -> Result<Self::Renderbuffer, Error>;

    fn destroy_renderbuffer(&self, context: &Self::Context, renderbuffer: Self::Renderbuffer);

    /// Allocates GPU storage of the given internal format and size for a renderbuffer.
    fn renderbuffer_storage(
        &self,
        context: &Self::Context,
        renderbuffer: Self::Renderbuffer,
        internal_format: u32,
        size: Size2D<i32>,
    ) -> Result<(), Error>;

    /// Binds the drawable's backing store as the renderbuffer's storage.
    ///
    /// Returns what the platform actually allocated. The size may differ from what
    /// `drawable_size()` reported beforehand (e.g. after a display scale change), and the format
    /// from the one asked for.
    fn renderbuffer_storage_from_drawable(
        &self,
        context: &Self::Context,
        renderbuffer: Self::Renderbuffer,
        drawable: &Self::Drawable,
        color_format: ColorFormat,
    ) -> Result<DrawableStorage, Error>;

    /// Attaches a renderbuffer to (or, with `None`, detaches one from) a framebuffer slot.
    fn attach_renderbuffer(
        &self,
        context: &Self::Context,
        framebuffer: Self::Framebuffer,
        attachment: Attachment,
        renderbuffer: Option<Self::Renderbuffer>,
    );

    /// Returns the framebuffer completeness status (`gl::FRAMEBUFFER_COMPLETE` when usable).
    fn framebuffer_status(&self, context: &Self::Context, framebuffer: Self::Framebuffer) -> u32;

    // presentation

    /// Submits the renderbuffer's contents to the display system. May block on vsync.
    fn present_renderbuffer(
        &self,
        context: &Self::Context,
        renderbuffer: Self::Renderbuffer,
    ) -> Result<(), Error>;
}
