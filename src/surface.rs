// es-renderer/src/surface.rs
//
//! Information related to the current render target.

use crate::{AttachmentFlags, ColorFormat};

use euclid::default::Size2D;

/// Various data about the render target a renderer currently draws into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceInfo<F, R> {
    /// The backing size, in device pixels.
    pub size: Size2D<i32>,
    /// The pixel format the platform gave the drawable's storage.
    pub color_format: ColorFormat,
    /// The framebuffer object to bind before issuing draw calls.
    ///
    /// Its name stays the same across rebinds, so it may be cached.
    pub framebuffer_object: F,
    /// The renderbuffer backed by the drawable.
    pub color_renderbuffer: R,
    /// The depth (or packed depth/stencil) renderbuffer, if one was requested.
    pub depth_renderbuffer: Option<R>,
    /// Which attachment points are in use.
    pub attachments: AttachmentFlags,
}

/// Where a renderer is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RendererState {
    /// The context exists, but there is no complete render target.
    Bound,
    /// The render target is complete and sized to the drawable.
    Ready,
    /// Every GPU object has been released. Terminal.
    Destroyed,
}
