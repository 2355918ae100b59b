// es-renderer/src/attributes.rs
//
//! Render target formats and the attributes a renderer is created with.

use crate::gl;
use crate::info::GLVersion;

use bitflags::bitflags;

/// The depth buffer format, fixed when the renderer is created.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DepthFormat {
    /// No depth buffer.
    #[default]
    None,
    /// 16-bit depth buffer.
    Depth16,
    /// 24-bit depth buffer.
    Depth24,
    /// 24-bit depth buffer packed with an 8-bit stencil buffer in one renderbuffer.
    Depth24Stencil8,
}

impl DepthFormat {
    #[inline]
    pub fn has_depth(self) -> bool {
        self != DepthFormat::None
    }

    #[inline]
    pub fn has_stencil(self) -> bool {
        self == DepthFormat::Depth24Stencil8
    }

    /// The renderbuffer internal format, or `None` if no depth buffer is allocated.
    pub fn internal_format(self) -> Option<u32> {
        match self {
            DepthFormat::None => None,
            DepthFormat::Depth16 => Some(gl::DEPTH_COMPONENT16),
            DepthFormat::Depth24 => Some(gl::DEPTH_COMPONENT24),
            DepthFormat::Depth24Stencil8 => Some(gl::DEPTH24_STENCIL8),
        }
    }
}

/// The pixel format of the drawable's color storage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ColorFormat {
    /// 32-bit RGBA.
    Rgba8,
    /// 16-bit RGB.
    #[default]
    Rgb565,
}

impl ColorFormat {
    #[inline]
    pub fn internal_format(self) -> u32 {
        match self {
            ColorFormat::Rgba8 => gl::RGBA8,
            ColorFormat::Rgb565 => gl::RGB565,
        }
    }

    /// Recognizes a renderbuffer's `GL_RENDERBUFFER_INTERNAL_FORMAT`.
    pub fn from_internal_format(internal_format: u32) -> Option<ColorFormat> {
        match internal_format {
            gl::RGBA8 => Some(ColorFormat::Rgba8),
            gl::RGB565 => Some(ColorFormat::Rgb565),
            _ => None,
        }
    }
}

bitflags! {
    /// The attachments carried by a render target.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct AttachmentFlags: u8 {
        const COLOR   = 0x01;
        const DEPTH   = 0x02;
        const STENCIL = 0x04;
    }
}

impl AttachmentFlags {
    /// The attachments a complete target has for the given depth format.
    pub fn for_depth_format(depth_format: DepthFormat) -> AttachmentFlags {
        let mut flags = AttachmentFlags::COLOR;
        if depth_format.has_depth() {
            flags |= AttachmentFlags::DEPTH;
        }
        if depth_format.has_stencil() {
            flags |= AttachmentFlags::STENCIL;
        }
        flags
    }
}

/// Attributes a renderer is created with.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RendererAttributes {
    /// The OpenGL ES version of the context.
    pub version: GLVersion,
    /// The pixel format of the drawable's color storage.
    pub color_format: ColorFormat,
    /// The depth buffer format.
    pub depth_format: DepthFormat,
}

impl RendererAttributes {
    /// Fixed-function attributes with the given depth format.
    #[inline]
    pub fn with_depth_format(depth_format: DepthFormat) -> RendererAttributes {
        RendererAttributes {
            depth_format,
            ..RendererAttributes::default()
        }
    }
}
