// es-renderer/src/error.rs
//
//! Various errors that methods can produce.

use euclid::default::Size2D;
use std::fmt::{self, Display, Formatter};

/// Various errors that methods can produce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// The platform created a context for a different API than OpenGL ES.
    UnsupportedGLType,
    /// The renderer doesn't drive the requested OpenGL ES version.
    ///
    /// The fixed-function renderer only accepts OpenGL ES 1.x.
    UnsupportedGLVersion,
    /// The system OpenGL library couldn't be located.
    NoGLLibraryFound,
    /// The system couldn't create an OpenGL context.
    ContextCreationFailed(WindowingApiError),
    /// The system couldn't destroy the OpenGL context.
    ContextDestructionFailed(WindowingApiError),
    /// The system couldn't make the OpenGL context current.
    ///
    /// Fatal to the current frame only; the next call tries again.
    MakeCurrentFailed(WindowingApiError),
    /// The drawable reported a zero (or negative) pixel extent.
    InvalidDrawableSize(Size2D<i32>),
    /// A framebuffer object couldn't be allocated.
    FramebufferCreationFailed(WindowingApiError),
    /// A renderbuffer object couldn't be allocated.
    RenderbufferCreationFailed(WindowingApiError),
    /// Storage couldn't be attached to a renderbuffer, either from the drawable or from GPU
    /// memory.
    RenderbufferStorageFailed(WindowingApiError),
    /// The GPU rejected the attachment combination. Carries the framebuffer status.
    FramebufferIncomplete(u32),
    /// `present_frame()` was called while no complete render target is bound.
    NoSurfaceBound,
    /// The system couldn't present the color renderbuffer.
    PresentFailed(WindowingApiError),
    /// The drawable belongs to a different renderer variant.
    IncompatibleDrawable,
    /// The renderer has been destroyed.
    RendererDestroyed,
}

/// Abstraction of the errors that EAGL, EGL, and GL return.
///
/// They all tend to follow similar patterns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowingApiError {
    /// Miscellaneous error.
    Failed,
    /// EAGL: The context object is invalid.
    /// EGL: An EGLContext argument does not name a valid EGL rendering context.
    BadContext,
    /// Invalid drawable; e.g. a layer without drawable storage.
    BadDrawable,
    /// GL: Given when a value parameter is not a legal value for that function.
    BadValue,
    /// GL: Given when an enumeration parameter is not a legal enumeration for that function.
    BadEnumeration,
    /// GL: Given when the set of state for a command is not legal for the parameters given to that
    /// command.
    BadOperation,
    /// GL: There is not enough memory left to execute the command.
    /// EGL: EGL failed to allocate resources for the requested operation.
    BadAlloc,
    /// EGL: EGL cannot access a requested resource (for example a context is
    /// bound in another thread).
    BadAccess,
    /// EGL: A power management event has occurred. The application must
    /// destroy all contexts and reinitialise OpenGL ES state and objects to
    /// continue rendering.
    ContextLost,
}

impl WindowingApiError {
    /// Maps a `glGetError()` code onto the shared error vocabulary.
    pub fn from_gl_error(code: u32) -> WindowingApiError {
        match code {
            crate::gl::INVALID_ENUM => WindowingApiError::BadEnumeration,
            crate::gl::INVALID_VALUE => WindowingApiError::BadValue,
            crate::gl::INVALID_OPERATION | crate::gl::INVALID_FRAMEBUFFER_OPERATION => {
                WindowingApiError::BadOperation
            }
            crate::gl::OUT_OF_MEMORY => WindowingApiError::BadAlloc,
            _ => WindowingApiError::Failed,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Error::UnsupportedGLType => f.write_str("unsupported OpenGL API type"),
            Error::UnsupportedGLVersion => f.write_str("unsupported OpenGL ES version"),
            Error::NoGLLibraryFound => f.write_str("no OpenGL ES library found"),
            Error::ContextCreationFailed(err) => write!(f, "context creation failed: {:?}", err),
            Error::ContextDestructionFailed(err) => {
                write!(f, "context destruction failed: {:?}", err)
            }
            Error::MakeCurrentFailed(err) => write!(f, "couldn't make context current: {:?}", err),
            Error::InvalidDrawableSize(size) => {
                write!(f, "drawable has a degenerate size of {}x{}", size.width, size.height)
            }
            Error::FramebufferCreationFailed(err) => {
                write!(f, "framebuffer creation failed: {:?}", err)
            }
            Error::RenderbufferCreationFailed(err) => {
                write!(f, "renderbuffer creation failed: {:?}", err)
            }
            Error::RenderbufferStorageFailed(err) => {
                write!(f, "renderbuffer storage allocation failed: {:?}", err)
            }
            Error::FramebufferIncomplete(status) => {
                write!(f, "framebuffer incomplete (status 0x{:x})", status)
            }
            Error::NoSurfaceBound => f.write_str("no complete render target is bound"),
            Error::PresentFailed(err) => write!(f, "present failed: {:?}", err),
            Error::IncompatibleDrawable => f.write_str("drawable belongs to another renderer"),
            Error::RendererDestroyed => f.write_str("renderer has been destroyed"),
        }
    }
}

impl std::error::Error for Error {}
