// es-renderer/src/lib.rs
//
//! Render target management for OpenGL ES drawables.
//!
//! A renderer owns an OpenGL ES context and the framebuffer, color renderbuffer, and optional
//! depth renderbuffer that back an on-screen layer. The engine asks it to bind to the layer
//! whenever the layer changes size, draws into the framebuffer it describes, and asks it to
//! present. Everything else (windowing, the game loop, the draw calls themselves) happens
//! elsewhere.
//!
//! The GPU API is reached through the `Device` trait, so the same renderer drives any platform
//! that can supply a `Device`. On iOS, `platform::default` supplies one built on EAGL.

pub mod platform;
pub use crate::platform::generic::gl::{GLContext, GLDevice, Platform};

pub mod error;
pub use crate::error::{Error, WindowingApiError};

mod attributes;
pub use crate::attributes::{AttachmentFlags, ColorFormat, DepthFormat, RendererAttributes};

pub mod device;
pub use crate::device::{Attachment, Device, DrawableStorage};

mod fixed_function;
pub use crate::fixed_function::FixedFunctionRenderer;

mod info;
pub use crate::info::{GLApi, GLVersion};

mod multi;
pub use crate::multi::{MultiDrawable, MultiRenderer};

mod renderer;
pub use crate::renderer::Renderer;

mod surface;
pub use crate::surface::{RendererState, SurfaceInfo};

mod framebuffer;
mod gl_utils;
mod renderbuffers;

pub(crate) use glow as gl;
pub use glow::Context as Gl;
