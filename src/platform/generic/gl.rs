// es-renderer/src/platform/generic/gl.rs
//
//! A device that drives OpenGL ES through `glow`, leaving the native context and the drawable to
//! a platform.

use crate::device::{Attachment, Device, DrawableStorage};
use crate::gl_utils;
use crate::{gl, ColorFormat, Error, GLApi, GLVersion, Gl, RendererAttributes, WindowingApiError};

use euclid::default::Size2D;
use glow::{HasContext, NativeFramebuffer, NativeRenderbuffer};
use log::debug;
use std::ffi::CStr;
use std::mem;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

type GetStringFn = unsafe extern "system" fn(u32) -> *const u8;

// The driver's `glGetString`, wrapped by `get_string_without_profile()`.
static DRIVER_GET_STRING: AtomicPtr<c_void> = AtomicPtr::new(ptr::null_mut());

// OpenGL ES 1.x names its profile (common or common-lite) right after the API.
const FIXED_FUNCTION_PROFILES: [&[u8]; 2] = [b"OpenGL ES-CM ", b"OpenGL ES-CL "];

fn driver_get_string(name: u32) -> *const u8 {
    let get_string = DRIVER_GET_STRING.load(Ordering::Acquire);
    if get_string.is_null() {
        return ptr::null();
    }
    unsafe {
        let get_string: GetStringFn = mem::transmute(get_string);
        get_string(name)
    }
}

/// The `glGetString` that `glow` is loaded with.
///
/// `glow` can't parse a profile-tagged version such as `"OpenGL ES-CM 1.1 Apple A7 GPU"` and
/// panics on it, so for those the tag is skipped and `glow` sees `"1.1 Apple A7 GPU"`.
extern "system" fn get_string_without_profile(name: u32) -> *const u8 {
    let string = driver_get_string(name);
    if name != gl::VERSION || string.is_null() {
        return string;
    }
    let version = unsafe { CStr::from_ptr(string as *const c_char) }.to_bytes();
    match FIXED_FUNCTION_PROFILES
        .iter()
        .find(|profile| version.starts_with(profile))
    {
        Some(profile) => unsafe { string.add(profile.len()) },
        None => string,
    }
}

/// What a windowing system has to provide for the GL device to render into its drawables.
///
/// Everything core OpenGL ES can do itself is done by `GLDevice`; this covers only what lives
/// outside of it.
pub trait Platform {
    /// The windowing system's context handle.
    type NativeContext;
    /// The windowing system's layer or window.
    type NativeDrawable;

    /// Creates a native context for the given OpenGL ES version.
    fn create_native_context(&mut self, version: GLVersion) -> Result<Self::NativeContext, Error>;

    /// Destroys a native context, making no context current first if it was current.
    fn destroy_native_context(&mut self, context: &mut Self::NativeContext) -> Result<(), Error>;

    fn make_native_context_current(&self, context: &Self::NativeContext) -> Result<(), Error>;

    /// Looks up a GL entry point. Returns null if there is none.
    fn get_proc_address(&self, symbol_name: &str) -> *const c_void;

    /// The drawable's size in device pixels.
    fn drawable_size(&self, drawable: &Self::NativeDrawable) -> Size2D<i32>;

    /// Backs the renderbuffer bound to `GL_RENDERBUFFER` with the drawable's storage.
    fn renderbuffer_storage_from_drawable(
        &self,
        context: &Self::NativeContext,
        drawable: &Self::NativeDrawable,
        color_format: ColorFormat,
    ) -> Result<(), Error>;

    /// Presents the renderbuffer bound to `GL_RENDERBUFFER`.
    fn present_bound_renderbuffer(&self, context: &Self::NativeContext) -> Result<(), Error>;
}

/// A native context together with the GL function table loaded for it.
pub struct GLContext<C> {
    native_context: C,
    gl: Gl,
    version: GLVersion,
}

impl<C> GLContext<C> {
    #[inline]
    pub fn gl(&self) -> &Gl {
        &self.gl
    }

    #[inline]
    pub fn native_context(&self) -> &C {
        &self.native_context
    }

    #[inline]
    pub fn version(&self) -> GLVersion {
        self.version
    }
}

/// A `Device` for OpenGL ES on top of a platform.
pub struct GLDevice<P>
where
    P: Platform,
{
    platform: P,
}

impl<P> GLDevice<P>
where
    P: Platform,
{
    #[inline]
    pub fn new(platform: P) -> GLDevice<P> {
        GLDevice { platform }
    }

    #[inline]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Checks the version of the freshly created context and loads its function table.
    fn load_gl(
        &self,
        native_context: &P::NativeContext,
        requested_version: GLVersion,
    ) -> Result<(Gl, GLVersion), Error> {
        self.platform.make_native_context_current(native_context)?;

        let get_string = self.platform.get_proc_address("glGetString");
        if get_string.is_null() {
            return Err(Error::NoGLLibraryFound);
        }
        DRIVER_GET_STRING.store(get_string as *mut c_void, Ordering::Release);

        let version_string = driver_get_string(gl::VERSION);
        if version_string.is_null() {
            return Err(Error::ContextCreationFailed(WindowingApiError::BadContext));
        }
        let version_string = unsafe { CStr::from_ptr(version_string as *const c_char) }
            .to_string_lossy()
            .into_owned();
        debug!("GL_VERSION: {}", version_string);

        if !version_string.starts_with("OpenGL ES") {
            return Err(Error::UnsupportedGLType);
        }
        let version = GLVersion::parse(&version_string).ok_or(Error::UnsupportedGLVersion)?;
        if version.major != requested_version.major {
            debug!(
                "asked for OpenGL ES {}.x, got {}.{}",
                requested_version.major, version.major, version.minor
            );
            return Err(Error::UnsupportedGLVersion);
        }

        let platform = &self.platform;
        let gl = unsafe {
            Gl::from_loader_function(|symbol| match symbol {
                "glGetString" => get_string_without_profile as *const c_void,
                _ => platform.get_proc_address(symbol),
            })
        };
        Ok((gl, version))
    }
}

impl<P> Device for GLDevice<P>
where
    P: Platform,
{
    type Context = GLContext<P::NativeContext>;
    type Drawable = P::NativeDrawable;
    type Framebuffer = NativeFramebuffer;
    type Renderbuffer = NativeRenderbuffer;

    #[inline]
    fn gl_api(&self) -> GLApi {
        GLApi::GLES
    }

    fn create_context(&mut self, attributes: &RendererAttributes) -> Result<Self::Context, Error> {
        let mut native_context = self.platform.create_native_context(attributes.version)?;
        match self.load_gl(&native_context, attributes.version) {
            Ok((gl, version)) => Ok(GLContext {
                native_context,
                gl,
                version,
            }),
            Err(err) => {
                self.platform.destroy_native_context(&mut native_context)?;
                Err(err)
            }
        }
    }

    fn destroy_context(&mut self, context: &mut Self::Context) -> Result<(), Error> {
        self.platform
            .destroy_native_context(&mut context.native_context)
    }

    #[inline]
    fn make_context_current(&self, context: &Self::Context) -> Result<(), Error> {
        self.platform
            .make_native_context_current(&context.native_context)
    }

    #[inline]
    fn drawable_size(&self, drawable: &Self::Drawable) -> Size2D<i32> {
        self.platform.drawable_size(drawable)
    }

    fn create_framebuffer(&self, context: &Self::Context) -> Result<NativeFramebuffer, Error> {
        let gl = &context.gl;
        unsafe {
            let framebuffer_object = gl.create_framebuffer().map_err(|_| {
                Error::FramebufferCreationFailed(
                    gl_utils::take_gl_error(gl).unwrap_or(WindowingApiError::Failed),
                )
            })?;
            gl.bind_framebuffer(gl::FRAMEBUFFER, Some(framebuffer_object));
            Ok(framebuffer_object)
        }
    }

    #[inline]
    fn destroy_framebuffer(&self, context: &Self::Context, framebuffer: NativeFramebuffer) {
        gl_utils::destroy_framebuffer(&context.gl, framebuffer);
    }

    fn create_renderbuffer(&self, context: &Self::Context) -> Result<NativeRenderbuffer, Error> {
        let gl = &context.gl;
        unsafe {
            gl.create_renderbuffer().map_err(|_| {
                Error::RenderbufferCreationFailed(
                    gl_utils::take_gl_error(gl).unwrap_or(WindowingApiError::Failed),
                )
            })
        }
    }

    #[inline]
    fn destroy_renderbuffer(&self, context: &Self::Context, renderbuffer: NativeRenderbuffer) {
        gl_utils::destroy_renderbuffer(&context.gl, renderbuffer);
    }

    fn renderbuffer_storage(
        &self,
        context: &Self::Context,
        renderbuffer: NativeRenderbuffer,
        internal_format: u32,
        size: Size2D<i32>,
    ) -> Result<(), Error> {
        let gl = &context.gl;
        unsafe {
            gl.bind_renderbuffer(gl::RENDERBUFFER, Some(renderbuffer));
            gl.renderbuffer_storage(gl::RENDERBUFFER, internal_format, size.width, size.height);
        }
        match gl_utils::take_gl_error(gl) {
            None => Ok(()),
            Some(err) => Err(Error::RenderbufferStorageFailed(err)),
        }
    }

    fn renderbuffer_storage_from_drawable(
        &self,
        context: &Self::Context,
        renderbuffer: NativeRenderbuffer,
        drawable: &Self::Drawable,
        color_format: ColorFormat,
    ) -> Result<DrawableStorage, Error> {
        let gl = &context.gl;
        unsafe {
            gl.bind_renderbuffer(gl::RENDERBUFFER, Some(renderbuffer));
        }
        self.platform.renderbuffer_storage_from_drawable(
            &context.native_context,
            drawable,
            color_format,
        )?;

        let (width, height, internal_format) = unsafe {
            (
                gl.get_renderbuffer_parameter_i32(gl::RENDERBUFFER, gl::RENDERBUFFER_WIDTH),
                gl.get_renderbuffer_parameter_i32(gl::RENDERBUFFER, gl::RENDERBUFFER_HEIGHT),
                gl.get_renderbuffer_parameter_i32(gl::RENDERBUFFER, gl::RENDERBUFFER_INTERNAL_FORMAT),
            )
        };
        let color_format = match ColorFormat::from_internal_format(internal_format as u32) {
            Some(actual_format) => actual_format,
            None => {
                debug!("unrecognized color storage format 0x{:x}", internal_format);
                color_format
            }
        };
        Ok(DrawableStorage {
            size: Size2D::new(width, height),
            color_format,
        })
    }

    fn attach_renderbuffer(
        &self,
        context: &Self::Context,
        framebuffer: NativeFramebuffer,
        attachment: Attachment,
        renderbuffer: Option<NativeRenderbuffer>,
    ) {
        let attachment = match attachment {
            Attachment::Color => gl::COLOR_ATTACHMENT0,
            Attachment::Depth => gl::DEPTH_ATTACHMENT,
            Attachment::Stencil => gl::STENCIL_ATTACHMENT,
        };
        let gl = &context.gl;
        unsafe {
            gl.bind_framebuffer(gl::FRAMEBUFFER, Some(framebuffer));
            gl.framebuffer_renderbuffer(gl::FRAMEBUFFER, attachment, gl::RENDERBUFFER, renderbuffer);
        }
    }

    fn framebuffer_status(&self, context: &Self::Context, framebuffer: NativeFramebuffer) -> u32 {
        let gl = &context.gl;
        unsafe {
            gl.bind_framebuffer(gl::FRAMEBUFFER, Some(framebuffer));
            gl.check_framebuffer_status(gl::FRAMEBUFFER)
        }
    }

    fn present_renderbuffer(
        &self,
        context: &Self::Context,
        renderbuffer: NativeRenderbuffer,
    ) -> Result<(), Error> {
        unsafe {
            context
                .gl
                .bind_renderbuffer(gl::RENDERBUFFER, Some(renderbuffer));
        }
        self.platform
            .present_bound_renderbuffer(&context.native_context)
    }
}
