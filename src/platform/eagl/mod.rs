// es-renderer/src/platform/eagl/mod.rs
//
//! OpenGL ES on iOS, via `EAGLContext` and `CAEAGLLayer`.

use crate::gl;
use crate::platform::generic::gl::{GLDevice, Platform};
use crate::{ColorFormat, Error, FixedFunctionRenderer, GLVersion, WindowingApiError};

use euclid::default::Size2D;
use log::debug;
use objc2::runtime::{AnyObject, Bool};
use objc2::{class, msg_send};
use objc2_core_foundation::{CGFloat, CGRect};
use std::ffi::CString;
use std::os::raw::c_void;
use std::ptr;

const OPENGLES_FRAMEWORK_PATH: &[u8] =
    b"/System/Library/Frameworks/OpenGLES.framework/OpenGLES\0";

/// The default device on iOS.
pub type Device = GLDevice<EAGLPlatform>;

/// The fixed-function renderer on iOS.
pub type ES1Renderer = FixedFunctionRenderer<Device>;

/// An owned, retained `EAGLContext`.
pub struct NativeContext(*mut AnyObject);

/// A `CAEAGLLayer`. The layer is borrowed: whoever owns the view keeps it alive.
#[derive(Clone, Copy, Debug)]
pub struct NativeWidget {
    pub layer: *mut AnyObject,
}

/// The EAGL side of the GL device: native contexts, layer storage, and presentation.
pub struct EAGLPlatform {
    framework: *mut c_void,
}

impl EAGLPlatform {
    /// Opens the OpenGL ES framework.
    pub fn new() -> Result<EAGLPlatform, Error> {
        let framework = unsafe {
            libc::dlopen(
                OPENGLES_FRAMEWORK_PATH.as_ptr() as *const _,
                libc::RTLD_LAZY | libc::RTLD_LOCAL,
            )
        };
        if framework.is_null() {
            return Err(Error::NoGLLibraryFound);
        }
        Ok(EAGLPlatform { framework })
    }

    /// Creates a GL device on this platform.
    #[inline]
    pub fn into_device(self) -> Device {
        GLDevice::new(self)
    }

    fn lookup(&self, symbol_name: &str) -> *const c_void {
        let symbol_name = match CString::new(symbol_name) {
            Ok(symbol_name) => symbol_name,
            Err(_) => return ptr::null(),
        };
        unsafe { libc::dlsym(self.framework, symbol_name.as_ptr()) as *const c_void }
    }

    /// Reads one of the framework's exported `NSString` constants.
    fn string_constant(&self, symbol_name: &str) -> Result<*mut AnyObject, Error> {
        let address = self.lookup(symbol_name) as *const *mut AnyObject;
        if address.is_null() {
            return Err(Error::NoGLLibraryFound);
        }
        Ok(unsafe { *address })
    }

    /// Asks the layer for storage of the given format on its next `renderbufferStorage:`.
    fn set_drawable_color_format(
        &self,
        drawable: &NativeWidget,
        color_format: ColorFormat,
    ) -> Result<(), Error> {
        let key = self.string_constant("kEAGLDrawablePropertyColorFormat")?;
        let value = self.string_constant(match color_format {
            ColorFormat::Rgba8 => "kEAGLColorFormatRGBA8",
            ColorFormat::Rgb565 => "kEAGLColorFormatRGB565",
        })?;
        unsafe {
            let properties: *mut AnyObject =
                msg_send![class!(NSDictionary), dictionaryWithObject: value, forKey: key];
            let _: () = msg_send![drawable.layer, setDrawableProperties: properties];
        }
        Ok(())
    }

    fn current_context() -> *mut AnyObject {
        unsafe { msg_send![class!(EAGLContext), currentContext] }
    }
}

impl Drop for EAGLPlatform {
    fn drop(&mut self) {
        unsafe {
            libc::dlclose(self.framework);
        }
    }
}

impl Platform for EAGLPlatform {
    type NativeContext = NativeContext;
    type NativeDrawable = NativeWidget;

    fn create_native_context(&mut self, version: GLVersion) -> Result<NativeContext, Error> {
        // `EAGLRenderingAPI` is numbered by major version.
        let api = version.major as usize;
        let context: *mut AnyObject = unsafe {
            let context: *mut AnyObject = msg_send![class!(EAGLContext), alloc];
            msg_send![context, initWithAPI: api]
        };

        if context.is_null() {
            // `initWithAPI:` returns nil for an API the device doesn't have.
            return Err(Error::UnsupportedGLVersion);
        }
        // Already retained by the alloc call.
        Ok(NativeContext(context))
    }

    fn destroy_native_context(&mut self, context: &mut NativeContext) -> Result<(), Error> {
        if context.0.is_null() {
            return Ok(());
        }
        unsafe {
            if EAGLPlatform::current_context() == context.0 {
                let succeeded: Bool =
                    msg_send![class!(EAGLContext), setCurrentContext: ptr::null_mut::<AnyObject>()];
                if !succeeded.as_bool() {
                    return Err(Error::ContextDestructionFailed(WindowingApiError::BadContext));
                }
            }
            objc2::ffi::objc_release(context.0);
        }
        context.0 = ptr::null_mut();
        Ok(())
    }

    fn make_native_context_current(&self, context: &NativeContext) -> Result<(), Error> {
        if context.0.is_null() {
            return Err(Error::MakeCurrentFailed(WindowingApiError::BadContext));
        }
        if EAGLPlatform::current_context() == context.0 {
            return Ok(());
        }
        let succeeded: Bool = unsafe { msg_send![class!(EAGLContext), setCurrentContext: context.0] };
        if succeeded.as_bool() {
            Ok(())
        } else {
            Err(Error::MakeCurrentFailed(WindowingApiError::BadContext))
        }
    }

    fn get_proc_address(&self, symbol_name: &str) -> *const c_void {
        let address = self.lookup(symbol_name);
        if !address.is_null() {
            return address;
        }
        // OpenGL ES 1.x only has the framebuffer entry points as `OES` extensions.
        self.lookup(&format!("{}OES", symbol_name))
    }

    fn drawable_size(&self, drawable: &NativeWidget) -> Size2D<i32> {
        if drawable.layer.is_null() {
            return Size2D::zero();
        }
        let (bounds, scale): (CGRect, CGFloat) = unsafe {
            (
                msg_send![drawable.layer, bounds],
                msg_send![drawable.layer, contentsScale],
            )
        };
        Size2D::new(
            (bounds.size.width * scale).round() as i32,
            (bounds.size.height * scale).round() as i32,
        )
    }

    fn renderbuffer_storage_from_drawable(
        &self,
        context: &NativeContext,
        drawable: &NativeWidget,
        color_format: ColorFormat,
    ) -> Result<(), Error> {
        if drawable.layer.is_null() {
            return Err(Error::RenderbufferStorageFailed(WindowingApiError::BadDrawable));
        }
        debug!("binding layer storage as {:?}", color_format);
        self.set_drawable_color_format(drawable, color_format)?;
        let target = gl::RENDERBUFFER as usize;
        let succeeded: Bool = unsafe {
            msg_send![context.0, renderbufferStorage: target, fromDrawable: drawable.layer]
        };
        if succeeded.as_bool() {
            Ok(())
        } else {
            Err(Error::RenderbufferStorageFailed(WindowingApiError::BadDrawable))
        }
    }

    fn present_bound_renderbuffer(&self, context: &NativeContext) -> Result<(), Error> {
        let target = gl::RENDERBUFFER as usize;
        let succeeded: Bool = unsafe { msg_send![context.0, presentRenderbuffer: target] };
        if succeeded.as_bool() {
            Ok(())
        } else {
            Err(Error::PresentFailed(WindowingApiError::Failed))
        }
    }
}
