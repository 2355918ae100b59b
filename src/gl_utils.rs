// es-renderer/src/gl_utils.rs
//
//! Various OpenGL utilities used by the GL device.

use glow::{HasContext, NativeFramebuffer, NativeRenderbuffer};

use crate::gl;
use crate::Gl;
use crate::WindowingApiError;

pub(crate) fn unbind_framebuffer_if_necessary(gl: &Gl, framebuffer_object: NativeFramebuffer) {
    unsafe {
        // Unbind the framebuffer if it's bound. OpenGL ES 1.x has no separate draw and read
        // bindings.
        let current_framebuffer = gl.get_parameter_framebuffer(gl::FRAMEBUFFER_BINDING);
        if current_framebuffer == Some(framebuffer_object) {
            gl.bind_framebuffer(gl::FRAMEBUFFER, None);
        }
    }
}

pub(crate) fn destroy_framebuffer(gl: &Gl, framebuffer_object: NativeFramebuffer) {
    unbind_framebuffer_if_necessary(gl, framebuffer_object);
    unsafe {
        gl.delete_framebuffer(framebuffer_object);
    }
}

pub(crate) fn destroy_renderbuffer(gl: &Gl, renderbuffer_object: NativeRenderbuffer) {
    unsafe {
        gl.bind_renderbuffer(gl::RENDERBUFFER, None);
        gl.delete_renderbuffer(renderbuffer_object);
    }
}

// A lost context may keep reporting errors, so draining is bounded.
const MAX_QUEUED_GL_ERRORS: usize = 8;

/// Drains the GL error queue, returning the first error if there was one.
pub(crate) fn take_gl_error(gl: &Gl) -> Option<WindowingApiError> {
    let mut first_error = None;
    for _ in 0..MAX_QUEUED_GL_ERRORS {
        let error = unsafe { gl.get_error() };
        if error == gl::NO_ERROR {
            break;
        }
        first_error.get_or_insert(WindowingApiError::from_gl_error(error));
    }
    first_error
}
