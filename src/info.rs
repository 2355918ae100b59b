// es-renderer/src/info.rs
//
//! OpenGL information.

/// The API (OpenGL or OpenGL ES).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GLApi {
    /// OpenGL (full or desktop OpenGL).
    GL,
    /// OpenGL ES (embedded OpenGL).
    GLES,
}

/// Describes the OpenGL ES version that is requested when a context is created.
///
/// The major version selects the renderer generation: 1 is the fixed-function pipeline, 2 and
/// up are the programmable pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GLVersion {
    /// The major OpenGL version (e.g. 1 in 1.1).
    pub major: u8,
    /// The minor OpenGL version (e.g. 1 in 1.1).
    pub minor: u8,
}

impl GLVersion {
    /// Creates a GL version structure with the given major and minor version numbers.
    #[inline]
    pub fn new(major: u8, minor: u8) -> GLVersion {
        GLVersion { major, minor }
    }

    /// Returns true if this version only offers the fixed-function pipeline.
    #[inline]
    pub fn is_fixed_function(self) -> bool {
        self.major == 1
    }

    /// Parses a `GL_VERSION` string such as `"OpenGL ES-CM 1.1 Apple A7 GPU"`.
    pub(crate) fn parse(version_string: &str) -> Option<GLVersion> {
        let version_string = version_string
            .trim_start_matches("OpenGL ES")
            .trim_start_matches(|c: char| c == '-' || c.is_ascii_alphabetic())
            .trim_start();
        let mut version_string_iter = version_string.split(|c| c == '.' || c == ' ');
        let major = version_string_iter.next()?.parse().ok()?;
        let minor = version_string_iter.next()?.parse().ok()?;
        Some(GLVersion { major, minor })
    }
}

impl Default for GLVersion {
    #[inline]
    fn default() -> GLVersion {
        GLVersion::new(1, 1)
    }
}
