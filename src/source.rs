use std::{
    ffi::{OsStr, OsString},
    fmt::Display,
};

/// What a shader source compiles to, decided only by its file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
    Unrecognized,
}

impl ShaderKind {
    /// Suffix appended to the stem of the compiled artifact, `None` for files we don't compile.
    pub fn artifact_suffix(self) -> Option<&'static str> {
        match self {
            ShaderKind::Vertex => Some("_vert.spv"),
            ShaderKind::Fragment => Some("_frag.spv"),
            ShaderKind::Unrecognized => None,
        }
    }
}

impl Display for ShaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
            ShaderKind::Unrecognized => f.write_str("unrecognized"),
        }
    }
}

/// Everything before the *first* `.` of `path`.
///
/// This is not an extension-aware split, `post.fx.frag` has the stem `post`.
/// Artifact names depend on it, so don't "fix" it to strip only the last extension.
/// Works on the raw name, a file name doesn't have to be UTF-8.
pub fn stem<P: AsRef<OsStr> + ?Sized>(path: &P) -> &OsStr {
    let path = path.as_ref();
    let bytes = path.as_encoded_bytes();

    match bytes.iter().position(|&b| b == b'.') {
        // SAFETY: `bytes` came from `as_encoded_bytes` and is cut right before an ASCII `.`
        Some(dot) => unsafe { OsStr::from_encoded_bytes_unchecked(&bytes[..dot]) },
        None => path,
    }
}

/// Classify a file name by its literal `.vert` / `.frag` suffix
pub fn classify<P: AsRef<OsStr> + ?Sized>(path: &P) -> ShaderKind {
    let bytes = path.as_ref().as_encoded_bytes();

    if bytes.ends_with(b".vert") {
        ShaderKind::Vertex
    } else if bytes.ends_with(b".frag") {
        ShaderKind::Fragment
    } else {
        ShaderKind::Unrecognized
    }
}

/// A file found in the shader dir, lives for one iteration of the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    /// The file name as listed in the shader dir
    pub path: OsString,
    pub stem: OsString,
    pub kind: ShaderKind,
}

impl ShaderSource {
    pub fn new(path: impl Into<OsString>) -> Self {
        let path = path.into();

        Self {
            stem: stem(&path).to_owned(),
            kind: classify(&path),
            path,
        }
    }

    /// The name of the compiled artifact, e.g. `triangle_vert.spv` for `triangle.vert`
    pub fn artifact_name(&self) -> Option<OsString> {
        self.kind.artifact_suffix().map(|suffix| {
            let mut name = self.stem.clone();
            name.push(suffix);
            name
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_truncates_at_first_dot() {
        assert_eq!(stem("a.b.vert"), "a");
        assert_eq!(stem("triangle.vert"), "triangle");
        assert_eq!(stem("Makefile"), "Makefile");
        assert_eq!(stem(".vert"), "");
    }

    #[test]
    fn classify_by_literal_suffix() {
        assert_eq!(classify("triangle.vert"), ShaderKind::Vertex);
        assert_eq!(classify("triangle.frag"), ShaderKind::Fragment);
        assert_eq!(classify("triangle.comp"), ShaderKind::Unrecognized);
        assert_eq!(classify("triangle.VERT"), ShaderKind::Unrecognized);
        assert_eq!(classify("vert"), ShaderKind::Unrecognized);
        assert_eq!(classify("notes.vert.txt"), ShaderKind::Unrecognized);
    }

    #[test]
    fn artifact_names() {
        assert_eq!(ShaderSource::new("triangle.vert").artifact_name().as_deref(), Some(OsStr::new("triangle_vert.spv")));
        assert_eq!(ShaderSource::new("triangle.frag").artifact_name().as_deref(), Some(OsStr::new("triangle_frag.spv")));
        // the `.fx` segment goes with everything after the first dot
        assert_eq!(ShaderSource::new("post.fx.frag").artifact_name().as_deref(), Some(OsStr::new("post_frag.spv")));
        assert_eq!(ShaderSource::new(".vert").artifact_name().as_deref(), Some(OsStr::new("_vert.spv")));
        assert_eq!(ShaderSource::new("readme.txt").artifact_name(), None);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_keep_their_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let source = ShaderSource::new(OsStr::from_bytes(b"bad\xff.x.vert"));
        assert_eq!(source.kind, ShaderKind::Vertex);
        assert_eq!(source.stem.as_bytes(), b"bad\xff");
        assert_eq!(source.artifact_name().unwrap().as_bytes(), b"bad\xff_vert.spv");
    }
}
