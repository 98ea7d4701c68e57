use std::path::PathBuf;

/// Order files of the shader dir are compiled in
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrder {
    /// Lexicographic by file name, the same on every platform
    #[default]
    Sorted,
    /// Whatever order the OS lists the directory in
    Listing,
}

/// What a failed compiler invocation does to the build
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Compile every file, then fail with all the failures
    #[default]
    Report,
    /// Log the failure and carry on, the build still succeeds
    Continue,
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// The compiler to run, looked up on `PATH` when it's a bare name
    pub compiler: PathBuf,
    /// Write artifacts here instead of next to their sources
    pub out_dir: Option<PathBuf>,
    pub order: EntryOrder,
    pub on_failure: FailurePolicy,
    /// Print each invocation to stdout before running it
    pub echo_invocations: bool,
    /// Print `cargo::` directives, for use from a `build.rs`
    pub cargo_directives: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from("glslc"),
            out_dir: None,
            order: EntryOrder::default(),
            on_failure: FailurePolicy::default(),
            echo_invocations: true,
            cargo_directives: false,
        }
    }
}

impl BuildOptions {
    /// Options for a build script, artifacts go to `OUT_DIR` when cargo set it
    pub fn for_build_script() -> Self {
        Self {
            out_dir: std::env::var_os("OUT_DIR").map(PathBuf::from),
            cargo_directives: true,
            ..Default::default()
        }
    }
}
