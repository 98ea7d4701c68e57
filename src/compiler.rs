use std::{
    ffi::OsString,
    fmt::Display,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

/// One call of the shader compiler: `<compiler> <input> -o <output>` run in `work_dir`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub compiler: PathBuf,
    /// The shader dir, the compiler is started inside of it
    pub work_dir: PathBuf,
    /// File name of the source, relative to `work_dir`
    pub input: OsString,
    /// Relative to `work_dir` unless an absolute out dir was configured
    pub output: PathBuf,
}

impl Invocation {
    /// Where the artifact ends up, independent of the compilers working dir
    pub fn output_path(&self) -> PathBuf {
        self.work_dir.join(&self.output)
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} -o {}",
            self.compiler.display(),
            self.input.to_string_lossy(),
            self.output.display()
        )
    }
}

/// Runs a single [`Invocation`] to completion.
pub trait ShaderCompiler {
    fn compile(&mut self, invocation: &Invocation) -> Result<(), Box<dyn std::error::Error>>;
}

#[derive(Debug, thiserror::Error)]
pub enum CompilerError {
    #[error("failed to start `{}`: {source}", .compiler.display())]
    Spawn {
        compiler: PathBuf,
        source: std::io::Error,
    },
    #[error("compiler {0}")]
    Exit(ExitStatus),
}

/// Spawns the compiler as a child process with inherited stdio and waits for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlslcProcess;

impl ShaderCompiler for GlslcProcess {
    fn compile(&mut self, invocation: &Invocation) -> Result<(), Box<dyn std::error::Error>> {
        let status = Command::new(&invocation.compiler)
            .current_dir(&invocation.work_dir)
            .arg(&invocation.input)
            .arg("-o")
            .arg(&invocation.output)
            .status()
            .map_err(|source| CompilerError::Spawn {
                compiler: invocation.compiler.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CompilerError::Exit(status).into())
        }
    }
}

/// Programs given as a path (`bin/glslc`) would be looked up relative to the shader dir
/// once the child changes directory, so anchor them to ours. Bare names go through `PATH`.
pub(crate) fn resolve_compiler(compiler: &Path) -> std::io::Result<PathBuf> {
    if compiler.is_relative() && compiler.components().count() > 1 {
        std::path::absolute(compiler)
    } else {
        Ok(compiler.to_owned())
    }
}
