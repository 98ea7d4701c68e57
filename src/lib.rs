use std::{
    ffi::OsString,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use itertools::Itertools;

pub mod compiler;
pub mod extension;
pub mod options;
pub mod source;

pub use compiler::{CompilerError, GlslcProcess, Invocation, ShaderCompiler};
pub use extension::GlslcBuildExtension;
pub use options::{BuildOptions, EntryOrder, FailurePolicy};
pub use source::{ShaderKind, ShaderSource, classify, stem};

use crate::extension::extension_error;


/// Init logging for better error msgs, `RUST_LOG` overrides the default `info` level
#[cfg(feature = "logging")]
pub fn init_build_logger() {
    use log::LevelFilter;

    // tests may call this more than once
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

#[derive(Debug, thiserror::Error)]
pub enum GlslcBuildError {
    #[error(transparent)]
    IoErr(#[from] std::io::Error),
    #[error("failed to list shader dir {}: {source}", .path.display())]
    DirectoryListing {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} shader(s) failed to compile:\n{}", .0.len(), .0.iter().join("\n"))]
    CompileFailures(Vec<CompileFailure>),
    #[error("Extension {} error: {}", .extension_name, .error)]
    ExtensionErr {
        extension_name: String,
        error: Box<dyn std::error::Error>,
    },
}

/// A shader the compiler could not be started for or that it rejected
#[derive(Debug, thiserror::Error)]
#[error("{} -> {}: {reason}", .input.to_string_lossy(), .output.display())]
pub struct CompileFailure {
    pub input: OsString,
    pub output: PathBuf,
    pub reason: Box<dyn std::error::Error>,
}

/// What a finished build did
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub compiled: usize,
    /// Files that aren't `.vert` or `.frag`
    pub skipped: usize,
    /// Only ever non-empty with [`FailurePolicy::Continue`]
    pub failures: Vec<CompileFailure>,
}

/// Compile every `.vert` and `.frag` file directly inside `shader_dir` with `glslc`.
///
/// ## Args
/// * `shader_dir` - Dir of your shaders, it is not recursed into
/// * `options` - See [`BuildOptions`]
/// * `extensions` - An array of extensions you would like to run, see [`GlslcBuildExtension`]
pub fn build_shader_dir(
    shader_dir: impl AsRef<Path>,
    options: &BuildOptions,
    extensions: &mut [Box<dyn GlslcBuildExtension>],
) -> Result<BuildSummary, GlslcBuildError> {
    build_shader_dir_with(shader_dir, options, &mut GlslcProcess, extensions)
}

/// [`build_shader_dir`] with your own [`ShaderCompiler`] doing the invocations
pub fn build_shader_dir_with(
    shader_dir: impl AsRef<Path>,
    options: &BuildOptions,
    compiler: &mut dyn ShaderCompiler,
    extensions: &mut [Box<dyn GlslcBuildExtension>],
) -> Result<BuildSummary, GlslcBuildError> {
    build_shader_dir_to(shader_dir, options, compiler, extensions, &mut std::io::stdout())
}

/// [`build_shader_dir_with`] writing the echoed invocations and cargo directives to `out`
/// instead of stdout. Each invocation line is written before the compiler is started.
pub fn build_shader_dir_to(
    shader_dir: impl AsRef<Path>,
    options: &BuildOptions,
    compiler: &mut dyn ShaderCompiler,
    extensions: &mut [Box<dyn GlslcBuildExtension>],
    out: &mut dyn Write,
) -> Result<BuildSummary, GlslcBuildError> {
    let shader_dir = shader_dir.as_ref();
    let file_names = list_shader_files(shader_dir, options.order)?;

    let compiler_path = crate::compiler::resolve_compiler(&options.compiler)?;
    let out_dir = match &options.out_dir {
        Some(out_dir) => {
            fs::create_dir_all(out_dir)?;
            Some(std::path::absolute(out_dir)?)
        }
        None => None,
    };

    for ext in extensions.iter_mut() {
        ext.init_root(shader_dir)
            .map_err(|e| extension_error(&**ext, e))?;
    }

    if options.cargo_directives {
        // new shaders show up as a change of the dir
        writeln!(out, "cargo::rerun-if-changed={}", shader_dir.display())?;
    }

    let mut summary = BuildSummary::default();

    for file_name in file_names {
        let source = ShaderSource::new(file_name);
        let Some(artifact_name) = source.artifact_name() else {
            summary.skipped += 1;
            continue;
        };

        if options.cargo_directives {
            writeln!(out, "cargo::rerun-if-changed={}", shader_dir.join(&source.path).display())?;
        }

        let invocation = Invocation {
            compiler: compiler_path.clone(),
            work_dir: shader_dir.to_owned(),
            input: source.path.clone(),
            output: match &out_dir {
                Some(out_dir) => out_dir.join(&artifact_name),
                None => PathBuf::from(&artifact_name),
            },
        };

        if options.echo_invocations {
            writeln!(out, "{invocation}")?;
            out.flush()?;
        }
        #[cfg(feature = "logging")]
        log::debug!("compiling {} shader {}", source.kind, source.path.to_string_lossy());

        match compiler.compile(&invocation) {
            Ok(()) => {
                summary.compiled += 1;

                let spv_path = invocation.output_path();
                for ext in extensions.iter_mut() {
                    ext.post_build(&source, &spv_path)
                        .map_err(|e| extension_error(&**ext, e))?;
                }
            }
            Err(reason) => {
                let failure = CompileFailure {
                    input: source.path,
                    output: invocation.output,
                    reason,
                };

                #[cfg(feature = "logging")]
                log::warn!("{failure}");
                if options.cargo_directives && options.on_failure == FailurePolicy::Continue {
                    writeln!(out, "cargo::warning={failure}")?;
                }

                summary.failures.push(failure);
            }
        }
    }

    for ext in extensions.iter_mut() {
        ext.exit_root(shader_dir)
            .map_err(|e| extension_error(&**ext, e))?;
    }

    match options.on_failure {
        FailurePolicy::Report if !summary.failures.is_empty() => {
            Err(GlslcBuildError::CompileFailures(summary.failures))
        }
        _ => Ok(summary),
    }
}

/// Names of the regular files directly in `shader_dir`, links are followed
fn list_shader_files(shader_dir: &Path, order: EntryOrder) -> Result<Vec<OsString>, GlslcBuildError> {
    let entries = fs::read_dir(shader_dir).map_err(|source| GlslcBuildError::DirectoryListing {
        path: shader_dir.to_owned(),
        source,
    })?;

    let file_names = entries
        .filter_map(|entry| entry.ok())
        // `fs::metadata` follows symlinks, a broken link is not a file
        .filter(|entry| fs::metadata(entry.path()).is_ok_and(|metadata| metadata.is_file()))
        .map(|entry| entry.file_name());

    Ok(match order {
        EntryOrder::Sorted => file_names.sorted().collect(),
        EntryOrder::Listing => file_names.collect(),
    })
}
