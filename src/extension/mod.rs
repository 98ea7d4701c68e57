use std::{borrow::Cow, path::Path};

use crate::{GlslcBuildError, ShaderSource};

#[cfg(feature = "spirv_check_ext")]
pub mod spirv_check;

/// An extension that runs before and after all shaders are built and after each file is built
pub trait GlslcBuildExtension {
    /// The name to report in errors as the source extension
    fn name<'n>(&self) -> Cow<'n, str>;

    /// Called once before any file in the shader dir is looked at
    ///
    /// ### Args
    /// * `shader_dir` - the dir of the shaders we are building
    fn init_root(&mut self, _shader_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    /// Called once after every file in the shader dir was handled, also when some failed to compile
    ///
    /// ### Args
    /// * `shader_dir` - the dir of the shaders we are building
    fn exit_root(&mut self, _shader_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    /// Run after a shader compiled successfully
    ///
    /// ### Args
    /// * `source` - the shader source that was compiled
    /// * `spv_path` - the path to the compiled artifact
    fn post_build(
        &mut self,
        source: &ShaderSource,
        spv_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// Build a boxed slice of extensions to pass to [`build_shader_dir`](crate::build_shader_dir)
#[macro_export]
macro_rules! extensions {
    ($($ext:expr),* $(,)?) => {
        &mut [$(::std::boxed::Box::new($ext) as ::std::boxed::Box<dyn $crate::GlslcBuildExtension>),*]
    };
}

/// Util for wrapping an extensions error in a [`GlslcBuildError`]
pub(crate) fn extension_error(
    ext: &dyn GlslcBuildExtension,
    error: Box<dyn std::error::Error>,
) -> GlslcBuildError {
    GlslcBuildError::ExtensionErr {
        extension_name: ext.name().into_owned(),
        error,
    }
}
