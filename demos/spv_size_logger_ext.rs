use std::path::{Path, PathBuf};

use glslc_build::extension::spirv_check::SpirvCheckExtension;
use glslc_build::{
    BuildOptions, GlslcBuildError, GlslcBuildExtension, ShaderSource, build_shader_dir, extensions,
};

struct SpvSizeLogger {
    shader_dir: PathBuf,
    messages: Vec<String>,
}

impl SpvSizeLogger {
    fn new() -> Self {
        Self {
            shader_dir: PathBuf::new(),
            messages: Vec::new(),
        }
    }
}

impl GlslcBuildExtension for SpvSizeLogger {
    fn name<'n>(&self) -> std::borrow::Cow<'n, str> {
        "SpvSizeLogger".into()
    }

    fn init_root(&mut self, shader_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
        self.shader_dir = shader_dir.to_owned();
        Ok(())
    }

    fn exit_root(&mut self, _shader_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
        println!("name | source_lines | spirv_words");
        println!("----------------------------------------------------");
        for message in &self.messages {
            println!("{message}");
        }

        Ok(())
    }

    fn post_build(
        &mut self,
        source: &ShaderSource,
        spv_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let source_lines = std::fs::read_to_string(self.shader_dir.join(&source.path))?
            .lines()
            .count();
        let spirv_words = std::fs::metadata(spv_path)?.len() / 4;

        self.messages
            .push(format!("{} | {source_lines} | {spirv_words}", source.path.to_string_lossy()));

        Ok(())
    }
}

fn main() -> Result<(), GlslcBuildError> {
    build_shader_dir(
        "./shaders",
        &BuildOptions::default(),
        extensions![SpirvCheckExtension, SpvSizeLogger::new()],
    )?;

    Ok(())
}
