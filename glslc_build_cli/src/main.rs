use std::process::ExitCode;

use glslc_build::{BuildOptions, build_shader_dir, extensions, init_build_logger};

fn main() -> ExitCode {
    init_build_logger();

    match build_shader_dir(".", &BuildOptions::default(), extensions![]) {
        Ok(summary) => {
            log::info!(
                "compiled {} shader(s), skipped {} other file(s)",
                summary.compiled,
                summary.skipped
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
