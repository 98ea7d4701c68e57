use std::{fs, path::Path};

use crate::{GlslcBuildExtension, ShaderSource};

/// First word of every SPIR-V module
pub const SPIRV_MAGIC: u32 = 0x0723_0203;
/// magic, version, generator, bound, schema
const HEADER_WORDS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum SpirvCheckError {
    #[error("{path}: {len} bytes is too short for a SPIR-V header")]
    TooShort { path: String, len: usize },
    #[error("{path}: {len} bytes is not a whole number of 32-bit words")]
    Misaligned { path: String, len: usize },
    #[error("{path}: bad SPIR-V magic number {found:#010x}")]
    BadMagic { path: String, found: u32 },
}

/// Checks every compiled artifact looks like a SPIR-V module a Vulkan driver will take,
/// catching a compiler that "succeeds" without writing real output.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpirvCheckExtension;

impl GlslcBuildExtension for SpirvCheckExtension {
    fn name<'n>(&self) -> std::borrow::Cow<'n, str> {
        "SpirvCheckExtension".into()
    }

    fn post_build(
        &mut self,
        _source: &ShaderSource,
        spv_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let spirv = fs::read(spv_path)?;
        check_spirv(&spirv, &spv_path.display().to_string())?;

        #[cfg(feature = "logging")]
        log::trace!("{} is valid SPIR-V ({} words)", spv_path.display(), spirv.len() / 4);

        Ok(())
    }
}

/// Validate the header of a SPIR-V blob, accepting either byte order
pub fn check_spirv(spirv: &[u8], path: &str) -> Result<(), SpirvCheckError> {
    let len = spirv.len();
    if len < HEADER_WORDS * 4 {
        return Err(SpirvCheckError::TooShort { path: path.to_owned(), len });
    }
    if len % 4 != 0 {
        return Err(SpirvCheckError::Misaligned { path: path.to_owned(), len });
    }

    let magic = [spirv[0], spirv[1], spirv[2], spirv[3]];
    if u32::from_le_bytes(magic) != SPIRV_MAGIC && u32::from_be_bytes(magic) != SPIRV_MAGIC {
        return Err(SpirvCheckError::BadMagic {
            path: path.to_owned(),
            found: u32::from_le_bytes(magic),
        });
    }

    Ok(())
}
