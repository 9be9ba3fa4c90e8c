/// Shader entity
///
/// A `Shader` is built once from a compiled shader blob: the reflection
/// header is decoded into lookup tables, the remaining bytecode is kept and
/// handed to the device to create the backend shader module. The entity is
/// immutable afterwards and shared between pipelines through `Arc<Shader>`.

use std::fmt;

use crate::config::Config;
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, ShaderModule, ShaderStage};
use crate::shader::{ShaderConstant, ShaderReflection};
use crate::{pipeline_debug, pipeline_error};

pub struct Shader {
    stage: ShaderStage,
    reflection: ShaderReflection,
    bytecode: Vec<u8>,
    module: Box<dyn ShaderModule>,
}

impl Shader {
    /// Create a shader from a compiled blob (reflection header + bytecode)
    ///
    /// # Arguments
    ///
    /// * `device` - Device creating the backend shader module
    /// * `stage` - Pipeline stage the blob was compiled for
    /// * `blob` - Reflection header followed by the bytecode
    /// * `config` - Supplies the constant record layout of the header
    ///
    /// # Errors
    ///
    /// `Error::MalformedShader` when the header cannot be decoded, or the
    /// device error when module creation fails.
    pub fn from_blob(
        device: &mut dyn GraphicsDevice,
        stage: ShaderStage,
        blob: &[u8],
        config: &Config,
    ) -> Result<Self> {
        let (reflection, bytecode) = ShaderReflection::decode(blob, config.constant_layout)
            .map_err(|e| {
                pipeline_error!("galaxy3d::Shader", "Cannot decode {:?} shader: {}", stage, e);
                e
            })?;
        Self::from_parts(device, stage, reflection, bytecode.to_vec())
    }

    /// Create a shader from already decoded tables and its bytecode
    pub fn from_parts(
        device: &mut dyn GraphicsDevice,
        stage: ShaderStage,
        reflection: ShaderReflection,
        bytecode: Vec<u8>,
    ) -> Result<Self> {
        let module = device.create_shader_module(stage, &bytecode).map_err(|e| {
            pipeline_error!("galaxy3d::Shader", "Failed to create {:?} shader module: {}", stage, e);
            e
        })?;

        pipeline_debug!("galaxy3d::Shader",
            "{:?} shader: {} attributes, {} textures, {} constants ({} bytes), {} bytes of bytecode",
            stage,
            reflection.attributes().len(),
            reflection.textures().len(),
            reflection.constants().len(),
            reflection.constants_size(),
            bytecode.len());

        Ok(Self { stage, reflection, bytecode, module })
    }

    // ===== ACCESSORS =====

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn reflection(&self) -> &ShaderReflection {
        &self.reflection
    }

    /// Input location of a vertex attribute
    pub fn attribute(&self, name: &str) -> Option<u32> {
        self.reflection.attributes().get(name).copied()
    }

    /// Texture unit of a sampler
    pub fn texture(&self, name: &str) -> Option<u32> {
        self.reflection.textures().get(name).copied()
    }

    /// Constant record of a uniform
    pub fn constant(&self, name: &str) -> Option<&ShaderConstant> {
        self.reflection.constants().get(name)
    }

    /// Size in bytes of the stage constant block (0 when the stage has no constants)
    pub fn constants_size(&self) -> u32 {
        self.reflection.constants_size()
    }

    /// Raw backend bytecode (reflection header stripped)
    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// Backend shader module created from the bytecode
    pub fn module(&self) -> &dyn ShaderModule {
        self.module.as_ref()
    }
}

impl fmt::Debug for Shader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("stage", &self.stage)
            .field("reflection", &self.reflection)
            .field("bytecode_len", &self.bytecode.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
