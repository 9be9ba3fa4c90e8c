/// Per-stage constant scratch memory
///
/// Uniform values are written here between draws, before or after the
/// pipeline is activated, and copied into the pipeline's constant buffers
/// by `ActivePipelineState::upload_constants`.
/// Every write goes to each stage that declares the uniform, at the offset
/// recorded in its `ConstantLocation`.

use glam::{Mat3, Mat4, Vec4};

use crate::graphics_device::{constant_buffer_size, ShaderStage};
use crate::pipeline::{ConstantLocation, PipelineState};

/// Scratch bytes of the five shader stages
#[derive(Debug, Default)]
pub struct ConstantScratch {
    stages: [Vec<u8>; ShaderStage::COUNT],
}

impl ConstantScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow each stage's scratch to the size of `pipeline`'s constant buffer
    ///
    /// Never shrinks, so values written for an earlier, larger pipeline stay
    /// allocated. New bytes are zeroed.
    pub(crate) fn reserve_for(&mut self, pipeline: &PipelineState) {
        let Some(compiled) = pipeline.compiled() else { return };
        for stage in ShaderStage::ALL {
            let size = compiled.constant_buffer_size(stage) as usize;
            let scratch = &mut self.stages[stage.index()];
            if scratch.len() < size {
                scratch.resize(size, 0);
            }
        }
    }

    /// Current scratch bytes of a stage
    pub fn stage_data(&self, stage: ShaderStage) -> &[u8] {
        &self.stages[stage.index()]
    }

    // ===== SCALARS =====

    /// Booleans are 32-bit in constant blocks
    pub fn set_bool(&mut self, location: &ConstantLocation, value: bool) {
        self.set_int(location, value as i32);
    }

    pub fn set_int(&mut self, location: &ConstantLocation, value: i32) {
        self.write(location, bytemuck::bytes_of(&value));
    }

    pub fn set_float(&mut self, location: &ConstantLocation, value: f32) {
        self.write(location, bytemuck::bytes_of(&value));
    }

    // ===== VECTORS =====

    pub fn set_float2(&mut self, location: &ConstantLocation, x: f32, y: f32) {
        self.set_floats(location, &[x, y]);
    }

    pub fn set_float3(&mut self, location: &ConstantLocation, x: f32, y: f32, z: f32) {
        self.set_floats(location, &[x, y, z]);
    }

    pub fn set_float4(&mut self, location: &ConstantLocation, x: f32, y: f32, z: f32, w: f32) {
        self.set_floats(location, &[x, y, z, w]);
    }

    /// Float array, packed tightly
    pub fn set_floats(&mut self, location: &ConstantLocation, values: &[f32]) {
        self.write(location, bytemuck::cast_slice(values));
    }

    pub fn set_vec4(&mut self, location: &ConstantLocation, value: Vec4) {
        self.write(location, bytemuck::bytes_of(&value));
    }

    // ===== MATRICES =====

    /// 3x3 matrix, column-major with every column padded to 16 bytes
    pub fn set_matrix3(&mut self, location: &ConstantLocation, value: &Mat3) {
        let columns = [
            value.x_axis.extend(0.0),
            value.y_axis.extend(0.0),
            value.z_axis.extend(0.0),
        ];
        self.write(location, bytemuck::cast_slice(&columns));
    }

    /// 4x4 matrix, column-major
    pub fn set_matrix4(&mut self, location: &ConstantLocation, value: &Mat4) {
        self.write(location, bytemuck::bytes_of(value));
    }

    /// Copy `bytes` into every declaring stage, clipped to the declared size
    ///
    /// A stage's scratch grows to cover the write, so values may be set
    /// before the pipeline that declares them is activated.
    fn write(&mut self, location: &ConstantLocation, bytes: &[u8]) {
        for (stage, constant) in location.declared() {
            let scratch = &mut self.stages[stage.index()];
            let start = constant.offset as usize;
            let len = bytes.len().min(constant.size as usize);
            let end = start + len;
            if scratch.len() < end {
                scratch.resize(constant_buffer_size(end as u64) as usize, 0);
            }
            scratch[start..end].copy_from_slice(&bytes[..len]);
        }
    }
}

#[cfg(test)]
#[path = "constants_tests.rs"]
mod tests;
