/// Binding resolver - uniform and sampler names to per-stage locations
///
/// Works on the decoded shader tables only, so it can be used before the
/// pipeline is compiled. Lookup misses are logged, never errors.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::graphics_device::ShaderStage;
use crate::pipeline::PipelineState;
use crate::pipeline_warn;
use crate::shader::ShaderConstant;

/// Sampler-miss warnings logged before giving up
const TEXTURE_MISS_WARNING_LIMIT: u32 = 10;

/// Process-wide count of sampler-miss warnings
static TEXTURE_MISS_WARNINGS: AtomicU32 = AtomicU32::new(0);

// ===== CONSTANT LOCATION =====

/// Where a uniform lives in each stage's constant block
///
/// Stages that do not declare the uniform (or are absent) hold an all-zero record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConstantLocation {
    stages: [ShaderConstant; ShaderStage::COUNT],
}

impl ConstantLocation {
    /// Record for one stage
    pub fn stage(&self, stage: ShaderStage) -> ShaderConstant {
        self.stages[stage.index()]
    }

    pub fn offset(&self, stage: ShaderStage) -> u32 {
        self.stages[stage.index()].offset
    }

    pub fn size(&self, stage: ShaderStage) -> u32 {
        self.stages[stage.index()].size
    }

    /// Whether any stage declares the uniform
    pub fn is_found(&self) -> bool {
        self.stages.iter().any(|c| c.size > 0)
    }

    /// Stages declaring the uniform, with their records
    pub fn declared(&self) -> impl Iterator<Item = (ShaderStage, ShaderConstant)> + '_ {
        ShaderStage::ALL
            .into_iter()
            .zip(self.stages.iter().copied())
            .filter(|(_, constant)| constant.size > 0)
    }
}

// ===== TEXTURE UNIT =====

/// Texture unit of a sampler and the stage declaring it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureUnit {
    /// Unit index, -1 when not found
    pub unit: i32,
    /// Vertex or Fragment, None when not found
    pub stage: Option<ShaderStage>,
}

impl TextureUnit {
    /// Sentinel returned for unknown samplers
    pub const NOT_FOUND: Self = Self { unit: -1, stage: None };

    pub fn is_found(&self) -> bool {
        self.unit >= 0
    }
}

// ===== RESOLUTION =====

impl PipelineState {
    /// Locate a uniform in every stage
    ///
    /// Stages are visited in `ShaderStage::ALL` order. A name declared by
    /// no stage yields an all-zero location and a warning.
    pub fn resolve_constant(&self, name: &str) -> ConstantLocation {
        let mut location = ConstantLocation::default();
        for stage in ShaderStage::ALL {
            if let Some(constant) = self.shader(stage).and_then(|shader| shader.constant(name)) {
                location.stages[stage.index()] = *constant;
            }
        }

        if !location.is_found() {
            pipeline_warn!("galaxy3d::BindingResolver", "Uniform {} not found", name);
        }
        location
    }

    /// Locate a sampler in the vertex stage, then the fragment stage
    ///
    /// A trailing `[d]` (single digit) selects an element of a sampler
    /// array: `resolve_texture("shadow[2]")` is the unit of `shadow` plus 2.
    /// Unknown samplers yield `TextureUnit::NOT_FOUND`.
    pub fn resolve_texture(&self, name: &str) -> TextureUnit {
        let (base_name, unit_offset) = split_array_index(name);

        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            if let Some(unit) = self.shader(stage).and_then(|shader| shader.texture(base_name)) {
                return TextureUnit {
                    unit: unit as i32 + unit_offset,
                    stage: Some(stage),
                };
            }
        }

        warn_texture_miss(base_name);
        TextureUnit::NOT_FOUND
    }
}

/// Split `name[d]` into (`name`, d); any other name is returned whole with offset 0
fn split_array_index(name: &str) -> (&str, i32) {
    let bytes = name.as_bytes();
    let len = bytes.len();
    if len >= 4 && bytes[len - 1] == b']' && bytes[len - 3] == b'[' && bytes[len - 2].is_ascii_digit() {
        (&name[..len - 3], (bytes[len - 2] - b'0') as i32)
    } else {
        (name, 0)
    }
}

fn warn_texture_miss(name: &str) {
    let previous = TEXTURE_MISS_WARNINGS
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |count| {
            (count <= TEXTURE_MISS_WARNING_LIMIT).then_some(count + 1)
        });

    match previous {
        Ok(count) if count < TEXTURE_MISS_WARNING_LIMIT => {
            pipeline_warn!("galaxy3d::BindingResolver", "Sampler {} not found", name);
        }
        Ok(_) => {
            pipeline_warn!("galaxy3d::BindingResolver", "Giving up on sampler not found messages");
        }
        Err(_) => {}
    }
}

#[cfg(test)]
#[path = "binding_resolver_tests.rs"]
mod tests;
