/// Pipeline state - a descriptor's shaders and fixed-function state,
/// plus the backend objects once compiled.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ShaderStage};
use crate::pipeline::compiler::compile_pipeline;
use crate::pipeline::{
    ColorBlendState, CompiledPipeline, DepthTestState, PipelineDesc, RasterizationState,
    StencilTestState, VertexStream,
};
use crate::shader::Shader;
use crate::{pipeline_error, pipeline_info};

/// A pipeline, compiled at most once
///
/// Shaders are indexed by `ShaderStage::index()`. Vertex and fragment slots
/// are always filled.
pub struct PipelineState {
    vertex_shader: Arc<Shader>,
    shaders: [Option<Arc<Shader>>; ShaderStage::COUNT],
    input_layout: Vec<VertexStream>,
    rasterization: RasterizationState,
    depth: DepthTestState,
    stencil: StencilTestState,
    color_blend: ColorBlendState,
    compiled: Option<CompiledPipeline>,
}

impl PipelineState {
    /// Create an uncompiled pipeline from a descriptor
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` when a shader sits in the slot of another stage.
    pub fn new(desc: PipelineDesc) -> Result<Self> {
        let vertex_shader = desc.vertex_shader;
        let shaders = [
            Some(vertex_shader.clone()),
            Some(desc.fragment_shader),
            desc.geometry_shader,
            desc.tessellation_control_shader,
            desc.tessellation_evaluation_shader,
        ];

        for (slot, shader) in ShaderStage::ALL.iter().zip(&shaders) {
            if let Some(shader) = shader {
                if shader.stage() != *slot {
                    let message = format!(
                        "{:?} shader given as the {:?} stage of a pipeline", shader.stage(), slot
                    );
                    pipeline_error!("galaxy3d::PipelineState", "{}", message);
                    return Err(Error::InvalidResource(message));
                }
            }
        }

        Ok(Self {
            vertex_shader,
            shaders,
            input_layout: desc.input_layout,
            rasterization: desc.rasterization,
            depth: desc.depth,
            stencil: desc.stencil,
            color_blend: desc.color_blend,
            compiled: None,
        })
    }

    /// Create every backend object of this pipeline
    ///
    /// # Errors
    ///
    /// * `Error::AlreadyCompiled` on a second call
    /// * `Error::PipelineCompilation` naming the sub-stage whose object could
    ///   not be created; the pipeline then stays uncompiled
    pub fn compile(&mut self, device: &mut dyn GraphicsDevice, config: &Config) -> Result<()> {
        if self.compiled.is_some() {
            pipeline_error!("galaxy3d::PipelineState", "compile() called on an already compiled pipeline");
            return Err(Error::AlreadyCompiled);
        }

        let compiled = compile_pipeline(self, device, config)?;
        pipeline_info!("galaxy3d::PipelineState",
            "Pipeline compiled ({} stages)", self.shaders.iter().flatten().count());
        self.compiled = Some(compiled);
        Ok(())
    }

    // ===== SHADERS =====

    /// Shader bound to a stage
    pub fn shader(&self, stage: ShaderStage) -> Option<&Arc<Shader>> {
        self.shaders[stage.index()].as_ref()
    }

    pub fn vertex_shader(&self) -> &Arc<Shader> {
        &self.vertex_shader
    }

    // ===== FIXED-FUNCTION STATE =====

    pub fn input_layout(&self) -> &[VertexStream] {
        &self.input_layout
    }

    pub fn rasterization(&self) -> &RasterizationState {
        &self.rasterization
    }

    pub fn depth(&self) -> &DepthTestState {
        &self.depth
    }

    pub fn stencil(&self) -> &StencilTestState {
        &self.stencil
    }

    pub fn color_blend(&self) -> &ColorBlendState {
        &self.color_blend
    }

    /// Stencil reference value bound with the depth/stencil state
    pub fn stencil_reference(&self) -> u32 {
        self.stencil.reference
    }

    // ===== COMPILED OBJECTS =====

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    /// Backend objects (None before a successful compile)
    pub fn compiled(&self) -> Option<&CompiledPipeline> {
        self.compiled.as_ref()
    }
}

#[cfg(test)]
#[path = "pipeline_state_tests.rs"]
mod tests;
