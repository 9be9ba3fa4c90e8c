/// Pipeline compiler - descriptor state to backend state objects
///
/// Compilation runs in a fixed order: per-stage constant buffers, input
/// layout, depth/stencil, rasterizer (plain and scissor variants), blend.
/// The first device failure aborts the whole compilation and nothing
/// created so far is kept.

use crate::config::Config;
use crate::error::{CompileStage, Error, Result};
use crate::graphics_device::{
    constant_buffer_size, BlendDesc, BlendOp, BlendState, Buffer, BufferDesc, BufferUsage, CompareOp,
    DepthStencilDesc, DepthStencilState, GraphicsDevice, InputElement, InputLayout,
    RasterizerDesc, RasterizerState, RenderTargetBlendDesc, ShaderStage, StencilFaceDesc,
};
use crate::pipeline::{
    build_input_elements, ColorBlendState, DepthTestState, PipelineState, RasterizationState,
    StencilTestState,
};
use crate::{pipeline_debug, pipeline_error};

/// Backend objects owned by a compiled pipeline
///
/// Everything is released when the pipeline is dropped.
pub struct CompiledPipeline {
    input_elements: Vec<InputElement>,
    input_layout: Box<dyn InputLayout>,
    depth_stencil: Box<dyn DepthStencilState>,
    rasterizer: Box<dyn RasterizerState>,
    rasterizer_scissor: Box<dyn RasterizerState>,
    blend: Box<dyn BlendState>,
    constant_buffers: [Option<Box<dyn Buffer>>; ShaderStage::COUNT],
}

impl CompiledPipeline {
    /// Flattened vertex input slots the layout was created from
    pub fn input_elements(&self) -> &[InputElement] {
        &self.input_elements
    }

    pub fn input_layout(&self) -> &dyn InputLayout {
        self.input_layout.as_ref()
    }

    pub fn depth_stencil(&self) -> &dyn DepthStencilState {
        self.depth_stencil.as_ref()
    }

    /// Rasterizer variant with or without scissor test
    pub fn rasterizer(&self, scissoring: bool) -> &dyn RasterizerState {
        if scissoring {
            self.rasterizer_scissor.as_ref()
        } else {
            self.rasterizer.as_ref()
        }
    }

    pub fn blend(&self) -> &dyn BlendState {
        self.blend.as_ref()
    }

    /// Constant buffer of a stage (None when the stage is absent or has no constants)
    pub fn constant_buffer(&self, stage: ShaderStage) -> Option<&dyn Buffer> {
        self.constant_buffers[stage.index()].as_deref()
    }

    /// Size in bytes of a stage's constant buffer, 0 without buffer
    pub fn constant_buffer_size(&self, stage: ShaderStage) -> u64 {
        self.constant_buffer(stage).map_or(0, |buffer| buffer.size())
    }
}

/// Create every backend object of `pipeline`
pub(crate) fn compile_pipeline(
    pipeline: &PipelineState,
    device: &mut dyn GraphicsDevice,
    config: &Config,
) -> Result<CompiledPipeline> {
    // ========== CONSTANT BUFFERS ==========
    let mut constant_buffers: [Option<Box<dyn Buffer>>; ShaderStage::COUNT] = Default::default();
    for stage in ShaderStage::ALL {
        let Some(shader) = pipeline.shader(stage) else { continue };
        if shader.constants_size() == 0 {
            continue;
        }
        let size = constant_buffer_size(shader.constants_size() as u64);
        let buffer = device
            .create_buffer(BufferDesc { size, usage: BufferUsage::Constant })
            .map_err(|e| stage_failure(CompileStage::ConstantBuffers, e))?;
        constant_buffers[stage.index()] = Some(buffer);
    }

    // ========== INPUT LAYOUT ==========
    let vertex_shader = pipeline.vertex_shader();
    let input_elements = build_input_elements(
        pipeline.input_layout(),
        vertex_shader,
        config.effective_attribute_slots(),
    )?;
    let input_layout = device
        .create_input_layout(&input_elements, vertex_shader.bytecode())
        .map_err(|e| stage_failure(CompileStage::InputLayout, e))?;

    // ========== DEPTH/STENCIL ==========
    let depth_stencil = device
        .create_depth_stencil_state(&depth_stencil_desc(pipeline.depth(), pipeline.stencil()))
        .map_err(|e| stage_failure(CompileStage::DepthStencil, e))?;

    // ========== RASTERIZER ==========
    let rasterizer = device
        .create_rasterizer_state(&rasterizer_desc(pipeline.rasterization(), false))
        .map_err(|e| stage_failure(CompileStage::Rasterizer, e))?;
    let rasterizer_scissor = device
        .create_rasterizer_state(&rasterizer_desc(pipeline.rasterization(), true))
        .map_err(|e| stage_failure(CompileStage::Rasterizer, e))?;

    // ========== BLEND ==========
    let blend = device
        .create_blend_state(&blend_desc(pipeline.color_blend()))
        .map_err(|e| stage_failure(CompileStage::Blend, e))?;

    pipeline_debug!("galaxy3d::PipelineCompiler",
        "Compiled pipeline: {} input elements, {} constant buffers",
        input_elements.len(),
        constant_buffers.iter().filter(|b| b.is_some()).count());

    Ok(CompiledPipeline {
        input_elements,
        input_layout,
        depth_stencil,
        rasterizer,
        rasterizer_scissor,
        blend,
        constant_buffers,
    })
}

/// Depth/stencil description; both faces share the stencil settings
pub fn depth_stencil_desc(depth: &DepthTestState, stencil: &StencilTestState) -> DepthStencilDesc {
    let face = StencilFaceDesc {
        compare_op: stencil.compare_op,
        fail_op: stencil.fail_op,
        depth_fail_op: stencil.depth_fail_op,
        pass_op: stencil.pass_op,
    };
    DepthStencilDesc {
        depth_test_enable: depth.compare_op != CompareOp::Always,
        depth_write_enable: depth.write_enable,
        depth_compare_op: depth.compare_op,
        stencil_test_enable: stencil.compare_op != CompareOp::Always,
        stencil_read_mask: stencil.read_mask,
        stencil_write_mask: stencil.write_mask,
        front: face,
        back: face,
    }
}

/// Rasterizer description (solid fill, clockwise front faces, depth clip on)
pub fn rasterizer_desc(rasterization: &RasterizationState, scissor_enable: bool) -> RasterizerDesc {
    RasterizerDesc {
        cull_mode: rasterization.cull_mode.face_culling(),
        front_counter_clockwise: false,
        depth_clip_enable: true,
        scissor_enable,
        multisample_enable: false,
    }
}

/// Blend description of render target 0
pub fn blend_desc(color_blend: &ColorBlendState) -> BlendDesc {
    BlendDesc {
        alpha_to_coverage: false,
        render_target: RenderTargetBlendDesc {
            blend_enable: color_blend.blend_enabled(),
            src_color: color_blend.src_color_factor,
            dst_color: color_blend.dst_color_factor,
            color_op: BlendOp::Add,
            src_alpha: color_blend.src_alpha_factor,
            dst_alpha: color_blend.dst_alpha_factor,
            alpha_op: BlendOp::Add,
            write_mask: color_blend.color_write_mask.flags(),
        },
    }
}

fn stage_failure(stage: CompileStage, source: Error) -> Error {
    let message = source.to_string();
    pipeline_error!("galaxy3d::PipelineCompiler", "Failed to create {}: {}", stage, message);
    Error::PipelineCompilation { stage, message }
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
