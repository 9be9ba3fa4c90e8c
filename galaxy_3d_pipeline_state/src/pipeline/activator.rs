/// Pipeline activation - binds a compiled pipeline for drawing
///
/// The current pipeline is tracked by a caller-owned `ActivePipelineState`
/// rather than globally; it also owns the constant scratch memory that
/// `upload_constants` copies into the current pipeline's buffers.

use crate::error::{Error, Result};
use crate::graphics_device::{CommandList, ShaderStage};
use crate::pipeline::{CompiledPipeline, ConstantScratch, PipelineState};
use crate::{pipeline_error, pipeline_trace};

/// Blend factor bound with every blend state
const BLEND_FACTOR: [f32; 4] = [0.0; 4];
/// Sample mask bound with every blend state
const SAMPLE_MASK: u32 = 0xFFFF_FFFF;

/// Current pipeline of one command list, plus its uniform values
#[derive(Default)]
pub struct ActivePipelineState<'p> {
    current: Option<&'p PipelineState>,
    constants: ConstantScratch,
}

impl<'p> ActivePipelineState<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `pipeline` current and bind all of its state
    ///
    /// Binding order: depth/stencil (with the stencil reference), blend,
    /// rasterizer, the five shader stages (absent ones unbound), input layout.
    ///
    /// # Errors
    ///
    /// `Error::NotCompiled` if `pipeline` was never compiled; the previous
    /// pipeline then stays current.
    pub fn activate(
        &mut self,
        cmd: &mut dyn CommandList,
        pipeline: &'p PipelineState,
        scissoring: bool,
    ) -> Result<()> {
        let compiled = compiled_or_err(pipeline)?;
        self.current = Some(pipeline);
        self.constants.reserve_for(pipeline);

        cmd.set_depth_stencil_state(compiled.depth_stencil(), pipeline.stencil_reference());
        cmd.set_blend_state(compiled.blend(), BLEND_FACTOR, SAMPLE_MASK);
        cmd.set_rasterizer_state(compiled.rasterizer(scissoring));

        for stage in ShaderStage::ALL {
            cmd.set_shader(stage, pipeline.shader(stage).map(|shader| shader.module()));
        }

        cmd.set_input_layout(compiled.input_layout());
        pipeline_trace!("galaxy3d::PipelineActivator", "Pipeline activated (scissor={})", scissoring);
        Ok(())
    }

    /// Rebind only the rasterizer variant of the current pipeline
    pub fn set_scissoring(&self, cmd: &mut dyn CommandList, scissoring: bool) -> Result<()> {
        let compiled = self.current_compiled()?;
        cmd.set_rasterizer_state(compiled.rasterizer(scissoring));
        Ok(())
    }

    /// Copy the scratch constants into the current pipeline's buffers and
    /// bind each buffer to constant slot 0 of its stage
    ///
    /// # Errors
    ///
    /// `Error::NoActivePipeline` before the first successful `activate`, or
    /// the backend error of a failed buffer update.
    pub fn upload_constants(&self, cmd: &mut dyn CommandList) -> Result<()> {
        let compiled = self.current_compiled()?;
        for stage in ShaderStage::ALL {
            let Some(buffer) = compiled.constant_buffer(stage) else { continue };
            let data = self.constants.stage_data(stage);
            let len = data.len().min(buffer.size() as usize);
            buffer.update(0, &data[..len])?;
            cmd.bind_constant_buffer(stage, 0, buffer);
        }
        Ok(())
    }

    /// Forget the current pipeline (scratch values are kept)
    pub fn deactivate(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&'p PipelineState> {
        self.current
    }

    pub fn constants(&self) -> &ConstantScratch {
        &self.constants
    }

    /// Uniform values for the next `upload_constants`
    pub fn constants_mut(&mut self) -> &mut ConstantScratch {
        &mut self.constants
    }

    fn current_compiled(&self) -> Result<&'p CompiledPipeline> {
        match self.current {
            Some(pipeline) => compiled_or_err(pipeline),
            None => {
                pipeline_error!("galaxy3d::PipelineActivator", "No pipeline is active");
                Err(Error::NoActivePipeline)
            }
        }
    }
}

fn compiled_or_err(pipeline: &PipelineState) -> Result<&CompiledPipeline> {
    pipeline.compiled().ok_or_else(|| {
        pipeline_error!("galaxy3d::PipelineActivator", "Pipeline used before compile()");
        Error::NotCompiled
    })
}

#[cfg(test)]
#[path = "activator_tests.rs"]
mod tests;
