/// Mock graphics device for unit tests (no GPU required)
///
/// Records every object it creates and every state change issued through
/// `MockCommandList`, so pipeline compilation and activation can be
/// verified without a real backend.

use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, CommandList,
    Buffer, BufferDesc, ShaderModule, ShaderStage,
    InputElement, InputLayout,
    DepthStencilDesc, DepthStencilState,
    RasterizerDesc, RasterizerState,
    BlendDesc, BlendState,
};
use crate::pipeline_error;

// ============================================================================
// Mock ShaderModule
// ============================================================================

#[derive(Debug)]
pub struct MockShaderModule {
    pub stage: ShaderStage,
    pub bytecode_len: usize,
}

impl ShaderModule for MockShaderModule {
    fn stage(&self) -> ShaderStage {
        self.stage
    }
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub desc: BufferDesc,
    pub contents: Arc<Mutex<Vec<u8>>>,
}

impl MockBuffer {
    pub fn new(desc: BufferDesc) -> Self {
        let contents = Arc::new(Mutex::new(vec![0u8; desc.size as usize]));
        Self { desc, contents }
    }
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.desc.size
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let mut contents = self.contents.lock().unwrap();
        let start = offset as usize;
        let end = start + data.len();
        if end > contents.len() {
            let message = format!("update of {} bytes at offset {} exceeds buffer size {}",
                data.len(), offset, contents.len());
            pipeline_error!("galaxy3d::mock", "{}", message);
            return Err(Error::BackendError(message));
        }
        contents[start..end].copy_from_slice(data);
        Ok(())
    }
}

// ============================================================================
// Mock state objects
// ============================================================================

#[derive(Debug)]
pub struct MockInputLayout {
    pub elements: Vec<InputElement>,
}

impl InputLayout for MockInputLayout {
    fn element_count(&self) -> usize {
        self.elements.len()
    }
}

#[derive(Debug)]
pub struct MockDepthStencilState {
    pub desc: DepthStencilDesc,
}

impl DepthStencilState for MockDepthStencilState {
    fn desc(&self) -> &DepthStencilDesc {
        &self.desc
    }
}

#[derive(Debug)]
pub struct MockRasterizerState {
    pub desc: RasterizerDesc,
}

impl RasterizerState for MockRasterizerState {
    fn desc(&self) -> &RasterizerDesc {
        &self.desc
    }
}

#[derive(Debug)]
pub struct MockBlendState {
    pub desc: BlendDesc,
}

impl BlendState for MockBlendState {
    fn desc(&self) -> &BlendDesc {
        &self.desc
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Creation entry point the mock device should fail on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    ShaderModule,
    Buffer,
    InputLayout,
    DepthStencil,
    Rasterizer,
    Blend,
}

/// Mock device that tracks created objects without GPU
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    pub created_shader_modules: Vec<ShaderStage>,
    /// Buffer descriptors with a shared view on their contents
    pub created_buffers: Vec<(BufferDesc, Arc<Mutex<Vec<u8>>>)>,
    pub created_input_layouts: Vec<Vec<InputElement>>,
    /// Bytecode length passed along with each input layout
    pub input_layout_bytecode_lens: Vec<usize>,
    pub created_depth_stencil_states: Vec<DepthStencilDesc>,
    pub created_rasterizer_states: Vec<RasterizerDesc>,
    pub created_blend_states: Vec<BlendDesc>,
    /// When set, the matching creation call returns an error
    pub fail_on: Option<MockFailure>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device that fails the given creation entry point
    pub fn failing_on(failure: MockFailure) -> Self {
        Self {
            fail_on: Some(failure),
            ..Self::default()
        }
    }

    /// Total number of state objects and buffers created so far
    pub fn object_count(&self) -> usize {
        self.created_buffers.len()
            + self.created_input_layouts.len()
            + self.created_depth_stencil_states.len()
            + self.created_rasterizer_states.len()
            + self.created_blend_states.len()
    }

    fn check(&self, entry_point: MockFailure) -> Result<()> {
        if self.fail_on == Some(entry_point) {
            let message = format!("injected failure in {:?}", entry_point);
            pipeline_error!("galaxy3d::mock", "{}", message);
            return Err(Error::BackendError(message));
        }
        Ok(())
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_shader_module(&mut self, stage: ShaderStage, bytecode: &[u8]) -> Result<Box<dyn ShaderModule>> {
        self.check(MockFailure::ShaderModule)?;
        self.created_shader_modules.push(stage);
        Ok(Box::new(MockShaderModule { stage, bytecode_len: bytecode.len() }))
    }

    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Box<dyn Buffer>> {
        self.check(MockFailure::Buffer)?;
        let buffer = MockBuffer::new(desc.clone());
        self.created_buffers.push((desc, buffer.contents.clone()));
        Ok(Box::new(buffer))
    }

    fn create_input_layout(
        &mut self,
        elements: &[InputElement],
        vertex_bytecode: &[u8],
    ) -> Result<Box<dyn InputLayout>> {
        self.check(MockFailure::InputLayout)?;
        self.created_input_layouts.push(elements.to_vec());
        self.input_layout_bytecode_lens.push(vertex_bytecode.len());
        Ok(Box::new(MockInputLayout { elements: elements.to_vec() }))
    }

    fn create_depth_stencil_state(&mut self, desc: &DepthStencilDesc) -> Result<Box<dyn DepthStencilState>> {
        self.check(MockFailure::DepthStencil)?;
        self.created_depth_stencil_states.push(*desc);
        Ok(Box::new(MockDepthStencilState { desc: *desc }))
    }

    fn create_rasterizer_state(&mut self, desc: &RasterizerDesc) -> Result<Box<dyn RasterizerState>> {
        self.check(MockFailure::Rasterizer)?;
        self.created_rasterizer_states.push(*desc);
        Ok(Box::new(MockRasterizerState { desc: *desc }))
    }

    fn create_blend_state(&mut self, desc: &BlendDesc) -> Result<Box<dyn BlendState>> {
        self.check(MockFailure::Blend)?;
        self.created_blend_states.push(*desc);
        Ok(Box::new(MockBlendState { desc: *desc }))
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// Command list recording every state change as a string
#[derive(Debug, Default)]
pub struct MockCommandList {
    pub commands: Vec<String>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandList for MockCommandList {
    fn set_depth_stencil_state(&mut self, _state: &dyn DepthStencilState, stencil_reference: u32) {
        self.commands.push(format!("set_depth_stencil_state(ref={})", stencil_reference));
    }

    fn set_blend_state(&mut self, state: &dyn BlendState, blend_factor: [f32; 4], sample_mask: u32) {
        self.commands.push(format!(
            "set_blend_state(enabled={}, factor={:?}, mask={:#x})",
            state.desc().render_target.blend_enable, blend_factor, sample_mask
        ));
    }

    fn set_rasterizer_state(&mut self, state: &dyn RasterizerState) {
        self.commands.push(format!("set_rasterizer_state(scissor={})", state.desc().scissor_enable));
    }

    fn set_shader(&mut self, stage: ShaderStage, module: Option<&dyn ShaderModule>) {
        match module {
            Some(_) => self.commands.push(format!("set_shader({:?})", stage)),
            None => self.commands.push(format!("unset_shader({:?})", stage)),
        }
    }

    fn set_input_layout(&mut self, layout: &dyn InputLayout) {
        self.commands.push(format!("set_input_layout({})", layout.element_count()));
    }

    fn bind_constant_buffer(&mut self, stage: ShaderStage, slot: u32, buffer: &dyn Buffer) {
        self.commands.push(format!("bind_constant_buffer({:?}, {}, {})", stage, slot, buffer.size()));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
