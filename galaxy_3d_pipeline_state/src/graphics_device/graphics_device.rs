/// GraphicsDevice and CommandList traits - the backend collaborator contract
///
/// The pipeline state crate never talks to a graphics API directly. A backend
/// implements these two traits: `GraphicsDevice` creates objects, `CommandList`
/// makes them the current GPU state.

use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, ShaderModule, ShaderStage,
    InputElement, InputLayout,
    DepthStencilDesc, DepthStencilState,
    RasterizerDesc, RasterizerState,
    BlendDesc, BlendState,
};

/// Object factory of a backend
///
/// Every creation entry point either succeeds or returns the backend
/// failure as an error.
pub trait GraphicsDevice {
    /// Create a shader module from stage bytecode
    fn create_shader_module(&mut self, stage: ShaderStage, bytecode: &[u8]) -> Result<Box<dyn ShaderModule>>;

    /// Create a buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Box<dyn Buffer>>;

    /// Create a vertex input layout
    ///
    /// # Arguments
    ///
    /// * `elements` - Flattened input slots, in stream/element order
    /// * `vertex_bytecode` - Vertex shader bytecode, used by backends that validate
    ///   the layout against the shader input signature
    fn create_input_layout(
        &mut self,
        elements: &[InputElement],
        vertex_bytecode: &[u8],
    ) -> Result<Box<dyn InputLayout>>;

    /// Create a depth/stencil state object
    fn create_depth_stencil_state(&mut self, desc: &DepthStencilDesc) -> Result<Box<dyn DepthStencilState>>;

    /// Create a rasterizer state object
    fn create_rasterizer_state(&mut self, desc: &RasterizerDesc) -> Result<Box<dyn RasterizerState>>;

    /// Create a blend state object
    fn create_blend_state(&mut self, desc: &BlendDesc) -> Result<Box<dyn BlendState>>;
}

/// Immediate-mode state binding interface of a backend
pub trait CommandList {
    /// Set the current depth/stencil state and stencil reference value
    fn set_depth_stencil_state(&mut self, state: &dyn DepthStencilState, stencil_reference: u32);

    /// Set the current blend state
    fn set_blend_state(&mut self, state: &dyn BlendState, blend_factor: [f32; 4], sample_mask: u32);

    /// Set the current rasterizer state
    fn set_rasterizer_state(&mut self, state: &dyn RasterizerState);

    /// Bind a shader module to a stage, or unbind the stage with `None`
    fn set_shader(&mut self, stage: ShaderStage, module: Option<&dyn ShaderModule>);

    /// Set the current vertex input layout
    fn set_input_layout(&mut self, layout: &dyn InputLayout);

    /// Bind a constant buffer to a slot of a stage
    fn bind_constant_buffer(&mut self, stage: ShaderStage, slot: u32, buffer: &dyn Buffer);
}
