/// Fixed-function state descriptors and backend state object traits
///
/// These are the backend-facing descriptions produced by the pipeline
/// compiler. Backends translate them 1:1 into their native state objects.

use bitflags::bitflags;

// ===== COMPARISON / STENCIL ENUMS =====

/// Comparison operator for depth and stencil tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Always pass
    Always,
    /// Never pass
    Never,
    /// Pass if value == reference
    Equal,
    /// Pass if value != reference
    NotEqual,
    /// Pass if value < reference
    Less,
    /// Pass if value <= reference
    LessOrEqual,
    /// Pass if value > reference
    Greater,
    /// Pass if value >= reference
    GreaterOrEqual,
}

/// Stencil operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilOp {
    /// Keep current value
    Keep,
    /// Set to zero
    Zero,
    /// Replace with reference value
    Replace,
    /// Increment and clamp to max
    IncrementAndClamp,
    /// Increment and wrap around
    IncrementAndWrap,
    /// Decrement and clamp to zero
    DecrementAndClamp,
    /// Decrement and wrap around
    DecrementAndWrap,
    /// Bitwise invert
    Invert,
}

// ===== BLEND ENUMS =====

/// Blend factor for color blending equations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    One,
    Zero,
    SrcAlpha,
    DstAlpha,
    OneMinusSrcAlpha,
    OneMinusDstAlpha,
    SrcColor,
    DstColor,
    OneMinusSrcColor,
    OneMinusDstColor,
}

/// Blend operation
///
/// Pipelines built by this crate always blend additively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendOp {
    /// result = src * srcFactor + dst * dstFactor
    Add,
}

bitflags! {
    /// Per-channel render target write mask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorWriteFlags: u8 {
        const RED = 0x1;
        const GREEN = 0x2;
        const BLUE = 0x4;
        const ALPHA = 0x8;
    }
}

// ===== RASTERIZER ENUMS =====

/// Which faces the rasterizer discards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceCulling {
    /// No culling
    None,
    /// Cull front faces
    Front,
    /// Cull back faces
    Back,
}

// ===== INPUT LAYOUT =====

/// Format of one input-layout slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum InputFormat {
    R32_FLOAT,
    R32G32_FLOAT,
    R32G32B32_FLOAT,
    R32G32B32A32_FLOAT,
    R16G16_SNORM,
    R16G16B16A16_SNORM,
    R8G8B8A8_UINT,
}

impl InputFormat {
    /// Size in bytes of one slot of this format
    pub fn size_bytes(&self) -> u32 {
        match self {
            InputFormat::R32_FLOAT => 4,
            InputFormat::R32G32_FLOAT => 8,
            InputFormat::R32G32B32_FLOAT => 12,
            InputFormat::R32G32B32A32_FLOAT => 16,
            InputFormat::R16G16_SNORM => 4,
            InputFormat::R16G16B16A16_SNORM => 8,
            InputFormat::R8G8B8A8_UINT => 4,
        }
    }
}

/// Vertex input rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRate {
    /// Data is per-vertex
    Vertex,
    /// Data is per-instance
    Instance,
}

/// One slot of a compiled vertex input layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputElement {
    /// Attribute name as looked up in the vertex shader (matrix rows use `<name>_<row>`)
    pub name: String,
    /// Binding location in the vertex shader
    pub location: u32,
    /// Slot format
    pub format: InputFormat,
    /// Vertex stream (input slot) the data comes from
    pub stream: u32,
    /// Byte offset inside one stream record
    pub offset: u32,
    /// Per-vertex or per-instance stepping
    pub input_rate: InputRate,
    /// Instances drawn per step (0 for per-vertex data)
    pub instance_step_rate: u32,
}

// ===== STATE DESCRIPTORS =====

/// Stencil operations for one face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilFaceDesc {
    pub compare_op: CompareOp,
    pub fail_op: StencilOp,
    pub depth_fail_op: StencilOp,
    pub pass_op: StencilOp,
}

/// Depth/stencil state object description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStencilDesc {
    pub depth_test_enable: bool,
    pub depth_write_enable: bool,
    pub depth_compare_op: CompareOp,
    pub stencil_test_enable: bool,
    pub stencil_read_mask: u8,
    pub stencil_write_mask: u8,
    pub front: StencilFaceDesc,
    pub back: StencilFaceDesc,
}

/// Rasterizer state object description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterizerDesc {
    pub cull_mode: FaceCulling,
    pub front_counter_clockwise: bool,
    pub depth_clip_enable: bool,
    pub scissor_enable: bool,
    pub multisample_enable: bool,
}

/// Blend description of one render target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetBlendDesc {
    pub blend_enable: bool,
    pub src_color: BlendFactor,
    pub dst_color: BlendFactor,
    pub color_op: BlendOp,
    pub src_alpha: BlendFactor,
    pub dst_alpha: BlendFactor,
    pub alpha_op: BlendOp,
    pub write_mask: ColorWriteFlags,
}

/// Blend state object description (render target 0 only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendDesc {
    pub alpha_to_coverage: bool,
    pub render_target: RenderTargetBlendDesc,
}

// ===== STATE OBJECT TRAITS =====

/// Compiled vertex input layout
pub trait InputLayout: Send + Sync {
    /// Number of input slots in the layout
    fn element_count(&self) -> usize;
}

/// Compiled depth/stencil state
pub trait DepthStencilState: Send + Sync {
    fn desc(&self) -> &DepthStencilDesc;
}

/// Compiled rasterizer state
pub trait RasterizerState: Send + Sync {
    fn desc(&self) -> &RasterizerDesc;
}

/// Compiled blend state
pub trait BlendState: Send + Sync {
    fn desc(&self) -> &BlendDesc;
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
