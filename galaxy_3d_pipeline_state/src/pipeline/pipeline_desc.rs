/// Pipeline descriptor - caller-authored description of a full pipeline
///
/// Shader stages, fixed-function state and the vertex input layout. A
/// descriptor is turned into a `PipelineState` and compiled once.

use std::sync::Arc;

use crate::graphics_device::{BlendFactor, ColorWriteFlags, CompareOp, FaceCulling, InputFormat, StencilOp};
use crate::shader::Shader;

// ===== VERTEX INPUT =====

/// Kind of data carried by one vertex element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexData {
    Float1,
    Float2,
    Float3,
    Float4,
    /// Two signed 16-bit normalized values
    Short2Norm,
    /// Four signed 16-bit normalized values
    Short4Norm,
    /// Four 8-bit channels
    Color,
    /// 4x4 float matrix, fed as four Float4 rows
    Float4x4,
}

impl VertexData {
    /// Number of input slots this kind occupies
    pub fn slot_count(&self) -> u32 {
        match self {
            VertexData::Float4x4 => 4,
            _ => 1,
        }
    }

    /// Format of each input slot
    pub fn format(&self) -> InputFormat {
        match self {
            VertexData::Float1 => InputFormat::R32_FLOAT,
            VertexData::Float2 => InputFormat::R32G32_FLOAT,
            VertexData::Float3 => InputFormat::R32G32B32_FLOAT,
            VertexData::Float4 | VertexData::Float4x4 => InputFormat::R32G32B32A32_FLOAT,
            VertexData::Short2Norm => InputFormat::R16G16_SNORM,
            VertexData::Short4Norm => InputFormat::R16G16B16A16_SNORM,
            VertexData::Color => InputFormat::R8G8B8A8_UINT,
        }
    }

    /// Size in bytes of the whole element inside a stream record
    pub fn size_bytes(&self) -> u32 {
        self.format().size_bytes() * self.slot_count()
    }
}

/// Named element of a vertex stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexElement {
    pub name: String,
    pub data: VertexData,
}

impl VertexElement {
    pub fn new(name: impl Into<String>, data: VertexData) -> Self {
        Self { name: name.into(), data }
    }
}

/// One vertex buffer's record layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexStream {
    /// Elements in record order
    pub elements: Vec<VertexElement>,
    /// Step once per instance instead of once per vertex
    pub instanced: bool,
}

impl VertexStream {
    /// Empty per-vertex stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty per-instance stream
    pub fn instanced() -> Self {
        Self { elements: Vec::new(), instanced: true }
    }

    /// Append an element (builder style)
    pub fn with(mut self, name: impl Into<String>, data: VertexData) -> Self {
        self.elements.push(VertexElement::new(name, data));
        self
    }

    /// Byte size of one record
    pub fn stride(&self) -> u32 {
        self.elements.iter().map(|e| e.data.size_bytes()).sum()
    }
}

// ===== RASTERIZATION STATE =====

/// Which winding gets culled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// Draw both faces
    None,
    /// Cull clockwise faces
    Clockwise,
    /// Cull counter-clockwise faces
    CounterClockwise,
}

impl CullMode {
    /// Backend face culling for this mode (clockwise triangles are front faces)
    pub fn face_culling(&self) -> FaceCulling {
        match self {
            CullMode::None => FaceCulling::None,
            CullMode::Clockwise => FaceCulling::Front,
            CullMode::CounterClockwise => FaceCulling::Back,
        }
    }
}

/// Rasterization fixed-function state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterizationState {
    pub cull_mode: CullMode,
}

impl Default for RasterizationState {
    fn default() -> Self {
        Self { cull_mode: CullMode::None }
    }
}

// ===== DEPTH/STENCIL STATE =====

/// Depth test settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthTestState {
    /// Comparison operator (`Always` disables the test)
    pub compare_op: CompareOp,
    /// Enable writing to depth buffer
    pub write_enable: bool,
}

impl Default for DepthTestState {
    fn default() -> Self {
        Self {
            compare_op: CompareOp::Always,
            write_enable: false,
        }
    }
}

/// Stencil test settings, shared by front and back faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilTestState {
    /// Comparison operator (`Always` disables the test)
    pub compare_op: CompareOp,
    /// Action on stencil test fail
    pub fail_op: StencilOp,
    /// Action on stencil pass + depth fail
    pub depth_fail_op: StencilOp,
    /// Action on stencil pass + depth pass
    pub pass_op: StencilOp,
    /// Bits of stencil buffer read for compare
    pub read_mask: u8,
    /// Bits of stencil buffer written
    pub write_mask: u8,
    /// Reference value for compare/replace
    pub reference: u32,
}

impl Default for StencilTestState {
    fn default() -> Self {
        Self {
            compare_op: CompareOp::Always,
            fail_op: StencilOp::Keep,
            depth_fail_op: StencilOp::Keep,
            pass_op: StencilOp::Keep,
            read_mask: 0xFF,
            write_mask: 0xFF,
            reference: 0,
        }
    }
}

// ===== COLOR BLEND STATE =====

/// Color write mask of render target 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorWriteMask {
    pub r: bool,
    pub g: bool,
    pub b: bool,
    pub a: bool,
}

impl ColorWriteMask {
    /// All channels enabled
    pub const ALL: Self = Self { r: true, g: true, b: true, a: true };
    /// No channels enabled
    pub const NONE: Self = Self { r: false, g: false, b: false, a: false };

    /// OR of the enabled channel flags
    pub fn flags(&self) -> ColorWriteFlags {
        let mut flags = ColorWriteFlags::empty();
        flags.set(ColorWriteFlags::RED, self.r);
        flags.set(ColorWriteFlags::GREEN, self.g);
        flags.set(ColorWriteFlags::BLUE, self.b);
        flags.set(ColorWriteFlags::ALPHA, self.a);
        flags
    }
}

impl Default for ColorWriteMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Color blending of render target 0 (operation is always Add)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorBlendState {
    pub src_color_factor: BlendFactor,
    pub dst_color_factor: BlendFactor,
    pub src_alpha_factor: BlendFactor,
    pub dst_alpha_factor: BlendFactor,
    pub color_write_mask: ColorWriteMask,
}

impl ColorBlendState {
    /// Whether the factors describe anything but a plain overwrite
    pub fn blend_enabled(&self) -> bool {
        self.src_color_factor != BlendFactor::One
            || self.dst_color_factor != BlendFactor::Zero
            || self.src_alpha_factor != BlendFactor::One
            || self.dst_alpha_factor != BlendFactor::Zero
    }
}

impl Default for ColorBlendState {
    fn default() -> Self {
        Self {
            src_color_factor: BlendFactor::One,
            dst_color_factor: BlendFactor::Zero,
            src_alpha_factor: BlendFactor::One,
            dst_alpha_factor: BlendFactor::Zero,
            color_write_mask: ColorWriteMask::ALL,
        }
    }
}

// ===== PIPELINE DESCRIPTOR =====

/// Descriptor for a pipeline state
///
/// Vertex and fragment stages are mandatory, the other three optional.
/// Shaders are shared, so the same `Arc<Shader>` may appear in many
/// descriptors.
#[derive(Debug, Clone)]
pub struct PipelineDesc {
    pub vertex_shader: Arc<Shader>,
    pub fragment_shader: Arc<Shader>,
    pub geometry_shader: Option<Arc<Shader>>,
    pub tessellation_control_shader: Option<Arc<Shader>>,
    pub tessellation_evaluation_shader: Option<Arc<Shader>>,
    /// Vertex streams in binding order
    pub input_layout: Vec<VertexStream>,
    pub rasterization: RasterizationState,
    pub depth: DepthTestState,
    pub stencil: StencilTestState,
    pub color_blend: ColorBlendState,
}

impl PipelineDesc {
    /// Descriptor with the two mandatory stages and default fixed-function state
    pub fn new(vertex_shader: Arc<Shader>, fragment_shader: Arc<Shader>) -> Self {
        Self {
            vertex_shader,
            fragment_shader,
            geometry_shader: None,
            tessellation_control_shader: None,
            tessellation_evaluation_shader: None,
            input_layout: Vec::new(),
            rasterization: RasterizationState::default(),
            depth: DepthTestState::default(),
            stencil: StencilTestState::default(),
            color_blend: ColorBlendState::default(),
        }
    }
}

#[cfg(test)]
#[path = "pipeline_desc_tests.rs"]
mod tests;
