/// Shader stage enumeration and backend shader module trait

/// Shader stage
///
/// The discriminant order is the fixed iteration order used everywhere
/// a per-stage table is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
    /// Geometry shader
    Geometry,
    /// Tessellation control (hull) shader
    TessellationControl,
    /// Tessellation evaluation (domain) shader
    TessellationEvaluation,
}

impl ShaderStage {
    /// Number of shader stages
    pub const COUNT: usize = 5;

    /// All stages, in iteration order
    pub const ALL: [ShaderStage; Self::COUNT] = [
        ShaderStage::Vertex,
        ShaderStage::Fragment,
        ShaderStage::Geometry,
        ShaderStage::TessellationControl,
        ShaderStage::TessellationEvaluation,
    ];

    /// Index of this stage in per-stage arrays
    pub fn index(&self) -> usize {
        match self {
            ShaderStage::Vertex => 0,
            ShaderStage::Fragment => 1,
            ShaderStage::Geometry => 2,
            ShaderStage::TessellationControl => 3,
            ShaderStage::TessellationEvaluation => 4,
        }
    }
}

/// Backend shader object created from stage bytecode
///
/// Implemented by backend-specific shader types.
/// The module is automatically destroyed when dropped.
pub trait ShaderModule: Send + Sync {
    /// Stage this module was created for
    fn stage(&self) -> ShaderStage;
}
