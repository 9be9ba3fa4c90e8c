//! Error types for the Galaxy3D pipeline state crate
//!
//! This module defines the error types used throughout the crate,
//! including shader decoding, pipeline compilation and activation misuse.

use std::fmt;

/// Result type for pipeline state operations
pub type Result<T> = std::result::Result<T, Error>;

/// Sub-stage of pipeline compilation that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileStage {
    /// Per-stage constant buffer allocation
    ConstantBuffers,
    /// Vertex input layout construction
    InputLayout,
    /// Depth/stencil state creation
    DepthStencil,
    /// Rasterizer state creation (both scissor variants)
    Rasterizer,
    /// Blend state creation
    Blend,
}

impl fmt::Display for CompileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompileStage::ConstantBuffers => "constant buffers",
            CompileStage::InputLayout => "input layout",
            CompileStage::DepthStencil => "depth/stencil state",
            CompileStage::Rasterizer => "rasterizer state",
            CompileStage::Blend => "blend state",
        };
        f.write_str(name)
    }
}

/// Galaxy3D pipeline state errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (device object creation, upload, ...)
    BackendError(String),

    /// Invalid resource (shader in the wrong stage slot, bad descriptor, ...)
    InvalidResource(String),

    /// Shader reflection header is truncated or otherwise malformed
    MalformedShader(String),

    /// Pipeline compilation failed in the given sub-stage
    PipelineCompilation {
        stage: CompileStage,
        message: String,
    },

    /// Pipeline used before `compile()` was called
    NotCompiled,

    /// `compile()` called on an already compiled pipeline
    AlreadyCompiled,

    /// Constants uploaded while no pipeline is active
    NoActivePipeline,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::MalformedShader(msg) => write!(f, "Malformed shader: {}", msg),
            Error::PipelineCompilation { stage, message } => {
                write!(f, "Pipeline compilation failed ({}): {}", stage, message)
            }
            Error::NotCompiled => write!(f, "Pipeline has not been compiled"),
            Error::AlreadyCompiled => write!(f, "Pipeline has already been compiled"),
            Error::NoActivePipeline => write!(f, "No pipeline is active"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
