/// Shader module - reflection header decoding and the shader entity

pub mod reflection;
pub mod shader;

pub use reflection::*;
pub use shader::*;
