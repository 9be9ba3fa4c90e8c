/*!
# Galaxy 3D Pipeline State

Pipeline-state compilation and shader binding resolution for the Galaxy 3D
rendering engine.

The crate decodes the reflection header of compiled shader blobs, compiles
backend-agnostic pipeline descriptors into immutable backend state objects,
and resolves uniform and sampler names to per-stage locations at draw time.
Backends plug in through two traits, `GraphicsDevice` (object creation) and
`CommandList` (state binding).

## Architecture

- **ShaderReflection**: attribute / texture / constant tables of a shader blob
- **Shader**: decoded tables, bytecode and the backend shader module
- **PipelineDesc**: shader stages, fixed-function state, vertex streams
- **PipelineState**: a descriptor compiled once into backend objects
- **ActivePipelineState**: the current pipeline of a command list and its uniform values
*/

// Internal modules
mod error;
pub mod config;
pub mod log;
pub mod graphics_device;
pub mod shader;
pub mod pipeline;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{CompileStage, Error, Result};

    // Configuration
    pub use crate::config::{Config, ConstantLayout, MAX_ATTRIBUTE_SLOTS};

    // Logging sub-module (types only; the pipeline_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{DefaultLogger, Log, LogEntry, LogSeverity, Logger};
    }

    // Backend contract: device, command list, state descriptors
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Shader sub-module
    pub mod shader {
        pub use crate::shader::*;
    }

    // Pipeline sub-module
    pub mod pipeline {
        pub use crate::pipeline::*;
    }
}

// Re-export math library at crate root
pub use glam;
