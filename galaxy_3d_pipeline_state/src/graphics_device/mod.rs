/// Graphics device module - the backend collaborator contract

// Module declarations
pub mod graphics_device;
pub mod buffer;
pub mod shader;
pub mod state;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;
pub use shader::*;
pub use state::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
