/// Buffer trait and buffer descriptor

use crate::error::Result;

/// Buffer usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Constant (uniform) buffer bound per shader stage
    Constant,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Buffer usage
    pub usage: BufferUsage,
}

/// Hardware constant-buffer alignment in bytes
pub const CONSTANT_BUFFER_ALIGNMENT: u64 = 16;

/// Round a constant block size up to the constant-buffer alignment
///
/// The result is never smaller than one aligned block, so an empty
/// block still maps to a 16-byte buffer.
pub fn constant_buffer_size(size: u64) -> u64 {
    let align = CONSTANT_BUFFER_ALIGNMENT;
    ((size + align - 1) & !(align - 1)).max(align)
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types.
/// The buffer is automatically destroyed when dropped.
pub trait Buffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u64;

    /// Update buffer data
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset into the buffer in bytes
    /// * `data` - Data to write
    fn update(&self, offset: u64, data: &[u8]) -> Result<()>;
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
