/// Pipeline state configuration

/// Maximum number of vertex input slots a backend exposes
pub const MAX_ATTRIBUTE_SLOTS: u32 = 32;

/// Layout of one record in the constant table of a reflection header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantLayout {
    /// name, u32 offset, u32 size
    Compact,
    /// name, u32 offset, u32 size, u8 columns, u8 rows
    WithDimensions,
}

impl ConstantLayout {
    /// Layout produced by the shader toolchain for the current target
    pub fn native() -> Self {
        if cfg!(windows) {
            ConstantLayout::WithDimensions
        } else {
            ConstantLayout::Compact
        }
    }

    /// Bytes following the name of each constant record
    pub fn record_tail_size(&self) -> usize {
        match self {
            ConstantLayout::Compact => 8,
            ConstantLayout::WithDimensions => 10,
        }
    }
}

impl Default for ConstantLayout {
    fn default() -> Self {
        Self::native()
    }
}

/// Pipeline state configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Constant record layout used when decoding shader blobs
    pub constant_layout: ConstantLayout,
    /// Size of the vertex input slot pool (clamped to MAX_ATTRIBUTE_SLOTS)
    pub attribute_slot_count: u32,
}

impl Config {
    /// Usable slot count after clamping
    pub fn effective_attribute_slots(&self) -> u32 {
        self.attribute_slot_count.min(MAX_ATTRIBUTE_SLOTS)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            constant_layout: ConstantLayout::native(),
            attribute_slot_count: MAX_ATTRIBUTE_SLOTS,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
