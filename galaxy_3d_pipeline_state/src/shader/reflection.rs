/// Shader reflection header - decoder and encoder
///
/// A compiled shader blob starts with three tables describing its interface,
/// followed by the backend bytecode:
///
/// ```text
/// u8 attribute_count
///     attribute_count x { name\0, u8 location }
/// u8 texture_count
///     texture_count   x { name\0, u8 unit }
/// u8 constant_count
///     constant_count  x { name\0, u32le offset, u32le size [, u8 columns, u8 rows] }
/// bytecode (remaining bytes)
/// ```
///
/// The bracketed dimension bytes are present only in the
/// `ConstantLayout::WithDimensions` layout.

use rustc_hash::FxHashMap;

use crate::config::ConstantLayout;
use crate::error::{Error, Result};

/// Longest accepted table entry name, in bytes (terminator excluded)
pub const MAX_NAME_LENGTH: usize = 255;

/// One entry of a stage's constant block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShaderConstant {
    /// Byte offset inside the constant block
    pub offset: u32,
    /// Size in bytes
    pub size: u32,
    /// Matrix/vector columns (0 when the layout carries no dimensions)
    pub columns: u8,
    /// Matrix rows (0 when the layout carries no dimensions)
    pub rows: u8,
}

/// Decoded reflection tables of one shader stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderReflection {
    attributes: FxHashMap<String, u32>,
    textures: FxHashMap<String, u32>,
    constants: FxHashMap<String, ShaderConstant>,
    constants_size: u32,
}

impl ShaderReflection {
    /// Create empty tables
    pub fn new() -> Self {
        Self::default()
    }

    // ===== BUILDING =====

    /// Declare a vertex input attribute
    pub fn add_attribute(&mut self, name: impl Into<String>, location: u32) {
        self.attributes.insert(name.into(), location);
    }

    /// Declare a texture unit
    pub fn add_texture(&mut self, name: impl Into<String>, unit: u32) {
        self.textures.insert(name.into(), unit);
    }

    /// Declare a constant, growing the constant block to cover it
    pub fn add_constant(&mut self, name: impl Into<String>, constant: ShaderConstant) -> Result<()> {
        let name = name.into();
        let end = constant.offset.checked_add(constant.size).ok_or_else(|| {
            Error::MalformedShader(format!(
                "constant '{}' overflows: offset {} + size {}", name, constant.offset, constant.size
            ))
        })?;
        self.constants_size = self.constants_size.max(end);
        self.constants.insert(name, constant);
        Ok(())
    }

    // ===== ACCESS =====

    /// Attribute name -> input location
    pub fn attributes(&self) -> &FxHashMap<String, u32> {
        &self.attributes
    }

    /// Texture name -> texture unit
    pub fn textures(&self) -> &FxHashMap<String, u32> {
        &self.textures
    }

    /// Constant name -> constant record
    pub fn constants(&self) -> &FxHashMap<String, ShaderConstant> {
        &self.constants
    }

    /// Size in bytes of the constant block (max of offset + size, 0 when empty)
    pub fn constants_size(&self) -> u32 {
        self.constants_size
    }

    // ===== WIRE FORMAT =====

    /// Decode the reflection header of a shader blob
    ///
    /// # Returns
    ///
    /// The decoded tables and the bytecode slice that follows them
    pub fn decode(data: &[u8], layout: ConstantLayout) -> Result<(Self, &[u8])> {
        let mut reader = ReflectionReader::new(data);
        let mut reflection = Self::new();

        let attribute_count = reader.read_u8("attribute count")?;
        for _ in 0..attribute_count {
            let name = reader.read_name()?;
            let location = reader.read_u8("attribute location")?;
            reflection.add_attribute(name, location as u32);
        }

        let texture_count = reader.read_u8("texture count")?;
        for _ in 0..texture_count {
            let name = reader.read_name()?;
            let unit = reader.read_u8("texture unit")?;
            reflection.add_texture(name, unit as u32);
        }

        let constant_count = reader.read_u8("constant count")?;
        for _ in 0..constant_count {
            let name = reader.read_name()?;
            let offset = reader.read_u32_le("constant offset")?;
            let size = reader.read_u32_le("constant size")?;
            let (columns, rows) = match layout {
                ConstantLayout::Compact => (0, 0),
                ConstantLayout::WithDimensions => (
                    reader.read_u8("constant columns")?,
                    reader.read_u8("constant rows")?,
                ),
            };
            reflection.add_constant(name, ShaderConstant { offset, size, columns, rows })?;
        }

        Ok((reflection, reader.remaining()))
    }

    /// Encode the tables followed by `bytecode` into the wire format
    ///
    /// Entries are written sorted by name so the output is deterministic.
    pub fn encode(&self, layout: ConstantLayout, bytecode: &[u8]) -> Result<Vec<u8>> {
        let names: usize = self.attributes.keys().chain(self.textures.keys()).chain(self.constants.keys())
            .map(|name| name.len() + 1)
            .sum();
        let mut out = Vec::with_capacity(
            3 + names + self.attributes.len() + self.textures.len()
                + self.constants.len() * layout.record_tail_size()
                + bytecode.len(),
        );

        for (table, entries) in [("attribute", &self.attributes), ("texture", &self.textures)] {
            write_count(&mut out, table, entries.len())?;
            let mut sorted: Vec<_> = entries.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            for (name, &index) in sorted {
                write_name(&mut out, name)?;
                let index = u8::try_from(index).map_err(|_| {
                    Error::MalformedShader(format!("{} '{}' index {} does not fit in a byte", table, name, index))
                })?;
                out.push(index);
            }
        }

        write_count(&mut out, "constant", self.constants.len())?;
        let mut sorted: Vec<_> = self.constants.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        for (name, constant) in sorted {
            write_name(&mut out, name)?;
            out.extend_from_slice(&constant.offset.to_le_bytes());
            out.extend_from_slice(&constant.size.to_le_bytes());
            if layout == ConstantLayout::WithDimensions {
                out.push(constant.columns);
                out.push(constant.rows);
            }
        }

        out.extend_from_slice(bytecode);
        Ok(out)
    }
}

fn write_count(out: &mut Vec<u8>, table: &str, count: usize) -> Result<()> {
    let count = u8::try_from(count).map_err(|_| {
        Error::MalformedShader(format!("{} table has {} entries (max 255)", table, count))
    })?;
    out.push(count);
    Ok(())
}

fn write_name(out: &mut Vec<u8>, name: &str) -> Result<()> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(Error::MalformedShader(format!(
            "name of {} bytes exceeds {} bytes", name.len(), MAX_NAME_LENGTH
        )));
    }
    if name.as_bytes().contains(&0) {
        return Err(Error::MalformedShader(format!("name '{}' contains a NUL byte", name.escape_debug())));
    }
    out.extend_from_slice(name.as_bytes());
    out.push(0);
    Ok(())
}

/// Bounds-checked little-endian cursor over a reflection header
struct ReflectionReader<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> ReflectionReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        let end = self.cursor.checked_add(len).filter(|&end| end <= self.data.len());
        match end {
            Some(end) => {
                let bytes = &self.data[self.cursor..end];
                self.cursor = end;
                Ok(bytes)
            }
            None => Err(Error::MalformedShader(format!(
                "truncated {} at byte {} (blob is {} bytes)", what, self.cursor, self.data.len()
            ))),
        }
    }

    fn read_u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn read_u32_le(&mut self, what: &str) -> Result<u32> {
        let bytes = self.take(4, what)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_name(&mut self) -> Result<String> {
        let start = self.cursor;
        let rest = &self.data[start..];
        // A valid name has its terminator within MAX_NAME_LENGTH + 1 bytes
        let window = &rest[..rest.len().min(MAX_NAME_LENGTH + 1)];
        let Some(len) = window.iter().position(|&b| b == 0) else {
            return Err(if rest.len() > MAX_NAME_LENGTH {
                Error::MalformedShader(format!(
                    "name at byte {} exceeds {} bytes", start, MAX_NAME_LENGTH
                ))
            } else {
                Error::MalformedShader(format!("unterminated name at byte {}", start))
            });
        };
        let bytes = self.take(len + 1, "name")?;
        std::str::from_utf8(&bytes[..len])
            .map(str::to_owned)
            .map_err(|_| Error::MalformedShader(format!("name at byte {} is not valid UTF-8", start)))
    }

    fn remaining(&self) -> &'a [u8] {
        &self.data[self.cursor..]
    }
}

#[cfg(test)]
#[path = "reflection_tests.rs"]
mod tests;
