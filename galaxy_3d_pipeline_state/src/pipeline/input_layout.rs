/// Vertex input layout builder
///
/// Flattens the descriptor's vertex streams into backend input elements.
/// Each element takes its location from the vertex shader's attribute table
/// when the shader declares it, otherwise from a slot pool in which every
/// declared location is reserved beforehand. Matrices expand to four rows
/// named `<name>_0` .. `<name>_3`; a matrix whose row 0 is declared claims
/// all of its rows before any undeclared element is placed.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{CompileStage, Error, Result};
use crate::graphics_device::{InputElement, InputRate};
use crate::pipeline::{SlotPool, VertexData, VertexStream};
use crate::shader::Shader;
use crate::{pipeline_debug, pipeline_error, pipeline_warn};

/// Byte size of one matrix row (a Float4)
const MATRIX_ROW_SIZE: u32 = 16;

/// Build the flattened input element list for `streams`
///
/// # Arguments
///
/// * `streams` - Vertex streams in binding order
/// * `vertex_shader` - Supplies declared attribute locations
/// * `slot_count` - Size of the slot pool for undeclared elements
///
/// # Errors
///
/// `Error::PipelineCompilation` with `CompileStage::InputLayout` when the
/// pool runs out of slots or two elements end up on the same location.
pub fn build_input_elements(
    streams: &[VertexStream],
    vertex_shader: &Shader,
    slot_count: u32,
) -> Result<Vec<InputElement>> {
    let mut pool = SlotPool::new(slot_count);
    for (name, &location) in vertex_shader.reflection().attributes() {
        if !pool.reserve(location) {
            pipeline_warn!("galaxy3d::InputLayout",
                "Attribute '{}' is declared at location {}, outside the {}-slot pool",
                name, location, pool.capacity());
        }
    }

    let mut declared_matrices = FxHashMap::default();
    for (stream_index, stream) in streams.iter().enumerate() {
        for (element_index, element) in stream.elements.iter().enumerate() {
            let is_declared_matrix = matches!(element.data, VertexData::Float4x4)
                && vertex_shader.attribute(&format!("{}_0", element.name)).is_some();
            if is_declared_matrix {
                let rows = matrix_locations(&element.name, vertex_shader, &mut pool)?;
                declared_matrices.insert((stream_index, element_index), rows);
            }
        }
    }

    let mut elements = Vec::new();
    for (stream_index, stream) in streams.iter().enumerate() {
        let (input_rate, instance_step_rate) = if stream.instanced {
            (InputRate::Instance, 1)
        } else {
            (InputRate::Vertex, 0)
        };

        let mut offset = 0;
        for (element_index, element) in stream.elements.iter().enumerate() {
            let mut push = |name: String, location: u32, offset: u32| {
                elements.push(InputElement {
                    name,
                    location,
                    format: element.data.format(),
                    stream: stream_index as u32,
                    offset,
                    input_rate,
                    instance_step_rate,
                });
            };

            match element.data {
                VertexData::Float4x4 => {
                    let locations = match declared_matrices.get(&(stream_index, element_index)) {
                        Some(&rows) => rows,
                        None => matrix_locations(&element.name, vertex_shader, &mut pool)?,
                    };
                    for (row, location) in locations.into_iter().enumerate() {
                        let row = row as u32;
                        push(format!("{}_{}", element.name, row), location, offset + row * MATRIX_ROW_SIZE);
                    }
                }
                _ => {
                    let location = match vertex_shader.attribute(&element.name) {
                        Some(location) => location,
                        None => {
                            let location = pool.alloc().ok_or_else(|| exhausted(&element.name))?;
                            pipeline_debug!("galaxy3d::InputLayout",
                                "Attribute '{}' not declared by the vertex shader, using free slot {}",
                                element.name, location);
                            location
                        }
                    };
                    push(element.name.clone(), location, offset);
                }
            }

            offset += element.data.size_bytes();
        }
    }

    check_unique_locations(&elements)?;
    Ok(elements)
}

/// Locations of the four rows of matrix `name`
///
/// A declared `<name>_0` fixes the base. Each row uses its own declared
/// location when present, otherwise `base + row` if that slot is free,
/// otherwise the lowest free slot. An undeclared matrix takes four
/// consecutive free slots.
fn matrix_locations(name: &str, vertex_shader: &Shader, pool: &mut SlotPool) -> Result<[u32; 4]> {
    let declared_base = vertex_shader.attribute(&format!("{}_0", name));
    let base = match declared_base {
        Some(base) => base,
        None => pool.alloc_run(4).ok_or_else(|| exhausted(name))?,
    };

    let mut locations = [base; 4];
    for (row, location) in locations.iter_mut().enumerate() {
        let row = row as u32;
        if let Some(declared) = vertex_shader.attribute(&format!("{}_{}", name, row)) {
            *location = declared;
        } else if declared_base.is_none() {
            *location = base + row;
        } else if pool.is_free(base + row) {
            pool.reserve(base + row);
            *location = base + row;
        } else {
            *location = pool.alloc().ok_or_else(|| exhausted(name))?;
        }
    }
    Ok(locations)
}

fn exhausted(name: &str) -> Error {
    let message = format!("no free input slot left for attribute '{}'", name);
    pipeline_error!("galaxy3d::InputLayout", "{}", message);
    Error::PipelineCompilation { stage: CompileStage::InputLayout, message }
}

fn check_unique_locations(elements: &[InputElement]) -> Result<()> {
    let mut used = FxHashSet::default();
    for element in elements {
        if !used.insert(element.location) {
            let message = format!("location {} of '{}' is already in use", element.location, element.name);
            pipeline_error!("galaxy3d::InputLayout", "{}", message);
            return Err(Error::PipelineCompilation { stage: CompileStage::InputLayout, message });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "input_layout_tests.rs"]
mod tests;
