/// Pipeline module - descriptors, compilation, name resolution and activation

pub mod pipeline_desc;
pub mod slot_pool;
pub mod input_layout;
pub mod compiler;
pub mod pipeline_state;
pub mod binding_resolver;
pub mod constants;
pub mod activator;

pub use pipeline_desc::*;
pub use slot_pool::SlotPool;
pub use input_layout::build_input_elements;
pub use compiler::{blend_desc, depth_stencil_desc, rasterizer_desc, CompiledPipeline};
pub use pipeline_state::PipelineState;
pub use binding_resolver::{ConstantLocation, TextureUnit};
pub use constants::ConstantScratch;
pub use activator::ActivePipelineState;
