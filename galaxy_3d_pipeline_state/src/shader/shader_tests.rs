//! Unit tests for shader.rs
//!
//! Uses MockGraphicsDevice, no GPU required.

use crate::config::{Config, ConstantLayout};
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::{MockFailure, MockGraphicsDevice};
use crate::graphics_device::ShaderStage;
use crate::shader::{Shader, ShaderConstant, ShaderReflection};

fn compact() -> Config {
    Config { constant_layout: ConstantLayout::Compact, ..Config::default() }
}

fn fragment_blob() -> Vec<u8> {
    let mut reflection = ShaderReflection::new();
    reflection.add_texture("diffuse", 0);
    reflection.add_constant("tint", ShaderConstant { offset: 0, size: 16, columns: 0, rows: 0 }).unwrap();
    reflection.encode(ConstantLayout::Compact, &[7, 7, 7]).unwrap()
}

#[test]
fn test_from_blob_decodes_tables_and_keeps_bytecode() {
    let mut device = MockGraphicsDevice::new();
    let shader = Shader::from_blob(&mut device, ShaderStage::Fragment, &fragment_blob(), &compact()).unwrap();

    assert_eq!(shader.stage(), ShaderStage::Fragment);
    assert_eq!(shader.texture("diffuse"), Some(0));
    assert_eq!(shader.constant("tint").map(|c| c.size), Some(16));
    assert_eq!(shader.constants_size(), 16);
    assert_eq!(shader.attribute("pos"), None);
    assert_eq!(shader.bytecode(), &[7, 7, 7]);
    assert_eq!(shader.module().stage(), ShaderStage::Fragment);
    assert_eq!(device.created_shader_modules, vec![ShaderStage::Fragment]);
}

#[test]
fn test_from_blob_malformed_creates_no_module() {
    let mut device = MockGraphicsDevice::new();
    let result = Shader::from_blob(&mut device, ShaderStage::Vertex, &[3, b'p'], &compact());

    assert!(matches!(result, Err(Error::MalformedShader(_))));
    assert!(device.created_shader_modules.is_empty());
}

#[test]
fn test_from_blob_layout_mismatch_is_detected() {
    // Compact blob read with dimension bytes runs past the end
    let mut reflection = ShaderReflection::new();
    reflection.add_constant("mvp", ShaderConstant { offset: 0, size: 64, columns: 0, rows: 0 }).unwrap();
    let blob = reflection.encode(ConstantLayout::Compact, &[]).unwrap();

    let mut device = MockGraphicsDevice::new();
    let config = Config { constant_layout: ConstantLayout::WithDimensions, ..Config::default() };
    assert!(Shader::from_blob(&mut device, ShaderStage::Vertex, &blob, &config).is_err());
}

#[test]
fn test_module_creation_failure_propagates() {
    let mut device = MockGraphicsDevice::failing_on(MockFailure::ShaderModule);
    let result = Shader::from_blob(&mut device, ShaderStage::Vertex, &fragment_blob(), &compact());
    assert!(matches!(result, Err(Error::BackendError(_))));
}

#[test]
fn test_from_parts_without_constants() {
    let mut device = MockGraphicsDevice::new();
    let mut reflection = ShaderReflection::new();
    reflection.add_attribute("pos", 0);

    let shader = Shader::from_parts(&mut device, ShaderStage::Vertex, reflection, vec![1, 2]).unwrap();
    assert_eq!(shader.attribute("pos"), Some(0));
    assert_eq!(shader.constants_size(), 0);
    assert!(shader.reflection().constants().is_empty());
}

#[test]
fn test_debug_omits_bytecode_contents() {
    let mut device = MockGraphicsDevice::new();
    let shader = Shader::from_parts(&mut device, ShaderStage::Geometry, ShaderReflection::new(), vec![0; 128]).unwrap();

    let text = format!("{:?}", shader);
    assert!(text.contains("Geometry"));
    assert!(text.contains("bytecode_len: 128"));
}
