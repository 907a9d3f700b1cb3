use bytemuck::AnyBitPattern;

use crate::error::Error;
use crate::importer::document::AccessorType;
use crate::importer::ImportContext;

/// Per-element shape of an accessor, in components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl ElementShape {
    pub fn components(self) -> usize {
        match self {
            ElementShape::Scalar => 1,
            ElementShape::Vec2 => 2,
            ElementShape::Vec3 => 3,
            ElementShape::Vec4 => 4,
            ElementShape::Mat2 => 4,
            ElementShape::Mat3 => 9,
            ElementShape::Mat4 => 16,
        }
    }
}

impl From<AccessorType> for ElementShape {
    fn from(element_type: AccessorType) -> Self {
        match element_type {
            AccessorType::Scalar => ElementShape::Scalar,
            AccessorType::Vec2 => ElementShape::Vec2,
            AccessorType::Vec3 => ElementShape::Vec3,
            AccessorType::Vec4 => ElementShape::Vec4,
            AccessorType::Mat2 => ElementShape::Mat2,
            AccessorType::Mat3 => ElementShape::Mat3,
            AccessorType::Mat4 => ElementShape::Mat4,
        }
    }
}

/// Component numeric kind, from the six GL component type codes glTF uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    I8,
    U8,
    I16,
    U16,
    U32,
    F32,
}

impl ComponentKind {
    pub fn from_code(code: u32) -> Option<ComponentKind> {
        match code {
            5120 => Some(ComponentKind::I8),
            5121 => Some(ComponentKind::U8),
            5122 => Some(ComponentKind::I16),
            5123 => Some(ComponentKind::U16),
            5125 => Some(ComponentKind::U32),
            5126 => Some(ComponentKind::F32),
            _ => None,
        }
    }

    pub fn byte_size(self) -> usize {
        match self {
            ComponentKind::I8 | ComponentKind::U8 => 1,
            ComponentKind::I16 | ComponentKind::U16 => 2,
            ComponentKind::U32 | ComponentKind::F32 => 4,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ComponentKind::I8 => "sint8",
            ComponentKind::U8 => "uint8",
            ComponentKind::I16 => "sint16",
            ComponentKind::U16 => "uint16",
            ComponentKind::U32 => "uint32",
            ComponentKind::F32 => "float32",
        }
    }
}

/// Typed, strided, non-owning view into a raw buffer.
///
/// `data` spans exactly `count * shape components * component size` bytes,
/// starting at `byte_offset` (buffer-view base offset plus accessor offset)
/// inside the referenced buffer.
pub struct AccessorView<'a> {
    pub index: usize,
    pub count: usize,
    pub shape: ElementShape,
    pub component: ComponentKind,
    pub array_stride: usize,
    pub byte_offset: usize,
    pub data: &'a [u8],
}

impl AccessorView<'_> {
    /// WebGPU-style vertex format string, e.g. `uint16` or `float32x3`.
    pub fn format(&self) -> String {
        let components = self.shape.components();
        if components > 1 {
            format!("{}x{}", self.component.name(), components)
        } else {
            self.component.name().to_string()
        }
    }

    /// Copies the raw bytes out as a typed component vector. Copying rather
    /// than casting in place sidesteps the buffer's alignment.
    pub fn components<T: AnyBitPattern + bytemuck::Pod>(&self) -> Vec<T> {
        bytemuck::pod_collect_to_vec(self.data)
    }
}

/// Resolves an accessor into a typed view of the referenced raw buffer.
pub fn get_accessor(index: usize, context: &ImportContext) -> Result<AccessorView<'_>, Error> {
    let accessor = context
        .document
        .accessors
        .get(index)
        .ok_or_else(|| Error::not_found("accessor", index))?;

    let shape = ElementShape::from(accessor.element_type);
    let component = ComponentKind::from_code(accessor.component_type).ok_or_else(|| {
        Error::Unsupported(format!(
            "accessor component type code {}",
            accessor.component_type
        ))
    })?;

    let view_index = accessor
        .buffer_view
        .ok_or_else(|| Error::not_found("buffer view", index))?;
    let view = context
        .document
        .buffer_views
        .get(view_index)
        .ok_or_else(|| Error::not_found("buffer view", view_index))?;
    let buffer = context
        .buffers
        .get(view.buffer)
        .ok_or_else(|| Error::not_found("buffer", view.buffer))?;

    let byte_offset = view.byte_offset + accessor.byte_offset;
    let array_stride = shape.components() * component.byte_size();
    let byte_length = array_stride * accessor.count;

    let data = buffer
        .get(byte_offset..byte_offset + byte_length)
        .ok_or(Error::BufferRange {
            buffer: view.buffer,
            offset: byte_offset,
            end: byte_offset + byte_length,
            len: buffer.len(),
        })?;

    Ok(AccessorView {
        index,
        count: accessor.count,
        shape,
        component,
        array_stride,
        byte_offset,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::document::Document;

    fn context(json: &str, buffers: Vec<Vec<u8>>) -> ImportContext {
        ImportContext::new(Document::from_json(json).unwrap(), buffers)
    }

    #[test]
    fn scalar_u16_view_with_combined_offsets() {
        // Buffer-view offset 16 plus accessor offset 4: elements start at
        // byte 20.
        let mut buffer = vec![0u8; 20];
        for value in 0u16..10 {
            buffer.extend_from_slice(&value.to_le_bytes());
        }

        let ctx = context(
            r#"{
                "accessors": [
                    {
                        "type": "SCALAR",
                        "componentType": 5123,
                        "bufferView": 0,
                        "byteOffset": 4,
                        "count": 10
                    }
                ],
                "bufferViews": [{ "buffer": 0, "byteOffset": 16 }]
            }"#,
            vec![buffer],
        );

        let view = get_accessor(0, &ctx).unwrap();
        assert_eq!(view.byte_offset, 20);
        assert_eq!(view.array_stride, 2);
        assert_eq!(view.format(), "uint16");

        let elements: Vec<u16> = view.components();
        assert_eq!(elements, (0u16..10).collect::<Vec<_>>());
    }

    #[test]
    fn vec3_f32_format_and_stride() {
        let buffer = bytemuck::cast_slice::<f32, u8>(&[1.0; 9]).to_vec();
        let ctx = context(
            r#"{
                "accessors": [
                    { "type": "VEC3", "componentType": 5126, "bufferView": 0, "count": 3 }
                ],
                "bufferViews": [{ "buffer": 0 }]
            }"#,
            vec![buffer],
        );

        let view = get_accessor(0, &ctx).unwrap();
        assert_eq!(view.array_stride, 12);
        assert_eq!(view.format(), "float32x3");
        assert_eq!(view.components::<f32>().len(), 9);
    }

    #[test]
    fn absent_accessor_is_not_found() {
        let ctx = context(r#"{}"#, Vec::new());
        assert!(matches!(
            get_accessor(0, &ctx),
            Err(Error::NotFound { kind: "accessor", .. })
        ));
    }

    #[test]
    fn short_buffer_is_a_range_error() {
        let ctx = context(
            r#"{
                "accessors": [
                    { "type": "SCALAR", "componentType": 5125, "bufferView": 0, "count": 4 }
                ],
                "bufferViews": [{ "buffer": 0 }]
            }"#,
            vec![vec![0u8; 8]],
        );

        assert!(matches!(
            get_accessor(0, &ctx),
            Err(Error::BufferRange { .. })
        ));
    }
}
