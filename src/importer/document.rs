use serde::Deserialize;

use crate::error::Error;

/// The glTF JSON subset the importer consumes: accessors, buffer views,
/// materials (metallic-roughness plus the unlit extension flag), textures and
/// buffer-view-sourced images. Raw binary buffers are supplied separately by
/// index.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub accessors: Vec<Accessor>,
    #[serde(default)]
    pub buffer_views: Vec<BufferView>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub textures: Vec<TextureInfo>,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Document {
    pub fn from_json(json: &str) -> Result<Document, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AccessorType {
    #[serde(rename = "SCALAR")]
    Scalar,
    #[serde(rename = "VEC2")]
    Vec2,
    #[serde(rename = "VEC3")]
    Vec3,
    #[serde(rename = "VEC4")]
    Vec4,
    #[serde(rename = "MAT2")]
    Mat2,
    #[serde(rename = "MAT3")]
    Mat3,
    #[serde(rename = "MAT4")]
    Mat4,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    #[serde(rename = "type")]
    pub element_type: AccessorType,
    pub component_type: u32,
    pub buffer_view: Option<usize>,
    #[serde(default)]
    pub byte_offset: usize,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub buffer: usize,
    #[serde(default)]
    pub byte_offset: usize,
    pub byte_length: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    #[serde(default)]
    pub extensions: MaterialExtensions,
}

#[derive(Debug, Default, Deserialize)]
pub struct MaterialExtensions {
    #[serde(rename = "KHR_materials_unlit")]
    pub khr_materials_unlit: Option<serde_json::Value>,
}

impl Material {
    pub fn is_unlit(&self) -> bool {
        self.extensions.khr_materials_unlit.is_some()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    pub base_color_factor: Option<[f32; 4]>,
    pub base_color_texture: Option<TextureRef>,
    pub metallic_factor: Option<f32>,
    pub roughness_factor: Option<f32>,
    pub metallic_roughness_texture: Option<TextureRef>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TextureRef {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct TextureInfo {
    pub source: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub buffer_view: Option<usize>,
    pub uri: Option<String>,
    pub mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_consumed_subset() {
        let doc = Document::from_json(
            r#"{
                "asset": { "version": "2.0" },
                "accessors": [
                    { "type": "VEC3", "componentType": 5126, "bufferView": 0, "count": 3 }
                ],
                "bufferViews": [
                    { "buffer": 0, "byteOffset": 8, "byteLength": 36 }
                ],
                "materials": [
                    {
                        "pbrMetallicRoughness": { "baseColorFactor": [1, 0, 0, 1] },
                        "extensions": { "KHR_materials_unlit": {} }
                    },
                    { "name": "no-pbr-block" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.accessors[0].element_type, AccessorType::Vec3);
        assert_eq!(doc.accessors[0].byte_offset, 0);
        assert_eq!(doc.buffer_views[0].byte_offset, 8);
        assert!(doc.materials[0].is_unlit());
        assert!(doc.materials[1].pbr_metallic_roughness.is_none());
    }
}
