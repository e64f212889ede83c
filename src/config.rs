// config.rs - Viewer configuration
//
// Every field has a default, so an empty JSON object is a valid config.

use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub service: ServiceConfig,
    pub plane: PlaneConfig,
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Where the inference service lives and how uploads are shaped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub upload_path: String,
    pub file_field: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            upload_path: "/upload".into(),
            file_field: "file".into(),
        }
    }
}

/// World-space size of the displaced plane.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaneConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self { width: 2.0, height: 2.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = ViewerConfig::from_json("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.service.upload_path, "/upload");
        assert_eq!(config.plane.width, 2.0);
    }

    #[test]
    fn partial_override() {
        let config = ViewerConfig::from_json(
            r#"{ "service": { "base_url": "https://depth.example" }, "plane": { "height": 3.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.service.base_url, "https://depth.example");
        assert_eq!(config.service.file_field, "file");
        assert_eq!(config.plane.width, 2.0);
        assert_eq!(config.plane.height, 3.5);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = ViewerConfig::from_json("{ service: ").unwrap_err();
        assert!(matches!(err, crate::ViewerError::Config(_)));
    }
}
