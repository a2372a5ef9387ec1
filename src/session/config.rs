//! Reconstruction configuration handed to the viewer by its host.
//!
//! Only the `cameras` entry is interpreted: it becomes the list of camera
//! choices offered to the user, labelled `Camera 1..N`.

use serde_json::Value;

use crate::error::ViewerError;

/// One selectable camera from the configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraEntry {
    /// Array index or object key the camera was listed under.
    pub id: String,
    /// Display label, `Camera N` with N starting at 1.
    pub label: String,
    /// The raw camera description.
    pub params: Value,
}

/// Cameras listed in the most recent configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraCatalog {
    entries: Vec<CameraEntry>,
}

impl CameraCatalog {
    /// Parse a configuration document.
    ///
    /// `cameras` may be an array (ids are the indices) or an object (ids
    /// are the keys). A document without `cameras` yields an empty
    /// catalog; a document that is not a JSON object is rejected.
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        let doc: Value = serde_json::from_str(json)?;
        let Value::Object(root) = doc else {
            return Err(ViewerError::ConfigParse(
                "configuration must be a JSON object".into(),
            ));
        };

        let listed: Vec<(String, Value)> = match root.get("cameras") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v.clone()))
                .collect(),
            Some(Value::Object(map)) => {
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
            }
            Some(other) => {
                return Err(ViewerError::ConfigParse(format!(
                    "`cameras` must be an array or object, got {other}"
                )));
            }
        };

        let entries = listed
            .into_iter()
            .enumerate()
            .map(|(i, (id, params))| CameraEntry {
                id,
                label: format!("Camera {}", i + 1),
                params,
            })
            .collect();
        Ok(Self { entries })
    }

    /// All entries in listing order.
    #[must_use]
    pub fn entries(&self) -> &[CameraEntry] {
        &self.entries
    }

    /// Camera identifiers in listing order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    /// Display labels in listing order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CameraEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of cameras.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no cameras are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_cameras_use_indices() {
        let catalog = CameraCatalog::from_json(
            r#"{"cameras": [{"model": "brown"}, {"model": "fisheye"}]}"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.ids().collect::<Vec<_>>(), ["0", "1"]);
        let labels: Vec<_> = catalog.labels().collect();
        assert_eq!(labels, ["Camera 1", "Camera 2"]);
        assert_eq!(catalog.get("1").unwrap().params["model"], "fisheye");
    }

    #[test]
    fn object_cameras_use_keys() {
        let json = r#"{"cameras": {"dji fc6310": {}, "gopro": {}}}"#;
        let catalog = CameraCatalog::from_json(json).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), ["dji fc6310", "gopro"]);
        assert_eq!(catalog.labels().last(), Some("Camera 2"));
    }

    #[test]
    fn missing_cameras_is_empty() {
        let catalog = CameraCatalog::from_json(r#"{"gcp": []}"#).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(matches!(
            CameraCatalog::from_json("{ nope"),
            Err(ViewerError::ConfigParse(_))
        ));
        assert!(matches!(
            CameraCatalog::from_json("[1, 2]"),
            Err(ViewerError::ConfigParse(_))
        ));
        assert!(matches!(
            CameraCatalog::from_json(r#"{"cameras": 3}"#),
            Err(ViewerError::ConfigParse(_))
        ));
    }
}
