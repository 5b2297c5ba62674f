//! The subset of a IIIF presentation (v2) manifest that folio consumes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
    #[serde(default)]
    pub sequences: Vec<Sequence>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sequence {
    #[serde(default)]
    pub canvases: Vec<Canvas>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Canvas {
    #[serde(default)]
    pub images: Vec<ImageAnnotation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageAnnotation {
    pub resource: ImageResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageResource {
    #[serde(rename = "@id")]
    pub id: String,
}

/// One `{label, value}` pair from the manifest's `metadata` array, kept as-is.
///
/// Either key may be missing in the wild; the table builder reports that.
/// A key that is present with `null` is `Some(Value::Null)`, not `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

/// Only called when the key exists, so `null` stays a value.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl MetadataEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: Some(Value::String(label.into())),
            value: Some(Value::String(value.into())),
        }
    }
}

impl Manifest {
    /// Every `resource.@id` of every image of every canvas, in document order.
    pub fn image_locations(&self) -> Vec<String> {
        self.sequences
            .iter()
            .flat_map(|s| s.canvases.iter())
            .flat_map(|c| c.images.iter())
            .map(|i| i.resource.id.clone())
            .collect()
    }
}

/// Flatten a IIIF property value into a single line of text.
///
/// Strings are kept as-is; language-tagged arrays (`[{"@value": .., "@language": ..}]`)
/// and plain arrays are joined with ` | `; null becomes empty; anything else is its JSON text.
pub fn flatten_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(flatten_value)
            .collect::<Vec<_>>()
            .join(" | "),
        Value::Object(map) => match map.get("@value") {
            Some(inner) => flatten_value(inner),
            None => v.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MANIFEST: &str = r#"{
        "@id": "https://gallica.bnf.fr/iiif/ark:/12148/btv1b525088021/manifest.json",
        "metadata": [
            {"label": "Repository", "value": "Bibliothèque nationale de France"},
            {"label": "Title", "value": "Heures"}
        ],
        "sequences": [{
            "canvases": [
                {"images": [{"resource": {"@id": "https://gallica.bnf.fr/iiif/ark:/12148/btv1b525088021/f1/full/full/0/native.jpg"}}]},
                {"images": [{"resource": {"@id": "https://gallica.bnf.fr/iiif/ark:/12148/btv1b525088021/f2/full/full/0/native.jpg"}}]}
            ]
        }]
    }"#;

    #[test]
    fn parses_locations_in_order() {
        let m: Manifest = serde_json::from_str(MANIFEST).unwrap();
        let locs = m.image_locations();
        assert_eq!(locs.len(), 2);
        assert!(locs[0].contains("/f1/"));
        assert!(locs[1].contains("/f2/"));
        assert_eq!(m.metadata[1], MetadataEntry::new("Title", "Heures"));
    }

    #[test]
    fn canvas_with_several_images_keeps_all() {
        let m: Manifest = serde_json::from_value(json!({
            "sequences": [{"canvases": [
                {"images": [{"resource": {"@id": "a"}}, {"resource": {"@id": "b"}}]},
                {"images": [{"resource": {"@id": "c"}}]}
            ]}]
        }))
        .unwrap();
        assert_eq!(m.image_locations(), vec!["a", "b", "c"]);
        assert!(m.metadata.is_empty());
    }

    #[test]
    fn missing_keys_in_metadata_entry_are_none() {
        let m: Manifest =
            serde_json::from_value(json!({"metadata": [{"label": "Title"}]})).unwrap();
        assert_eq!(m.metadata[0].label, Some(json!("Title")));
        assert!(m.metadata[0].value.is_none());
    }

    #[test]
    fn null_metadata_value_is_kept_as_null() {
        let m: Manifest = serde_json::from_value(json!({
            "metadata": [{"label": "Date", "value": null}, {"label": null, "value": "x"}]
        }))
        .unwrap();
        assert_eq!(m.metadata[0].value, Some(Value::Null));
        assert_eq!(m.metadata[1].label, Some(Value::Null));
    }

    #[test]
    fn flatten_language_arrays() {
        let v = json!([
            {"@value": "Heures à l'usage de Rome", "@language": "fr"},
            {"@value": "Book of hours", "@language": "en"}
        ]);
        assert_eq!(flatten_value(&v), "Heures à l'usage de Rome | Book of hours");
        assert_eq!(flatten_value(&json!(1850)), "1850");
        assert_eq!(flatten_value(&json!(null)), "");
    }
}
