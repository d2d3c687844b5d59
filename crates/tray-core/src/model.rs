use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Layout direction of a tray's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    Row,
    #[default]
    Column,
}

/// A tray record in the current schema.
///
/// Field order is the emission order of the serialized JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tray {
    pub uuid: String,
    pub name: String,
    pub is_folded: bool,
    pub border_color: String,
    pub children: Vec<String>,
    /// Integer milliseconds or float seconds, kept exactly as found.
    pub last_modified: Number,
    pub meta_data: Map<String, Value>,
    pub parent_uuid: Option<Vec<String>>,
    pub main: Option<String>,
    pub flex_direction: FlexDirection,
    pub editing_start: bool,
}

/// A node of the legacy hierarchical export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyNode {
    #[serde(deserialize_with = "legacy_id")]
    pub id: String,
    /// Copied through untouched, whatever its JSON type; still required.
    pub name: Value,
    #[serde(rename = "borderColor")]
    pub border_color: Value,
    pub created_dt: String,
    /// Required, but may be null for the root.
    #[serde(rename = "parentId", deserialize_with = "nullable_legacy_id")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<LegacyNode>,
}

/// A legacy node reshaped into the tray layout.
///
/// Differs from [`Tray`]: `main` is an empty object, `parentUuid` always holds
/// exactly one (possibly null) entry, and `children` is left out for leaves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedTray {
    pub uuid: String,
    pub name: Value,
    pub border_color: Value,
    pub last_modified: i64,
    pub parent_uuid: Vec<Option<String>>,
    pub flex_direction: FlexDirection,
    pub is_folded: bool,
    pub main: Map<String, Value>,
    pub meta_data: Map<String, Value>,
    pub editing_start: bool,
    pub tags: Vec<String>,
    pub watch_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn legacy_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn nullable_legacy_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<LegacyNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<LegacyNode>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_node_requires_parent_id() {
        let missing = json!({
            "id": "r", "name": "Root", "borderColor": "#fff",
            "created_dt": "2024-01-01T00:00:00"
        });
        assert!(serde_json::from_value::<LegacyNode>(missing).is_err());

        let null_parent = json!({
            "id": "r", "name": "Root", "borderColor": "#fff",
            "created_dt": "2024-01-01T00:00:00", "parentId": null
        });
        let node: LegacyNode = serde_json::from_value(null_parent).unwrap();
        assert_eq!(node.parent_id, None);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_legacy_name_and_color_keep_any_json_type() {
        let value = json!({
            "id": "r", "name": 2024, "borderColor": null,
            "created_dt": "2024-01-01", "parentId": null
        });
        let node: LegacyNode = serde_json::from_value(value).unwrap();
        assert_eq!(node.name, json!(2024));
        assert_eq!(node.border_color, Value::Null);

        let missing_color = json!({
            "id": "r", "name": "Root", "created_dt": "2024-01-01", "parentId": null
        });
        assert!(serde_json::from_value::<LegacyNode>(missing_color).is_err());
    }

    #[test]
    fn test_legacy_numeric_ids_become_strings() {
        let value = json!({
            "id": 7, "name": "Seven", "borderColor": "#fff",
            "created_dt": "2024-01-01", "parentId": 3, "children": null
        });
        let node: LegacyNode = serde_json::from_value(value).unwrap();
        assert_eq!(node.id, "7");
        assert_eq!(node.parent_id.as_deref(), Some("3"));
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_converted_tray_omits_missing_children() {
        let record = ConvertedTray {
            uuid: "a".to_string(),
            name: json!("A"),
            border_color: json!("#ccc"),
            last_modified: 0,
            parent_uuid: vec![None],
            flex_direction: FlexDirection::Column,
            is_folded: false,
            main: Map::new(),
            meta_data: Map::new(),
            editing_start: false,
            tags: vec![],
            watch_tags: vec![],
            children: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("children"));
        assert_eq!(object["parentUuid"], json!([null]));
        assert_eq!(object["flexDirection"], json!("column"));
        assert_eq!(object["main"], json!({}));
        assert_eq!(object["watchTags"], json!([]));
    }
}
