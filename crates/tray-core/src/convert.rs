//! Flatten a legacy export tree into a list of tray-shaped records.

use serde_json::Map;

use crate::error::Result;
use crate::model::{ConvertedTray, FlexDirection, LegacyNode};
use crate::utils::{iso_to_millis, NaiveZone};

/// Parse a legacy export document.
pub fn parse_legacy(text: &str) -> Result<LegacyNode> {
    Ok(serde_json::from_str(text)?)
}

/// Flatten `root` in pre-order: a parent always precedes its descendants and
/// siblings keep their input order.
pub fn flatten(root: &LegacyNode, zone: NaiveZone) -> Result<Vec<ConvertedTray>> {
    flatten_into(root, zone, Vec::new())
}

fn flatten_into(
    node: &LegacyNode,
    zone: NaiveZone,
    mut out: Vec<ConvertedTray>,
) -> Result<Vec<ConvertedTray>> {
    out.push(convert_node(node, zone)?);
    log::debug!("converted node {} ({} children)", node.id, node.children.len());

    node.children
        .iter()
        .try_fold(out, |out, child| flatten_into(child, zone, out))
}

/// Reshape a single node; its children are referenced by id only.
pub fn convert_node(node: &LegacyNode, zone: NaiveZone) -> Result<ConvertedTray> {
    let children = if node.children.is_empty() {
        None
    } else {
        Some(node.children.iter().map(|c| c.id.clone()).collect())
    };

    Ok(ConvertedTray {
        uuid: node.id.clone(),
        name: node.name.clone(),
        border_color: node.border_color.clone(),
        last_modified: iso_to_millis(&node.created_dt, zone)?,
        parent_uuid: vec![node.parent_id.clone()],
        flex_direction: FlexDirection::Column,
        is_folded: false,
        main: Map::new(),
        meta_data: Map::new(),
        editing_start: false,
        tags: Vec::new(),
        watch_tags: Vec::new(),
        children,
    })
}

/// Serialize converted records as a single compact JSON line.
pub fn to_json_line(records: &[ConvertedTray]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrayError;
    use serde_json::{json, Value};

    const TWO_NODES: &str = r##"{"id":"r","name":"Root","borderColor":"#fff","created_dt":"2024-01-01T00:00:00","parentId":null,"children":[{"id":"c1","name":"Child","borderColor":"#eee","created_dt":"2024-01-01T00:00:01","parentId":"r","children":[]}]}"##;

    fn to_value(records: &[ConvertedTray]) -> serde_json::Result<Value> {
        serde_json::to_value(records)
    }

    fn node(id: &str, parent: Option<&str>, children: Vec<LegacyNode>) -> LegacyNode {
        LegacyNode {
            id: id.to_string(),
            name: json!(id.to_uppercase()),
            border_color: json!("#ccc"),
            created_dt: "2024-01-01T00:00:00Z".to_string(),
            parent_id: parent.map(str::to_string),
            children,
        }
    }

    #[test]
    fn test_two_node_export() {
        let root = parse_legacy(TWO_NODES).unwrap();
        let records = flatten(&root, NaiveZone::Utc).unwrap();
        assert_eq!(records.len(), 2);

        let value = to_value(&records).unwrap();
        assert_eq!(value[0]["uuid"], json!("r"));
        assert_eq!(value[0]["children"], json!(["c1"]));
        assert_eq!(value[0]["parentUuid"], json!([null]));
        assert_eq!(value[0]["lastModified"], json!(1_704_067_200_000i64));

        assert_eq!(value[1]["uuid"], json!("c1"));
        assert_eq!(value[1]["parentUuid"], json!(["r"]));
        assert_eq!(value[1]["lastModified"], json!(1_704_067_201_000i64));
        assert!(value[1].as_object().unwrap().get("children").is_none());
    }

    #[test]
    fn test_constant_fields() {
        let records = flatten(&node("a", None, vec![]), NaiveZone::Utc).unwrap();
        let value = to_value(&records).unwrap();
        assert_eq!(
            value[0],
            json!({
                "uuid": "a",
                "name": "A",
                "borderColor": "#ccc",
                "lastModified": 1_704_067_200_000i64,
                "parentUuid": [null],
                "flexDirection": "column",
                "isFolded": false,
                "main": {},
                "metaData": {},
                "editingStart": false,
                "tags": [],
                "watchTags": []
            })
        );
    }

    #[test]
    fn test_preorder_and_sibling_order() {
        let tree = node(
            "root",
            None,
            vec![
                node("a", Some("root"), vec![node("a1", Some("a"), vec![]), node("a2", Some("a"), vec![])]),
                node("b", Some("root"), vec![node("b1", Some("b"), vec![])]),
            ],
        );
        let records = flatten(&tree, NaiveZone::Utc).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.uuid.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "a1", "a2", "b", "b1"]);

        for (index, record) in records.iter().enumerate() {
            for child in record.children.iter().flatten() {
                let child_index = ids.iter().position(|id| id == child).unwrap();
                assert!(child_index > index, "{child} must follow {}", record.uuid);
            }
        }
        assert_eq!(records[0].children, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_name_and_color_copied_verbatim() {
        let root = parse_legacy(
            r#"{"id":"r","name":2024,"borderColor":null,"created_dt":"2024-01-01T00:00:00Z","parentId":null}"#,
        )
        .unwrap();
        let records = flatten(&root, NaiveZone::Utc).unwrap();
        let value = to_value(&records).unwrap();
        assert_eq!(value[0]["name"], json!(2024));
        assert_eq!(value[0]["borderColor"], Value::Null);
        assert!(value[0].as_object().unwrap().contains_key("borderColor"));
    }

    #[test]
    fn test_missing_required_key_aborts() {
        let err = parse_legacy(
            r##"{"id":"r","borderColor":"#fff","created_dt":"2024-01-01","parentId":null}"##,
        )
        .unwrap_err();
        assert!(matches!(err, TrayError::Json(_)));
    }

    #[test]
    fn test_bad_timestamp_in_descendant_aborts() {
        let mut tree = node("root", None, vec![node("a", Some("root"), vec![])]);
        tree.children[0].created_dt = "not a date".to_string();
        let err = flatten(&tree, NaiveZone::Utc).unwrap_err();
        assert!(matches!(err, TrayError::Timestamp { .. }));
    }

    #[test]
    fn test_json_line_keeps_non_ascii() {
        let mut leaf = node("n", None, vec![]);
        leaf.name = json!("日記");
        let line = to_json_line(&flatten(&leaf, NaiveZone::Utc).unwrap()).unwrap();
        assert!(line.contains("\"name\":\"日記\""));
        assert!(!line.contains('\n'));
    }
}
