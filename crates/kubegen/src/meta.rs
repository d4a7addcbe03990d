//! The subset of orchestration-runtime identity types that generated code
//! embeds. Kept deliberately small; the full upstream API machinery is an
//! external concern.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// TypeMeta
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    pub api_version: String,
    pub kind: String,
}

///
/// ObjectMeta
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

///
/// ListMeta
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_meta_serializes_camel_case_and_skips_empties() {
        let meta = ObjectMeta {
            name: Some("widget-1".to_string()),
            ..ObjectMeta::default()
        };

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "widget-1" }));
    }

    #[test]
    fn type_meta_round_trips() {
        let meta = TypeMeta {
            api_version: "example.widgets/v1".to_string(),
            kind: "Widget".to_string(),
        };

        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("apiVersion"));
        assert_eq!(serde_json::from_str::<TypeMeta>(&json).unwrap(), meta);
    }
}
