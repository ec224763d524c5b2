//! Account payloads and Salesforce wire types.

use serde::{Deserialize, Serialize};

/// Outbound create payload. All three fields are required by the endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewAccount {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Industry")]
    pub industry: String,
}

/// Outbound update payload: Id plus only the supplied fields.
#[derive(Serialize, Debug, Clone)]
pub struct AccountPatch {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Phone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "Industry", skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

/// Per-record outcome from the composite sObjects endpoints. The gateway
/// only inspects `success`; everything else passes through to the caller.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SaveResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<SaveError>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SaveError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

/// Result set from the query endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse<T> {
    pub total_size: u64,
    pub done: bool,
    pub records: Vec<T>,
}

/// Scalar-or-sequence input to the write verbs. A scalar normalizes to a
/// one-element vec, so batch results always line up with batch inputs.
#[derive(Debug, Clone)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(item: T) -> Self {
        OneOrMany::One(item)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        OneOrMany::Many(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_normalizes_to_one_element_vec() {
        let one: OneOrMany<&str> = "001xx000003DGb2AAG".into();
        assert_eq!(one.into_vec(), vec!["001xx000003DGb2AAG"]);
    }

    #[test]
    fn sequence_passes_through_unchanged() {
        let many: OneOrMany<i32> = vec![1, 2, 3].into();
        assert_eq!(many.into_vec(), vec![1, 2, 3]);
        let empty: OneOrMany<i32> = Vec::new().into();
        assert!(empty.into_vec().is_empty());
    }

    #[test]
    fn new_account_uses_salesforce_field_casing() {
        let account = NewAccount {
            name: "Acme".into(),
            phone: "555-0100".into(),
            industry: "Manufacturing".into(),
        };
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(
            value,
            json!({ "Name": "Acme", "Phone": "555-0100", "Industry": "Manufacturing" })
        );
    }

    #[test]
    fn account_patch_serializes_only_supplied_fields() {
        let patch = AccountPatch {
            id: "001xx000003DGb2AAG".into(),
            name: None,
            phone: Some("555-0101".into()),
            industry: None,
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            value,
            json!({ "Id": "001xx000003DGb2AAG", "Phone": "555-0101" })
        );
    }

    #[test]
    fn save_result_deserializes_from_composite_response() {
        let results: Vec<SaveResult> = serde_json::from_value(json!([
            { "id": "001xx000003DGb2AAG", "success": true, "errors": [] },
            {
                "success": false,
                "errors": [{
                    "statusCode": "ENTITY_IS_DELETED",
                    "message": "entity is deleted",
                    "fields": []
                }]
            }
        ]))
        .unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].success);
        assert_eq!(results[0].id.as_deref(), Some("001xx000003DGb2AAG"));
        assert!(!results[1].success);
        assert_eq!(
            results[1].errors[0].status_code.as_deref(),
            Some("ENTITY_IS_DELETED")
        );
    }

    #[test]
    fn query_response_uses_camel_case_wire_names() {
        let response: QueryResponse<serde_json::Value> = serde_json::from_value(json!({
            "totalSize": 1,
            "done": true,
            "records": [{ "Id": "001xx000003DGb2AAG", "Name": "Acme" }]
        }))
        .unwrap();
        assert_eq!(response.total_size, 1);
        assert!(response.done);
        assert_eq!(response.records.len(), 1);

        let back = serde_json::to_value(&response).unwrap();
        assert_eq!(back["totalSize"], 1);
    }
}
