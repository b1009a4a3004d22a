//! Structural validation of inbound board actions.
//!
//! Works on an already-parsed `serde_json::Value` so that "not JSON" and
//! "JSON of the wrong shape" stay distinct failures. Every problem is
//! collected; the caller gets either a typed [`ActionRequest`] or the full
//! list of [`ValidationIssue`]s, in schema field order.

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::board::types::{Action, ActionRequest};

const USERNAME_MIN: usize = 1;
const PIN_MIN: usize = 4;

/// Kind of validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    InvalidEnumValue,
}

/// One field-level validation failure, reported back in `details`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    /// Field path; empty when the body itself has the wrong type.
    pub path: Vec<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<&'static str>>,
    /// Kind of value a `too_small` bound applies to.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
}

impl ValidationIssue {
    fn invalid_type(path: &[&str], expected: impl Into<String>, received: Option<&Value>) -> Self {
        let expected = expected.into();
        let received = received.map_or("undefined", json_type);
        let message = if received == "undefined" {
            "Required".to_string()
        } else {
            format!("Expected {}, received {}", expected, received)
        };
        Self {
            code: IssueCode::InvalidType,
            path: to_path(path),
            message,
            expected: Some(expected),
            received: Some(received.to_string()),
            minimum: None,
            options: None,
            kind: None,
            inclusive: None,
            exact: None,
        }
    }

    fn too_small(field: &str, minimum: usize) -> Self {
        Self {
            code: IssueCode::TooSmall,
            path: to_path(&[field]),
            message: format!("String must contain at least {} character(s)", minimum),
            expected: None,
            received: None,
            minimum: Some(minimum),
            options: None,
            kind: Some("string"),
            inclusive: Some(true),
            exact: Some(false),
        }
    }

    fn invalid_enum(field: &str, received: &str) -> Self {
        Self {
            code: IssueCode::InvalidEnumValue,
            path: to_path(&[field]),
            message: format!(
                "Invalid enum value. Expected {}, received '{}'",
                action_options(),
                received
            ),
            expected: None,
            received: Some(received.to_string()),
            minimum: None,
            options: Some(Action::ALL.iter().map(Action::as_str).collect()),
            kind: None,
            inclusive: None,
            exact: None,
        }
    }

    /// Name of the offending field, if the issue is field-level.
    pub fn field(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

fn to_path(path: &[&str]) -> Vec<String> {
    path.iter().map(|segment| segment.to_string()).collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn action_options() -> String {
    Action::ALL
        .iter()
        .map(|action| format!("'{}'", action.as_str()))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Validate a parsed request body against the board action schema.
///
/// Unknown keys are ignored and do not appear in the returned request.
pub fn validate(body: &Value) -> Result<ActionRequest, Vec<ValidationIssue>> {
    let Some(object) = body.as_object() else {
        return Err(vec![ValidationIssue::invalid_type(&[], "object", Some(body))]);
    };

    let mut checker = Checker {
        object,
        issues: Vec::new(),
    };

    let action = checker.action("action");
    let username = checker.required_string("username", USERNAME_MIN);
    let pin = checker.required_string("pin", PIN_MIN);
    let board_code = checker.optional_string("board_code");
    let board_name = checker.optional_string("board_name");
    let item_name = checker.optional_string("item_name");
    let target_price = checker.optional_number("target_price");
    let start_date = checker.optional_string("start_date");
    let end_date = checker.optional_string("end_date");

    match (action, username, pin) {
        (Some(action), Some(username), Some(pin)) if checker.issues.is_empty() => {
            Ok(ActionRequest {
                action,
                username,
                pin,
                board_code,
                board_name,
                item_name,
                target_price,
                start_date,
                end_date,
            })
        }
        _ => Err(checker.issues),
    }
}

struct Checker<'a> {
    object: &'a Map<String, Value>,
    issues: Vec<ValidationIssue>,
}

impl Checker<'_> {
    fn action(&mut self, field: &str) -> Option<Action> {
        match self.object.get(field) {
            Some(Value::String(raw)) => match raw.parse::<Action>() {
                Ok(action) => Some(action),
                Err(_) => {
                    self.issues.push(ValidationIssue::invalid_enum(field, raw));
                    None
                }
            },
            other => {
                self.issues
                    .push(ValidationIssue::invalid_type(&[field], action_options(), other));
                None
            }
        }
    }

    fn required_string(&mut self, field: &str, minimum: usize) -> Option<String> {
        match self.object.get(field) {
            // Length in UTF-16 code units, as browsers and JS validators count it.
            Some(Value::String(value)) => {
                if value.encode_utf16().count() < minimum {
                    self.issues.push(ValidationIssue::too_small(field, minimum));
                    None
                } else {
                    Some(value.clone())
                }
            }
            other => {
                self.issues
                    .push(ValidationIssue::invalid_type(&[field], "string", other));
                None
            }
        }
    }

    // Present-but-null is a type error; only absence means "not provided".
    fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.object.get(field) {
            None => None,
            Some(Value::String(value)) => Some(value.clone()),
            Some(other) => {
                self.issues
                    .push(ValidationIssue::invalid_type(&[field], "string", Some(other)));
                None
            }
        }
    }

    fn optional_number(&mut self, field: &str) -> Option<Number> {
        match self.object.get(field) {
            None => None,
            Some(Value::Number(value)) => Some(value.clone()),
            Some(other) => {
                self.issues
                    .push(ValidationIssue::invalid_type(&[field], "number", Some(other)));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issues_for(body: Value) -> Vec<ValidationIssue> {
        validate(&body).expect_err("body should be rejected")
    }

    #[test]
    fn test_minimal_request_is_accepted() {
        let request = validate(&json!({
            "action": "create_board",
            "username": "alice",
            "pin": "1234"
        }))
        .unwrap();

        assert_eq!(request.action, Action::CreateBoard);
        assert_eq!(request.username, "alice");
        assert!(request.board_code.is_none());
    }

    #[test]
    fn test_full_request_is_forwarded_identically() {
        let body = json!({
            "action": "add_item",
            "username": "alice",
            "pin": "1234",
            "board_code": "ABCD",
            "board_name": "Holiday fund",
            "item_name": "Flights",
            "target_price": 450,
            "start_date": "2026-01-01",
            "end_date": "2026-06-30"
        });
        let request = validate(&body).unwrap();
        assert_eq!(serde_json::to_value(&request).unwrap(), body);
    }

    #[test]
    fn test_short_pin_is_reported_on_pin_field() {
        let issues = issues_for(json!({
            "action": "add_item",
            "username": "alice",
            "pin": "123"
        }));

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::TooSmall);
        assert_eq!(issues[0].field(), Some("pin"));
        assert_eq!(issues[0].minimum, Some(4));
    }

    #[test]
    fn test_pin_length_counts_utf16_units() {
        // two astral characters, four UTF-16 units
        assert!(validate(&json!({
            "action": "get_board",
            "username": "a",
            "pin": "😀😀"
        }))
        .is_ok());

        // one astral plus one BMP character, three units
        let issues = issues_for(json!({
            "action": "get_board",
            "username": "a",
            "pin": "😀π"
        }));
        assert_eq!(issues[0].code, IssueCode::TooSmall);
        assert_eq!(issues[0].field(), Some("pin"));
    }

    #[test]
    fn test_collects_all_issues_in_field_order() {
        let issues = issues_for(json!({
            "action": "delete_board",
            "username": "",
            "target_price": "cheap"
        }));

        let fields: Vec<_> = issues.iter().filter_map(|i| i.field()).collect();
        assert_eq!(fields, vec!["action", "username", "pin", "target_price"]);
        assert_eq!(issues[0].code, IssueCode::InvalidEnumValue);
        assert_eq!(issues[1].code, IssueCode::TooSmall);
        assert_eq!(issues[2].message, "Required");
        assert_eq!(issues[3].message, "Expected number, received string");
    }

    #[test]
    fn test_unknown_action_lists_options() {
        let issues = issues_for(json!({
            "action": "close_board",
            "username": "alice",
            "pin": "1234"
        }));
        assert_eq!(
            issues[0].options.as_deref(),
            Some(&["create_board", "join_board", "add_item", "get_board"][..])
        );
        assert_eq!(issues[0].received.as_deref(), Some("close_board"));
    }

    #[test]
    fn test_null_optional_is_a_type_error() {
        let issues = issues_for(json!({
            "action": "join_board",
            "username": "alice",
            "pin": "1234",
            "board_code": null
        }));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field(), Some("board_code"));
        assert_eq!(issues[0].received.as_deref(), Some("null"));
    }

    #[test]
    fn test_non_object_body_has_empty_path() {
        let issues = issues_for(json!(["create_board"]));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].path.is_empty());
        assert_eq!(issues[0].message, "Expected object, received array");
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let request = validate(&json!({
            "action": "get_board",
            "username": "alice",
            "pin": "1234",
            "is_admin": true
        }))
        .unwrap();
        let forwarded = serde_json::to_value(&request).unwrap();
        assert!(forwarded.get("is_admin").is_none());
    }

    #[test]
    fn test_target_price_keeps_number_representation() {
        let request = validate(&json!({
            "action": "add_item",
            "username": "alice",
            "pin": "1234",
            "target_price": 100
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"action":"add_item","username":"alice","pin":"1234","target_price":100}"#
        );
    }

    #[test]
    fn test_issue_serializes_without_empty_fields() {
        let issues = issues_for(json!({
            "action": "add_item",
            "username": "alice",
            "pin": "123"
        }));
        assert_eq!(
            serde_json::to_value(&issues[0]).unwrap(),
            json!({
                "code": "too_small",
                "path": ["pin"],
                "message": "String must contain at least 4 character(s)",
                "minimum": 4,
                "type": "string",
                "inclusive": true,
                "exact": false
            })
        );
    }
}
