//! Request and response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Operation variables, a JSON object.
pub type Variables = Map<String, Value>;

/// Body of a GraphQL POST.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest<'a> {
    /// Operation text.
    pub query: &'a str,
    /// Variables, `{}` when none.
    pub variables: &'a Variables,
}

impl GraphQLRequest<'_> {
    /// Serializes the request into a JSON body.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Body of a GraphQL response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<Value>>,
}

impl GraphQLResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns an invalid-response error if the body is not an object of
    /// the expected shape.
    pub fn from_value(body: Value) -> Result<Self> {
        if !body.is_object() {
            return Err(Error::invalid_response("response body is not a JSON object"));
        }
        Ok(serde_json::from_value(body)?)
    }

    /// Returns the messages of the `errors` entries.
    ///
    /// An entry without a string `message` contributes an empty message.
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors
            .iter()
            .flatten()
            .map(|entry| entry.get("message").and_then(Value::as_str).unwrap_or(""))
            .collect()
    }

    /// Returns `data`, or fails if an `errors` field is present.
    ///
    /// Errors win even when `data` is present, and an empty `errors` list
    /// still fails with an empty message. A response with neither yields
    /// `null`.
    pub fn into_data(self) -> Result<Value> {
        if self.errors.is_some() {
            return Err(Error::response(self.error_messages()));
        }
        Ok(self.data.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_request_shape() {
        let variables = Variables::new();
        let body = GraphQLRequest { query: "query Q { a }", variables: &variables }
            .to_value()
            .unwrap();
        assert_eq!(body, json!({"query": "query Q { a }", "variables": {}}));
    }

    #[test]
    fn test_data_returned() {
        let response = GraphQLResponse::from_value(json!({"data": {"jobs": []}})).unwrap();
        assert_eq!(response.into_data().unwrap(), json!({"jobs": []}));
    }

    #[test]
    fn test_errors_win_over_data() {
        let response = GraphQLResponse::from_value(json!({
            "data": {"job": null},
            "errors": [{"message": "Unauthorized"}]
        }))
        .unwrap();
        let err = response.into_data().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.message(), "Unauthorized");
    }

    #[test]
    fn test_messages_joined_in_order() {
        let response = GraphQLResponse::from_value(json!({
            "errors": [{"message": "first"}, {"path": ["x"]}, {"message": "third"}]
        }))
        .unwrap();
        let err = response.into_data().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Response);
        assert_eq!(err.message(), "first\n\nthird");
    }

    #[test]
    fn test_empty_errors_fail() {
        let response =
            GraphQLResponse::from_value(json!({"data": {"jobs": []}, "errors": []})).unwrap();
        let err = response.into_data().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Response);
        assert_eq!(err.message(), "");
    }

    #[test]
    fn test_missing_data_is_null() {
        let response = GraphQLResponse::from_value(json!({})).unwrap();
        assert_eq!(response.into_data().unwrap(), Value::Null);
        let response = GraphQLResponse::from_value(json!({"errors": null})).unwrap();
        assert_eq!(response.into_data().unwrap(), Value::Null);
    }

    #[test]
    fn test_non_object_rejected() {
        for body in [json!([]), json!("oops"), json!(null)] {
            let err = GraphQLResponse::from_value(body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        }
        let err = GraphQLResponse::from_value(json!({"errors": "bad"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    }

    proptest! {
        #[test]
        fn prop_error_message_is_newline_join(messages in prop::collection::vec("[a-zA-Z ]{0,12}", 1..5)) {
            let entries: Vec<Value> = messages.iter().map(|m| json!({"message": m})).collect();
            let response = GraphQLResponse::from_value(json!({"errors": entries})).unwrap();
            let err = response.into_data().unwrap_err();
            prop_assert_eq!(err.message(), messages.join("\n"));
        }
    }
}
