//! Batch action vocabulary for the indexing API.
//!
//! Every request inside a batch write carries an `action` field naming what
//! the engine should do with the request body. The set of actions is closed;
//! each variant maps to exactly one camelCase wire string, and the wire string
//! is the only representation that ever crosses the JSON boundary (never the
//! variant name or its ordinal).

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raised when a wire string does not name any [`Action`].
///
/// Matching is exact and case-sensitive, so `"ADDOBJECT"` and `" addObject"`
/// are both rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized action value '{input}'")]
pub struct UnrecognizedAction {
    /// The offending input, kept verbatim for diagnostics.
    pub input: String,
}

/// Type of operation applied by a single batch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Add a record; the engine assigns the `objectID`.
    AddObject,
    /// Add or replace a record identified by its `objectID`.
    UpdateObject,
    /// Merge attributes into a record, creating it if absent.
    PartialUpdateObject,
    /// Merge attributes into a record, skipping it if absent.
    PartialUpdateObjectNoCreate,
    /// Remove a record identified by its `objectID`.
    DeleteObject,
    /// Delete the whole index.
    Delete,
    /// Remove every record while keeping settings.
    Clear,
}

impl Action {
    /// All actions in declaration order.
    pub const ALL: [Action; 7] = [
        Action::AddObject,
        Action::UpdateObject,
        Action::PartialUpdateObject,
        Action::PartialUpdateObjectNoCreate,
        Action::DeleteObject,
        Action::Delete,
        Action::Clear,
    ];

    /// Wire string for this action.
    ///
    /// ```
    /// use searchindex_core::Action;
    ///
    /// assert_eq!(Action::AddObject.as_str(), "addObject");
    /// assert_eq!(Action::Clear.as_str(), "clear");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::AddObject => "addObject",
            Action::UpdateObject => "updateObject",
            Action::PartialUpdateObject => "partialUpdateObject",
            Action::PartialUpdateObjectNoCreate => "partialUpdateObjectNoCreate",
            Action::DeleteObject => "deleteObject",
            Action::Delete => "delete",
            Action::Clear => "clear",
        }
    }

    /// Resolves a wire string to its action.
    ///
    /// # Errors
    ///
    /// Returns [`UnrecognizedAction`] carrying `value` when it matches none of
    /// the wire strings.
    ///
    /// ```
    /// use searchindex_core::Action;
    ///
    /// assert_eq!(Action::from_value("delete"), Ok(Action::Delete));
    /// assert!(Action::from_value("ADDOBJECT").is_err());
    /// ```
    pub fn from_value(value: &str) -> Result<Self, UnrecognizedAction> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| UnrecognizedAction {
                input: value.to_string(),
            })
    }

    /// Whether records sent with this action must carry an `objectID`.
    ///
    /// `AddObject` lets the engine generate ids; `Delete` and `Clear` act on
    /// the index and send an empty body.
    #[must_use]
    pub const fn requires_object_id(self) -> bool {
        matches!(
            self,
            Action::UpdateObject
                | Action::PartialUpdateObject
                | Action::PartialUpdateObjectNoCreate
                | Action::DeleteObject
        )
    }

    /// Whether this action targets the index itself rather than a record.
    #[must_use]
    pub const fn is_index_level(self) -> bool {
        matches!(self, Action::Delete | Action::Clear)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = UnrecognizedAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_value(s)
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct ActionVisitor;

impl Visitor<'_> for ActionVisitor {
    type Value = Action;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an action wire string")
    }

    // Non-string tokens fall through to the default `invalid_type` errors,
    // keeping format errors apart from unrecognized values.
    fn visit_str<E: de::Error>(self, value: &str) -> Result<Action, E> {
        Action::from_value(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ActionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};

    use super::*;

    /// Minimal message embedding an action as a field.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Envelope {
        action: Action,
    }

    // ---- Wire value tests ----

    #[test]
    fn wire_values_match_api_vocabulary() {
        let expected = [
            (Action::AddObject, "addObject"),
            (Action::UpdateObject, "updateObject"),
            (Action::PartialUpdateObject, "partialUpdateObject"),
            (Action::PartialUpdateObjectNoCreate, "partialUpdateObjectNoCreate"),
            (Action::DeleteObject, "deleteObject"),
            (Action::Delete, "delete"),
            (Action::Clear, "clear"),
        ];
        for (action, wire) in expected {
            assert_eq!(action.as_str(), wire);
            assert_eq!(action.to_string(), wire);
        }
    }

    #[test]
    fn every_action_resolves_back_from_its_wire_value() {
        for action in Action::ALL {
            assert_eq!(Action::from_value(action.as_str()), Ok(action));
        }
    }

    #[test]
    fn wire_values_are_distinct() {
        let wires: HashSet<&str> = Action::ALL.iter().map(|a| a.as_str()).collect();
        assert_eq!(wires.len(), Action::ALL.len());
    }

    #[test]
    fn from_value_literals() {
        assert_eq!(Action::from_value("delete"), Ok(Action::Delete));
        assert_eq!(Action::from_value("clear"), Ok(Action::Clear));
        assert_eq!("deleteObject".parse::<Action>(), Ok(Action::DeleteObject));
    }

    #[test]
    fn unknown_value_is_rejected_with_input() {
        let err = Action::from_value("unknownOperation").unwrap_err();
        assert_eq!(err.input, "unknownOperation");
        assert_eq!(
            err.to_string(),
            "unrecognized action value 'unknownOperation'"
        );
    }

    #[test]
    fn matching_is_case_sensitive_and_untrimmed() {
        assert!(Action::from_value("ADDOBJECT").is_err());
        assert!(Action::from_value("AddObject").is_err());
        assert!(Action::from_value(" addObject").is_err());
        assert!(Action::from_value("addObject ").is_err());
        assert!(Action::from_value("").is_err());
    }

    #[test]
    fn requires_object_id_by_action() {
        assert!(!Action::AddObject.requires_object_id());
        assert!(Action::UpdateObject.requires_object_id());
        assert!(Action::PartialUpdateObject.requires_object_id());
        assert!(Action::PartialUpdateObjectNoCreate.requires_object_id());
        assert!(Action::DeleteObject.requires_object_id());
        assert!(!Action::Delete.requires_object_id());
        assert!(!Action::Clear.requires_object_id());
    }

    #[test]
    fn index_level_actions() {
        let index_level: Vec<Action> = Action::ALL
            .into_iter()
            .filter(|a| a.is_index_level())
            .collect();
        assert_eq!(index_level, vec![Action::Delete, Action::Clear]);
    }

    // ---- JSON codec tests ----

    #[test]
    fn encodes_as_wire_string_in_field() {
        let json = serde_json::to_string(&Envelope {
            action: Action::UpdateObject,
        })
        .unwrap();
        assert_eq!(json, r#"{"action":"updateObject"}"#);
    }

    #[test]
    fn decodes_wire_string_in_field() {
        let env: Envelope = serde_json::from_str(r#"{"action":"deleteObject"}"#).unwrap();
        assert_eq!(env.action, Action::DeleteObject);
    }

    #[test]
    fn decodes_from_owned_value() {
        let value = serde_json::json!({ "action": "partialUpdateObjectNoCreate" });
        let env: Envelope = serde_json::from_value(value).unwrap();
        assert_eq!(env.action, Action::PartialUpdateObjectNoCreate);
    }

    #[test]
    fn decoding_unknown_string_reports_unrecognized_value() {
        let err = serde_json::from_str::<Envelope>(r#"{"action":"upsert"}"#).unwrap_err();
        assert!(err.is_data());
        assert!(
            err.to_string().contains("unrecognized action value 'upsert'"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn decoding_non_string_token_is_a_type_error() {
        for raw in [
            r#"{"action":1}"#,
            r#"{"action":true}"#,
            r#"{"action":null}"#,
            r#"{"action":["addObject"]}"#,
            r#"{"action":{"name":"addObject"}}"#,
        ] {
            let err = serde_json::from_str::<Envelope>(raw).unwrap_err();
            let message = err.to_string();
            assert!(message.contains("invalid type"), "{raw}: {message}");
            assert!(!message.contains("unrecognized action"), "{raw}: {message}");
        }
    }

    #[test]
    fn never_encodes_variant_name_or_ordinal() {
        for action in Action::ALL {
            let json = serde_json::to_value(action).unwrap();
            assert_eq!(json, serde_json::Value::String(action.as_str().to_string()));
        }
    }

    // ---- Properties ----

    proptest! {
        #[test]
        fn strings_outside_the_vocabulary_are_rejected(input in "\\PC*") {
            prop_assume!(Action::ALL.iter().all(|a| a.as_str() != input));
            let err = Action::from_value(&input).unwrap_err();
            prop_assert_eq!(err.input, input);
        }

        #[test]
        fn json_codec_preserves_action(index in 0usize..Action::ALL.len()) {
            let action = Action::ALL[index];
            let json = serde_json::to_string(&action).unwrap();
            prop_assert_eq!(&json, &format!("\"{}\"", action.as_str()));
            let decoded: Action = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(decoded, action);
        }
    }
}
