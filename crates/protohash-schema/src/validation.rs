use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::kind::Kind;

/// Largest field number a schema may declare.
pub const MAX_FIELD_NUMBER: u32 = 536_870_911;

/// Errors raised while building a [`DescriptorPool`](crate::DescriptorPool).
#[derive(Debug, Error)]
pub enum SchemaError {
    /// When a name does not match the identifier pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// What kind of name failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// Two message types share a fully-qualified name.
    #[error("duplicate message type {0}")]
    DuplicateMessage(String),
    /// Two fields of one message share a name.
    #[error("duplicate field name {field} in {message}")]
    DuplicateFieldName {
        /// Fully-qualified message name.
        message: String,
        /// Field name.
        field: String,
    },
    /// Two fields of one message share a number.
    #[error("duplicate field number {number} in {message}")]
    DuplicateFieldNumber {
        /// Fully-qualified message name.
        message: String,
        /// Field number.
        number: u32,
    },
    /// Field number is zero or above [`MAX_FIELD_NUMBER`].
    #[error("field number {number} of {field} is out of bounds")]
    InvalidFieldNumber {
        /// Fully-qualified field name.
        field: String,
        /// Offending number.
        number: u32,
    },
    /// A field references a message type that is not in the pool.
    #[error("{field} references unknown message type {type_name}")]
    UnknownMessageType {
        /// Fully-qualified field name.
        field: String,
        /// Referenced type name.
        type_name: String,
    },
    /// Map key kind is not bool, integer or string.
    #[error("{field} declares invalid map key kind {kind}")]
    InvalidMapKey {
        /// Fully-qualified field name.
        field: String,
        /// Offending key kind.
        kind: Kind,
    },
    /// A map field was also labelled optional or repeated.
    #[error("map field {0} cannot be optional or repeated")]
    InvalidMapLabel(String),
    /// Repeated or map fields cannot be oneof members.
    #[error("{0} cannot be repeated inside a oneof")]
    OneofCardinality(String),
    /// A field names a oneof the message does not declare.
    #[error("{field} references unknown oneof {oneof}")]
    UnknownOneof {
        /// Fully-qualified field name.
        field: String,
        /// Oneof name.
        oneof: String,
    },
}

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("invalid regex"))
}

fn full_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").expect("invalid regex")
    })
}

fn qualified_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)+$").expect("invalid regex")
    })
}

/// Validates a single identifier segment such as a field or message name.
pub fn validate_identifier(field: &'static str, value: &str) -> Result<(), SchemaError> {
    if !identifier_regex().is_match(value) {
        return Err(SchemaError::PatternMismatch {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Returns true for dotted names like `pkg.Message.field`.
pub fn is_full_name(value: &str) -> bool {
    full_name_regex().is_match(value)
}

/// Returns true for member names scoped by at least one enclosing type,
/// like `Message.field` or `pkg.Message.oneof`. A bare identifier is rejected.
pub fn is_qualified_member_name(value: &str) -> bool {
    qualified_name_regex().is_match(value)
}

/// Validates a dotted, fully-qualified name.
pub fn validate_full_name(field: &'static str, value: &str) -> Result<(), SchemaError> {
    if !is_full_name(value) {
        return Err(SchemaError::PatternMismatch {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_names_accept_dotted_identifiers() {
        assert!(is_full_name("cerbos.hashpb.test.TestAllTypes.single_int32"));
        assert!(is_full_name("Top"));
        assert!(!is_full_name(".leading.dot"));
        assert!(!is_full_name("trailing."));
        assert!(!is_full_name("pkg.*"));
        assert!(!is_full_name(""));
    }

    #[test]
    fn member_names_need_an_enclosing_scope() {
        assert!(is_qualified_member_name("pkg.Message.field"));
        assert!(is_qualified_member_name("Message.field"));
        assert!(!is_qualified_member_name("single_string"));
        assert!(!is_qualified_member_name("pkg..field"));
        assert!(!is_qualified_member_name("pkg.Message."));
        assert!(!is_qualified_member_name(""));
    }

    #[test]
    fn identifiers_reject_dots() {
        assert!(validate_identifier("field", "single_int32").is_ok());
        assert!(matches!(
            validate_identifier("field", "a.b"),
            Err(SchemaError::PatternMismatch { field: "field", .. })
        ));
    }
}
