//! # ResourceKind Trait
//!
//! The contract every concrete resource type (Purchase, Account, Coupon, …) implements to
//! be served by the generic [`ResourceClient`](crate::ResourceClient).
//!
//! A resource type is *data plus hooks*: the [`descriptor`](ResourceKind::descriptor)
//! says what the type looks like on the wire, and [`validate`](ResourceKind::validate)
//! is an optional pre-condition check run before any mutating request leaves the
//! process. The request/response plumbing is written once, in the client.
//!
//! The trait is implemented on a zero-sized marker type so that a
//! `ResourceClient<Purchase, _>` can't be handed account options by mistake.

use crate::descriptor::ResourceDescriptor;
use crate::error::Result;
use crate::value::{Fields, Value};
use std::fmt;

/// The write operation a pre-condition check is guarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Update,
    /// A resource-specific POST to a sibling sub-path, e.g. `preview`.
    Custom(&'static str),
}

impl fmt::Display for WriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteAction::Create => f.write_str("create"),
            WriteAction::Update => f.write_str("update"),
            WriteAction::Custom(name) => f.write_str(name),
        }
    }
}

/// Trait that a concrete resource type implements to be managed by `ResourceClient`.
///
/// # Provided Methods (Hooks)
/// [`ResourceKind::validate`] defaults to accepting everything. Override it when the
/// API has structural rules the caller must satisfy, such as a mandatory reference.
///
/// ```rust
/// use resource_framework::{fields, Fields, ResourceDescriptor, ResourceError, ResourceKind, WriteAction};
///
/// static NOTE: ResourceDescriptor =
///     ResourceDescriptor::new(&["body"], "id", "note", "notes", false);
///
/// struct Note;
///
/// impl ResourceKind for Note {
///     fn descriptor() -> &'static ResourceDescriptor {
///         &NOTE
///     }
///
///     fn validate(action: WriteAction, options: &Fields) -> Result<(), ResourceError> {
///         resource_framework::kind::require(options, "body", || {
///             format!("{action} must include \"body\"")
///         })
///     }
/// }
///
/// assert!(Note::validate(WriteAction::Create, &fields! {}).is_err());
/// assert!(Note::validate(WriteAction::Create, &fields! { "body" => "hi" }).is_ok());
/// ```
pub trait ResourceKind: Send + Sync + 'static {
    /// Static metadata shared by every instance of this type.
    fn descriptor() -> &'static ResourceDescriptor;

    /// Checks caller-supplied options before a write is dispatched.
    fn validate(_action: WriteAction, _options: &Fields) -> Result<()> {
        Ok(())
    }
}

/// True when `name` holds a value: not missing, not a marker, not an empty string.
pub fn is_present(options: &Fields, name: &str) -> bool {
    match options.get(name) {
        Some(Value::Text(text)) => !text.is_empty(),
        Some(value) => value.is_set(),
        None => false,
    }
}

/// Fails with a validation error built by `message` unless `name` is present.
pub fn require(options: &Fields, name: &str, message: impl FnOnce() -> String) -> Result<()> {
    if is_present(options, name) {
        Ok(())
    } else {
        Err(crate::error::ResourceError::Validation(message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    #[test]
    fn test_is_present_ignores_markers() {
        let options = fields! {
            "a" => "x",
            "b" => Value::Empty,
            "c" => Value::Null,
        };
        assert!(is_present(&options, "a"));
        assert!(!is_present(&options, "b"));
        assert!(!is_present(&options, "c"));
        assert!(!is_present(&options, "d"));
    }

    #[test]
    fn test_is_present_rejects_empty_text() {
        let options = fields! { "blank" => "", "space" => " ", "list" => Vec::<Value>::new() };
        assert!(!is_present(&options, "blank"));
        assert!(is_present(&options, "space"));
        assert!(is_present(&options, "list"));
        assert!(require(&options, "blank", || "blank is required".into()).is_err());
    }

    #[test]
    fn test_write_action_display() {
        assert_eq!(WriteAction::Create.to_string(), "create");
        assert_eq!(WriteAction::Custom("preview").to_string(), "preview");
    }
}
