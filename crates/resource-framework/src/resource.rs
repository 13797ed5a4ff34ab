//! # Resource Instance
//!
//! The runtime object for one resource: its descriptor, remote identity, field values
//! and lifecycle state.
//!
//! ## Write path vs read path
//!
//! Writes are filtered against the descriptor: [`Resource::construct`] drops undeclared
//! keys, [`Resource::set`] rejects them, and [`Resource::serialize`] only ever emits
//! declared properties. Reads are permissive: [`Resource::inflate`] copies every key the
//! server sent, declared or not, because the wire is the source of truth on read.

use crate::codec::Payload;
use crate::descriptor::ResourceDescriptor;
use crate::error::{ResourceError, Result};
use crate::value::{Fields, Value};
use tracing::debug;

/// Where an instance stands relative to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No successful round trip has populated it yet.
    Unsaved,
    /// Populated from a server response.
    Synced,
}

/// One resource instance, shaped by a `'static` [`ResourceDescriptor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    descriptor: &'static ResourceDescriptor,
    identity: Option<String>,
    fields: Fields,
    state: LifecycleState,
}

impl Resource {
    /// Seeds a new, unsaved instance from caller-supplied fields.
    ///
    /// Undeclared keys are ignored. Declared keys missing from `initial` become
    /// [`Value::Empty`] markers when the descriptor is enumerable.
    pub fn construct(descriptor: &'static ResourceDescriptor, mut initial: Fields) -> Self {
        let mut fields = Fields::new();
        for &name in descriptor.properties() {
            match initial.shift_remove(name) {
                Some(value) => {
                    fields.insert(name.to_string(), value);
                }
                None if descriptor.enumerable() => {
                    fields.insert(name.to_string(), Value::Empty);
                }
                None => {}
            }
        }
        if !initial.is_empty() {
            let ignored: Vec<&str> = initial.keys().map(String::as_str).collect();
            debug!(resource = descriptor.singular(), ?ignored, "Ignoring undeclared fields");
        }

        Self {
            descriptor,
            identity: None,
            fields,
            state: LifecycleState::Unsaved,
        }
    }

    /// An unsaved instance with no fields set.
    pub fn empty(descriptor: &'static ResourceDescriptor) -> Self {
        Self::construct(descriptor, Fields::new())
    }

    pub fn descriptor(&self) -> &'static ResourceDescriptor {
        self.descriptor
    }

    /// Remote identity, taken from the descriptor's id field on inflate.
    pub fn id(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Sets a declared property. Undeclared names are rejected.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        if !self.descriptor.declares(name) {
            return Err(ResourceError::validation(format!(
                "{} has no property \"{name}\"",
                self.descriptor.singular()
            )));
        }
        self.fields.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Projects declared properties into the codec's shape, rooted at the singular name.
    ///
    /// Output follows descriptor order and is identical for identical field state.
    pub fn serialize(&self) -> Payload {
        Payload::new(self.descriptor.singular(), Value::Map(self.project()))
    }

    fn project(&self) -> Fields {
        self.descriptor
            .properties()
            .iter()
            .filter_map(|&name| {
                self.fields
                    .get(name)
                    .map(|value| (name.to_string(), project_value(value)))
            })
            .collect()
    }

    /// Populates the instance from a decoded response and marks it synced.
    ///
    /// Every top-level key of the payload body is copied, including keys the descriptor
    /// does not declare. Applying the same payload twice yields the same state.
    pub fn inflate(mut self, payload: Payload) -> Self {
        if let Value::Map(body) = payload.body {
            for (key, value) in body {
                if key == self.descriptor.id_field() {
                    if let Some(id) = value.as_text() {
                        self.identity = Some(id.to_string());
                    }
                }
                self.fields.insert(key, value);
            }
        }
        self.state = LifecycleState::Synced;
        self
    }
}

fn project_value(value: &Value) -> Value {
    match value {
        Value::Resource(nested) => Value::Map(nested.project()),
        Value::List(items) => Value::List(items.iter().map(project_value).collect()),
        Value::Map(map) => Value::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), project_value(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    static GADGET: ResourceDescriptor = ResourceDescriptor::new(
        &["name", "color", "parts"],
        "uuid",
        "gadget",
        "gadgets",
        true,
    );

    static PART: ResourceDescriptor =
        ResourceDescriptor::new(&["sku", "qty"], "sku", "part", "parts", false);

    #[test]
    fn test_construct_filters_and_marks() {
        let r = Resource::construct(&GADGET, fields! { "name" => "x", "bogus" => "y" });
        assert_eq!(r.get("name"), Some(&Value::from("x")));
        assert_eq!(r.get("color"), Some(&Value::Empty));
        assert_eq!(r.get("bogus"), None);
        assert_eq!(r.state(), LifecycleState::Unsaved);
        assert_eq!(r.id(), None);
    }

    #[test]
    fn test_construct_non_enumerable_leaves_unset() {
        let r = Resource::construct(&PART, fields! { "sku" => "p1" });
        assert_eq!(r.fields().len(), 1);
        assert_eq!(r.get("qty"), None);
    }

    #[test]
    fn test_serialize_follows_descriptor_order() {
        let r = Resource::construct(&GADGET, fields! { "color" => "red", "name" => "x" });
        let payload = r.serialize();
        assert_eq!(payload.root, "gadget");
        let keys: Vec<_> = payload.body.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "color", "parts"]);
    }

    #[test]
    fn test_serialize_nested_resources() {
        let part = Resource::construct(&PART, fields! { "sku" => "p1", "qty" => 2, "junk" => 1 });
        let r = Resource::construct(&GADGET, fields! { "parts" => vec![Value::from(part)] });
        let body = r.serialize().body;
        let parts = body.get("parts").and_then(Value::as_list).unwrap();
        assert_eq!(parts[0], Value::Map(fields! { "sku" => "p1", "qty" => 2 }));
    }

    #[test]
    fn test_set_rejects_undeclared() {
        let mut r = Resource::empty(&GADGET);
        r.set("color", "blue").unwrap();
        assert_eq!(r.get("color"), Some(&Value::from("blue")));
        assert!(matches!(r.set("uuid", "nope"), Err(ResourceError::Validation(_))));
    }

    #[test]
    fn test_inflate_is_permissive_and_sets_identity() {
        let r = Resource::empty(&GADGET).inflate(Payload::new(
            "gadget",
            Value::Map(fields! { "uuid" => "g-1", "name" => "x", "created_at" => "2024" }),
        ));
        assert_eq!(r.id(), Some("g-1"));
        assert_eq!(r.state(), LifecycleState::Synced);
        assert_eq!(r.get("created_at"), Some(&Value::from("2024")));

        // Undeclared keys picked up on read never leak into writes.
        let body = r.serialize().body;
        assert!(body.get("created_at").is_none());
        assert!(body.get("uuid").is_none());
    }

    #[test]
    fn test_inflate_idempotent() {
        let payload = Payload::new("gadget", Value::Map(fields! { "uuid" => "g-1", "color" => "red" }));
        let once = Resource::empty(&GADGET).inflate(payload.clone());
        let twice = once.clone().inflate(payload);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inflate_with_empty_body_only_syncs() {
        let r = Resource::construct(&PART, fields! { "sku" => "p1" });
        let synced = r.clone().inflate(Payload::new("part", Value::Empty));
        assert_eq!(synced.fields(), r.fields());
        assert_eq!(synced.state(), LifecycleState::Synced);
    }
}
