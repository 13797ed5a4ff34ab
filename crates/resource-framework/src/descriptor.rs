//! # Resource Descriptor
//!
//! Static metadata describing one resource type's shape and wire naming.
//!
//! A descriptor is declared once per resource type, usually as a `static`, and every
//! [`Resource`](crate::Resource) of that type holds a `&'static` reference to it. The
//! declared property list is what the write path filters against and what fixes the
//! element order of serialized bodies, so it must never be re-derived per instance.
//!
//! ```rust
//! use resource_framework::ResourceDescriptor;
//!
//! static WIDGET: ResourceDescriptor = ResourceDescriptor::new(
//!     &["name", "size"],
//!     "widget_code",
//!     "widget",
//!     "widgets",
//!     false,
//! );
//!
//! assert!(WIDGET.declares("size"));
//! assert_eq!(WIDGET.member_path("w1"), "/widgets/w1");
//! ```

use url::form_urlencoded;

/// Immutable per-type metadata: declared properties, identity field and wire names.
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    properties: &'static [&'static str],
    id_field: &'static str,
    singular: &'static str,
    plural: &'static str,
    enumerable: bool,
}

impl ResourceDescriptor {
    /// Declares a resource type.
    ///
    /// # Arguments
    /// * `properties` - Field names the write path accepts, in serialization order
    /// * `id_field` - Name of the field carrying the remote identity
    /// * `singular` - Root element name for a single resource
    /// * `plural` - Collection name, also the endpoint path segment
    /// * `enumerable` - Whether declared-but-unset properties are kept as empty markers
    pub const fn new(
        properties: &'static [&'static str],
        id_field: &'static str,
        singular: &'static str,
        plural: &'static str,
        enumerable: bool,
    ) -> Self {
        Self {
            properties,
            id_field,
            singular,
            plural,
            enumerable,
        }
    }

    pub fn properties(&self) -> &'static [&'static str] {
        self.properties
    }

    pub fn id_field(&self) -> &'static str {
        self.id_field
    }

    pub fn singular(&self) -> &'static str {
        self.singular
    }

    pub fn plural(&self) -> &'static str {
        self.plural
    }

    pub fn enumerable(&self) -> bool {
        self.enumerable
    }

    /// Returns true if `name` is one of the declared properties.
    pub fn declares(&self, name: &str) -> bool {
        self.properties.contains(&name)
    }

    /// Path of the collection endpoint, e.g. `/purchases`.
    pub fn collection_path(&self) -> String {
        format!("/{}", self.plural)
    }

    /// Path of a single member, e.g. `/accounts/abc`. The id is percent-encoded as one
    /// path segment.
    pub fn member_path(&self, id: &str) -> String {
        let segment: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
        // byte_serialize writes spaces as `+` and a literal `+` as `%2B`.
        format!("/{}/{}", self.plural, segment.replace('+', "%20"))
    }
}
