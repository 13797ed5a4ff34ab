//! # Markup Codec
//!
//! Bidirectional conversion between the [`Value`] graph and wire text.
//!
//! The core only talks to the [`MarkupCodec`] trait. [`XmlCodec`] is the stock
//! implementation, built on `quick-xml`, and its rendering of unset and cleared fields
//! is fixed at construction through [`CodecConfig`].
//!
//! ## Wire conventions
//!
//! | Value | XML |
//! |-------|-----|
//! | `Text("USD")` under `currency` | `<currency>USD</currency>` |
//! | `List([a, b])` under `coupon_codes` | `<coupon_codes>a</coupon_codes><coupon_codes>b</coupon_codes>` |
//! | map key `@href` | attribute `href="..."` |
//! | map key `#text` | text content next to attributes |
//! | `Empty` (default config) | `<po_number></po_number>` |
//! | `Null` (default config) | `<po_number/>` |
//!
//! Decoding also understands `nil="nil"` and `type="array"` annotations. Leaf text is
//! kept byte for byte, so `<po_number></po_number>` reads back as an empty string and
//! padded text keeps its padding. Whitespace between child elements is layout and is
//! dropped.

use crate::value::{Fields, Value};
use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::Deserialize;

/// A document: root element name plus its content.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub root: String,
    pub body: Value,
}

impl Payload {
    pub fn new(root: impl Into<String>, body: Value) -> Self {
        Self {
            root: root.into(),
            body,
        }
    }
}

/// Errors raised while encoding or decoding markup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error("invalid element name: {0:?}")]
    InvalidName(String),
    #[error("malformed markup: {0}")]
    Malformed(String),
    #[error("attribute @{0} must hold text")]
    InvalidAttribute(String),
    #[error("failed to write markup: {0}")]
    Write(String),
    #[error("invalid codec config: {0}")]
    Config(&'static str),
}

/// How a "no value" state is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// Leave the element out.
    Omit,
    /// `<name></name>`
    Empty,
    /// `<name/>`
    Closed,
}

/// Rendering options for [`XmlCodec`].
///
/// An explicit null must reach the server, and it must look different from an unset
/// field, so `null` can't be [`Marker::Omit`] and `absent` can't equal `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Rendering of [`Value::Empty`].
    pub absent: Marker,
    /// Rendering of [`Value::Null`].
    pub null: Marker,
    /// Emit an `<?xml ...?>` declaration.
    pub declaration: bool,
}

impl CodecConfig {
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.null == Marker::Omit {
            return Err(CodecError::Config("null fields can't be omitted"));
        }
        if self.absent == self.null {
            return Err(CodecError::Config(
                "unset and null fields need different markers",
            ));
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            absent: Marker::Empty,
            null: Marker::Closed,
            declaration: true,
        }
    }
}

/// Pure conversion between documents and wire text.
pub trait MarkupCodec: Send + Sync {
    fn encode(&self, payload: &Payload) -> Result<String, CodecError>;
    fn decode(&self, text: &str) -> Result<Payload, CodecError>;
}

/// XML implementation of [`MarkupCodec`].
#[derive(Debug, Clone, Default)]
pub struct XmlCodec {
    config: CodecConfig,
}

impl XmlCodec {
    /// Fails when `config` would make unset and null fields indistinguishable.
    pub fn new(config: CodecConfig) -> Result<Self, CodecError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn write_value(
        &self,
        writer: &mut Writer<Vec<u8>>,
        name: &str,
        value: &Value,
    ) -> Result<(), CodecError> {
        match value {
            Value::Empty => self.write_marker(writer, name, self.config.absent),
            Value::Null => self.write_marker(writer, name, self.config.null),
            Value::Text(text) => {
                check_name(name)?;
                writer
                    .write_event(Event::Start(BytesStart::new(name)))
                    .map_err(write_err)?;
                writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(write_err)?;
                writer
                    .write_event(Event::End(BytesEnd::new(name)))
                    .map_err(write_err)
            }
            Value::List(items) => items
                .iter()
                .try_for_each(|item| self.write_value(writer, name, item)),
            Value::Map(fields) => self.write_map(writer, name, fields),
            Value::Resource(resource) => self.write_value(writer, name, &resource.serialize().body),
        }
    }

    fn write_marker(
        &self,
        writer: &mut Writer<Vec<u8>>,
        name: &str,
        marker: Marker,
    ) -> Result<(), CodecError> {
        match marker {
            Marker::Omit => Ok(()),
            Marker::Empty => {
                check_name(name)?;
                writer
                    .write_event(Event::Start(BytesStart::new(name)))
                    .map_err(write_err)?;
                writer
                    .write_event(Event::End(BytesEnd::new(name)))
                    .map_err(write_err)
            }
            Marker::Closed => {
                check_name(name)?;
                writer
                    .write_event(Event::Empty(BytesStart::new(name)))
                    .map_err(write_err)
            }
        }
    }

    fn write_map(
        &self,
        writer: &mut Writer<Vec<u8>>,
        name: &str,
        fields: &Fields,
    ) -> Result<(), CodecError> {
        check_name(name)?;
        let mut start = BytesStart::new(name);
        let mut has_attributes = false;
        for (key, value) in fields {
            if let Some(attr) = key.strip_prefix('@') {
                check_name(attr)?;
                let text = value
                    .as_text()
                    .ok_or_else(|| CodecError::InvalidAttribute(attr.to_string()))?;
                start.push_attribute((attr, text));
                has_attributes = true;
            }
        }

        let mut content = fields.iter().filter(|(k, _)| !k.starts_with('@')).peekable();
        if content.peek().is_none() && has_attributes {
            return writer.write_event(Event::Empty(start)).map_err(write_err);
        }

        writer.write_event(Event::Start(start)).map_err(write_err)?;
        for (key, value) in content {
            if key == "#text" {
                if let Some(text) = value.as_text() {
                    writer
                        .write_event(Event::Text(BytesText::new(text)))
                        .map_err(write_err)?;
                }
            } else {
                self.write_value(writer, key, value)?;
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(write_err)
    }
}

impl MarkupCodec for XmlCodec {
    fn encode(&self, payload: &Payload) -> Result<String, CodecError> {
        let mut writer = Writer::new(Vec::new());
        if self.config.declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(write_err)?;
        }
        match &payload.body {
            // A root element is always written, whatever the marker config says.
            Value::Empty | Value::Null => {
                check_name(&payload.root)?;
                writer
                    .write_event(Event::Empty(BytesStart::new(payload.root.as_str())))
                    .map_err(write_err)?;
            }
            body => self.write_value(&mut writer, &payload.root, body)?,
        }
        String::from_utf8(writer.into_inner()).map_err(write_err)
    }

    fn decode(&self, text: &str) -> Result<Payload, CodecError> {
        let mut reader = Reader::from_str(text);

        let mut stack: Vec<Node> = Vec::new();
        let mut root: Option<Node> = None;

        loop {
            match reader.read_event().map_err(malformed)? {
                Event::Start(start) => stack.push(Node::open(&start, false)?),
                Event::Empty(start) => {
                    let node = Node::open(&start, true)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::End(_) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| CodecError::Malformed("unbalanced end tag".into()))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::Text(t) => {
                    let content = t.unescape().map_err(malformed)?;
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&content);
                    }
                }
                Event::CData(c) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(CodecError::Malformed(format!("unclosed element <{}>", open.name)));
        }
        let root = root.ok_or_else(|| CodecError::Malformed("no root element".into()))?;
        Ok(Payload {
            root: root.name.clone(),
            body: root.into_value(),
        })
    }
}

/// Parsed element awaiting conversion into a [`Value`].
struct Node {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
    text: String,
    self_closing: bool,
}

impl Node {
    fn open(start: &BytesStart<'_>, self_closing: bool) -> Result<Self, CodecError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(malformed)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(malformed)?.into_owned();
            attrs.push((key, value));
        }
        Ok(Self {
            name,
            attrs,
            children: Vec::new(),
            text: String::new(),
            self_closing,
        })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn into_value(self) -> Value {
        if matches!(self.attr("nil"), Some("nil") | Some("true")) {
            return Value::Null;
        }
        if self.attr("type") == Some("array") {
            return Value::List(self.children.into_iter().map(Node::into_value).collect());
        }

        // `type` and `nil` are annotations, not data.
        let attrs: Vec<(String, String)> = self
            .attrs
            .into_iter()
            .filter(|(k, _)| k != "type" && k != "nil" && !k.starts_with("xmlns"))
            .collect();

        if self.children.is_empty() && attrs.is_empty() {
            return if self.self_closing {
                Value::Null
            } else {
                Value::Text(self.text)
            };
        }

        let mut fields = Fields::new();
        for (key, value) in attrs {
            fields.insert(format!("@{key}"), Value::Text(value));
        }
        let layout_only = !self.children.is_empty() && self.text.trim().is_empty();
        if !self.text.is_empty() && !layout_only {
            fields.insert("#text".to_string(), Value::Text(self.text));
        }

        let mut grouped: IndexMap<String, Vec<Value>> = IndexMap::new();
        for child in self.children {
            grouped
                .entry(child.name.clone())
                .or_default()
                .push(child.into_value());
        }
        for (key, mut values) in grouped {
            let value = if values.len() == 1 {
                values.remove(0)
            } else {
                Value::List(values)
            };
            fields.insert(key, value);
        }
        Value::Map(fields)
    }
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<(), CodecError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(node);
            Ok(())
        }
        None => Err(CodecError::Malformed("multiple root elements".into())),
    }
}

fn check_name(name: &str) -> Result<(), CodecError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(CodecError::InvalidName(name.to_string()))
    }
}

fn malformed(e: impl std::fmt::Display) -> CodecError {
    CodecError::Malformed(e.to_string())
}

fn write_err(e: impl std::fmt::Display) -> CodecError {
    CodecError::Write(e.to_string())
}
