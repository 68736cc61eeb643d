//! Rendering of schemas, values and test cases into document form.
//!
//! Rendered values are text-safe: integers become decimal strings because
//! widths up to 512 bits exceed the exact integer range of JSON/YAML readers,
//! and bytes become `0x`-prefixed lowercase hex.

use schema::{Schema, Value};
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

use crate::error::{VectorError, VectorResult};

/// Declarative type descriptor for a schema.
///
/// Serializes as `"bool"`, `"uint<bits>"`, `[element]` for lists,
/// `[element, length]` for vectors and `[field, ...]` for containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Bool,
    UInt(u16),
    List(Box<TypeDescriptor>),
    Vector(Box<TypeDescriptor>, usize),
    Container(Vec<TypeDescriptor>),
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool => serializer.serialize_str("bool"),
            Self::UInt(bits) => serializer.serialize_str(&format!("uint{bits}")),
            Self::List(element) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(element)?;
                seq.end()
            }
            Self::Vector(element, length) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(element)?;
                seq.serialize_element(length)?;
                seq.end()
            }
            Self::Container(fields) => {
                let mut seq = serializer.serialize_seq(Some(fields.len()))?;
                for field in fields {
                    seq.serialize_element(field)?;
                }
                seq.end()
            }
        }
    }
}

impl TypeDescriptor {
    /// Checks that `value` has this descriptor's shape, position by position.
    #[must_use]
    pub fn conforms(&self, value: &RenderedValue) -> bool {
        match (self, value) {
            (Self::Bool, RenderedValue::Bool(_))
            | (Self::UInt(_), RenderedValue::Decimal(_)) => true,
            (Self::List(element), RenderedValue::Sequence(items)) => {
                items.iter().all(|item| element.conforms(item))
            }
            (Self::Vector(element, length), RenderedValue::Sequence(items)) => {
                items.len() == *length && items.iter().all(|item| element.conforms(item))
            }
            (Self::Container(fields), RenderedValue::Sequence(items)) => {
                items.len() == fields.len()
                    && fields.iter().zip(items).all(|(field, item)| field.conforms(item))
            }
            (Self::List(element), RenderedValue::Hex(_)) => **element == Self::UInt(8),
            (Self::Vector(element, length), RenderedValue::Hex(hex)) => {
                **element == Self::UInt(8) && hex.len() == 2 + 2 * length
            }
            _ => false,
        }
    }
}

/// Renders the type descriptor of a schema.
#[must_use]
pub fn render_type(schema: &Schema) -> TypeDescriptor {
    match schema {
        Schema::Boolean => TypeDescriptor::Bool,
        Schema::UInt { bits } => TypeDescriptor::UInt(*bits),
        Schema::List { element } => TypeDescriptor::List(Box::new(render_type(element))),
        Schema::Vector { element, length } => {
            TypeDescriptor::Vector(Box::new(render_type(element)), *length)
        }
        Schema::Container { fields } => {
            TypeDescriptor::Container(fields.iter().map(render_type).collect())
        }
    }
}

/// A value in text-safe form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RenderedValue {
    Bool(bool),
    /// Integer as a decimal string.
    Decimal(String),
    /// Bytes as `0x`-prefixed lowercase hex.
    Hex(String),
    Sequence(Vec<RenderedValue>),
}

/// Renders a value, preserving element and field order.
#[must_use]
pub fn render_value(value: &Value) -> RenderedValue {
    match value {
        Value::Bool(v) => RenderedValue::Bool(*v),
        Value::Integer(v) => RenderedValue::Decimal(v.to_string()),
        Value::Bytes(bytes) => RenderedValue::Hex(render_hex(bytes)),
        Value::Sequence(items) => RenderedValue::Sequence(items.iter().map(render_value).collect()),
    }
}

/// Renders bytes as `0x`-prefixed lowercase hex.
#[must_use]
pub fn render_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn serialize_serial<S: Serializer>(
    serial: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match serial {
        Some(bytes) => serializer.serialize_str(&render_hex(bytes)),
        None => serializer.serialize_none(),
    }
}

/// One rendered test vector.
///
/// A valid case always carries both `value` and `ssz`; an invalid case never
/// carries both. The constructor enforces this, so every `TestCase` in
/// existence satisfies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    #[serde(rename = "type")]
    type_descriptor: TypeDescriptor,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<RenderedValue>,
    #[serde(
        rename = "ssz",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_serial"
    )]
    serial: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    tags: Vec<String>,
}

impl TestCase {
    /// Starts building a case for `schema`.
    #[must_use]
    pub fn builder(schema: &Schema, valid: bool) -> TestCaseBuilder {
        TestCaseBuilder {
            type_descriptor: render_type(schema),
            valid,
            value: None,
            serial: None,
            description: None,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub const fn type_descriptor(&self) -> &TypeDescriptor {
        &self.type_descriptor
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub const fn value(&self) -> Option<&RenderedValue> {
        self.value.as_ref()
    }

    /// Serialized bytes, before hex rendering.
    #[must_use]
    pub fn serial(&self) -> Option<&[u8]> {
        self.serial.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns true if the case carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Builder for [`TestCase`].
#[derive(Debug, Clone)]
pub struct TestCaseBuilder {
    type_descriptor: TypeDescriptor,
    valid: bool,
    value: Option<RenderedValue>,
    serial: Option<Vec<u8>>,
    description: Option<String>,
    tags: Vec<String>,
}

impl TestCaseBuilder {
    /// Attaches the decoded value.
    #[must_use]
    pub fn value(mut self, value: &Value) -> Self {
        self.value = Some(render_value(value));
        self
    }

    /// Attaches the serialized bytes.
    #[must_use]
    pub fn serial(mut self, serial: impl Into<Vec<u8>>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Copies `tags` into the case; later changes to the caller's
    /// collection do not affect it.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = tags.into_iter().map(|tag| tag.as_ref().to_owned()).collect();
        self
    }

    /// Validates the valid/invalid invariant and builds the case.
    pub fn build(self) -> VectorResult<TestCase> {
        let has_value = self.value.is_some();
        let has_serial = self.serial.is_some();
        let both = has_value && has_serial;
        if self.valid != both {
            return Err(VectorError::InvalidTestCase {
                valid: self.valid,
                has_value,
                has_serial,
            });
        }

        Ok(TestCase {
            type_descriptor: self.type_descriptor,
            valid: self.valid,
            value: self.value,
            serial: self.serial,
            description: self.description,
            tags: self.tags,
        })
    }
}
