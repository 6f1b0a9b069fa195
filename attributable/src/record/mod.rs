//! Immutable instances produced by synthesised constructors.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use serde_json::{Map, Number, Value};

use crate::TypeName;

static NULL: Value = Value::Null;
const NEGATIVE_ZERO_BITS: u64 = 1 << 63;

/// A constructed value: its concrete type and one value per schema attribute.
///
/// Records are fully populated at construction and expose no way to change
/// an attribute afterwards.
///
/// Two records are equal when they share the same concrete type and every
/// attribute holds an equal value. Hashing agrees with equality and does not
/// depend on attribute order.
#[derive(Clone, Debug)]
pub struct Record {
    type_name: TypeName,
    attributes: Map<String, Value>,
}

impl Record {
    pub(crate) const fn new(type_name: TypeName, attributes: Map<String, Value>) -> Self {
        Self {
            type_name,
            attributes,
        }
    }

    /// Concrete type of the record.
    #[must_use]
    pub const fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Value of `name`, or `None` when the record has no such attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Value of `name`, or `null` when the record has no such attribute.
    #[must_use]
    pub fn value(&self, name: &str) -> &Value {
        self.get(name).unwrap_or(&NULL)
    }

    /// Whether the record carries an attribute called `name`.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// All attribute values keyed by name, in schema order.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Human-readable representation, e.g. `<User id=1, forename="John">`.
    ///
    /// Values render as JSON literals in schema order. A record without
    /// attributes renders as `<Marker>`, with no space before the closing
    /// bracket.
    #[must_use]
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    /// Digest of the record consistent with its equality.
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.attributes == other.attributes
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
        hash_entries(&self.attributes, state);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.type_name)?;
        for (index, (name, value)) in self.attributes.iter().enumerate() {
            let separator = if index == 0 { " " } else { ", " };
            write!(f, "{separator}{name}={value}")?;
        }
        f.write_str(">")
    }
}

// Objects compare equal regardless of key order, so entries are hashed by
// name.
fn hash_entries<H: Hasher>(map: &Map<String, Value>, state: &mut H) {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
    entries.len().hash(state);
    for (name, value) in entries {
        name.hash(state);
        hash_value(value, state);
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0_u8.hash(state),
        Value::Bool(flag) => {
            1_u8.hash(state);
            flag.hash(state);
        }
        Value::Number(number) => {
            2_u8.hash(state);
            hash_number(number, state);
        }
        Value::String(text) => {
            3_u8.hash(state);
            text.hash(state);
        }
        Value::Array(items) => {
            4_u8.hash(state);
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => {
            5_u8.hash(state);
            hash_entries(map, state);
        }
    }
}

fn hash_number<H: Hasher>(number: &Number, state: &mut H) {
    if let Some(signed) = number.as_i64() {
        signed.hash(state);
    } else if let Some(unsigned) = number.as_u64() {
        unsigned.hash(state);
    } else if let Some(float) = number.as_f64() {
        // -0.0 == 0.0
        let bits = match float.to_bits() {
            NEGATIVE_ZERO_BITS => 0,
            other => other,
        };
        bits.hash(state);
    }
}
