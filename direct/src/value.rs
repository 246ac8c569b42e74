use std::hash::{Hash, Hasher};

use crate::{Null, Number, OrderedMap, OrderedSet, SymbolTag};

/// Foreign boolean context.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

/// A value in the foreign value system, as assembled by a decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null(Null),
    Bool(bool),
    Number(Number),
    BigInt(i64),
    BigUint(u64),
    Text(String),
    Symbol(SymbolTag),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(OrderedMap<Value, Value>),
    Set(OrderedSet<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null(_) => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) | Value::BigUint(_) => "bigint",
            Value::Text(_) => "text",
            Value::Symbol(_) => "symbol",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }
}

impl Truthy for Null {
    fn is_truthy(&self) -> bool {
        false
    }
}

impl Truthy for Number {
    fn is_truthy(&self) -> bool {
        Number::is_truthy(self)
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null(_) => false,
            Value::Bool(b) => *b,
            Value::Number(number) => number.is_truthy(),
            Value::BigInt(int) => *int != 0,
            Value::BigUint(int) => *int != 0,
            Value::Text(text) => !text.is_empty(),
            Value::Symbol(_)
            | Value::Bytes(_)
            | Value::List(_)
            | Value::Map(_)
            | Value::Set(_) => true,
        }
    }
}

// Containers only hash their shape so that order-insensitive map equality
// stays consistent with the hash.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null(null) => null.hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Number(number) => number.hash(state),
            Value::BigInt(int) => int.hash(state),
            Value::BigUint(int) => int.hash(state),
            Value::Text(text) => text.hash(state),
            Value::Symbol(tag) => tag.hash(state),
            Value::Bytes(bytes) => bytes.hash(state),
            Value::List(items) => items.len().hash(state),
            Value::Map(map) => map.len().hash(state),
            Value::Set(set) => set.len().hash(state),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null(Null::default())
    }
}

impl From<Null> for Value {
    fn from(null: Null) -> Self {
        Value::Null(null)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        Value::Number(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<SymbolTag> for Value {
    fn from(tag: SymbolTag) -> Self {
        Value::Symbol(tag)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null(null) => write!(f, "{null}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(number) => write!(f, "{number}"),
            Value::BigInt(int) => write!(f, "{int}n"),
            Value::BigUint(int) => write!(f, "{int}n"),
            Value::Text(text) => write!(f, "{text:?}"),
            Value::Symbol(tag) => write!(f, "{tag}"),
            Value::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "Map {{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {key} => {value}")?;
                }
                write!(f, " }}")
            }
            Value::Set(set) => {
                write!(f, "Set {{")?;
                for (i, item) in set.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {item}")?;
                }
                write!(f, " }}")
            }
        }
    }
}
