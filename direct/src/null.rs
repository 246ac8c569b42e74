use std::hash::{Hash, Hasher};
use std::ops::{Deref, Not};

use crate::Value;

static ABSENT: Option<Value> = None;

/// The foreign null.
///
/// There is exactly one value of this type, [`NULL`]. It is falsy and it
/// stands in for the host absence value everywhere except identity: it
/// derefs to `None`, converts into `None` and iterates like `None`, but it
/// only ever compares equal to itself.
#[derive(Clone, Copy)]
pub struct Null(());

pub static NULL: Null = Null(());

impl Deref for Null {
    type Target = Option<Value>;

    fn deref(&self) -> &Self::Target {
        &ABSENT
    }
}

impl PartialEq for Null {
    fn eq(&self, _other: &Null) -> bool {
        true
    }
}

impl Eq for Null {}

impl<T> PartialEq<Option<T>> for Null {
    fn eq(&self, _other: &Option<T>) -> bool {
        false
    }
}

impl Hash for Null {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(0xff);
    }
}

impl Default for Null {
    fn default() -> Self {
        NULL
    }
}

impl Not for Null {
    type Output = bool;

    fn not(self) -> bool {
        true
    }
}

impl From<Null> for bool {
    fn from(_: Null) -> bool {
        false
    }
}

impl From<Null> for Option<Value> {
    fn from(_: Null) -> Option<Value> {
        None
    }
}

impl IntoIterator for Null {
    type Item = Value;
    type IntoIter = std::option::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        ABSENT.clone().into_iter()
    }
}

impl std::fmt::Debug for Null {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Null")
    }
}

impl std::fmt::Display for Null {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Null")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Truthy;

    #[test]
    fn null_equals_only_itself() {
        assert_eq!(NULL, NULL);
        assert_eq!(NULL, Null::default());
        assert!(NULL != None::<Value>);
        assert!(NULL != Some(1));
        assert_ne!(Value::Null(NULL), Value::Bool(false));
    }

    #[test]
    fn null_is_falsy() {
        assert!(!bool::from(NULL));
        assert!(!NULL);
        assert!(!NULL.is_truthy());
    }

    #[test]
    fn null_behaves_like_the_host_absence_value() {
        assert!(NULL.is_none());
        assert_eq!(NULL.iter().count(), 0);
        assert_eq!(NULL.as_ref().map(|value| value.type_name()), None);
        assert_eq!((*NULL).clone().unwrap_or(Value::Bool(true)), Value::Bool(true));
        assert_eq!(NULL.into_iter().count(), 0);

        let absent: Option<Value> = NULL.into();
        assert_eq!(absent, None);
    }

    #[test]
    fn null_prints_as_null() {
        assert_eq!(NULL.to_string(), "Null");
        assert_eq!(format!("{NULL:?}"), "Null");
    }
}
