use std::hash::{Hash, Hasher};

// -2^63 and 2^63; both are exact in binary64.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// A decoded numeric value.
///
/// Floats that are mathematically integral collapse into `Integer` when
/// built through [`Number::from_f64`], so a field holds exactly one
/// representation from the moment it is read.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn from_f64(value: f64) -> Self {
        match integral_i64(value) {
            Some(int) => Number::Integer(int),
            None => Number::Float(value),
        }
    }

    /// Re-applies the integral check to a directly constructed `Float`.
    pub fn normalized(self) -> Self {
        match self {
            Number::Float(value) => Number::from_f64(value),
            int => int,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.normalized(), Number::Integer(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.normalized() {
            Number::Integer(int) => Some(int),
            Number::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(int) => int as f64,
            Number::Float(value) => value,
        }
    }

    /// Zero and NaN are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match *self {
            Number::Integer(int) => int != 0,
            Number::Float(value) => value != 0.0 && !value.is_nan(),
        }
    }
}

fn integral_i64(value: f64) -> Option<i64> {
    // NaN fails the first test, infinities the second
    if value.trunc() != value {
        return None;
    }
    if !(I64_LOWER..I64_UPPER).contains(&value) {
        return None;
    }
    Some(value as i64)
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
    }
}

// SameValueZero: NaN equals NaN, and -0.0 is already Integer(0).
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.normalized(), other.normalized()) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.normalized() {
            Number::Integer(int) => {
                state.write_u8(0);
                int.hash(state);
            }
            Number::Float(value) => {
                state.write_u8(1);
                let bits = if value.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    value.to_bits()
                };
                bits.hash(state);
            }
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Number::Integer(int) => write!(f, "{int}"),
            Number::Float(value) if value.is_nan() => write!(f, "NaN"),
            Number::Float(value) if value.is_infinite() => {
                if value > 0.0 {
                    write!(f, "Infinity")
                } else {
                    write!(f, "-Infinity")
                }
            }
            Number::Float(value) => write!(f, "{value}"),
        }
    }
}
