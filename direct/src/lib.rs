mod error;
mod map;
mod null;
mod number;
mod set;
mod symbol;
mod value;
mod view;

pub use error::{Error, Result};
pub use map::OrderedMap;
pub use null::{NULL, Null};
pub use number::Number;
pub use set::OrderedSet;
pub use symbol::*;
pub use value::{Truthy, Value};
pub use view::{ByteView, ViewCreateInfo};
