//! Hash containers keyed by node ids and names.

pub mod hash;

pub use self::hash::{FastHashMap, FastHashSet};
