//! NBT tag types.
//!
//! Compounds are ordered by key so two compounds holding the same entries are
//! equal and hash identically no matter how they were built. Floating point
//! payloads compare by bit pattern, which keeps `Eq` reflexive for NaN.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A compound tag: map of name -> tag.
pub type NbtCompound = BTreeMap<String, NbtTag>;

/// Represents any NBT value.
#[derive(Debug, Clone)]
pub enum NbtTag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<NbtTag>),
    Compound(NbtCompound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl NbtTag {
    /// Returns the numeric tag type ID (1-12). TAG_End is 0 but not representable here.
    pub fn tag_type_id(&self) -> u8 {
        match self {
            NbtTag::Byte(_) => 1,
            NbtTag::Short(_) => 2,
            NbtTag::Int(_) => 3,
            NbtTag::Long(_) => 4,
            NbtTag::Float(_) => 5,
            NbtTag::Double(_) => 6,
            NbtTag::ByteArray(_) => 7,
            NbtTag::String(_) => 8,
            NbtTag::List(_) => 9,
            NbtTag::Compound(_) => 10,
            NbtTag::IntArray(_) => 11,
            NbtTag::LongArray(_) => 12,
        }
    }

    /// Human readable name of the tag type, used in codec errors.
    pub fn type_name(&self) -> &'static str {
        type_name(self.tag_type_id())
    }
}

/// Name of a tag type ID, `"End"` for 0 and `"Unknown"` past 12.
pub fn type_name(id: u8) -> &'static str {
    match id {
        0 => "End",
        1 => "Byte",
        2 => "Short",
        3 => "Int",
        4 => "Long",
        5 => "Float",
        6 => "Double",
        7 => "ByteArray",
        8 => "String",
        9 => "List",
        10 => "Compound",
        11 => "IntArray",
        12 => "LongArray",
        _ => "Unknown",
    }
}

impl PartialEq for NbtTag {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NbtTag::Byte(a), NbtTag::Byte(b)) => a == b,
            (NbtTag::Short(a), NbtTag::Short(b)) => a == b,
            (NbtTag::Int(a), NbtTag::Int(b)) => a == b,
            (NbtTag::Long(a), NbtTag::Long(b)) => a == b,
            (NbtTag::Float(a), NbtTag::Float(b)) => a.to_bits() == b.to_bits(),
            (NbtTag::Double(a), NbtTag::Double(b)) => a.to_bits() == b.to_bits(),
            (NbtTag::ByteArray(a), NbtTag::ByteArray(b)) => a == b,
            (NbtTag::String(a), NbtTag::String(b)) => a == b,
            (NbtTag::List(a), NbtTag::List(b)) => a == b,
            (NbtTag::Compound(a), NbtTag::Compound(b)) => a == b,
            (NbtTag::IntArray(a), NbtTag::IntArray(b)) => a == b,
            (NbtTag::LongArray(a), NbtTag::LongArray(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for NbtTag {}

impl Hash for NbtTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.tag_type_id());
        match self {
            NbtTag::Byte(v) => v.hash(state),
            NbtTag::Short(v) => v.hash(state),
            NbtTag::Int(v) => v.hash(state),
            NbtTag::Long(v) => v.hash(state),
            NbtTag::Float(v) => v.to_bits().hash(state),
            NbtTag::Double(v) => v.to_bits().hash(state),
            NbtTag::ByteArray(v) => v.hash(state),
            NbtTag::String(v) => v.hash(state),
            NbtTag::List(v) => v.hash(state),
            NbtTag::Compound(v) => v.hash(state),
            NbtTag::IntArray(v) => v.hash(state),
            NbtTag::LongArray(v) => v.hash(state),
        }
    }
}

impl fmt::Display for NbtTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NbtTag::Byte(v) => write!(f, "{v}b"),
            NbtTag::Short(v) => write!(f, "{v}s"),
            NbtTag::Int(v) => write!(f, "{v}"),
            NbtTag::Long(v) => write!(f, "{v}L"),
            NbtTag::Float(v) => write!(f, "{v}f"),
            NbtTag::Double(v) => write!(f, "{v}d"),
            NbtTag::ByteArray(v) => write!(f, "[B; {} elements]", v.len()),
            NbtTag::String(v) => write!(f, "\"{v}\""),
            NbtTag::List(v) => write!(f, "[{} elements]", v.len()),
            NbtTag::Compound(v) => write!(f, "{{{} entries}}", v.len()),
            NbtTag::IntArray(v) => write!(f, "[I; {} elements]", v.len()),
            NbtTag::LongArray(v) => write!(f, "[L; {} elements]", v.len()),
        }
    }
}
