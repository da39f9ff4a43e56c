//! Typed keys over an [`NbtCompound`].
//!
//! A [`TagKey<T>`] names one entry of a compound and knows how to convert it
//! to and from `T`. Reads never fail: a missing entry or an entry of the wrong
//! type reads as the key's default (or `None`). Use [`TagKey::try_read`] when
//! a mismatch has to be told apart from absence.

use std::borrow::Cow;
use std::marker::PhantomData;

use crate::error::TagError;
use crate::tag::{NbtCompound, NbtTag};

/// A Rust type that maps onto exactly one NBT tag type.
pub trait TagValue: Clone + Sized {
    /// Tag type name reported in [`TagError::TypeMismatch`].
    const TYPE_NAME: &'static str;

    fn into_tag(self) -> NbtTag;

    /// `None` if `tag` is not of this value's tag type.
    fn from_tag(tag: &NbtTag) -> Option<Self>;
}

macro_rules! tag_value {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl TagValue for $ty {
            const TYPE_NAME: &'static str = $name;

            fn into_tag(self) -> NbtTag {
                NbtTag::$variant(self)
            }

            fn from_tag(tag: &NbtTag) -> Option<Self> {
                match tag {
                    NbtTag::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

tag_value!(i8, Byte, "Byte");
tag_value!(i16, Short, "Short");
tag_value!(i32, Int, "Int");
tag_value!(i64, Long, "Long");
tag_value!(f32, Float, "Float");
tag_value!(f64, Double, "Double");
tag_value!(String, String, "String");
tag_value!(Vec<i8>, ByteArray, "ByteArray");
tag_value!(Vec<i32>, IntArray, "IntArray");
tag_value!(Vec<i64>, LongArray, "LongArray");
tag_value!(Vec<NbtTag>, List, "List");
tag_value!(NbtCompound, Compound, "Compound");

/// Booleans are stored as `TAG_Byte`; any non-zero byte reads as `true`.
impl TagValue for bool {
    const TYPE_NAME: &'static str = "Byte";

    fn into_tag(self) -> NbtTag {
        NbtTag::Byte(self as i8)
    }

    fn from_tag(tag: &NbtTag) -> Option<Self> {
        match tag {
            NbtTag::Byte(v) => Some(*v != 0),
            _ => None,
        }
    }
}

/// Untyped access: any tag reads back as itself.
impl TagValue for NbtTag {
    const TYPE_NAME: &'static str = "Any";

    fn into_tag(self) -> NbtTag {
        self
    }

    fn from_tag(tag: &NbtTag) -> Option<Self> {
        Some(tag.clone())
    }
}

/// A typed key naming one entry of a compound.
#[derive(Debug, Clone)]
pub struct TagKey<T> {
    key: Cow<'static, str>,
    default: Option<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TagValue> TagKey<T> {
    pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: key.into(),
            default: None,
            _marker: PhantomData,
        }
    }

    /// Value returned by [`read`](Self::read) when the entry is missing or mistyped.
    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    pub fn read(&self, compound: &NbtCompound) -> Option<T> {
        compound
            .get(self.key())
            .and_then(T::from_tag)
            .or_else(|| self.default.clone())
    }

    /// Strict read: `Ok(None)` when absent, `Err` when present with another type.
    /// The default value is not consulted.
    pub fn try_read(&self, compound: &NbtCompound) -> Result<Option<T>, TagError> {
        let Some(tag) = compound.get(self.key()) else {
            return Ok(None);
        };
        T::from_tag(tag)
            .map(Some)
            .ok_or_else(|| TagError::TypeMismatch {
                key: self.key.to_string(),
                expected: T::TYPE_NAME,
                got: tag.type_name(),
                found: tag.to_string(),
            })
    }

    /// Writes `value` under this key; `None` removes the entry.
    pub fn write(&self, compound: &mut NbtCompound, value: Option<T>) {
        match value {
            Some(value) => {
                compound.insert(self.key.to_string(), value.into_tag());
            }
            None => {
                compound.remove(self.key());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() {
        let key = TagKey::<i32>::new("Count");
        let mut c = NbtCompound::new();
        key.write(&mut c, Some(7));
        assert_eq!(key.read(&c), Some(7));
        assert_eq!(c.get("Count"), Some(&NbtTag::Int(7)));
    }

    #[test]
    fn write_none_removes_entry() {
        let key = TagKey::<String>::new("CustomName");
        let mut c = NbtCompound::new();
        key.write(&mut c, Some("Chest".into()));
        key.write(&mut c, None);
        assert!(c.is_empty());
        assert_eq!(key.read(&c), None);
    }

    #[test]
    fn mismatched_type_reads_as_absent() {
        let mut c = NbtCompound::new();
        c.insert("Count".into(), NbtTag::String("seven".into()));
        assert_eq!(TagKey::<i32>::new("Count").read(&c), None);
    }

    #[test]
    fn default_covers_missing_and_mismatched() {
        let key = TagKey::<i16>::new("Delay").with_default(20);
        let mut c = NbtCompound::new();
        assert_eq!(key.read(&c), Some(20));
        c.insert("Delay".into(), NbtTag::Int(5));
        assert_eq!(key.read(&c), Some(20));
        c.insert("Delay".into(), NbtTag::Short(5));
        assert_eq!(key.read(&c), Some(5));
    }

    #[test]
    fn try_read_reports_mismatch() {
        let key = TagKey::<f64>::new("Speed").with_default(1.0);
        let mut c = NbtCompound::new();
        assert_eq!(key.try_read(&c), Ok(None));

        c.insert("Speed".into(), NbtTag::Float(0.5));
        let err = key.try_read(&c).unwrap_err();
        assert_eq!(
            err,
            TagError::TypeMismatch {
                key: "Speed".into(),
                expected: "Double",
                got: "Float",
                found: "0.5f".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "tag `Speed` holds 0.5f (Float) where a Double was expected"
        );
    }

    #[test]
    fn bool_is_stored_as_byte() {
        let key = TagKey::<bool>::new("Lit");
        let mut c = NbtCompound::new();
        key.write(&mut c, Some(true));
        assert_eq!(c.get("Lit"), Some(&NbtTag::Byte(1)));
        c.insert("Lit".into(), NbtTag::Byte(4));
        assert_eq!(key.read(&c), Some(true));
        c.insert("Lit".into(), NbtTag::Byte(0));
        assert_eq!(key.read(&c), Some(false));
    }

    #[test]
    fn nested_compound_and_raw_tag() {
        let mut inner = NbtCompound::new();
        inner.insert("Text".into(), NbtTag::String("hello".into()));

        let front = TagKey::<NbtCompound>::new("FrontText");
        let raw = TagKey::<NbtTag>::new("FrontText");
        let mut c = NbtCompound::new();
        front.write(&mut c, Some(inner.clone()));

        assert_eq!(front.read(&c), Some(inner.clone()));
        assert_eq!(raw.read(&c), Some(NbtTag::Compound(inner)));
    }
}
