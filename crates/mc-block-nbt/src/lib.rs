//! In-memory NBT (Named Binary Tag) documents used as block metadata.
//!
//! - [`NbtTag`] / [`NbtCompound`]: the document model. Compounds compare and
//!   hash structurally so they can serve as their own cache key.
//! - [`TagKey`]: a typed key that reads and writes one entry of a compound.

pub mod error;
pub mod key;
pub mod tag;

pub use error::TagError;
pub use key::{TagKey, TagValue};
pub use tag::{NbtCompound, NbtTag};
