//! The immutable block value.
//!
//! A [`Block`] is a variant of a base type (its registry entry plus a complete
//! property assignment), optionally decorated with interned NBT and a
//! [`BlockHandler`]. Every "mutation" returns a new value.
//!
//! Undecorated variants are canonical: the [`PropertyTable`] owns exactly one
//! instance per property combination, and property transitions on an
//! undecorated block hand that instance back, so [`Block::ptr_eq`] can stand in
//! for equality. Once NBT or a handler is attached, transitions allocate a
//! composite that keeps the decoration.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use mc_block_nbt::{NbtCompound, TagKey, TagValue};
use tracing::trace;

use crate::entry::{BlockEntry, BlockType};
use crate::error::BlockError;
use crate::handler::{same_handler, BlockHandler};
use crate::nbt_cache::nbt_cache;
use crate::properties::{describe, Properties};
use crate::property_table::PropertyTable;

/// How strictly [`Block::compare`] matches two blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Same base type, any properties or decoration.
    Id,
    /// Same variant (state id), any decoration.
    State,
    /// Same variant, same NBT and the same handler.
    Identity,
}

#[derive(Clone)]
pub struct Block(Arc<BlockInner>);

struct BlockInner {
    entry: Arc<BlockEntry>,
    table: &'static PropertyTable,
    properties: Properties,
    nbt: Option<Arc<NbtCompound>>,
    handler: Option<Arc<dyn BlockHandler>>,
}

impl Block {
    /// Canonical variants are only created while building their table.
    pub(crate) fn canonical(
        entry: Arc<BlockEntry>,
        table: &'static PropertyTable,
        properties: Properties,
    ) -> Self {
        Self(Arc::new(BlockInner {
            entry,
            table,
            properties,
            nbt: None,
            handler: None,
        }))
    }

    fn with_parts(
        &self,
        variant: &Block,
        nbt: Option<Arc<NbtCompound>>,
        handler: Option<Arc<dyn BlockHandler>>,
    ) -> Self {
        Self(Arc::new(BlockInner {
            entry: Arc::clone(&variant.0.entry),
            table: self.0.table,
            properties: variant.0.properties.clone(),
            nbt,
            handler,
        }))
    }

    /// Carries this block's NBT and handler over to `resolved`, or returns the
    /// canonical instance as-is when there is nothing to carry.
    fn decorate(&self, resolved: &Block) -> Block {
        if self.0.nbt.is_none() && self.0.handler.is_none() {
            return resolved.clone();
        }
        self.with_parts(resolved, self.0.nbt.clone(), self.0.handler.clone())
    }

    fn invalid(&self, assignment: &BTreeMap<String, String>) -> BlockError {
        trace!("Rejected {} for {}", describe(assignment), self.name());
        BlockError::InvalidProperty {
            block: self.name().to_string(),
            properties: describe(assignment),
        }
    }

    /// Changes one property.
    pub fn with_property(&self, name: &str, value: &str) -> Result<Block, BlockError> {
        let mut assignment = self.0.properties.to_map();
        assignment.insert(name.to_string(), value.to_string());
        match self.0.table.resolve(&assignment) {
            Some(resolved) => Ok(self.decorate(resolved)),
            None => {
                let mut requested = BTreeMap::new();
                requested.insert(name.to_string(), value.to_string());
                Err(self.invalid(&requested))
            }
        }
    }

    /// Changes several properties at once.
    ///
    /// An empty overlay returns this block unchanged. An overlay naming
    /// exactly this block's property keys is resolved as a complete
    /// assignment without merging; anything else is overlaid onto the current
    /// assignment, so a misnamed key fails instead of being taken as complete.
    pub fn with_properties<I, K, V>(&self, properties: I) -> Result<Block, BlockError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let overlay: BTreeMap<String, String> = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if overlay.is_empty() {
            return Ok(self.clone());
        }

        let current = &self.0.properties;
        let complete = overlay.len() == current.len()
            && overlay.keys().all(|k| current.contains_key(k));
        let resolved = if complete {
            self.0.table.resolve(&overlay)
        } else {
            let mut merged = current.to_map();
            merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
            self.0.table.resolve(&merged)
        };

        match resolved {
            Some(resolved) => Ok(self.decorate(resolved)),
            None => Err(self.invalid(&overlay)),
        }
    }

    /// Writes `value` under `tag` (`None` removes it) into a copy of this
    /// block's NBT. A non-empty result is interned; an empty one is dropped.
    pub fn with_tag<T: TagValue>(&self, tag: &TagKey<T>, value: Option<T>) -> Block {
        let mut compound = self.0.nbt.as_deref().cloned().unwrap_or_default();
        tag.write(&mut compound, value);
        self.with_nbt(Some(compound))
    }

    pub fn without_tag<T: TagValue>(&self, tag: &TagKey<T>) -> Block {
        self.with_tag(tag, None)
    }

    /// Replaces the whole NBT compound, with the same interning rules as
    /// [`with_tag`](Self::with_tag).
    pub fn with_nbt(&self, nbt: Option<NbtCompound>) -> Block {
        let nbt = nbt
            .filter(|c| !c.is_empty())
            .map(|c| nbt_cache().intern(c));
        self.with_parts(self, nbt, self.0.handler.clone())
    }

    /// Always allocates, even when `handler` is the one already attached.
    pub fn with_handler(&self, handler: Option<Arc<dyn BlockHandler>>) -> Block {
        self.with_parts(self, self.0.nbt.clone(), handler)
    }

    /// `None` when no NBT is attached; otherwise whatever the tag codec reads.
    pub fn get_tag<T: TagValue>(&self, tag: &TagKey<T>) -> Option<T> {
        self.0.nbt.as_deref().and_then(|nbt| tag.read(nbt))
    }

    pub fn has_nbt(&self) -> bool {
        self.0.nbt.as_ref().is_some_and(|nbt| !nbt.is_empty())
    }

    pub fn nbt(&self) -> Option<&NbtCompound> {
        self.0.nbt.as_deref()
    }

    pub fn handler(&self) -> Option<&Arc<dyn BlockHandler>> {
        self.0.handler.as_ref()
    }

    pub fn properties(&self) -> &Properties {
        &self.0.properties
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.0.properties.get(name)
    }

    pub fn entry(&self) -> &BlockEntry {
        &self.0.entry
    }

    pub fn block_type(&self) -> &BlockType {
        self.0.entry.block()
    }

    pub fn table(&self) -> &'static PropertyTable {
        self.0.table
    }

    pub fn id(&self) -> u32 {
        self.0.entry.id()
    }

    pub fn state_id(&self) -> u32 {
        self.0.entry.state_id()
    }

    pub fn name(&self) -> &str {
        self.0.entry.name()
    }

    /// The base type's default variant (canonical, undecorated).
    pub fn default_state(&self) -> Block {
        self.0
            .table
            .default_state()
            .cloned()
            .unwrap_or_else(|| self.clone())
    }

    /// Every canonical variant of this block's base type.
    pub fn possible_states(&self) -> impl Iterator<Item = &'static Block> {
        self.0.table.states_iter()
    }

    pub fn compare(&self, other: &Block, comparator: Comparator) -> bool {
        match comparator {
            Comparator::Id => self.id() == other.id() && self.same_table(other),
            Comparator::State => self.state_id() == other.state_id() && self.same_table(other),
            Comparator::Identity => self == other,
        }
    }

    /// Whether both values are the very same instance.
    pub fn ptr_eq(a: &Block, b: &Block) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    fn same_table(&self, other: &Block) -> bool {
        std::ptr::eq(self.0.table, other.0.table)
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        if Block::ptr_eq(self, other) {
            return true;
        }
        let handlers_match = match (&self.0.handler, &other.0.handler) {
            (None, None) => true,
            (Some(a), Some(b)) => same_handler(a, b),
            _ => false,
        };
        self.same_table(other)
            && self.0.properties == other.0.properties
            && self.0.nbt == other.0.nbt
            && handlers_match
    }
}

impl Eq for Block {}

impl Hash for Block {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state_id().hash(state);
        self.0.properties.hash(state);
        self.0.nbt.hash(state);
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("name", &self.name())
            .field("state_id", &self.state_id())
            .field("properties", &self.0.properties)
            .field("nbt", &self.0.nbt)
            .field("handler", &self.0.handler)
            .finish()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.properties.is_empty() {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{}{}", self.name(), self.0.properties)
        }
    }
}
