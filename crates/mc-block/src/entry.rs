//! Registry entries: the base block type and the per-state entry that points at it.
//!
//! Provides hardness, solidity and tool type for a base type. Entries are built
//! once by [`BlockRegistry`](crate::block_registry::BlockRegistry) and never change.

use std::sync::Arc;

use serde::Deserialize;

/// Tool types relevant for mining speed calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    #[default]
    None,
    Pickaxe,
    Axe,
    Shovel,
    Hoe,
    Sword,
    Shears,
}

/// A named property and its legal values, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    pub values: Vec<String>,
}

impl PropertyDefinition {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_legal(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// A base block type, irrespective of its property settings.
#[derive(Debug)]
pub struct BlockType {
    /// Stable numeric block id.
    pub id: u32,
    /// Namespaced block identifier, e.g. `"minecraft:oak_stairs"`.
    pub name: String,
    /// Mining hardness. `-1.0` = unbreakable, `0.0` = instant break.
    pub hardness: f32,
    /// Whether entities collide with this block.
    pub is_solid: bool,
    /// The preferred tool type for faster mining.
    pub tool_type: ToolType,
    pub properties: Vec<PropertyDefinition>,
}

impl BlockType {
    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Registry entry of one variant: its numeric state id and its base type.
#[derive(Debug)]
pub struct BlockEntry {
    state_id: u32,
    block: Arc<BlockType>,
}

impl BlockEntry {
    pub(crate) fn new(state_id: u32, block: Arc<BlockType>) -> Self {
        Self { state_id, block }
    }

    pub fn state_id(&self) -> u32 {
        self.state_id
    }

    pub fn block(&self) -> &BlockType {
        &self.block
    }

    pub fn id(&self) -> u32 {
        self.block.id
    }

    pub fn name(&self) -> &str {
        &self.block.name
    }
}
