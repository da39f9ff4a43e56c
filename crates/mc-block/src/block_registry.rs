//! Block registry: base type definitions in, canonical variants out.
//!
//! Each [`BlockDefinition`] is expanded into a [`PropertyTable`] holding one
//! canonical [`Block`] per property combination. State ids are assigned
//! sequentially across the registry in definition order, so the same
//! definitions always produce the same ids.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;
use tracing::debug;

use crate::block::Block;
use crate::entry::{BlockType, PropertyDefinition, ToolType};
use crate::error::RegistryError;
use crate::property_table::PropertyTable;

/// Definition of one base type, as supplied by the registry data source.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockDefinition {
    pub name: String,
    pub id: u32,
    #[serde(default)]
    pub hardness: f32,
    #[serde(default = "default_solid")]
    pub solid: bool,
    #[serde(default)]
    pub tool: ToolType,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
    /// Overrides of the default variant; unnamed properties default to their first value.
    #[serde(default)]
    pub default: BTreeMap<String, String>,
}

fn default_solid() -> bool {
    true
}

impl BlockDefinition {
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
            hardness: 0.0,
            solid: default_solid(),
            tool: ToolType::None,
            properties: Vec::new(),
            default: BTreeMap::new(),
        }
    }

    pub fn hardness(mut self, hardness: f32) -> Self {
        self.hardness = hardness;
        self
    }

    pub fn solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub fn tool(mut self, tool: ToolType) -> Self {
        self.tool = tool;
        self
    }

    pub fn property<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties.push(PropertyDefinition::new(name, values));
        self
    }

    pub fn default_value(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.default.insert(property.into(), value.into());
        self
    }

    fn validate(&self) -> Result<(), RegistryError> {
        let mut seen = HashSet::new();
        for property in &self.properties {
            if !seen.insert(property.name.as_str()) {
                return Err(RegistryError::DuplicateProperty {
                    block: self.name.clone(),
                    property: property.name.clone(),
                });
            }
            if property.values.is_empty() {
                return Err(RegistryError::EmptyProperty {
                    block: self.name.clone(),
                    property: property.name.clone(),
                });
            }
            let mut values = HashSet::new();
            for value in &property.values {
                if !values.insert(value.as_str()) {
                    return Err(RegistryError::DuplicateValue {
                        block: self.name.clone(),
                        property: property.name.clone(),
                        value: value.clone(),
                    });
                }
            }
        }
        for (name, value) in &self.default {
            let legal = self
                .properties
                .iter()
                .find(|p| &p.name == name)
                .is_some_and(|p| p.is_legal(value));
            if !legal {
                return Err(RegistryError::InvalidDefault {
                    block: self.name.clone(),
                    property: name.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Number of variants, or `None` past `u32::MAX`.
    fn state_count(&self) -> Option<u32> {
        self.properties.iter().try_fold(1u32, |count, p| {
            count.checked_mul(u32::try_from(p.values.len()).ok()?)
        })
    }

    fn into_block_type(self) -> (BlockType, BTreeMap<String, String>) {
        let block = BlockType {
            id: self.id,
            name: self.name,
            hardness: self.hardness,
            is_solid: self.solid,
            tool_type: self.tool,
            properties: self.properties,
        };
        (block, self.default)
    }
}

/// Every registered base type and its canonical variants.
#[derive(Debug)]
pub struct BlockRegistry {
    by_name: HashMap<String, &'static PropertyTable>,
    by_id: HashMap<u32, &'static PropertyTable>,
    by_state: Vec<Block>,
}

impl BlockRegistry {
    /// Validates all definitions, then builds one table per base type.
    pub fn build(
        definitions: impl IntoIterator<Item = BlockDefinition>,
    ) -> Result<Self, RegistryError> {
        let definitions: Vec<BlockDefinition> = definitions.into_iter().collect();

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for def in &definitions {
            if !names.insert(def.name.as_str()) {
                return Err(RegistryError::DuplicateName(def.name.clone()));
            }
            if !ids.insert(def.id) {
                return Err(RegistryError::DuplicateId {
                    id: def.id,
                    name: def.name.clone(),
                });
            }
            def.validate()?;
        }

        // State ids are u32 and assigned back to back across the registry.
        let mut first_state_ids = Vec::with_capacity(definitions.len());
        let mut next_state_id = 0u32;
        for def in &definitions {
            let too_many = || RegistryError::TooManyStates {
                block: def.name.clone(),
                limit: u32::MAX,
            };
            let count = def.state_count().ok_or_else(too_many)?;
            first_state_ids.push(next_state_id);
            next_state_id = next_state_id.checked_add(count).ok_or_else(too_many)?;
        }

        let mut registry = Self {
            by_name: HashMap::with_capacity(definitions.len()),
            by_id: HashMap::with_capacity(definitions.len()),
            by_state: Vec::new(),
        };

        for (def, first_state_id) in definitions.into_iter().zip(first_state_ids) {
            let (block, default) = def.into_block_type();
            let table = PropertyTable::build(block, first_state_id, &default);
            registry.by_state.extend(table.states_iter().cloned());
            registry
                .by_name
                .insert(table.block_type().name.clone(), table);
            registry.by_id.insert(table.block_type().id, table);
        }

        debug!(
            "Built block registry: {} blocks, {} states",
            registry.by_name.len(),
            registry.by_state.len()
        );
        Ok(registry)
    }

    /// Parses a JSON array of block definitions and builds the registry.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let definitions: Vec<BlockDefinition> = serde_json::from_str(json)?;
        Self::build(definitions)
    }

    /// Default variant of the named base type.
    pub fn get(&self, name: &str) -> Option<&Block> {
        self.by_name.get(name).and_then(|table| table.default_state())
    }

    pub fn by_block_id(&self, id: u32) -> Option<&Block> {
        self.by_id.get(&id).and_then(|table| table.default_state())
    }

    pub fn by_state_id(&self, state_id: u32) -> Option<&Block> {
        self.by_state.get(state_id as usize)
    }

    pub fn table(&self, name: &str) -> Option<&'static PropertyTable> {
        self.by_name.get(name).copied()
    }

    pub fn block_count(&self) -> usize {
        self.by_name.len()
    }

    pub fn state_count(&self) -> usize {
        self.by_state.len()
    }
}
