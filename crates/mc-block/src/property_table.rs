//! Canonical variants of one base type, keyed by their full property assignment.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::block::Block;
use crate::entry::{BlockEntry, BlockType};
use crate::properties::Properties;

#[derive(Default)]
struct States {
    by_properties: HashMap<BTreeMap<String, String>, Block>,
    ordered: Vec<Block>,
    default: usize,
}

/// Lookup table from a complete property assignment to the canonical
/// [`Block`] of that variant.
///
/// Tables are built once at registry load and live for the rest of the
/// process: every canonical block points back at its table, so the table is
/// leaked instead of reference counted.
pub struct PropertyTable {
    block: Arc<BlockType>,
    states: OnceLock<States>,
}

impl PropertyTable {
    /// Enumerates every combination of `block`'s property values, last
    /// property varying fastest, assigning state ids from `first_state_id`.
    ///
    /// `default` must only name declared properties with legal values, and
    /// `first_state_id` plus the number of states must fit in a `u32`; the
    /// registry validates both before building.
    pub(crate) fn build(
        block: BlockType,
        first_state_id: u32,
        default: &BTreeMap<String, String>,
    ) -> &'static PropertyTable {
        let table: &'static PropertyTable = Box::leak(Box::new(PropertyTable {
            block: Arc::new(block),
            states: OnceLock::new(),
        }));

        let mut states = States::default();
        for (offset, assignment) in combinations(&table.block).into_iter().enumerate() {
            let entry = Arc::new(BlockEntry::new(
                first_state_id + offset as u32,
                Arc::clone(&table.block),
            ));
            let canonical = Block::canonical(entry, table, Properties::new(assignment.clone()));
            states.by_properties.insert(assignment, canonical.clone());
            states.ordered.push(canonical);
        }

        let mut default_assignment: BTreeMap<String, String> = table
            .block
            .properties
            .iter()
            .filter_map(|p| Some((p.name.clone(), p.values.first()?.clone())))
            .collect();
        default_assignment.extend(default.iter().map(|(k, v)| (k.clone(), v.clone())));
        states.default = states
            .ordered
            .iter()
            .position(|b| *b.properties().as_map() == default_assignment)
            .unwrap_or(0);

        table.states.get_or_init(|| states);
        table
    }

    /// The canonical variant for `properties`, or `None` if that exact
    /// combination is not legal for this base type.
    pub fn resolve(&self, properties: &BTreeMap<String, String>) -> Option<&Block> {
        self.states.get()?.by_properties.get(properties)
    }

    pub fn block_type(&self) -> &BlockType {
        &self.block
    }

    pub fn default_state(&self) -> Option<&Block> {
        let states = self.states.get()?;
        states.ordered.get(states.default)
    }

    /// All canonical variants in state id order.
    pub fn states_iter(&self) -> impl Iterator<Item = &Block> {
        self.states.get().into_iter().flat_map(|states| states.ordered.iter())
    }

    pub fn state_count(&self) -> usize {
        self.states.get().map_or(0, |states| states.ordered.len())
    }
}

impl fmt::Debug for PropertyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyTable")
            .field("block", &self.block.name)
            .field("states", &self.state_count())
            .finish()
    }
}

/// Cartesian product of the declared property values.
fn combinations(block: &BlockType) -> Vec<BTreeMap<String, String>> {
    let mut out = vec![BTreeMap::new()];
    for property in &block.properties {
        let mut next = Vec::with_capacity(out.len() * property.values.len());
        for partial in &out {
            for value in &property.values {
                let mut assignment = partial.clone();
                assignment.insert(property.name.clone(), value.clone());
                next.push(assignment);
            }
        }
        out = next;
    }
    out
}
