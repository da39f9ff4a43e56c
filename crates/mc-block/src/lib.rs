//! Immutable block states: canonical variants, property transitions, interned
//! NBT metadata and attached handlers.

pub mod block;
pub mod block_registry;
pub mod config;
pub mod entry;
pub mod error;
pub mod handler;
pub mod nbt_cache;
pub mod properties;
pub mod property_table;

pub use block::{Block, Comparator};
pub use block_registry::{BlockDefinition, BlockRegistry};
pub use config::{BlockConfig, CacheConfig};
pub use entry::{BlockEntry, BlockType, PropertyDefinition, ToolType};
pub use error::{BlockError, ConfigError, RegistryError};
pub use handler::BlockHandler;
pub use nbt_cache::{install_nbt_cache, nbt_cache, NbtCache};
pub use properties::Properties;
pub use property_table::PropertyTable;

pub use mc_block_nbt::{NbtCompound, NbtTag, TagKey, TagValue};
