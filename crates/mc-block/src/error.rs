//! Block, registry and configuration error types.

use thiserror::Error;

/// The only failure a block transition can report: the requested property
/// assignment is not one of the base type's legal combinations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("invalid property for {block}: {properties}")]
    InvalidProperty { block: String, properties: String },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("block `{0}` is registered twice")]
    DuplicateName(String),

    #[error("block id {id} of `{name}` is already taken")]
    DuplicateId { id: u32, name: String },

    #[error("property `{property}` of `{block}` is declared twice")]
    DuplicateProperty { block: String, property: String },

    #[error("property `{property}` of `{block}` has no legal values")]
    EmptyProperty { block: String, property: String },

    #[error("property `{property}` of `{block}` lists value `{value}` twice")]
    DuplicateValue {
        block: String,
        property: String,
        value: String,
    },

    #[error("default `{property}={value}` of `{block}` is not a legal value")]
    InvalidDefault {
        block: String,
        property: String,
        value: String,
    },

    #[error("`{block}` pushes the registry past {limit} block states")]
    TooManyStates { block: String, limit: u32 },

    #[error("malformed block definitions: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
