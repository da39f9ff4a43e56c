//! Behavior hooks attached to blocks.
//!
//! Blocks only store and forward a handler; the world runtime is the one that
//! calls into it on placement, breaking, interaction or ticking.

use std::fmt;
use std::sync::Arc;

pub trait BlockHandler: Send + Sync + fmt::Debug {
    /// Namespaced id of the handler, e.g. `"minecraft:sign"`.
    fn namespace_id(&self) -> &str;

    /// Whether the runtime should schedule ticks for blocks carrying this handler.
    fn is_tickable(&self) -> bool {
        false
    }
}

/// Identity comparison of two handler references (data pointer only).
pub(crate) fn same_handler(a: &Arc<dyn BlockHandler>, b: &Arc<dyn BlockHandler>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Furnace;

    impl BlockHandler for Furnace {
        fn namespace_id(&self) -> &str {
            "minecraft:furnace"
        }

        fn is_tickable(&self) -> bool {
            true
        }
    }

    #[derive(Debug)]
    struct Sign;

    impl BlockHandler for Sign {
        fn namespace_id(&self) -> &str {
            "minecraft:sign"
        }
    }

    #[test]
    fn identity_not_type() {
        let a: Arc<dyn BlockHandler> = Arc::new(Furnace);
        let b: Arc<dyn BlockHandler> = Arc::new(Furnace);
        assert!(same_handler(&a, &a.clone()));
        assert!(!same_handler(&a, &b));
    }

    #[test]
    fn default_is_not_tickable() {
        assert!(!Sign.is_tickable());
        assert!(Furnace.is_tickable());
        assert_eq!(Sign.namespace_id(), "minecraft:sign");
    }
}
