//! Domain layer: entities and structural algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod ancestry;
pub mod arena;
pub mod entities;
pub mod error;
pub mod tree;

pub use ancestry::{is_ancestor, level_of, node_map, NodeMap};
pub use arena::{TreeArena, TreeNode};
pub use entities::*;
pub use error::DomainError;
pub use tree::{build_tree, flatten_by_dfs, sort_by_dfs, Node, NodeRecord, TreeItem, TreeResult};
