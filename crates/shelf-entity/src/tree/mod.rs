//! Navigation tree structures.

pub mod adjacency;
pub mod node;

pub use adjacency::{Adjacency, AdjacencyEntry};
pub use node::{Crumb, NodeType, TreeNode};
