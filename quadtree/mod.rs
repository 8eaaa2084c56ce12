pub mod algorithms;
pub mod error;
pub mod node;
pub mod record;
pub mod rectangle;
#[allow(clippy::module_inception)]
pub mod quadtree;

#[cfg(test)]
mod proptests;

// 重新导出主要类型
pub use algorithms::debug::Leaves;
pub use error::QuadtreeError;
pub use node::{Children, Node, NodeKind, NodeType};
pub use quadtree::{NodeVisualization, Quadtree, TreeSettings, TreeVisualization};
pub use record::Record;
pub use rectangle::{Quadrant, Rectangle};
