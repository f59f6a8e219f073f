//! arch - 架构图生成
//!
//! 命名空间树、package 依赖聚合、PlantUML 输出

mod deps;
mod plantuml;
mod tree;

pub use deps::{aggregate_dependencies, containing_package, edge_count, DependencyMap};
pub use plantuml::{render, PlantUmlGenerator};
pub use tree::{build_tree, NamespaceNode, NamespaceTree, NodeId};
