//! # Menu Core - Domain Module
//! 
//! The menu node entity, its write models, and tree projections.

pub mod menu_node;
pub mod menu_tree;

pub use menu_node::{MenuNode, MenuNodePatch, NewMenu, UpdateMenu};
pub use menu_tree::{ChildIndex, Children, MenuTree};
