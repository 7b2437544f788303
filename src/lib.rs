//! Side navigation tree: a headless tree model with single selection,
//! focus delegation, rename editing and keyboard traversal, plus the
//! terminal front end that drives it.

pub mod app;
pub mod config;
pub mod models;
pub mod ui;

pub use models::{
    Direction, HitRegion, KeyPress, NavKey, NodeId, Outline, OutlineError, TreeContainer,
    TreeEvent, TreeItem,
};
