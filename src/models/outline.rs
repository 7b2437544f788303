//! Outline files describing an initial tree

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::input::Direction;
use super::item::{NodeId, TreeItem};
use super::tree::TreeContainer;

/// Errors raised while loading an outline
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("failed to read outline {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid outline: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("outline item at {path} has an empty label")]
    EmptyLabel { path: String },

    #[error("outline marks more than one item active ({first:?} and {second:?})")]
    MultipleActive { first: String, second: String },

    #[error("outline item {label:?} is both disabled and active")]
    DisabledActive { label: String },
}

/// One node of an outline file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineNode {
    pub label: String,
    pub icon: Option<String>,
    pub disabled: bool,
    pub expanded: bool,
    pub active: bool,
    pub may_have_children: bool,
    pub separator: bool,
    pub error: bool,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<OutlineNode>) -> Self {
        self.children = children;
        self
    }

    fn to_item(&self) -> TreeItem {
        let mut item = TreeItem::new(&self.label);
        item.icon = self.icon.clone();
        item.separator = self.separator;
        item.error = self.error;
        item.may_have_children = self.may_have_children;
        if self.disabled {
            item = item.disabled();
        }
        if self.expanded {
            item = item.expanded();
        }
        item
    }
}

/// A whole outline file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    #[serde(default)]
    pub direction: Direction,
    pub items: Vec<OutlineNode>,
}

impl Outline {
    pub fn from_json(content: &str) -> Result<Self, OutlineError> {
        let outline: Self = serde_json::from_str(content)?;
        outline.validate()?;
        Ok(outline)
    }

    pub fn load(path: &Path) -> Result<Self, OutlineError> {
        let content = std::fs::read_to_string(path).map_err(|source| OutlineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Labels must be non-blank and at most one selectable item may be
    /// active.
    pub fn validate(&self) -> Result<(), OutlineError> {
        let mut active: Option<String> = None;
        let mut stack: Vec<(String, &OutlineNode)> = self
            .items
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| (i.to_string(), node))
            .collect();

        while let Some((path, node)) = stack.pop() {
            if node.label.trim().is_empty() {
                return Err(OutlineError::EmptyLabel { path });
            }
            if node.active {
                if node.disabled {
                    return Err(OutlineError::DisabledActive {
                        label: node.label.clone(),
                    });
                }
                if let Some(first) = &active {
                    return Err(OutlineError::MultipleActive {
                        first: first.clone(),
                        second: node.label.clone(),
                    });
                }
                active = Some(node.label.clone());
            }
            stack.extend(
                node.children
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(i, child)| (format!("{}.{}", path, i), child)),
            );
        }
        Ok(())
    }

    /// Build a container. The active node, if any, is revealed, activated
    /// and focused.
    pub fn build(&self) -> TreeContainer {
        let mut tree = TreeContainer::new().with_direction(self.direction);
        let mut active: Option<NodeId> = None;
        let mut stack: Vec<(Option<NodeId>, &OutlineNode)> =
            self.items.iter().rev().map(|node| (None, node)).collect();

        while let Some((parent, node)) = stack.pop() {
            let Some(id) = tree.push(parent, node.to_item()) else {
                continue;
            };
            if node.active {
                active = Some(id);
            }
            stack.extend(node.children.iter().rev().map(|child| (Some(id), child)));
        }

        if let Some(id) = active {
            tree.reveal(id);
            tree.activate(id);
        }
        // Construction is not something the host needs to hear about.
        tree.drain_events();
        tracing::info!("built tree with {} items", tree.len());
        tree
    }
}
