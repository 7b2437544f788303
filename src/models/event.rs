//! Outbound tree notifications

use std::fmt;

use super::item::NodeId;

/// Notifications raised by the tree for the host application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    Expanded {
        id: NodeId,
    },
    Collapsed {
        id: NodeId,
    },
    Renamed {
        id: NodeId,
        old_label: String,
        new_label: String,
    },
    ItemActiveChanged {
        id: NodeId,
        active: bool,
    },
    DisabledChanged {
        id: NodeId,
        disabled: bool,
    },
    /// Container level change of the single active item
    ActiveChanged {
        previous: Option<NodeId>,
        current: Option<NodeId>,
    },
}

impl TreeEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Expanded { .. } => "expanded",
            Self::Collapsed { .. } => "collapsed",
            Self::Renamed { .. } => "renamed",
            Self::ItemActiveChanged { .. } => "item-active-changed",
            Self::DisabledChanged { .. } => "disabled-changed",
            Self::ActiveChanged { .. } => "active-changed",
        }
    }
}

fn fmt_opt(id: Option<NodeId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "none".to_string())
}

impl fmt::Display for TreeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expanded { id } | Self::Collapsed { id } => write!(f, "{} {}", self.kind(), id),
            Self::Renamed {
                id,
                old_label,
                new_label,
            } => write!(f, "renamed {}: {:?} -> {:?}", id, old_label, new_label),
            Self::ItemActiveChanged { id, active } => {
                write!(f, "item-active-changed {} = {}", id, active)
            }
            Self::DisabledChanged { id, disabled } => {
                write!(f, "disabled-changed {} = {}", id, disabled)
            }
            Self::ActiveChanged { previous, current } => write!(
                f,
                "active-changed {} -> {}",
                fmt_opt(*previous),
                fmt_opt(*current)
            ),
        }
    }
}
