pub mod event;
pub mod input;
pub mod item;
pub mod outline;
pub mod tree;

pub use event::TreeEvent;
pub use input::{Direction, HitRegion, KeyPress, NavKey};
pub use item::{NodeId, RenameState, TreeItem};
pub use outline::{Outline, OutlineError, OutlineNode};
pub use tree::{TreeContainer, VisibleRow};
