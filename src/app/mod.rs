pub mod actions;
pub mod events;
pub mod state;
