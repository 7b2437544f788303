pub mod journal;
pub mod statusbar;
pub mod text_input;
pub mod tree;
