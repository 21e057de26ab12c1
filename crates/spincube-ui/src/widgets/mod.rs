pub mod button;
pub mod container;
pub mod flex;
pub mod stack;
pub mod text;
