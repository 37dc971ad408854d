pub mod controls;
pub mod handler;

pub use controls::{pump, Controls};
pub use handler::{InputHandler, KeyAction};
