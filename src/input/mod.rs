pub mod event;
pub mod handler;

pub use event::{InputEvent, Key};
pub use handler::InputHandler;
