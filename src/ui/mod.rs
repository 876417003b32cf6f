pub mod button;

pub use button::{create_button, ResolutionButton};
