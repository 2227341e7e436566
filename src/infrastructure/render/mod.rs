//! Rendering infrastructure - template loading and invitation rendering

mod loader;
mod renderer;

pub use loader::load_template;
pub use renderer::MessageRenderer;
