pub mod renderer;
pub mod sprites;

pub use renderer::Renderer;
