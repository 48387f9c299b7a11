mod renderer;

pub use renderer::{PlayStatus, Renderer};
