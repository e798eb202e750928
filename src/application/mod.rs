// Application layer - Loading and rendering use cases
pub mod chart_source;
pub mod loader;
pub mod renderer;
pub mod scale;
