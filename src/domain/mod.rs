// Domain layer - Chart data and the visual tree drawn from it
pub mod chart;
pub mod visual;
