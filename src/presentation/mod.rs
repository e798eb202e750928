// Presentation layer - View state and HTML output
pub mod markup;
pub mod view;
