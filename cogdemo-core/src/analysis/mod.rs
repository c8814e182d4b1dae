pub mod confidence;
pub mod polygon;
pub mod span;
