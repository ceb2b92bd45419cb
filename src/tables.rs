//! Table definitions and the rendering pipeline.

pub use tablekit_tables::*;
