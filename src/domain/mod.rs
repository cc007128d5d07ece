pub mod analysis;
pub mod color;
pub mod errors;
pub mod model;
pub mod prediction;
pub mod vibe;
