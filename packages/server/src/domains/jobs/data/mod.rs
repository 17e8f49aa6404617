pub mod inputs;

pub use inputs::*;
