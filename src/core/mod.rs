pub mod engine;

pub use engine::ReviewEngine;
