pub mod apparatus;
pub mod geometry;
pub mod movement;
pub mod neighborhood;
pub mod sampler;
pub mod scheduler;
pub mod types;

#[cfg(test)]
mod tests;

pub use apparatus::Apparatus;
pub use scheduler::{AssemblySettings, RunSummary, Scheduler, assemble};
pub use types::{Bounds, Part, Position};
