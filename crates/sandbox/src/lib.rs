//! Host-side collaborators the editor runs against.
//!
//! - [`MemoryWorld`]: a chunk store implementing every world access trait
//! - [`StampGenerator`]: a deterministic content generator driven by region styles
//! - [`Scenario`]: builds a populated demo world

mod error;
mod generator;
mod scenario;
mod world;

pub use error::SandboxError;
pub use generator::StampGenerator;
pub use scenario::{Scenario, ScenarioLayout};
pub use world::MemoryWorld;
