//! AI systems (behavior layer logic)

pub mod catch;
pub mod fsm;
pub mod movement;

// Re-export all systems
pub use catch::*;
pub use fsm::*;
pub use movement::*;
