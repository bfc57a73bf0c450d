mod body;
mod intent;
mod state;

pub use body::{PlayerBody, Pose};
pub use intent::MovementIntent;
pub use state::SimulationState;
