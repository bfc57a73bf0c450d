/// One frame of decoded input.  Produced fresh each frame by the
/// presentation layer; the integrator trusts the values as-is beyond
/// assuming finite floats.
#[derive(Clone, Copy, Debug, Default)]
pub struct MovementIntent {
    pub forward: f32, // -1 ... +1 (forward / back)
    pub strafe: f32,  // -1 ... +1 (+1 = right)
    pub turn: f32,    // radians to add to the heading this step
    pub jump: bool,   // Space
    pub sprint: bool, // Shift
}
