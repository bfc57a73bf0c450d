use crate::engine::{ColumnHit, RayCaster};
use crate::sim::{MovementIntent, Pose, SimulationState};
use crate::world::TileGrid;

/// Composition root: the simulation state plus the caster built for the
/// current screen.  `step` is the whole per-tick contract - it never
/// blocks, and a frame once started always completes (bounded march per
/// column).
pub struct Engine {
    state: SimulationState,
    caster: RayCaster,
}

impl Engine {
    pub fn new(state: SimulationState, caster: RayCaster) -> Self {
        Self { state, caster }
    }

    /// One presentation tick: integrate the body, then cast the frame.
    pub fn step(&mut self, intent: &MovementIntent) -> Vec<ColumnHit> {
        self.state.integrate(intent, 1.0);
        self.caster.cast_frame(self.state.pose(), self.state.grid())
    }

    #[inline]
    pub fn pose(&self) -> &Pose {
        self.state.pose()
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid {
        self.state.grid()
    }

    /// Swap in a replacement level between frames.
    pub fn swap_grid(&mut self, grid: TileGrid) -> TileGrid {
        self.state.swap_grid(grid)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
