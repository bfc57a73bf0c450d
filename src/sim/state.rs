use crate::sim::{MovementIntent, PlayerBody, Pose};
use crate::world::TileGrid;

/// The whole mutable simulation in one explicitly-owned record: the
/// current level grid plus the one player body.  There are no hidden
/// statics anywhere in the crate; whoever owns this owns the game.
pub struct SimulationState {
    grid: TileGrid,
    body: PlayerBody,
}

impl SimulationState {
    pub fn new(grid: TileGrid, body: PlayerBody) -> Self {
        Self { grid, body }
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    #[inline]
    pub fn pose(&self) -> &Pose {
        self.body.pose()
    }

    /// Advance the body one fixed step against the current grid.
    pub fn integrate(&mut self, intent: &MovementIntent, dt: f32) {
        self.body.integrate(intent, &self.grid, dt);
    }

    /// Replace the level wholesale and hand back the old grid.  Must be
    /// called strictly between frames - nothing holds a grid reference
    /// across a `step`.
    pub fn swap_grid(&mut self, grid: TileGrid) -> TileGrid {
        std::mem::replace(&mut self.grid, grid)
    }
}
