use glam::Vec2;

use crate::config::PhysicsSettings;
use crate::sim::MovementIntent;
use crate::world::TileGrid;

/// Player view-point in world space.
///
/// * `angle` is the heading in radians, 0 = +x, and is deliberately left
///   unbounded - wrap it only for display.
/// * Vertical motion uses the screen-down-positive convention: negative
///   `vertical_velocity` means rising, `vertical_offset` is 0 on the
///   ground and negative mid-jump.
#[derive(Clone, Copy, Debug)]
pub struct Pose {
    pub pos: Vec2,
    pub angle: f32,
    pub vertical_offset: f32,
    pub vertical_velocity: f32,
    pub grounded: bool,
}

impl Pose {
    pub fn at(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            angle,
            vertical_offset: 0.0,
            vertical_velocity: 0.0,
            grounded: true,
        }
    }

    /// Heading wrapped into `[0, 360)` degrees, for overlays.
    pub fn heading_degrees(&self) -> f32 {
        self.angle.to_degrees().rem_euclid(360.0)
    }
}

/// The movable camera: owns the pose and advances it one fixed step at a
/// time.  Never fails - every edge case is a skip or a clamp.
pub struct PlayerBody {
    pose: Pose,
    settings: PhysicsSettings,
}

impl PlayerBody {
    pub fn new(pos: Vec2, angle: f32, settings: PhysicsSettings) -> Self {
        Self {
            pose: Pose::at(pos, angle),
            settings,
        }
    }

    #[inline]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Advance one fixed step.  `dt` is in ticks: the frontend runs a
    /// fixed 30 Hz tick and passes 1.0, keeping the per-tick constants of
    /// `PhysicsSettings` exact.
    pub fn integrate(&mut self, intent: &MovementIntent, grid: &TileGrid, dt: f32) {
        let s = &self.settings;

        /* 1. candidate displacement from the pre-turn heading */
        let speed = s.move_speed
            * if intent.sprint {
                s.sprint_multiplier
            } else {
                1.0
            }
            * dt;
        let (sin_a, cos_a) = self.pose.angle.sin_cos();
        let forward = Vec2::new(cos_a, sin_a);
        let right = Vec2::new(-sin_a, cos_a); // y grows downward
        let delta = (forward * intent.forward + right * intent.strafe) * speed;

        /* 2. turn (unbounded) */
        self.pose.angle += intent.turn;

        /* 3. axis-separated clip: each axis is tested against the
        pre-step value of the other, so a blocked axis still lets the
        open one slide */
        let p = self.pose.pos;
        if !grid.is_solid_world_point(Vec2::new(p.x + delta.x, p.y)) {
            self.pose.pos.x += delta.x;
        }
        if !grid.is_solid_world_point(Vec2::new(p.x, p.y + delta.y)) {
            self.pose.pos.y += delta.y;
        }

        /* 4. vertical state machine; gravity runs every step */
        if intent.jump && self.pose.grounded {
            self.pose.vertical_velocity = -s.jump_power;
            self.pose.grounded = false;
        }
        self.pose.vertical_velocity += s.gravity * dt;
        self.pose.vertical_offset += self.pose.vertical_velocity * dt;
        if self.pose.vertical_offset >= s.ground_level {
            self.pose.vertical_offset = s.ground_level;
            self.pose.vertical_velocity = 0.0;
            self.pose.grounded = true;
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
