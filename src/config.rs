//! Tuning constants, owned by the caller instead of living as globals.
//!
//! Each field feeds exactly one formula in the caster or the body
//! integrator; the defaults reproduce the classic engine feel.

/// Everything the ray caster needs besides the pose and the grid.
#[derive(Clone, Copy, Debug)]
pub struct RenderSettings {
    pub num_rays: usize,
    pub fov: f32,       // horizontal field of view, radians
    pub max_depth: u32, // march range in tiles

    /// Projected column height is capped at `screen.h * height_cap_factor`.
    pub height_cap_factor: f32,
    /// Pixels of vertical shift per unit of `Tile::height_offset`.
    pub y_offset_scale: f32,

    /* shading */
    pub fog_density: f32,
    pub ambient: f32,       // brightness floor, 0..255
    pub sun_intensity: f32, // weight of the directional term
    pub min_light_factor: f32,
    pub window_base: f32,      // flat brightness base for window tiles
    pub window_fog_scale: f32, // < 1.0: windows fog slower than walls
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            num_rays: 160,
            fov: std::f32::consts::FRAC_PI_3,
            max_depth: 20,
            height_cap_factor: 1.0,
            y_offset_scale: 20.0,
            fog_density: 0.0015,
            ambient: 30.0,
            sun_intensity: 0.8,
            min_light_factor: 0.3,
            window_base: 235.0,
            window_fog_scale: 0.5,
        }
    }
}

/// Movement constants in world-units per fixed tick.
#[derive(Clone, Copy, Debug)]
pub struct PhysicsSettings {
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    pub gravity: f32,    // positive = downward (screen-down convention)
    pub jump_power: f32, // initial upward speed of a jump
    pub ground_level: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            move_speed: 2.5,
            sprint_multiplier: 2.0,
            gravity: 1.2,
            jump_power: 18.0,
            ground_level: 0.0,
        }
    }
}
