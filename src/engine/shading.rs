//! Depth shading for hit columns.
//!
//! Walls combine exponential fog with a headlight-style directional term
//! over an ambient floor; windows use a flatter, lighter curve with no
//! directional term so they read as "open".

use crate::config::RenderSettings;
use crate::world::TileKind;

/// Brightness in `[ambient, 255]` for one column hit.  `ray_offset` is
/// `ray_angle - pose.angle`, the ray's angular offset from view-centre.
pub(crate) fn column_shade(
    kind: TileKind,
    corrected_distance: f32,
    ray_offset: f32,
    s: &RenderSettings,
) -> f32 {
    match kind {
        TileKind::Window => {
            let fog = (-s.fog_density * s.window_fog_scale * corrected_distance).exp();
            (fog * s.window_base).clamp(s.ambient, 255.0)
        }
        _ => {
            let fog = (-s.fog_density * corrected_distance).exp();
            let directional = ray_offset.cos().max(s.min_light_factor);
            (fog * (s.ambient + s.sun_intensity * 255.0 * directional)).clamp(s.ambient, 255.0)
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
