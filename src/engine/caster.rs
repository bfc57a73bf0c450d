//! The ray caster: one fixed-step march per screen column.
//!
//! Deliberately a linear march rather than a DDA grid walk - O(depth/step)
//! per ray and it can miss features smaller than one step, but every
//! column is independent and the whole frame is bounded work.

use glam::Vec2;

use crate::config::RenderSettings;
use crate::engine::shading::column_shade;
use crate::engine::types::Screen;
use crate::sim::Pose;
use crate::world::{TILE_SIZE, TileGrid, TileKind};

/// One resolved screen column.  Rebuilt every frame, never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnHit {
    pub column: usize,
    pub kind: TileKind,
    /// Ray length projected onto the view-plane normal (fisheye
    /// corrected).  Always > 0 for a reported hit.
    pub corrected_distance: f32,
    pub projected_height: f32,
    pub screen_y_offset: f32,
    /// Brightness, 0..255.
    pub shade: f32,
}

/// Casts a fan of `num_rays` rays for a pose over a grid.  All derived
/// constants are computed once here, not per frame.
pub struct RayCaster {
    settings: RenderSettings,
    half_fov: f32,
    delta_angle: f32,
    step_len: f32,
    max_steps: u32,
    proj_coeff: f32,
    height_cap: f32,
}

impl RayCaster {
    pub fn new(screen: Screen, settings: RenderSettings) -> Self {
        let half_fov = settings.fov * 0.5;
        Self {
            half_fov,
            delta_angle: settings.fov / settings.num_rays as f32,
            step_len: 0.1 * TILE_SIZE,
            max_steps: settings.max_depth * 10,
            proj_coeff: 3.0 * (settings.num_rays as f32 / (2.0 * half_fov.tan())) * TILE_SIZE,
            height_cap: screen.h as f32 * settings.height_cap_factor,
            settings,
        }
    }

    /// Cast the full fan.  Rays that leave the map, or whose corrected
    /// distance would be non-positive, are omitted - the result holds at
    /// most `num_rays` entries.  Pure: identical pose and grid yield a
    /// bit-identical frame.
    pub fn cast_frame(&self, pose: &Pose, grid: &TileGrid) -> Vec<ColumnHit> {
        let start_angle = pose.angle - self.half_fov;
        let mut hits = Vec::with_capacity(self.settings.num_rays);
        for column in 0..self.settings.num_rays {
            let ray_angle = start_angle + column as f32 * self.delta_angle;
            if let Some(hit) = self.cast_column(column, ray_angle, pose, grid) {
                hits.push(hit);
            }
        }
        hits
    }

    fn cast_column(
        &self,
        column: usize,
        ray_angle: f32,
        pose: &Pose,
        grid: &TileGrid,
    ) -> Option<ColumnHit> {
        let (sin_a, cos_a) = ray_angle.sin_cos();

        for step in 1..=self.max_steps {
            let depth = step as f32 * self.step_len;
            let sample = Vec2::new(pose.pos.x + cos_a * depth, pose.pos.y + sin_a * depth);

            // leaving the grid ends the ray: no wrap, no clamp, no hit
            let tile = grid.tile_at_world(sample)?;
            if !tile.kind.stops_ray() {
                continue;
            }

            // fisheye correction: project the ray onto the view-plane normal
            let ray_offset = ray_angle - pose.angle;
            let corrected = depth * ray_offset.cos();
            if corrected <= 0.0 {
                return None; // degenerate geometry, skipped not reported
            }

            return Some(ColumnHit {
                column,
                kind: tile.kind,
                corrected_distance: corrected,
                projected_height: (self.proj_coeff / corrected).min(self.height_cap),
                screen_y_offset: tile.height_offset as f32 * self.settings.y_offset_scale,
                shade: column_shade(tile.kind, corrected, ray_offset, &self.settings),
            });
        }

        None // march range exhausted inside open space
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Tile;

    /// 3x3 map, all walls except the centre tile.
    fn boxed_centre(centre_east: Tile) -> TileGrid {
        let w = Tile::new(TileKind::Wall, 0);
        TileGrid::from_rows(vec![
            vec![w, w, w],
            vec![w, Tile::EMPTY, centre_east],
            vec![w, w, w],
        ])
        .unwrap()
    }

    fn centre_pose() -> Pose {
        Pose::at(Vec2::new(1.5 * TILE_SIZE, 1.5 * TILE_SIZE), 0.0)
    }

    #[test]
    fn all_empty_grid_yields_no_hits() {
        let grid =
            TileGrid::from_rows(vec![vec![Tile::EMPTY; 4]; 4]).unwrap();
        let caster = RayCaster::new(Screen::new(640, 480), RenderSettings::default());
        for angle in [0.0, 0.9, 2.4, -1.3] {
            let pose = Pose::at(Vec2::new(100.0, 100.0), angle);
            assert!(caster.cast_frame(&pose, &grid).is_empty());
        }
    }

    #[test]
    fn rays_through_an_open_edge_are_omitted() {
        let w = Tile::new(TileKind::Wall, 0);
        let grid = TileGrid::from_rows(vec![
            vec![w, w, w],
            vec![Tile::EMPTY, Tile::EMPTY, Tile::EMPTY],
            vec![w, w, w],
        ])
        .unwrap();
        // facing the open west edge the whole fan leaves the map
        let pose = Pose::at(
            Vec2::new(1.5 * TILE_SIZE, 1.5 * TILE_SIZE),
            std::f32::consts::PI,
        );
        let settings = RenderSettings {
            num_rays: 8,
            fov: 0.4,
            ..RenderSettings::default()
        };
        let caster = RayCaster::new(Screen::new(640, 480), settings);
        assert!(caster.cast_frame(&pose, &grid).is_empty());
    }

    #[test]
    fn single_ray_box_scenario_matches_the_projection_formula() {
        let grid = boxed_centre(Tile::new(TileKind::Wall, 0));
        let settings = RenderSettings {
            num_rays: 1,
            fov: 60f32.to_radians(),
            ..RenderSettings::default()
        };
        let caster = RayCaster::new(Screen::new(640, 480), settings);

        let hits = caster.cast_frame(&centre_pose(), &grid);
        assert_eq!(hits.len(), 1);
        let hit = hits[0];
        assert_eq!(hit.column, 0);
        assert_eq!(hit.kind, TileKind::Wall);

        // the single ray leaves at -fov/2 and first samples tile (2,1) at
        // depth 30 (six 5-unit steps); corrected = depth * cos(fov/2)
        let half_fov = 60f32.to_radians() * 0.5;
        let expected_corrected = 30.0 * half_fov.cos();
        assert!((hit.corrected_distance - expected_corrected).abs() < 1e-4);

        let proj_coeff = 3.0 * (1.0 / (2.0 * half_fov.tan())) * TILE_SIZE;
        assert_eq!(hit.projected_height, proj_coeff / hit.corrected_distance);
    }

    #[test]
    fn height_offset_shifts_linearly() {
        let grid = boxed_centre(Tile::new(TileKind::Wall, 5));
        let settings = RenderSettings {
            num_rays: 1,
            fov: 60f32.to_radians(),
            y_offset_scale: 20.0,
            ..RenderSettings::default()
        };
        let caster = RayCaster::new(Screen::new(640, 480), settings);
        let hits = caster.cast_frame(&centre_pose(), &grid);
        assert_eq!(hits[0].screen_y_offset, 100.0);
    }

    #[test]
    fn projected_height_is_positive_and_capped() {
        let grid = boxed_centre(Tile::new(TileKind::Wall, 0));
        let screen = Screen::new(1280, 720);
        let settings = RenderSettings::default();
        let caster = RayCaster::new(screen, settings);

        // hugging the east wall: near-zero distances exercise the cap
        let pose = Pose::at(Vec2::new(2.0 * TILE_SIZE - 2.0, 1.5 * TILE_SIZE), 0.0);
        let hits = caster.cast_frame(&pose, &grid);
        assert!(!hits.is_empty());
        let cap = screen.h as f32 * settings.height_cap_factor;
        for hit in &hits {
            assert!(hit.corrected_distance > 0.0);
            assert!(hit.projected_height > 0.0);
            assert!(hit.projected_height <= cap);
        }
        assert!(
            hits.iter().any(|h| h.projected_height == cap),
            "at least the centre rays must saturate the cap"
        );
    }

    #[test]
    fn windows_terminate_rays_with_their_own_shading() {
        let grid = boxed_centre(Tile::new(TileKind::Window, 0));
        let settings = RenderSettings {
            num_rays: 1,
            fov: 60f32.to_radians(),
            ..RenderSettings::default()
        };
        let caster = RayCaster::new(Screen::new(640, 480), settings);
        let hits = caster.cast_frame(&centre_pose(), &grid);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, TileKind::Window);
    }

    #[test]
    fn casting_is_idempotent() {
        let grid = boxed_centre(Tile::new(TileKind::Wall, 2));
        let caster = RayCaster::new(Screen::new(1280, 720), RenderSettings::default());
        let pose = Pose::at(Vec2::new(70.0, 80.0), 0.77);
        assert_eq!(caster.cast_frame(&pose, &grid), caster.cast_frame(&pose, &grid));
    }

    #[test]
    fn pose_outside_the_grid_reports_nothing() {
        let grid = boxed_centre(Tile::new(TileKind::Wall, 0));
        let pose = Pose::at(Vec2::new(-500.0, -500.0), 0.3);
        let caster = RayCaster::new(Screen::new(640, 480), RenderSettings::default());
        assert!(caster.cast_frame(&pose, &grid).is_empty());
    }
}
