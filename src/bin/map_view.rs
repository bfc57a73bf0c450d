//! Top-down map viewer: tiles, spawn point and the cast ray fan.
//!
//! Controls  ←/→ = turn the fan  Esc = quit
//!
//! ```bash
//! cargo run --bin map_view -- [map.json]
//! ```

use glam::Vec2;
use minifb::{Key, Window, WindowOptions};

use voidray_rs::{
    config::RenderSettings,
    engine::{RayCaster, Screen},
    map,
    sim::Pose,
    world::{TILE_SIZE, TileGrid, TileKind},
};

const WIDTH: usize = 1024;
const HEIGHT: usize = 768;
const TURN_RATE: f32 = 0.04;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let map_path = args.next().unwrap_or_else(|| "map.json".into());

    let loaded = map::load_or_create(&map_path)?;
    let grid = loaded.grid;

    // ─────────── map-space → screen-space transform ────────────
    let world = grid.world_size();
    let scale = (WIDTH as f32 / world.x).min(HEIGHT as f32 / world.y) * 0.9; // 10 % margin
    let offset_x = (WIDTH as f32 - world.x * scale) / 2.0;
    let offset_y = (HEIGHT as f32 - world.y * scale) / 2.0;
    let to_screen =
        |p: Vec2| -> (i32, i32) { ((p.x * scale + offset_x) as i32, (p.y * scale + offset_y) as i32) };

    let spawn = loaded.spawn.unwrap_or(world * 0.5);
    let mut pose = Pose::at(spawn, 0.0);

    let settings = RenderSettings::default();
    let caster = RayCaster::new(Screen::new(WIDTH, HEIGHT), settings);

    let mut buffer = vec![0u32; WIDTH * HEIGHT];
    let mut window = Window::new("VoidRay map view", WIDTH, HEIGHT, WindowOptions::default())?;
    window.set_target_fps(30);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        if window.is_key_down(Key::Left) {
            pose.angle -= TURN_RATE;
        }
        if window.is_key_down(Key::Right) {
            pose.angle += TURN_RATE;
        }

        buffer.fill(0x00_101010);
        rasterise_tiles(&mut buffer, &grid, scale, offset_x, offset_y);

        // ─────────── ray fan ────────────
        let half_fov = settings.fov * 0.5;
        let delta_angle = settings.fov / settings.num_rays as f32;
        let (px, py) = to_screen(pose.pos);
        for hit in caster.cast_frame(&pose, &grid) {
            let ray_angle = pose.angle - half_fov + hit.column as f32 * delta_angle;
            let depth = hit.corrected_distance / (pose.angle - ray_angle).cos();
            let (sin_a, cos_a) = ray_angle.sin_cos();
            let end = pose.pos + Vec2::new(cos_a, sin_a) * depth;
            let (ex, ey) = to_screen(end);
            draw_line(&mut buffer, px, py, ex, ey, 0x00_304030);
        }

        fill_rect(&mut buffer, px - 3, py - 3, 6, 6, 0x00_40FF40);

        window.update_with_buffer(&buffer, WIDTH, HEIGHT)?;
    }
    Ok(())
}

fn rasterise_tiles(buf: &mut [u32], grid: &TileGrid, scale: f32, off_x: f32, off_y: f32) {
    for (row, tiles) in grid.rows().enumerate() {
        for (col, tile) in tiles.iter().enumerate() {
            let colour = match tile.kind {
                TileKind::Empty => continue,
                TileKind::Wall => 0x00_C0C0C0,
                TileKind::Window => 0x00_6080C0,
                TileKind::Solid => 0x00_808080,
            };
            let x = (col as f32 * TILE_SIZE * scale + off_x) as i32;
            let y = (row as f32 * TILE_SIZE * scale + off_y) as i32;
            let side = (TILE_SIZE * scale) as i32 - 1; // 1 px gutter
            fill_rect(buf, x, y, side, side, colour);
        }
    }
}

fn fill_rect(buf: &mut [u32], x: i32, y: i32, w: i32, h: i32, colour: u32) {
    for yy in y.max(0)..(y + h).min(HEIGHT as i32) {
        for xx in x.max(0)..(x + w).min(WIDTH as i32) {
            buf[yy as usize * WIDTH + xx as usize] = colour;
        }
    }
}

/// Integer Bresenham line-drawing algorithm.
fn draw_line(buf: &mut [u32], mut x0: i32, mut y0: i32, x1: i32, y1: i32, colour: u32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..WIDTH as i32).contains(&x0) && (0..HEIGHT as i32).contains(&y0) {
            buf[y0 as usize * WIDTH + x0 as usize] = colour;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            if x0 == x1 {
                break;
            }
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            if y0 == y1 {
                break;
            }
            err += dx;
            y0 += sy;
        }
    }
}
