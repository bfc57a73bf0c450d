//! First-person viewer.
//!
//! Controls  W/S = forward/back  A/D = strafe  ←/→ = turn  Space = jump
//! Shift = sprint  F5 = save map  F9 = reload map  Esc = quit
//!
//! ```bash
//! cargo run --release -- [map.json]
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use glam::Vec2;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use voidray_rs::{
    config::{PhysicsSettings, RenderSettings},
    engine::{ColumnHit, Engine, RayCaster, Screen},
    map,
    sim::{MovementIntent, PlayerBody, SimulationState},
    world::{TILE_SIZE, TileKind},
};

/// Radians of turn one held arrow key contributes per tick.
const TURN_RATE: f32 = 0.05;

#[derive(Parser)]
#[command(about = "Tile-based first-person ray-casting viewer")]
struct Args {
    /// Map file; created with the built-in level when missing.
    #[arg(default_value = "map.json")]
    map: PathBuf,

    #[arg(long, default_value_t = 1280)]
    width: usize,

    #[arg(long, default_value_t = 720)]
    height: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let loaded = map::load_or_create(&args.map)?;
    let spawn = spawn_point(&loaded);
    log::info!(
        "map {}: {}x{} tiles, spawn ({:.0}, {:.0})",
        args.map.display(),
        loaded.grid.width(),
        loaded.grid.height(),
        spawn.x,
        spawn.y
    );

    let screen = Screen::new(args.width, args.height);
    let render = RenderSettings::default();
    let column_width = (screen.w / render.num_rays).max(1);

    let body = PlayerBody::new(spawn, 0.0, PhysicsSettings::default());
    let mut engine = Engine::new(
        SimulationState::new(loaded.grid, body),
        RayCaster::new(screen, render),
    );

    let mut frame = vec![0u32; screen.w * screen.h];
    let mut win = Window::new("VoidRay", screen.w, screen.h, WindowOptions::default())?;
    win.set_target_fps(30);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated step+blit time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we reported last

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* map hotkeys: both act strictly between frames ----------------- */
        if win.is_key_pressed(Key::F5, KeyRepeat::No) {
            match map::save(&args.map, engine.grid()) {
                Ok(()) => log::info!("saved {}", args.map.display()),
                Err(e) => log::error!("save failed: {e}"),
            }
        }
        if win.is_key_pressed(Key::F9, KeyRepeat::No) {
            match map::load(&args.map) {
                Ok(m) => {
                    engine.swap_grid(m.grid);
                    log::info!("reloaded {}", args.map.display());
                }
                Err(e) => log::error!("reload failed: {e}"),
            }
        }

        /* one decoded intent, one step, one frame ------------------------ */
        let intent = decode_intent(&win);
        let hits = engine.step(&intent);

        frame.fill(0x00_202020);
        let view_bob = engine.pose().vertical_offset;
        for hit in &hits {
            draw_column(&mut frame, &screen, column_width, view_bob, hit);
        }

        win.update_with_buffer(&frame, screen.w, screen.h)?;

        // ─────────── accumulate & report every ~3 s ────────────────────
        acc_time += t0.elapsed();
        acc_frames += 1;
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            log::info!(
                "avg frame: {avg_ms:.2} ms, heading {:.0} deg",
                engine.pose().heading_degrees()
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/// Build one `MovementIntent` from the currently held keys.
fn decode_intent(win: &Window) -> MovementIntent {
    let mut intent = MovementIntent::default();

    if win.is_key_down(Key::W) || win.is_key_down(Key::Up) {
        intent.forward += 1.0;
    }
    if win.is_key_down(Key::S) || win.is_key_down(Key::Down) {
        intent.forward -= 1.0;
    }
    if win.is_key_down(Key::A) {
        intent.strafe -= 1.0;
    }
    if win.is_key_down(Key::D) {
        intent.strafe += 1.0;
    }
    if win.is_key_down(Key::Left) {
        intent.turn -= TURN_RATE;
    }
    if win.is_key_down(Key::Right) {
        intent.turn += TURN_RATE;
    }

    intent.jump = win.is_key_down(Key::Space);
    intent.sprint = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
    intent
}

/// Spawn at the map's marker, or the first open tile of a marker-less map.
fn spawn_point(loaded: &map::LoadedMap) -> Vec2 {
    loaded.spawn.unwrap_or_else(|| {
        for (row, tiles) in loaded.grid.rows().enumerate() {
            for (col, tile) in tiles.iter().enumerate() {
                if tile.kind == TileKind::Empty {
                    return Vec2::new(
                        (col as f32 + 0.5) * TILE_SIZE,
                        (row as f32 + 0.5) * TILE_SIZE,
                    );
                }
            }
        }
        loaded.grid.world_size() * 0.5
    })
}

/// Blit one hit as a vertical rectangle.  `view_bob` shifts the whole
/// column by the player's vertical offset so jumps read on screen.
fn draw_column(
    frame: &mut [u32],
    screen: &Screen,
    column_width: usize,
    view_bob: f32,
    hit: &ColumnHit,
) {
    let top = screen.half_h - hit.projected_height * 0.5 - hit.screen_y_offset - view_bob;
    let bottom = top + hit.projected_height;
    if bottom <= 0.0 || top >= screen.h as f32 {
        return;
    }

    let y0 = top.max(0.0) as usize;
    let y1 = bottom.min(screen.h as f32 - 1.0) as usize;
    let x0 = hit.column * column_width;
    let x1 = (x0 + column_width).min(screen.w);
    let colour = column_colour(hit);

    for y in y0..=y1 {
        frame[y * screen.w + x0..y * screen.w + x1].fill(colour);
    }
}

/// Grey for walls, a cool tint for windows so they read as "open".
fn column_colour(hit: &ColumnHit) -> u32 {
    let v = hit.shade.clamp(0.0, 255.0) as u32;
    match hit.kind {
        TileKind::Window => (v * 8 / 10) << 16 | (v * 9 / 10) << 8 | v,
        _ => v << 16 | v << 8 | v,
    }
}
