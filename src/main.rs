//! Spiral Dial: 1-bit logarithmic-spiral watch face
//!
//! Desktop preview for an e-paper clock renderer:
//! - 200x200 1-bit canvas, software rasterized
//! - Log-spiral face that rotates with the minute
//! - Ordered dithering against grayscale art
//! - Battery voltage driving rim thickness and a warning badge

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod rasterizer;
mod config;
mod assets;
mod face;

use macroquad::prelude::*;
use rasterizer::{Canvas, HEIGHT, WIDTH};
use config::{load_config, save_config, FaceConfig};
use assets::{save_snapshot, FaceAssets};
use face::{draw_face, BatteryGauge, ClockTime, FaceGeometry};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

const CONFIG_PATH: &str = "assets/face.ron";
const ASSET_DIR: &str = "assets/face";

const VOLTAGE_STEP: f32 = 0.05;
const VOLTAGE_FLOOR: f32 = 2.5;
const VOLTAGE_CEIL: f32 = 5.0;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Spiral Dial v{}", VERSION),
        window_width: WIDTH * 3,
        window_height: HEIGHT * 3,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = match load_config(CONFIG_PATH) {
        Ok(config) => {
            println!("Loaded config from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            eprintln!("No config at {} ({}), using defaults", CONFIG_PATH, e);
            FaceConfig::default()
        }
    };

    let geometry = FaceGeometry::new(&config);
    let gauge = BatteryGauge::new(&config);
    let assets = FaceAssets::load_or_synthetic(ASSET_DIR);

    let mut canvas = Canvas::new(WIDTH, HEIGHT);
    let mut time = live_utc_time();
    let mut voltage = config.voltage_max;
    let mut live = true;
    let mut dirty = true;

    println!("=== Spiral Dial ===");

    loop {
        // Scrub keys leave the live clock; L returns to it
        if is_key_pressed(KeyCode::Right) {
            time = shift_time(time, 1);
            live = false;
            dirty = true;
        }
        if is_key_pressed(KeyCode::Left) {
            time = shift_time(time, -1);
            live = false;
            dirty = true;
        }
        if is_key_pressed(KeyCode::Up) {
            time = shift_time(time, 60);
            live = false;
            dirty = true;
        }
        if is_key_pressed(KeyCode::Down) {
            time = shift_time(time, -60);
            live = false;
            dirty = true;
        }
        if is_key_pressed(KeyCode::Equal) {
            voltage = (voltage + VOLTAGE_STEP).min(VOLTAGE_CEIL);
            dirty = true;
        }
        if is_key_pressed(KeyCode::Minus) {
            voltage = (voltage - VOLTAGE_STEP).max(VOLTAGE_FLOOR);
            dirty = true;
        }
        if is_key_pressed(KeyCode::L) && !live {
            live = true;
            dirty = true;
        }

        if is_key_pressed(KeyCode::C) {
            if let Some(parent) = Path::new(CONFIG_PATH).parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match save_config(&config, CONFIG_PATH) {
                Ok(()) => println!("Wrote config template to {}", CONFIG_PATH),
                Err(e) => eprintln!("Failed to write config: {}", e),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            if is_key_pressed(KeyCode::S) {
                let dialog = rfd::FileDialog::new()
                    .add_filter("PNG image", &["png"])
                    .set_file_name("face.png");
                if let Some(path) = dialog.save_file() {
                    match save_snapshot(&canvas, &path) {
                        Ok(()) => println!("Saved snapshot to {}", path.display()),
                        Err(e) => eprintln!("Snapshot failed: {}", e),
                    }
                }
            }

            if is_key_pressed(KeyCode::E) {
                if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                    export_minute_sweep(&dir, &geometry, &assets, &gauge, time, voltage);
                }
            }
        }

        if live {
            let now = live_utc_time();
            if now != time {
                time = now;
                dirty = true;
            }
        }

        // E-paper model: the face is a full redraw, done only when an
        // input actually changed
        if dirty {
            draw_face(&mut canvas, &geometry, &assets, &gauge, time, voltage);
            dirty = false;
        }

        clear_background(Color::from_rgba(30, 30, 35, 255));

        // Integer zoom keeps the dither pattern crisp
        let screen_w = screen_width();
        let screen_h = screen_height();
        let zoom = (screen_w / WIDTH as f32)
            .min(screen_h / HEIGHT as f32)
            .floor()
            .max(1.0);
        let draw_w = WIDTH as f32 * zoom;
        let draw_h = HEIGHT as f32 * zoom;

        let texture = Texture2D::from_rgba8(WIDTH as u16, HEIGHT as u16, &canvas.to_rgba());
        texture.set_filter(FilterMode::Nearest);
        draw_texture_ex(
            &texture,
            (screen_w - draw_w) * 0.5,
            (screen_h - draw_h) * 0.5,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        let status = format!(
            "{:02}:{:02} UTC{} | {:.2} V ({:.0}%)",
            time.hour,
            time.minute,
            if live { " live" } else { "" },
            voltage,
            gauge.fill(voltage) * 100.0,
        );
        draw_text(&status, 8.0, 16.0, 16.0, DARKGRAY);
        draw_text(
            "arrows scrub | -/= voltage | L live | S snapshot | E sweep | C config",
            8.0,
            screen_h - 8.0,
            16.0,
            GRAY,
        );

        next_frame().await;
    }
}

/// Current UTC time of day from the system clock
fn live_utc_time() -> ClockTime {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let minutes = (since_epoch.as_secs() / 60) % (24 * 60);
    ClockTime::new((minutes / 60) as u32, (minutes % 60) as u32)
}

/// Move a time of day by whole minutes, wrapping around midnight
fn shift_time(time: ClockTime, delta_minutes: i32) -> ClockTime {
    let total = time.hour as i32 * 60 + time.minute as i32 + delta_minutes;
    let total = total.rem_euclid(24 * 60) as u32;
    ClockTime::new(total / 60, total % 60)
}

/// Render the current hour as 60 PNG frames, one per minute
#[cfg(not(target_arch = "wasm32"))]
fn export_minute_sweep(
    dir: &Path,
    geometry: &FaceGeometry,
    assets: &FaceAssets,
    gauge: &BatteryGauge,
    time: ClockTime,
    voltage: f32,
) {
    use indicatif::{ProgressBar, ProgressStyle};

    let bar = ProgressBar::new(60);
    if let Ok(style) = ProgressStyle::with_template("{prefix} [{bar:40}] {pos}/{len}") {
        bar.set_style(style);
    }
    bar.set_prefix("Exporting");

    let mut frame = Canvas::new(WIDTH, HEIGHT);
    for minute in 0..60 {
        let moment = ClockTime::new(time.hour, minute);
        draw_face(&mut frame, geometry, assets, gauge, moment, voltage);
        let path = dir.join(format!("face_{:02}.png", minute));
        if let Err(e) = save_snapshot(&frame, &path) {
            bar.abandon();
            eprintln!("Export failed at minute {}: {}", minute, e);
            return;
        }
        bar.inc(1);
    }
    bar.finish();
    println!("Exported 60 frames to {}", dir.display());
}
