// What you SEE:
// • A brick wall on a green yard, lit by one of five scenes in turn (1 s each).
// • Scene 4 is the soft lighting demo: two bulbs whose light pulses side to side.
// • SCENE=<n> pins one scene, USE_VSYNC paces to 60 FPS, LIGHTING_CONFIG=<file.toml>
//   loads settings. P saves a PNG snapshot. ESC quits.

mod compositor;
mod config;
mod draw;
mod easing;
mod error;
mod geometry;
mod light;
mod mask;
mod render;
mod rng;
mod scene;
mod snapshot;
mod texture;
mod types;

use config::Config;
use draw::{draw_text_5x7, Drawer};
use error::Error;
use render::Renderer;
use std::io::Write;
use std::time::{Duration, Instant};
use types::FrameBuffer;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load()?;
    let mut scenes = scene::all_scenes(&config);
    config.validate(scenes.len())?;
    log::info!(
        "{}x{}, vsync {}, {}",
        config.window_width,
        config.window_height,
        if config.vsync { "on" } else { "off" },
        match config.scene {
            Some(ix) => format!("pinned to scene {ix}"),
            None => format!("cycling every {} ms", config.scene_ttl_ms),
        }
    );

    /* --- Window + renderer ---
       Visual: window opens (black until the first frame). */
    let mut drawer = Drawer::new(
        "Soft Lighting",
        config.window_width,
        config.window_height,
        config.vsync,
    )?;
    let mut renderer = Renderer::new(config.window_width as u32, config.window_height as u32)?;
    let mut screen = FrameBuffer::new(config.window_width, config.window_height);

    if let Err(e) = scene::setup_all(&mut scenes, &mut renderer) {
        log::error!("scene setup failed: {e}");
        return Err(e);
    }

    /* --- HUD / FPS --- */
    let start = Instant::now();
    let mut last_fps_time = start;
    let mut frames_this_second: u32 = 0;
    let mut frames_total: u64 = 0;
    let mut fps = 0.0f32;
    let mut hud_fps_text = String::from("FPS: 0.0");
    let mut current = usize::MAX;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let now_ms = now.duration_since(start).as_millis() as u32;

        /* 1) Pick and draw this frame's scene. */
        let ix = scene::select_scene(now_ms, config.scene_ttl_ms, scenes.len(), config.scene);
        if ix != current {
            log::debug!("scene {ix}: {}", scenes[ix].name());
            current = ix;
        }
        scenes[ix].draw(&mut renderer, now_ms);

        /* 2) Pack for the window, HUD on top. */
        renderer.present_into(&mut screen);
        if config.show_hud {
            let hud = format!("SCENE {ix} | {hud_fps_text}");
            draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);
        }
        drawer.present(&screen)?;

        /* 3) Snapshot (scene pixels only, no HUD). */
        if drawer.snapshot_pressed_once() {
            match snapshot::save_snapshot(&renderer, &config.snapshot_dir, ix) {
                Ok(path) => log::info!("saved {}", path.display()),
                Err(e) => log::warn!("snapshot failed: {e}"),
            }
        }

        /* 4) FPS: the number refreshes once per second, the spinner line every frame. */
        frames_this_second += 1;
        frames_total += 1;
        let elapsed = now.duration_since(last_fps_time);
        if elapsed >= Duration::from_secs(1) {
            fps = frames_this_second as f32 / elapsed.as_secs_f32();
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
        print!("{}\r", status_line(now_ms, fps));
        let _ = std::io::stdout().flush();
    }

    let secs = start.elapsed().as_secs_f64();
    if secs > 0.0 {
        println!();
        log::info!("average FPS: {:.1} over {frames_total} frames", frames_total as f64 / secs);
    }
    scene::cleanup_all(&mut scenes);
    Ok(())
}

/// Terminal status line; the spinner steps every 64 ms.
fn status_line(now_ms: u32, fps: f32) -> String {
    let spinner = SPINNER[((now_ms >> 6) % 4) as usize];
    format!("{spinner} current FPS: {fps:.1}  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_turns_between_fps_updates() {
        // four frames inside one second keep the fps but show four spinner states
        let lines: Vec<String> = [0, 64, 128, 192].iter().map(|&t| status_line(t, 59.94)).collect();
        assert_eq!(lines[0], "| current FPS: 59.9  ");
        assert_eq!(lines[1], "/ current FPS: 59.9  ");
        assert_eq!(lines[2], "- current FPS: 59.9  ");
        assert_eq!(lines[3], "\\ current FPS: 59.9  ");
        assert_eq!(status_line(256, 0.0), "| current FPS: 0.0  ");
    }
}
