use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;
use tracing::{error, info};

use raycast_maze::config::ViewerConfig;
use raycast_maze::render::framebuffer::{Color as Rgba, Framebuffer};
use raycast_maze::{InputEvent, LoopSignal, MovementIntent, Session};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

#[inline]
fn to_raylib(c: Rgba) -> Color {
    Color::new(c.r, c.g, c.b, c.a)
}

/// Arrow keys start and stop motion; Escape or closing the window quits.
fn poll_input(window: &RaylibHandle) -> Vec<InputEvent> {
    let mut events = Vec::new();
    if window.window_should_close() {
        events.push(InputEvent::Quit);
        return events;
    }

    let bindings = [
        (KeyboardKey::KEY_LEFT, MovementIntent::TurnLeft, MovementIntent::StopTurning),
        (KeyboardKey::KEY_RIGHT, MovementIntent::TurnRight, MovementIntent::StopTurning),
        (KeyboardKey::KEY_UP, MovementIntent::Forward, MovementIntent::StopForward),
    ];
    for (key, on_press, on_release) in bindings {
        if window.is_key_pressed(key) {
            events.push(on_press.into());
        }
        if window.is_key_released(key) {
            events.push(on_release.into());
        }
    }
    events
}

fn run(config: &ViewerConfig, session: &mut Session) {
    let width = config.viewport.width;
    let height = config.viewport.height;

    let (mut window, raylib_thread) = raylib::init()
        .size(width as i32, height as i32)
        .title("raycast_maze")
        .build();

    let mut framebuffer = Framebuffer::new(width, height);
    let background = framebuffer.background_color;
    let blank = Image::gen_image_color(width as i32, height as i32, to_raylib(background));
    let mut texture = match window.load_texture_from_image(&raylib_thread, &blank) {
        Ok(texture) => texture,
        Err(err) => {
            error!(?err, "could not create the frame texture");
            return;
        }
    };
    let mut pixels = Vec::new();
    let frame_budget = Duration::from_secs(1) / config.target_fps;

    loop {
        let start = Instant::now();

        let events = poll_input(&window);
        if session.tick(events) == LoopSignal::Quit {
            break;
        }

        framebuffer.clear();
        session.render_into(&mut framebuffer, background, config.minimap_cell);
        framebuffer.to_rgba8(&mut pixels);
        let _ = texture.update_texture(&pixels);

        let fps_now = window.get_fps();
        {
            let mut d = window.begin_drawing(&raylib_thread);
            d.clear_background(to_raylib(background));
            d.draw_texture(&texture, 0, 0, Color::WHITE);
            d.draw_text(&format!("FPS: {fps_now}"), 10, height as i32 - 30, 20, Color::DARKGRAY);
        }

        if let Some(rest) = frame_budget.checked_sub(start.elapsed()) {
            thread::sleep(rest);
        }
    }

    info!(frames = session.frame_count(), "window closed");
}

fn main() -> ExitCode {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = match ViewerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut session = match Session::from_config(&config) {
        Ok(session) => session,
        Err(err) => {
            error!(%err, "could not build the map");
            return ExitCode::FAILURE;
        }
    };

    run(&config, &mut session);
    ExitCode::SUCCESS
}
