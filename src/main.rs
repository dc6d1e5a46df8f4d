//! Terminal viewer: spins a mesh in front of the camera until `q` or `Esc`.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use glyphraster::prelude::*;
use glyphraster::MeshSource;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", RenderConfig::USAGE);
        return Ok(());
    }
    let config = RenderConfig::from_args(&args)
        .with_context(|| format!("bad arguments\n{}", RenderConfig::USAGE))?;
    let mesh = load_mesh(&config)?;

    let mut renderer = Renderer::with_depth_mode(
        config.width,
        config.height,
        config.depth_mode,
        TerminalDisplay::stdout(),
    )?;

    // The cursor is already hidden, so every exit from here must restore it.
    with_restore(
        &mut renderer,
        |renderer| {
            terminal::enable_raw_mode()?;
            run(renderer, mesh, &config)
        },
        |renderer| {
            let _ = renderer.display_mut().restore();
            let _ = terminal::disable_raw_mode();
        },
    )
}

/// Runs `body`, then `restore`, whatever `body` returned.
fn with_restore<S, T>(
    state: &mut S,
    body: impl FnOnce(&mut S) -> Result<T>,
    restore: impl FnOnce(&mut S),
) -> Result<T> {
    let result = body(state);
    restore(state);
    result
}

fn load_mesh(config: &RenderConfig) -> Result<Mesh> {
    let mut mesh = match &config.mesh {
        MeshSource::Cube => Mesh::cube(),
        MeshSource::Quad => Mesh::quad(),
        MeshSource::Obj(path) => Mesh::from_obj(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
    };
    mesh.scale_by(config.mesh_scale);
    Ok(mesh)
}

fn run(
    renderer: &mut Renderer<TerminalDisplay<std::io::Stdout>>,
    mut mesh: Mesh,
    config: &RenderConfig,
) -> Result<()> {
    renderer.create_projection_matrix(config.fov_radians(), config.near, config.far);
    renderer.create_view_matrix(config.camera.x, config.camera.y, config.camera.z);

    let mut limiter = FrameLimiter::new(config.fps);
    let mut fps = FpsCounter::new();
    let mut frame: u64 = 0;

    loop {
        if quit_requested()? {
            return Ok(());
        }
        if config.frames.is_some_and(|limit| frame >= limit) {
            return Ok(());
        }

        renderer.begin()?;
        renderer.display_mut().write_line(&fps.label())?;
        mesh.rotate(config.spin);
        renderer.draw_mesh(&mesh);
        renderer.render()?;

        if let Some(reading) = fps.tick() {
            log::debug!("{} fps, {:?}", reading, renderer.stats());
        }
        limiter.wait_and_get_delta();
        frame += 1;
    }
}

/// Drains pending key events without blocking.
fn quit_requested() -> Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl_c =
                key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_runs_when_setup_fails() {
        let mut restored = false;
        let result: Result<()> = with_restore(
            &mut restored,
            |_| Err(anyhow::anyhow!("raw mode unavailable")),
            |restored| *restored = true,
        );
        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn restore_runs_after_success() {
        let mut calls = Vec::new();
        let value = with_restore(
            &mut calls,
            |calls| {
                calls.push("body");
                Ok(7)
            },
            |calls| calls.push("restore"),
        )
        .unwrap();
        assert_eq!(value, 7);
        assert_eq!(calls, ["body", "restore"]);
    }
}
