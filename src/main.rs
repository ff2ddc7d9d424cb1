// What you SEE:
// • A borderless window with your webcam drawn as purple ASCII art on white.
// • N toggles between ASCII art and the plain color feed.
// • A freezes/unfreezes the current frame. ESC (or closing the window) quits.
// • The current mode is printed in red in the top-left corner.

mod app;
mod ascii;
mod camera;
mod config;
mod draw;
mod error;
mod font;
mod overlay;
mod render;
mod state;
mod types;

use app::Viewer;
use camera::CameraCapture;
use config::ViewerConfig;
use draw::Drawer;
use error::Error;
use render::FrameRenderer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Log filter from a `RUST_LOG` value; `info` only when nothing else is asked for.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(rust_log.unwrap_or_default())
}

fn main() -> Result<(), Error> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cfg = ViewerConfig::default();

    /* --- Camera + window setup ---
       Both are released when they drop, whichever way we leave main. */
    let cam = CameraCapture::new(
        cfg.camera_index,
        cfg.capture_width,
        cfg.capture_height,
        cfg.capture_fps,
    )?;
    let (w, h) = cam.resolution();
    tracing::info!("capturing at {w}x{h}");

    let drawer = Drawer::new(&cfg)?;

    let mut viewer = Viewer::new(cam, drawer, FrameRenderer::new(cfg));
    let exit = viewer.run()?;
    tracing::info!(?exit, mode = ?viewer.mode(), "bye");
    Ok(())
}
