/// Tetra Terminal Demo - Drag-Rotated Tetrahedron
///
/// Usage: tetra-terminal [config.toml]
///
/// Controls:
///   - Left mouse drag: Rotate the tetrahedron
///   - WASD / Arrow Keys: Rotate by a fixed step
///   - Q/ESC: Quit

use std::env;
use tetra_core::RenderConfig;
use tetra_terminal::{AppError, TerminalApp};

fn main() -> Result<(), AppError> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => {
            println!("Loading config: {}", path);
            RenderConfig::load_from_file(&path)?
        }
        None => RenderConfig::default(),
    };

    let mut app = TerminalApp::new(config)?;
    app.run()?;

    println!("Thank you for using Tetra!");
    Ok(())
}
