//! STLView terminal viewer.
//!
//! Usage: stlview-terminal [model.stl]
//! Controls:
//!   - Mouse drag: rotate the model
//!   - Scroll wheel: zoom (clamped to a minimum scale)
//!   - 1/2/3: Wireframe / Material / Lighting shading
//!   - Q/ESC: quit
//!
//! A load failure is reported and the viewer continues with an empty
//! (blank) mesh; with no argument a demo cube is shown instead.

use std::env;
use std::io;
use std::path::Path;
use std::time::Duration;

use stlview_core::{stl, Mesh};
use stlview_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mesh = match args.get(1) {
        Some(path) => match stl::load_stl(Path::new(path)) {
            Ok(mesh) => {
                log::info!("loaded {} triangles from {}", mesh.triangles.len(), path);
                mesh
            }
            Err(err) => {
                log::warn!("continuing with an empty mesh: {}", err);
                eprintln!("Failed to load {}: {}", path, err);
                Mesh::new()
            }
        },
        None => {
            eprintln!("No STL file given, showing demo cube");
            Mesh::cube(0.2)
        }
    };

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh)?;
    app.run()
}
