//! Terminal host for the interactive mesh viewer.
//!
//! Owns the event loop and wires terminal input to the core's entry
//! points: left-button drag rotates, scroll zooms, keys 1/2/3 pick the
//! shading mode. Each frame asks the core for its ordered triangle list
//! and hands it to the cell rasterizer.
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use stlview_core::{Mesh, RenderMode, Viewer};

pub mod renderer;

pub use renderer::CellRenderer;

/// Wheel delta passed to the zoom entry point per scroll event, matching
/// one notch of a desktop mouse wheel.
const WHEEL_NOTCH: f32 = 120.0;

/// Main application struct for the terminal viewer.
pub struct TerminalApp {
    viewer: Viewer,
    renderer: CellRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            viewer: Viewer::new(mesh),
            renderer: CellRenderer::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input; drags arrive as bursts of events.
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('1') => {
                    self.viewer.set_mode(RenderMode::Wireframe);
                }
                KeyCode::Char('2') => {
                    self.viewer.set_mode(RenderMode::Material);
                }
                KeyCode::Char('3') => {
                    self.viewer.set_mode(RenderMode::Lighting);
                }
                _ => {}
            },
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => match kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.viewer.pointer_pressed(column as i32, row as i32);
                }
                MouseEventKind::Drag(MouseButton::Left) => {
                    self.viewer.pointer_dragged(column as i32, row as i32);
                }
                MouseEventKind::ScrollUp => {
                    self.viewer.wheel(WHEEL_NOTCH);
                }
                MouseEventKind::ScrollDown => {
                    self.viewer.wheel(-WHEEL_NOTCH);
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let viewport = (self.renderer.width() as u32, self.renderer.height() as u32);
        let frame = self.viewer.render_frame(viewport);

        self.renderer.clear();
        self.renderer.draw_frame(&frame);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.present(&mut stdout)?;

        // Status overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "STLView | {:?} | {} triangles | FPS: {:.1} | Drag=Rotate Scroll=Zoom 1/2/3=Mode Q=Quit",
                self.viewer.mode(),
                self.viewer.mesh().triangles.len(),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
