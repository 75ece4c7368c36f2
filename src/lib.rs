#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod stroke;
pub mod surface;
pub mod util;

pub use app::PaintApp;
pub use color::parse_color;
pub use config::AppConfig;
pub use error::{BackgroundError, ColorParseError, CompositeError, ConfigError, ExportError};
pub use export::{ExportConfig, PendingExport, spawn_export};
pub use input::{InputEvent, InputHandler};
pub use stroke::{MutableStroke, Stroke, StrokeId};
pub use surface::DrawingSurface;
