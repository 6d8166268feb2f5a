#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod engine;
pub mod error;
pub mod event;
pub mod export;
pub mod renderer;
pub mod surface;
pub mod tools;

pub use app::DoodleApp;
pub use command::{CommandHistory, Damage, DrawCommand, Drawable};
pub use engine::Engine;
pub use error::ExportError;
pub use event::{EngineEvent, EventBus, EventHandler};
pub use export::{ExportFormat, SvgSurface};
pub use surface::{PainterSurface, Surface};
pub use tools::{StyleState, Tool, ToolRegistry};
