pub mod app;
pub mod components;
pub mod event_handler;
pub mod layout;
pub mod theme;

pub use app::App;
pub use event_handler::{EventHandler, KeyAction};
pub use layout::WidgetLayout;
pub use theme::{Theme, ThemePalette};
