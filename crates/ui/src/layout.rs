use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

/// Text on the toggle button
pub const BUTTON_LABEL: &str = "? Help";

/// Terminals narrower or shorter than this get a full-screen modal
const COMPACT_WIDTH: u16 = 50;
const COMPACT_HEIGHT: u16 = 14;

const MAX_MODAL_WIDTH: u16 = 90;
const MAX_MODAL_HEIGHT: u16 = 30;

/// How the modal is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    /// Centered box over the host screen
    Floating,
    /// Takes the whole terminal
    Fullscreen,
}

impl From<Rect> for ModalMode {
    fn from(area: Rect) -> Self {
        if area.width < COMPACT_WIDTH || area.height < COMPACT_HEIGHT { Self::Fullscreen } else { Self::Floating }
    }
}

/// Calculated layout for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetLayout {
    pub mode: ModalMode,
    /// Whole terminal
    pub host: Rect,
    /// Toggle button in the bottom-right corner
    pub button: Rect,
    /// Modal box
    pub modal: Rect,
}

impl WidgetLayout {
    pub fn calculate(area: Rect) -> Self {
        let mode = ModalMode::from(area);
        let modal = match mode {
            ModalMode::Fullscreen => area,
            ModalMode::Floating => centered(area, three_quarters(area.width), three_quarters(area.height)),
        };

        Self { mode, host: area, button: button_area(area), modal }
    }

    /// Whether a mouse position lands on the toggle button
    pub fn hits_button(&self, column: u16, row: u16) -> bool {
        self.button.contains(Position::new(column, row))
    }
}

impl Default for WidgetLayout {
    fn default() -> Self {
        Self::calculate(Rect::default())
    }
}

fn three_quarters(length: u16) -> u16 {
    (u32::from(length) * 3 / 4) as u16
}

/// Bordered button, one cell of margin from the bottom-right corner
fn button_area(area: Rect) -> Rect {
    let width = (BUTTON_LABEL.width() as u16 + 4).min(area.width);
    let height = 3.min(area.height);

    let x = area.right().saturating_sub(width + 1).max(area.x);
    let y = area.bottom().saturating_sub(height + 1).max(area.y);

    Rect::new(x, y, width, height)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.clamp(COMPACT_WIDTH.min(area.width), MAX_MODAL_WIDTH.min(area.width));
    let height = height.clamp(COMPACT_HEIGHT.min(area.height), MAX_MODAL_HEIGHT.min(area.height));

    let x = area.x.saturating_add(area.width.saturating_sub(width) / 2);
    let y = area.y.saturating_add(area.height.saturating_sub(height) / 2);

    Rect::new(x, y, width, height)
}
