use crate::layout::BUTTON_LABEL;
use crate::theme::ThemePalette;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

/// Toggle button shown while the modal is closed
pub struct HelpButton {
    palette: ThemePalette,
}

impl HelpButton {
    pub fn new(palette: ThemePalette) -> Self {
        Self { palette }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(self.palette.button());

        frame.render_widget(Paragraph::new(BUTTON_LABEL).alignment(Alignment::Center).block(block), area);
    }
}
