use super::App;
use crate::components::{HelpButton, HelpModal};
use crate::layout::WidgetLayout;
use crate::theme::{Theme, ThemePalette};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

/// Render one frame: the host screen plus either the button or the modal
pub fn render(app: &App, frame: &mut Frame<'_>) {
    let area = frame.area();
    let palette = Theme::palette(app.theme());
    let layout = WidgetLayout::calculate(area);

    frame.render_widget(Block::default().style(palette.base()), area);
    render_host(frame, area, palette);

    if app.widget().is_open() {
        HelpModal::new(app.widget(), palette).with_frame(app.frame_index()).render(frame, layout.modal);
    } else {
        HelpButton::new(palette).render(frame, layout.button);
    }
}

fn render_host(frame: &mut Frame<'_>, area: Rect, palette: ThemePalette) {
    let text = vec![
        Line::from(Span::styled("HelpAI", Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))),
        Line::default(),
        Line::from(Span::styled("Press ? or click Help to ask a question.", Style::default().fg(palette.fg))),
        Line::from(Span::styled("q quits.", Style::default().fg(palette.muted))),
    ];

    let inner = Rect {
        x: area.x.saturating_add(2),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Left).wrap(Wrap { trim: true }), inner);
}
