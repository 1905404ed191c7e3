//! Help modal: persona tabs, conversation, thinking indicator and composer.

use crate::components::TranscriptView;
use crate::theme::ThemePalette;
use helpai_core::{HelpWidget, InputText, Variation};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use unicode_width::UnicodeWidthStr;

/// Frames of the "thinking" spinner
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const PLACEHOLDER: &str = "Ask a question...";
const PROMPT: &str = "› ";
const CURSOR: &str = "█";

pub struct HelpModal<'a> {
    widget: &'a HelpWidget,
    palette: ThemePalette,
    frame_index: usize,
}

impl<'a> HelpModal<'a> {
    pub fn new(widget: &'a HelpWidget, palette: ThemePalette) -> Self {
        Self { widget, palette, frame_index: 0 }
    }

    /// Spinner frame to show while loading
    pub fn with_frame(mut self, frame_index: usize) -> Self {
        self.frame_index = frame_index;
        self
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Line::from(Span::styled(" HelpAI ", self.palette.ai_label())))
            .title_bottom(self.hints())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.palette.border())
            .style(self.palette.panel());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 4 || inner.height < 4 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        self.render_tabs(frame, rows[0]);
        frame.render_widget(
            Paragraph::new(Span::styled("─".repeat(rows[1].width as usize), self.palette.border())),
            rows[1],
        );
        TranscriptView::new(self.widget.transcript(), self.widget.variation(), self.palette).render(frame, rows[2]);
        self.render_status(frame, rows[3]);
        self.render_input(frame, rows[4]);
    }

    fn render_tabs(&self, frame: &mut Frame<'_>, area: Rect) {
        let selected = Variation::VALUES.iter().position(|v| *v == self.widget.variation()).unwrap_or(0);
        let tabs = Tabs::new(Variation::VALUES.iter().map(|v| v.label()))
            .select(selected)
            .style(self.palette.muted())
            .highlight_style(self.palette.button())
            .divider("│");

        frame.render_widget(tabs, area);
    }

    fn render_status(&self, frame: &mut Frame<'_>, area: Rect) {
        if !self.widget.is_loading() {
            return;
        }

        let spinner = SPINNER_FRAMES[self.frame_index % SPINNER_FRAMES.len()];
        let line = Line::from(vec![
            Span::styled(format!("{} ", spinner), Style::default().fg(self.palette.accent).bg(self.palette.panel_bg)),
            Span::styled("Thinking...", self.palette.muted()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Composer line with a block cursor, scrolled so the cursor stays visible
    fn render_input(&self, frame: &mut Frame<'_>, area: Rect) {
        let input = self.widget.input();
        let prompt = Span::styled(PROMPT, Style::default().fg(self.palette.accent).bg(self.palette.panel_bg));
        let cursor = Span::styled(CURSOR, Style::default().fg(self.palette.fg).bg(self.palette.panel_bg));

        let line = if input.is_empty() {
            Line::from(vec![prompt, cursor, Span::styled(PLACEHOLDER, self.palette.muted())])
        } else {
            let available = (area.width as usize).saturating_sub(PROMPT.width() + CURSOR.width());
            let (before, after) = visible_input(input, available);
            Line::from(vec![
                prompt,
                Span::styled(before.to_string(), self.palette.panel()),
                cursor,
                Span::styled(after.to_string(), self.palette.panel()),
            ])
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    fn hints(&self) -> Line<'static> {
        let key = Style::default().fg(self.palette.accent).bg(self.palette.panel_bg);
        let label = self.palette.muted();
        Line::from(vec![
            Span::styled(" [Enter]", key),
            Span::styled(" send  ", label),
            Span::styled("[Tab]", key),
            Span::styled(" persona  ", label),
            Span::styled("[Esc]", key),
            Span::styled(" close ", label),
        ])
        .alignment(Alignment::Right)
    }
}

/// Split the input around the cursor, dropping leading text that would push
/// the cursor past `width` columns
fn visible_input(input: &InputText, width: usize) -> (&str, &str) {
    let text = input.as_str();
    let (mut before, after) = text.split_at(input.cursor());

    while before.width() > width {
        let mut chars = before.chars();
        chars.next();
        before = chars.as_str();
    }

    (before, after)
}
