use crate::theme::ThemePalette;
use helpai_core::{Actor, Transcript, TranscriptEntry, Variation};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

const MESSAGE_INDENT: &str = "  ";

/// Conversation lines for the active persona
///
/// Only entries tagged with `variation` are shown. When the lines do not fit,
/// the newest ones stay visible.
pub struct TranscriptView<'a> {
    transcript: &'a Transcript,
    variation: Variation,
    palette: ThemePalette,
}

impl<'a> TranscriptView<'a> {
    pub fn new(transcript: &'a Transcript, variation: Variation, palette: ThemePalette) -> Self {
        Self { transcript, variation, palette }
    }

    pub fn entries(&self) -> impl Iterator<Item = &'a TranscriptEntry> + use<'a> {
        self.transcript.for_variation(self.variation)
    }

    /// Wrap every visible entry to `width` columns
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let wrap_width = (width as usize).saturating_sub(MESSAGE_INDENT.len()).max(1);
        let mut lines = Vec::new();

        for (i, entry) in self.entries().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }

            let label = match entry.actor {
                Actor::User => Span::styled("You", self.palette.user_label()),
                Actor::Ai => Span::styled(format!("HelpAI · {}", entry.variation.label()), self.palette.ai_label()),
            };
            lines.push(Line::from(label));

            for wrapped in textwrap::wrap(&entry.message, wrap_width) {
                lines.push(Line::from(Span::styled(
                    format!("{}{}", MESSAGE_INDENT, wrapped),
                    self.palette.panel(),
                )));
            }
        }

        lines
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = self.lines(area.width);
        let skip = lines.len().saturating_sub(area.height as usize);
        let visible: Vec<Line<'static>> = lines.into_iter().skip(skip).collect();

        frame.render_widget(Paragraph::new(visible).style(self.palette.panel()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use helpai_core::TranscriptEvent;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_only_active_variation_shown() {
        let transcript = Transcript::seeded();
        let generic = TranscriptView::new(&transcript, Variation::Generic, Theme::LIGHT);
        let insight = TranscriptView::new(&transcript, Variation::Insight, Theme::LIGHT);

        assert!(generic.entries().all(|e| e.variation == Variation::Generic));
        assert!(insight.entries().all(|e| e.variation == Variation::Insight));
        assert_eq!(generic.entries().count() + insight.entries().count(), transcript.len());
    }

    #[test]
    fn test_lines_label_and_wrap() {
        let transcript = Transcript::new().reduce(TranscriptEvent::UserMessage {
            message: "one two three four five".to_string(),
            variation: Variation::Generic,
        });
        let view = TranscriptView::new(&transcript, Variation::Generic, Theme::DARK);

        let lines = view.lines(12);
        assert_eq!(text(&lines[0]), "You");
        assert!(lines.len() > 2);
        assert!(lines[1..].iter().all(|l| text(l).starts_with("  ")));
        assert!(lines[1..].iter().all(|l| text(l).len() <= 12));
    }

    #[test]
    fn test_entries_separated_by_blank_line() {
        let transcript = Transcript::new()
            .reduce(TranscriptEvent::UserMessage { message: "hi".to_string(), variation: Variation::Insight })
            .reduce(TranscriptEvent::AiMessage { message: "hello".to_string(), variation: Variation::Insight });
        let view = TranscriptView::new(&transcript, Variation::Insight, Theme::DARK);

        let lines: Vec<String> = view.lines(40).iter().map(text).collect();
        assert_eq!(lines, vec!["You", "  hi", "", "HelpAI · Insight", "  hello"]);
    }
}
