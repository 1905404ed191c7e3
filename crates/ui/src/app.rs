mod event_loop;
mod rendering;

pub use rendering::render;

use crate::event_handler::{EventHandler, KeyAction};
use crate::layout::WidgetLayout;
use crossterm::event::Event;
use helpai_core::{HelpWidget, QueryResolution, Resolution, Theme as ThemeVariant};
use helpai_providers::{SuggestionClient, SuggestionQuery};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Main TUI application
///
/// Owns the help widget and the query runner. All widget mutation happens on
/// the task driving [`App::run`].
pub struct App {
    widget: HelpWidget,
    query: SuggestionQuery,
    resolution_rx: Option<mpsc::UnboundedReceiver<QueryResolution>>,
    theme: ThemeVariant,
    layout: WidgetLayout,
    frame_index: usize,
    pub should_exit: bool,
    pub cancel_token: CancellationToken,
}

impl App {
    pub fn new(widget: HelpWidget, client: Arc<dyn SuggestionClient>, theme: ThemeVariant) -> Self {
        let (query, resolution_rx) = SuggestionQuery::new(client);
        Self {
            widget,
            query,
            resolution_rx: Some(resolution_rx),
            theme,
            layout: WidgetLayout::default(),
            frame_index: 0,
            should_exit: false,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Stop the event loop when `token` is cancelled
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    pub fn widget(&self) -> &HelpWidget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut HelpWidget {
        &mut self.widget
    }

    pub fn theme(&self) -> ThemeVariant {
        self.theme
    }

    /// Layout of the last drawn frame
    pub fn layout(&self) -> &WidgetLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: WidgetLayout) {
        self.layout = layout;
    }

    /// Current spinner frame
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Take the resolution receiver; the event loop owns it while running
    pub fn take_resolutions(&mut self) -> Option<mpsc::UnboundedReceiver<QueryResolution>> {
        self.resolution_rx.take()
    }

    /// Route a terminal event to the widget
    pub fn handle_event(&mut self, event: Event) {
        if let Some(action) = EventHandler::handle_event(&event, &mut self.widget, &self.layout) {
            self.apply_action(action);
        }
    }

    pub fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Open => self.widget.open(),
            KeyAction::Close => self.widget.close(),
            KeyAction::Submit => {
                if let Some(fetch) = self.widget.submit() {
                    self.query.refetch(fetch);
                }
            }
            KeyAction::CycleVariation { steps } => {
                let next = self.widget.variation().cycle(steps);
                self.widget.set_variation(next);
            }
            KeyAction::Exit => self.should_exit = true,
        }
    }

    pub fn handle_resolution(&mut self, resolution: QueryResolution) -> Resolution {
        self.widget.resolve(resolution)
    }

    /// Advance the spinner
    pub fn tick(&mut self) {
        self.frame_index = self.frame_index.wrapping_add(1);
    }

    /// Draw the UI
    pub fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        terminal.draw(|frame| {
            self.layout = WidgetLayout::calculate(frame.area());
            render(self, frame);
        })?;
        Ok(())
    }

    /// Run the TUI until the user exits or the cancel token fires
    pub async fn run(&mut self) -> Result<()> {
        event_loop::run(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use helpai_core::{StaticBuildingId, Variation};
    use helpai_providers::{MockClient, MockResponse};

    fn create_test_app(responses: Vec<MockResponse>) -> App {
        let widget = HelpWidget::new(Arc::new(StaticBuildingId::none()));
        App::new(widget, Arc::new(MockClient::new(responses)), ThemeVariant::Dark)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_text(app: &mut App, text: &str) {
        text.chars().for_each(|c| press(app, KeyCode::Char(c)));
    }

    #[test]
    fn test_app_new() {
        let app = create_test_app(Vec::new());
        assert!(!app.should_exit);
        assert!(!app.widget().is_open());
        assert_eq!(app.theme(), ThemeVariant::Dark);
        assert!(!app.cancel_token.is_cancelled());
    }

    #[test]
    fn test_open_close_via_keys() {
        let mut app = create_test_app(Vec::new());
        press(&mut app, KeyCode::Char('?'));
        assert!(app.widget().is_open());

        type_text(&mut app, "draft");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Esc);
        assert!(!app.widget().is_open());

        press(&mut app, KeyCode::Enter);
        assert!(app.widget().is_open());
        assert_eq!(app.widget().text(), "draft");
        assert_eq!(app.widget().variation(), Variation::Insight);
    }

    #[test]
    fn test_exit_from_host() {
        let mut app = create_test_app(Vec::new());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit);
    }

    #[test]
    fn test_empty_enter_issues_nothing() {
        let mut app = create_test_app(Vec::new());
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);

        assert!(!app.widget().is_loading());
        assert_eq!(app.widget().transcript().len(), 6);
    }

    #[tokio::test]
    async fn test_submit_round_trip() {
        let mut app = create_test_app(vec![MockResponse::Answer { text: "Check the filter.".to_string() }]);
        let mut rx = app.take_resolutions().unwrap();

        press(&mut app, KeyCode::Char('h'));
        type_text(&mut app, "Why is it noisy?");
        press(&mut app, KeyCode::Enter);

        assert!(app.widget().is_loading());
        assert_eq!(app.widget().text(), "");

        let resolution = rx.recv().await.unwrap();
        assert_eq!(app.handle_resolution(resolution), Resolution::Answered);
        assert!(!app.widget().is_loading());

        let last = app.widget().transcript().last().unwrap();
        assert_eq!(last.message, "Check the filter.");
        assert_eq!(app.widget().transcript().len(), 8);
    }

    #[test]
    fn test_tick_wraps() {
        let mut app = create_test_app(Vec::new());
        app.frame_index = usize::MAX;
        app.tick();
        assert_eq!(app.frame_index(), 0);
    }
}
