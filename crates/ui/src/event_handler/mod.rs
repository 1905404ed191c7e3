mod key_action;

pub use key_action::KeyAction;

use crate::layout::WidgetLayout;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use helpai_core::HelpWidget;

/// Event handler for the TUI application
pub struct EventHandler;

impl EventHandler {
    /// Read a single event from the terminal
    ///
    /// Returns `Some(event)` if an event is available, `None` on timeout or error.
    pub fn read() -> Option<Event> {
        match crossterm::event::poll(std::time::Duration::from_millis(100)) {
            Ok(true) => match crossterm::event::read() {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(error = %e, "terminal read failed");
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                tracing::warn!(error = %e, "terminal poll failed");
                None
            }
        }
    }

    /// Handle a keyboard event
    ///
    /// Text editing is applied to the widget directly; anything the app has
    /// to act on comes back as a [`KeyAction`].
    pub fn handle_key_event(event: KeyEvent, widget: &mut HelpWidget) -> Option<KeyAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return Some(KeyAction::Exit);
        }

        if widget.is_open() { handle_open_key(event, widget) } else { handle_closed_key(event) }
    }

    /// Handle a mouse event; a left click on the toggle button opens the modal
    pub fn handle_mouse_event(event: MouseEvent, widget: &HelpWidget, layout: &WidgetLayout) -> Option<KeyAction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left)
                if !widget.is_open() && layout.hits_button(event.column, event.row) =>
            {
                Some(KeyAction::Open)
            }
            _ => None,
        }
    }

    pub fn handle_event(event: &Event, widget: &mut HelpWidget, layout: &WidgetLayout) -> Option<KeyAction> {
        match event {
            Event::Key(key_event) => Self::handle_key_event(*key_event, widget),
            Event::Mouse(mouse_event) => Self::handle_mouse_event(*mouse_event, widget, layout),
            Event::Paste(text) if widget.is_open() => {
                // Line breaks become spaces; the input is a single line
                text.replace("\r\n", "\n")
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .filter(|c| !c.is_control())
                    .for_each(|c| widget.input_mut().insert_char(c));
                None
            }
            _ => None,
        }
    }
}

/// Host screen: only the toggle and quit keys do anything
fn handle_closed_key(event: KeyEvent) -> Option<KeyAction> {
    match event.code {
        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter => Some(KeyAction::Open),
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Exit),
        _ => None,
    }
}

fn handle_open_key(event: KeyEvent, widget: &mut HelpWidget) -> Option<KeyAction> {
    let input = widget.input_mut();
    match event.code {
        KeyCode::Esc => return Some(KeyAction::Close),
        KeyCode::Enter => return Some(KeyAction::Submit),
        KeyCode::Tab => return Some(KeyAction::CycleVariation { steps: 1 }),
        KeyCode::BackTab => return Some(KeyAction::CycleVariation { steps: -1 }),
        KeyCode::Char(c) if !event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            input.insert_char(c)
        }
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use helpai_core::StaticBuildingId;
    use ratatui::layout::Rect;
    use std::sync::Arc;

    fn widget() -> HelpWidget {
        HelpWidget::new(Arc::new(StaticBuildingId::none()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn test_closed_open_keys() {
        let mut widget = widget();
        for code in [KeyCode::Char('?'), KeyCode::Char('h'), KeyCode::Enter] {
            assert_eq!(EventHandler::handle_key_event(key(code), &mut widget), Some(KeyAction::Open));
        }
        assert_eq!(EventHandler::handle_key_event(key(KeyCode::Char('q')), &mut widget), Some(KeyAction::Exit));
        assert_eq!(EventHandler::handle_key_event(key(KeyCode::Char('x')), &mut widget), None);
        assert_eq!(widget.text(), "");
    }

    #[test]
    fn test_ctrl_c_exits_in_any_state() {
        let mut widget = widget();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(EventHandler::handle_key_event(ctrl_c, &mut widget), Some(KeyAction::Exit));

        widget.open();
        assert_eq!(EventHandler::handle_key_event(ctrl_c, &mut widget), Some(KeyAction::Exit));
        assert_eq!(widget.text(), "");
    }

    #[test]
    fn test_open_typing_edits_input() {
        let mut widget = widget();
        widget.open();

        for c in "hellp".chars() {
            assert_eq!(EventHandler::handle_key_event(key(KeyCode::Char(c)), &mut widget), None);
        }
        EventHandler::handle_key_event(key(KeyCode::Backspace), &mut widget);
        EventHandler::handle_key_event(key(KeyCode::Char('o')), &mut widget);
        EventHandler::handle_key_event(key(KeyCode::Home), &mut widget);
        EventHandler::handle_key_event(key(KeyCode::Delete), &mut widget);

        assert_eq!(widget.text(), "ello");
    }

    #[test]
    fn test_open_typing_q_and_h_is_text() {
        let mut widget = widget();
        widget.open();
        EventHandler::handle_key_event(key(KeyCode::Char('q')), &mut widget);
        EventHandler::handle_key_event(key(KeyCode::Char('h')), &mut widget);
        assert_eq!(widget.text(), "qh");
    }

    #[test]
    fn test_open_actions() {
        let mut widget = widget();
        widget.open();

        assert_eq!(EventHandler::handle_key_event(key(KeyCode::Enter), &mut widget), Some(KeyAction::Submit));
        assert_eq!(EventHandler::handle_key_event(key(KeyCode::Esc), &mut widget), Some(KeyAction::Close));
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Tab), &mut widget),
            Some(KeyAction::CycleVariation { steps: 1 })
        );
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::BackTab), &mut widget),
            Some(KeyAction::CycleVariation { steps: -1 })
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let mut widget = widget();
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('?'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(EventHandler::handle_key_event(release, &mut widget), None);
    }

    #[test]
    fn test_click_on_button_opens() {
        let widget = widget();
        let layout = WidgetLayout::calculate(Rect::new(0, 0, 100, 30));

        assert_eq!(EventHandler::handle_mouse_event(click(92, 27), &widget, &layout), Some(KeyAction::Open));
        assert_eq!(EventHandler::handle_mouse_event(click(5, 5), &widget, &layout), None);
    }

    #[test]
    fn test_click_ignored_while_open() {
        let mut widget = widget();
        widget.open();
        let layout = WidgetLayout::calculate(Rect::new(0, 0, 100, 30));
        assert_eq!(EventHandler::handle_mouse_event(click(92, 27), &widget, &layout), None);
    }

    #[test]
    fn test_paste_into_open_modal() {
        let mut widget = widget();
        let layout = WidgetLayout::default();

        EventHandler::handle_event(&Event::Paste("ignored".to_string()), &mut widget, &layout);
        assert_eq!(widget.text(), "");

        widget.open();
        EventHandler::handle_event(&Event::Paste("line one\nline two".to_string()), &mut widget, &layout);
        assert_eq!(widget.text(), "line one line two");

        widget.set_text("");
        EventHandler::handle_event(&Event::Paste("a\r\nb\rc\td".to_string()), &mut widget, &layout);
        assert_eq!(widget.text(), "a b cd");
    }
}
