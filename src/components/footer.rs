use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use super::{spinner, Component, ACCENT_GOLD, ACCENT_RED, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::AppState;

pub struct FooterProps<'a> {
    pub state: &'a AppState,
}

/// Key hints for the current mode plus a loading/status message.
pub struct Footer {
    status_bar: StatusBar,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            status_bar: StatusBar::new(),
        }
    }
}

impl Footer {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn status_message(state: &AppState) -> Option<String> {
    let spin = spinner(state.tick);
    if state.heroes.is_loading() {
        Some(format!("{spin} Loading heroes..."))
    } else if state.reference.is_loading() {
        Some(format!("{spin} Loading reference data..."))
    } else if state.detail.view.is_loading() {
        Some(format!("{spin} Resolving hero..."))
    } else if state.reference.is_failed() {
        Some("Reference data unavailable".to_string())
    } else {
        None
    }
}

fn hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.detail.open {
        return vec![
            StatusBarHint::new("j/k", "Scroll"),
            StatusBarHint::new("Esc", "Close"),
        ];
    }
    if state.search.active {
        return vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Clear"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
    }
    let mut hints = vec![
        StatusBarHint::new("arrows", "Move"),
        StatusBarHint::new("Enter", "Details"),
        StatusBarHint::new("/", "Search"),
    ];
    if state.heroes.is_failed() {
        hints.push(StatusBarHint::new("r", "Retry"));
    }
    hints.push(StatusBarHint::new("q", "Quit"));
    hints
}

impl Component<Action> for Footer {
    type Props<'a> = FooterProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let hints = hints(state);

        let message = status_message(state).unwrap_or_default();
        let message_style = if state.reference.is_failed() && !state.is_loading() {
            Style::default().fg(ACCENT_RED)
        } else {
            Style::default().fg(ACCENT_GOLD)
        };
        let status_items = [StatusBarItem::span(Span::styled(message, message_style))];

        let style = StatusBarStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };

        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            area,
            StatusBarProps {
                left: StatusBarSection::hints(&hints).with_separator("  "),
                center: StatusBarSection::empty(),
                right: StatusBarSection::items(&status_items),
                style,
                is_focused: false,
            },
        );
    }
}
