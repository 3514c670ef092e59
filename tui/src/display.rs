//! Frame Rendering
//!
//! Draws the shared [`Page`](switchboard_core::Page) every frame:
//!
//! ```text
//! ┌ Health ──────────┐┌ Chat ─────────────────────┐
//! │ [ Check health ] ││ You · 3:07:09 PM          │
//! │ Ready            ││ hi                        │
//! │ { ... }          ││ Assistant · 3:07:10 PM    │
//! ├ Hello ───────────┤│ hello!                    │
//! │ ...              ││                           │
//! ├ Echo ────────────┤│ > message_                │
//! │ > message_       ││ [ Send ]  [ Clear chat ]  │
//! └──────────────────┘└───────────────────────────┘
//!  Tab focus | Enter activate | ...        base URL
//! ```
//!
//! Notifications float over the top-right corner until they expire.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use switchboard_core::{InputId, Panel, Role, TextSlot, Ui};

use crate::app::{App, Focus};
use crate::theme::{
    button_style, toast_style, ACCENT, ASSISTANT_BLUE, DIM_GRAY, USER_GREEN,
};
use crate::widgets::{Anchor, TextBlock, TextBlockState};

const HELP: &str = " Tab focus | Enter activate | Ctrl+L clear chat | PgUp/PgDn scroll | Esc quit";

/// Label of the chat clear button
pub const CLEAR_LABEL: &str = "Clear chat";

/// Widest a notification gets
const TOAST_WIDTH: u16 = 40;

/// Draw the whole page
pub fn render(frame: &mut Frame, app: &App) {
    let [main, footer] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(main);
    let [health, hello, echo] = Layout::vertical([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(left);

    render_json_panel(frame, app, Panel::Health, health);
    render_json_panel(frame, app, Panel::Hello, hello);
    render_json_panel(frame, app, Panel::Echo, echo);
    render_chat(frame, app, right);
    render_footer(frame, app, footer);
    render_notifications(frame, app, main);
}

fn panel_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM_GRAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
}

/// `[ label ]`, or an empty span when the page has no such button
fn button_span(app: &App, panel: Panel, focus: Focus) -> Span<'static> {
    match app.page().button(panel) {
        Some(button) => {
            let state = button.snapshot();
            Span::styled(
                format!("[ {} ]", state.label),
                button_style(app.focus() == focus, state.disabled),
            )
        }
        None => Span::raw(""),
    }
}

fn status_line(app: &App, panel: Panel) -> Line<'static> {
    let text = app.page().status(panel).map(|s| s.get()).unwrap_or_default();
    Line::styled(text, Style::default().fg(DIM_GRAY))
}

fn input_line(slot: Option<TextSlot>, focused: bool) -> Line<'static> {
    let text = slot.map(|s| s.get()).unwrap_or_default();
    let cursor = if focused { "_" } else { "" };
    let style = if focused {
        Style::default().fg(USER_GREEN)
    } else {
        Style::default()
    };
    Line::styled(format!("> {text}{cursor}"), style)
}

fn render_json_panel(frame: &mut Frame, app: &App, panel: Panel, area: Rect) {
    let block = panel_block(panel.title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut header = Vec::new();
    match panel {
        Panel::Health => header.push(Line::from(button_span(app, panel, Focus::HealthButton))),
        Panel::Hello => header.push(Line::from(button_span(app, panel, Focus::HelloButton))),
        Panel::Echo => {
            header.push(input_line(
                app.page().input(InputId::EchoMessage),
                app.focus() == Focus::EchoInput,
            ));
            header.push(Line::from(button_span(app, panel, Focus::EchoInput)));
        }
        Panel::Chat => {}
    }
    header.push(status_line(app, panel));

    let header_height = u16::try_from(header.len()).unwrap_or(u16::MAX);
    let [top, body] =
        Layout::vertical([Constraint::Length(header_height), Constraint::Min(0)]).areas(inner);
    frame.render_widget(Paragraph::new(header), top);

    let output = app.page().output(panel).map(|o| o.get()).unwrap_or_default();
    let mut state = TextBlockState::default();
    frame.render_stateful_widget(TextBlock::new(&output), body, &mut state);
}

fn render_chat(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel_block(Panel::Chat.title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [log_area, status_area, input_area, buttons_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    if let Some(log) = app.page().chat_log() {
        let entries: Vec<(String, String, Style)> = log
            .bubbles()
            .iter()
            .map(|bubble| {
                let color = match bubble.role {
                    Role::User => USER_GREEN,
                    Role::Assistant => ASSISTANT_BLUE,
                };
                (
                    format!("{} · {}", bubble.role, bubble.time()),
                    format!("{}\n\n", bubble.text),
                    Style::default().fg(color),
                )
            })
            .collect();
        let paragraphs = entries
            .iter()
            .flat_map(|(heading, text, style)| {
                [
                    (heading.as_str(), style.add_modifier(Modifier::BOLD)),
                    (text.as_str(), Style::default()),
                ]
            })
            .collect();

        let mut state = TextBlockState::at(log.scroll_back());
        frame.render_stateful_widget(
            TextBlock::from_paragraphs(paragraphs).anchor(Anchor::Bottom),
            log_area,
            &mut state,
        );
        log.clamp_scroll(
            state
                .total_lines
                .saturating_sub(usize::from(log_area.height)),
        );
    }

    frame.render_widget(Paragraph::new(status_line(app, Panel::Chat)), status_area);
    frame.render_widget(
        Paragraph::new(input_line(
            app.page().input(InputId::ChatMessage),
            app.focus() == Focus::ChatInput,
        )),
        input_area,
    );

    let clear = Span::styled(
        format!("[ {CLEAR_LABEL} ]"),
        button_style(app.focus() == Focus::ClearButton, false),
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            button_span(app, Panel::Chat, Focus::ChatInput),
            Span::raw("  "),
            clear,
        ])),
        buttons_area,
    );
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(HELP, Style::default().fg(DIM_GRAY)),
        Span::raw(" | "),
        Span::styled(app.base_url().to_string(), Style::default().fg(ACCENT)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_notifications(frame: &mut Frame, app: &App, area: Rect) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width - width;

    for (i, notification) in app.page().notifier().visible().iter().enumerate() {
        let y = area.y + 1 + u16::try_from(i).unwrap_or(u16::MAX);
        if y >= area.y + area.height {
            break;
        }
        let toast = Rect::new(x, y, width, 1);
        frame.render_widget(Clear, toast);
        frame.render_widget(
            Paragraph::new(format!(" {} ", notification.text))
                .style(toast_style(notification.is_error)),
            toast,
        );
    }
}
