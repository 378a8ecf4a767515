use crate::permissions::PromptRequest;
use crate::platform::Platform;
use crate::state::{Alert, AppState};
use ratatui::{prelude::*, widgets::*};

pub fn draw_main_ui(f: &mut ratatui::Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.size());

    draw_button_bar(f, state, chunks[0]);
    draw_message_list(f, state, chunks[1]);

    let help = Paragraph::new("j/k: scroll | q: quit").style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[2]);

    // Modals, topmost last
    if let Some(alert) = &state.alert {
        draw_alert_popup(f, alert);
    } else if let Some(request) = &state.permission_prompt {
        draw_permission_prompt(f, request);
    }
}

fn draw_button_bar(f: &mut ratatui::Frame, state: &AppState, area: Rect) {
    let button = match state.platform {
        Platform::Android => Span::styled(
            "[s] Fetch SMS Messages",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Platform::Ios if state.loading => Span::styled(
            "[e] Fetch Emails (loading...)",
            Style::default().fg(Color::DarkGray),
        ),
        Platform::Ios => Span::styled(
            "[e] Fetch Emails",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let bar = Paragraph::new(Line::from(button)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Inbox Viewer ({})", state.platform)),
    );
    f.render_widget(bar, area);
}

fn sms_card(message: &str) -> ListItem<'static> {
    let mut lines: Vec<Line> = message
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect();
    lines.push(Line::from(""));
    ListItem::new(Text::from(lines))
}

fn mail_card(subject: &str, sender: &str, snippet: &str) -> ListItem<'static> {
    ListItem::new(Text::from(vec![
        Line::from(Span::styled(
            subject.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            sender.to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(snippet.to_string()),
        Line::from(""),
    ]))
}

fn draw_message_list(f: &mut ratatui::Frame, state: &mut AppState, area: Rect) {
    let (title, placeholder, items): (&str, &str, Vec<ListItem>) = match state.platform {
        Platform::Android => (
            "Messages",
            "No messages yet.",
            state.messages.iter().map(|m| sms_card(m)).collect(),
        ),
        Platform::Ios => (
            "Emails",
            "No emails yet.",
            state
                .emails
                .iter()
                .map(|e| mail_card(&e.subject, &e.sender, &e.snippet))
                .collect(),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1));

    if items.is_empty() {
        let empty = Paragraph::new(placeholder)
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Cyan))
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn draw_alert_popup(f: &mut ratatui::Frame, alert: &Alert) {
    let popup_area = centered_rect(60, 30, f.size());
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(alert.title.as_str())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(format!("{}\n\nPress any key to dismiss", alert.message))
        .block(block)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn draw_permission_prompt(f: &mut ratatui::Frame, request: &PromptRequest) {
    let rationale = &request.rationale;
    let popup_area = centered_rect(60, 30, f.size());
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(rationale.title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let text = Text::from(vec![
        Line::from(rationale.message),
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("[l] {}   ", rationale.button_neutral)),
            Span::raw(format!("[c] {}   ", rationale.button_negative)),
            Span::styled(
                format!("[o] {}", rationale.button_positive),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ]);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
