use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::*;

pub(super) fn draw(frame: &mut ratatui::Frame, console: &Console) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(3),
        ])
        .split(area);

    // Header: badge, breadcrumb trail, back affordance.
    let mut spans = vec![
        Span::styled(
            "Fleetdesk",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(console.tab.label(), Style::default().fg(Color::Cyan)),
    ];
    for f in console.nav.frames() {
        spans.push(Span::styled(" › ", Style::default().fg(Color::Gray)));
        spans.push(Span::raw(f.label().to_string()));
    }
    if console.nav.depth() > 0 {
        spans.push(Span::styled(
            "   (esc back)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    // Active view: top of the stack, else the tab root.
    let ctx = RenderCtx {
        now: OffsetDateTime::now_utc(),
        absolute_timestamps: console.config.absolute_timestamps,
    };
    if let Some(active) = console.resolved.last() {
        active.view.render(frame, chunks[1], &ctx);
    } else if let Some((_, root)) = &console.root {
        root.render(frame, chunks[1], &ctx);
    }

    // Last result.
    {
        let mut lines = Vec::new();
        if let Some(s) = &console.status {
            let style = match s.kind {
                StatusKind::Info => Style::default().fg(Color::White),
                StatusKind::Error => Style::default().fg(Color::Red),
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", fmt_ts_ui(&s.at)),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(s.text.clone(), style),
            ]));
        }
        if lines.is_empty() {
            lines.push(Line::from(""));
        }
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::TOP).title("Last")),
            chunks[2],
        );
    }

    // Action bar. Stays empty for the whole lifetime of a drill-down.
    let mut spans = Vec::new();
    if console.actions.is_empty() {
        if console.nav.depth() > 0 {
            spans.push(Span::styled(
                "· drill-down active ·",
                Style::default().fg(Color::DarkGray),
            ));
        }
    } else {
        for (i, action) in console.actions.actions().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let style = match action.variant() {
                ActionVariant::Primary => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ActionVariant::Secondary => Style::default().fg(Color::White),
            };
            spans.push(Span::styled(
                format!("[{}] {} {}", i + 1, action.icon(), action.label()),
                style,
            ));
        }
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL)),
        chunks[3],
    );
}
