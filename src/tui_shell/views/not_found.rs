use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::nav::ViewFrame;

use super::super::time_utils::now_ts;
use super::super::view::{FrameView, RenderCtx, render_view_chrome};

/// Terminal placeholder for a frame whose view kind has no registered
/// renderer. The stack is left alone so the operator can still back out.
pub(in crate::tui_shell) struct NotFoundView {
    kind: &'static str,
    label: String,
    updated_at: String,
}

impl NotFoundView {
    pub(in crate::tui_shell) fn for_frame(frame: &ViewFrame) -> Self {
        Self {
            kind: frame.kind().as_str(),
            label: frame.label().to_string(),
            updated_at: now_ts(),
        }
    }
}

impl FrameView for NotFoundView {
    fn title(&self) -> &str {
        "Not found"
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let lines = vec![
            Line::from(Span::styled(
                format!("no view registered for \"{}\"", self.kind),
                Style::default().fg(Color::Red),
            )),
            Line::from(Span::styled(
                format!("({})", self.label),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "esc back",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
