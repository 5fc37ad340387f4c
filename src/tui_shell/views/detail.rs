use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::directory::{DirectoryProvider, Entity, Record};
use crate::nav::{Payload, ViewFrame};

use super::super::registry::{form_kind, kind_entity};
use super::super::time_utils::now_ts;
use super::super::view::{FrameView, Navigator, RenderCtx, render_view_chrome};

/// Read-only record view. `e` opens the edit form on top of it.
pub(in crate::tui_shell) struct DetailView {
    entity: Entity,
    provider: Rc<dyn DirectoryProvider>,
    record_id: String,
    label: String,
    record: Option<Record>,
    updated_at: String,
    // Payload of the frame that shows this view; notified when an edit on
    // top of us saves, so the caller's grid refreshes too.
    payload: Payload,
    stale: Rc<Cell<bool>>,
}

impl DetailView {
    pub(in crate::tui_shell) fn from_frame(
        frame: &ViewFrame,
        provider: Rc<dyn DirectoryProvider>,
    ) -> Self {
        let entity = kind_entity(frame.kind());
        let record_id = frame.payload().str_arg("id").unwrap_or_default().to_string();
        let record = provider.fetch(entity, &record_id);
        Self {
            entity,
            provider,
            record_id,
            label: frame.label().to_string(),
            record,
            updated_at: now_ts(),
            payload: frame.payload().clone(),
            stale: Rc::new(Cell::new(false)),
        }
    }

    fn push_edit_form(&self, nav: &mut Navigator<'_>) {
        if self.record.is_none() {
            return;
        }
        let stale = Rc::clone(&self.stale);
        let caller = self.payload.clone();
        nav.push_view(ViewFrame::new(
            format!("{}-form-{}", self.entity.singular(), self.record_id),
            format!("Edit {}", self.label),
            form_kind(self.entity),
            Payload::new()
                .with_arg("id", self.record_id.as_str())
                .with_arg("mode", "edit")
                .with_on_update(move || {
                    stale.set(true);
                    caller.notify_update();
                }),
        ));
    }
}

impl FrameView for DetailView {
    fn title(&self) -> &str {
        &self.label
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn handle_key(&mut self, key: KeyEvent, nav: &mut Navigator<'_>) -> bool {
        match key.code {
            KeyCode::Char('e') => {
                self.push_edit_form(nav);
                true
            }
            _ => false,
        }
    }

    fn refresh(&mut self) {
        if self.stale.get() {
            self.stale.set(false);
            self.record = self.provider.fetch(self.entity, &self.record_id);
            self.updated_at = now_ts();
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let mut lines = Vec::new();
        match &self.record {
            Some(record) => {
                lines.push(Line::from(vec![
                    Span::styled("id: ", Style::default().fg(Color::Gray)),
                    Span::raw(record.id.clone()),
                ]));
                for column in self.entity.columns() {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{}: ", column), Style::default().fg(Color::Gray)),
                        Span::raw(record.field(column).to_string()),
                    ]));
                }
            }
            None => {
                lines.push(Line::from(Span::styled(
                    format!("{} {} no longer exists", self.entity.singular(), self.record_id),
                    Style::default().fg(Color::Red),
                )));
            }
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), parts[0]);

        frame.render_widget(
            Paragraph::new("e edit · esc back").style(Style::default().fg(Color::DarkGray)),
            parts[1],
        );
    }
}
