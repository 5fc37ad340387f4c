use std::collections::BTreeMap;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::directory::{DirectoryProvider, Entity, Record};
use crate::nav::{Payload, ViewFrame};

use super::super::registry::kind_entity;
use super::super::time_utils::now_ts;
use super::super::view::{FrameView, Navigator, RenderCtx, render_view_chrome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FormMode {
    Create,
    Edit,
}

/// Minimal field editor. Enter saves through the provider, notifies the
/// caller via the frame payload, and pops back.
pub(in crate::tui_shell) struct FormView {
    entity: Entity,
    provider: Rc<dyn DirectoryProvider>,
    mode: FormMode,
    record_id: String,
    label: String,
    payload: Payload,
    fields: Vec<(String, String)>,
    selected: usize,
    updated_at: String,
}

impl FormView {
    pub(in crate::tui_shell) fn from_frame(
        frame: &ViewFrame,
        provider: Rc<dyn DirectoryProvider>,
    ) -> Self {
        let entity = kind_entity(frame.kind());
        let mode = match frame.payload().str_arg("mode") {
            Some("edit") => FormMode::Edit,
            _ => FormMode::Create,
        };
        let record_id = frame.payload().str_arg("id").unwrap_or_default().to_string();

        let existing = match mode {
            FormMode::Edit => provider.fetch(entity, &record_id),
            FormMode::Create => None,
        };
        let fields = entity
            .columns()
            .iter()
            .map(|column| {
                let value = existing
                    .as_ref()
                    .map(|r| r.field(column).to_string())
                    .unwrap_or_default();
                (column.to_string(), value)
            })
            .collect();

        Self {
            entity,
            provider,
            mode,
            record_id,
            label: frame.label().to_string(),
            payload: frame.payload().clone(),
            fields,
            selected: 0,
            updated_at: now_ts(),
        }
    }

    fn save(&mut self, nav: &mut Navigator<'_>) {
        let mut fields = BTreeMap::new();
        for (column, value) in &self.fields {
            fields.insert(column.clone(), value.clone());
        }
        let record = Record {
            id: match self.mode {
                FormMode::Edit => self.record_id.clone(),
                FormMode::Create => String::new(),
            },
            fields,
        };

        match self.provider.save(self.entity, record) {
            Ok(saved) => {
                self.payload.notify_update();
                nav.notice(format!("saved {} {}", self.entity.singular(), saved.id));
                nav.pop_view();
            }
            Err(err) => {
                nav.error(format!("save {}: {:#}", self.entity.singular(), err));
            }
        }
    }
}

impl FrameView for FormView {
    fn title(&self) -> &str {
        &self.label
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn handle_key(&mut self, key: KeyEvent, nav: &mut Navigator<'_>) -> bool {
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                if !self.fields.is_empty() {
                    self.selected = (self.selected + 1).min(self.fields.len() - 1);
                }
                true
            }
            KeyCode::Backspace => {
                if let Some((_, value)) = self.fields.get_mut(self.selected) {
                    value.pop();
                }
                true
            }
            KeyCode::Enter => {
                self.save(nav);
                true
            }
            KeyCode::Char(c) => {
                if let Some((_, value)) = self.fields.get_mut(self.selected) {
                    value.push(c);
                }
                true
            }
            _ => false,
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let mut lines = Vec::new();
        for (i, (column, value)) in self.fields.iter().enumerate() {
            let marker = if i == self.selected { "› " } else { "  " };
            let value_style = if i == self.selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<14}", column), Style::default().fg(Color::Gray)),
                Span::styled(value.clone(), value_style),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), parts[0]);

        frame.render_widget(
            Paragraph::new("type to edit · enter save · esc cancel")
                .style(Style::default().fg(Color::DarkGray)),
            parts[1],
        );
    }
}
