use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::directory::{DirectoryProvider, Entity, Record};
use crate::nav::{Payload, ViewFrame};

use super::super::registry::{detail_kind, form_kind};
use super::super::time_utils::now_ts;
use super::super::view::{FrameView, Navigator, RenderCtx, render_view_chrome};

/// Tab-root grid: one row per record of the tab's entity family.
pub(in crate::tui_shell) struct GridView {
    entity: Entity,
    provider: Rc<dyn DirectoryProvider>,
    items: Vec<Record>,
    selected: usize,
    updated_at: String,
    // Set by the on_update callbacks of frames this grid pushed.
    stale: Rc<Cell<bool>>,
}

impl GridView {
    pub(in crate::tui_shell) fn new(entity: Entity, provider: Rc<dyn DirectoryProvider>) -> Self {
        let mut view = Self {
            entity,
            provider,
            items: Vec::new(),
            selected: 0,
            updated_at: now_ts(),
            stale: Rc::new(Cell::new(false)),
        };
        view.reload();
        view
    }

    fn reload(&mut self) {
        self.items = self.provider.list(self.entity);
        if !self.items.is_empty() {
            self.selected = self.selected.min(self.items.len() - 1);
        } else {
            self.selected = 0;
        }
        self.updated_at = now_ts();
    }

    fn selected_record(&self) -> Option<&Record> {
        self.items.get(self.selected)
    }

    fn push_detail(&self, nav: &mut Navigator<'_>) {
        let Some(record) = self.selected_record() else {
            return;
        };
        let stale = Rc::clone(&self.stale);
        nav.push_view(ViewFrame::new(
            format!("{}-detail-{}", self.entity.singular(), record.id),
            record.display_name(self.entity).to_string(),
            detail_kind(self.entity),
            Payload::new()
                .with_arg("id", record.id.as_str())
                .with_on_update(move || stale.set(true)),
        ));
    }

    fn push_form(&self, nav: &mut Navigator<'_>, record: Option<&Record>) {
        let stale = Rc::clone(&self.stale);
        let (id, label, payload) = match record {
            Some(record) => (
                format!("{}-form-{}", self.entity.singular(), record.id),
                format!("Edit {}", record.display_name(self.entity)),
                Payload::new()
                    .with_arg("id", record.id.as_str())
                    .with_arg("mode", "edit"),
            ),
            None => (
                format!("{}-form-new", self.entity.singular()),
                format!("New {}", self.entity.singular()),
                Payload::new().with_arg("mode", "create"),
            ),
        };
        nav.push_view(ViewFrame::new(
            id,
            label,
            form_kind(self.entity),
            payload.with_on_update(move || stale.set(true)),
        ));
    }
}

impl FrameView for GridView {
    fn title(&self) -> &str {
        self.entity.label()
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
                if !self.items.is_empty() {
                    self.selected = (self.selected + 1).min(self.items.len() - 1);
                }
                true
            }
            KeyCode::Enter => {
                self.push_detail(nav);
                true
            }
            KeyCode::Char('e') => {
                if self.selected_record().is_some() {
                    self.push_form(nav, self.selected_record());
                }
                true
            }
            KeyCode::Char('n') => {
                self.push_form(nav, None);
                true
            }
            _ => false,
        }
    }

    fn refresh(&mut self) {
        if self.stale.get() {
            self.stale.set(false);
            self.reload();
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.updated_at(), area, ctx);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let columns = self.entity.columns();
        let header: String = columns.iter().map(|c| format!("{:<20}", c)).collect();
        frame.render_widget(
            Paragraph::new(Line::from(header)).style(Style::default().fg(Color::Gray)),
            parts[0],
        );

        if self.items.is_empty() {
            frame.render_widget(
                Paragraph::new(format!("no {} yet; press n to create one", self.entity.slug()))
                    .style(Style::default().fg(Color::DarkGray)),
                parts[1],
            );
        } else {
            let rows: Vec<ListItem> = self
                .items
                .iter()
                .map(|record| {
                    let line: String = columns
                        .iter()
                        .map(|c| format!("{:<20}", record.field(c)))
                        .collect();
                    ListItem::new(line)
                })
                .collect();

            let mut state = ListState::default();
            state.select(Some(self.selected.min(self.items.len() - 1)));
            frame.render_stateful_widget(
                List::new(rows).highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                ),
                parts[1],
                &mut state,
            );
        }

        frame.render_widget(
            Paragraph::new("enter view · e edit · n new")
                .style(Style::default().fg(Color::DarkGray)),
            parts[2],
        );
    }
}
