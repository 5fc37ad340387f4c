use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};
use time::OffsetDateTime;

use crate::nav::{NavigationStore, ViewFrame};

use super::time_utils::{fmt_ts, now_ts};

#[derive(Clone, Copy, Debug)]
pub struct RenderCtx {
    pub now: OffsetDateTime,
    pub absolute_timestamps: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One line of operator feedback, shown under the active view.
#[derive(Clone, Debug)]
pub struct StatusLine {
    pub at: String,
    pub kind: StatusKind,
    pub text: String,
}

/// Borrowed store handle the composition root lends to whichever view is
/// handling the current key. This is the whole navigation contract leaf
/// views get: push, pop, and a feedback line.
pub struct Navigator<'a> {
    nav: &'a mut NavigationStore,
    status: &'a mut Option<StatusLine>,
}

impl<'a> Navigator<'a> {
    pub(super) fn new(
        nav: &'a mut NavigationStore,
        status: &'a mut Option<StatusLine>,
    ) -> Navigator<'a> {
        Navigator { nav, status }
    }

    pub fn push_view(&mut self, frame: ViewFrame) {
        self.nav.push_view(frame);
    }

    pub fn pop_view(&mut self) {
        self.nav.pop_view();
    }

    pub fn notice(&mut self, text: impl Into<String>) {
        *self.status = Some(StatusLine {
            at: now_ts(),
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        *self.status = Some(StatusLine {
            at: now_ts(),
            kind: StatusKind::Error,
            text: text.into(),
        });
    }
}

/// A renderable view: either a tab-root grid or a resolved drill-down frame.
pub trait FrameView {
    fn title(&self) -> &str;
    fn updated_at(&self) -> &str;

    /// Returns true when the key was consumed and must not fall through to
    /// the shell's global bindings.
    fn handle_key(&mut self, _key: KeyEvent, _nav: &mut Navigator<'_>) -> bool {
        false
    }

    /// Re-read backing data. Called when this view becomes visible again
    /// after a frame above it was popped.
    fn refresh(&mut self) {}

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx);
}

pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    updated_at: &str,
    area: Rect,
    ctx: &RenderCtx,
) -> Rect {
    let header = Line::from(vec![
        Span::styled(title.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(fmt_ts(updated_at, ctx), Style::default().fg(Color::Gray)),
    ]);

    let outer = Block::default().borders(Borders::ALL).title(header);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}
