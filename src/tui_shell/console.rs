use std::cell::RefCell;
use std::io::{self, IsTerminal};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::config::ShellConfig;
use crate::directory::{DirectoryProvider, Entity, SampleDirectory};
use crate::nav::{ActionBarStore, ActionDescriptor, ActionVariant, NavigationStore, ViewFrame};

use super::registry::ViewRegistry;
use super::time_utils::{fmt_ts_ui, now_ts};
use super::view::{FrameView, Navigator, RenderCtx, StatusKind, StatusLine};
use super::views::{GridView, NotFoundView};

mod event_loop;
mod lifecycle;
mod nav_ops;
mod render;

pub(super) fn run(config: ShellConfig) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        bail!("the console requires an interactive terminal (TTY)");
    }

    let provider = Rc::new(SampleDirectory::seeded()?);
    let mut console = Console::new(config, provider)?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = event_loop::run_loop(&mut terminal, &mut console);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

/// Deferred work queued by action-bar callbacks. Callbacks are zero-argument
/// by contract, so they cannot borrow the console; they enqueue here and the
/// console drains the queue in the same event turn.
enum ShellCommand {
    SelectTab(Entity),
}

/// A stack frame paired with the renderer the registry resolved for it. The
/// renderer lives exactly as long as its frame, which is what keeps a detail
/// view's state intact while an edit form sits on top of it.
struct ResolvedFrame {
    frame_id: String,
    view: Box<dyn FrameView>,
}

/// Composition root. Owns the navigation stack, the action bar, the tab
/// selector and the view registry, and is the single enforcer of the rule
/// that the action bar is empty for as long as the stack is not.
pub struct Console {
    config: ShellConfig,
    provider: Rc<dyn DirectoryProvider>,
    registry: ViewRegistry,
    tab: Entity,
    nav: NavigationStore,
    actions: ActionBarStore,
    pending: Rc<RefCell<Vec<ShellCommand>>>,
    resolved: Vec<ResolvedFrame>,
    root: Option<(Entity, Box<dyn FrameView>)>,
    status: Option<StatusLine>,
    quit: bool,
}
