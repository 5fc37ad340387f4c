use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    console: &mut Console,
) -> Result<()> {
    loop {
        console.sync();
        terminal
            .draw(|f| render::draw(f, console))
            .context("draw")?;
        if console.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(console.config.poll_ms)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(console, k),
                _ => {}
            }
        }
    }
}

fn handle_key(console: &mut Console, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if console.nav.is_empty() {
                console.quit = true;
            } else {
                console.pop_view();
            }
            return;
        }
        KeyCode::Tab => {
            console.select_tab(console.tab.next());
            return;
        }
        KeyCode::BackTab => {
            console.select_tab(console.tab.prev());
            return;
        }
        _ => {}
    }

    // The active view gets first pick; forms eat plain characters.
    if console.dispatch_key_to_view(key) {
        return;
    }

    match key.code {
        KeyCode::Char('q') => console.quit = true,
        KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
            let index = (c as usize) - ('1' as usize);
            console.activate_action_index(index);
        }
        _ => {}
    }
}
