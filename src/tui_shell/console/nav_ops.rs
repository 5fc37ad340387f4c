use super::*;

impl Console {
    /// Leaf-view contract, exposed for embedders and headless tests: append
    /// a frame and bring the rest of the shell in line with it.
    pub fn push_view(&mut self, frame: ViewFrame) {
        self.nav.push_view(frame);
        self.sync();
    }

    pub fn pop_view(&mut self) {
        self.nav.pop_view();
        self.sync();
    }

    /// Switch the active tab. Any open drill-down is discarded first so its
    /// frames cannot resurface under the new tab.
    pub fn select_tab(&mut self, tab: Entity) {
        self.nav.pop_to_root();
        if self.tab != tab {
            debug!(from = self.tab.slug(), to = tab.slug(), "switch tab");
            self.tab = tab;
            self.root = None;
        }
        self.install_root_actions();
        self.sync();
    }

    /// Run the action with the given key, then apply whatever it queued.
    pub fn activate_action(&mut self, key: &str) -> bool {
        let hit = self.actions.activate(key);
        self.drain_pending();
        self.sync();
        hit
    }

    pub(super) fn activate_action_index(&mut self, index: usize) -> bool {
        let hit = self.actions.activate_index(index);
        self.drain_pending();
        self.sync();
        hit
    }

    fn drain_pending(&mut self) {
        let commands: Vec<ShellCommand> = self.pending.borrow_mut().drain(..).collect();
        for command in commands {
            match command {
                ShellCommand::SelectTab(tab) => self.select_tab(tab),
            }
        }
    }

    pub(super) fn install_root_actions(&mut self) {
        let mut actions = Vec::with_capacity(Entity::ALL.len());
        for tab in Entity::ALL {
            let pending = Rc::clone(&self.pending);
            let variant = if tab == self.tab {
                ActionVariant::Primary
            } else {
                ActionVariant::Secondary
            };
            actions.push(ActionDescriptor::new(
                format!("tab-{}", tab.slug()),
                tab.label(),
                "▤",
                variant,
                move || pending.borrow_mut().push(ShellCommand::SelectTab(tab)),
            ));
        }
        self.actions.set_actions(actions);
    }

    /// Bring the shell back to a consistent state after any mutation: the
    /// resolved views mirror the stack, and the action bar is populated
    /// exactly when the stack is empty. This is the only place that clears
    /// the bar for a drill-down and the only place that restores it, so no
    /// leaf view can leak stale actions.
    pub(super) fn sync(&mut self) {
        self.reconcile_frames();
        if self.nav.is_empty() {
            self.ensure_root_view();
            if self.actions.is_empty() {
                self.install_root_actions();
            }
        } else if !self.actions.is_empty() {
            debug!("drill-down active; clearing root actions");
            self.actions.clear_actions();
        }
    }

    fn reconcile_frames(&mut self) {
        let shrank = self.resolved.len() > self.nav.depth();

        // Keep the longest prefix of already-resolved views whose frames are
        // still on the stack, so a caller's view state survives while frames
        // sit on top of it.
        let mut keep = 0;
        while keep < self.resolved.len()
            && keep < self.nav.depth()
            && self.resolved[keep].frame_id == self.nav.frames()[keep].id()
        {
            keep += 1;
        }
        self.resolved.truncate(keep);

        for i in keep..self.nav.depth() {
            let frame = &self.nav.frames()[i];
            let view: Box<dyn FrameView> = match self.registry.resolve(frame) {
                Some(view) => view,
                None => {
                    warn!(
                        kind = frame.kind().as_str(),
                        id = frame.id(),
                        "no view registered for kind"
                    );
                    Box::new(NotFoundView::for_frame(frame))
                }
            };
            self.resolved.push(ResolvedFrame {
                frame_id: frame.id().to_string(),
                view,
            });
        }

        if shrank {
            // Whatever is visible now was just returned to; let it re-read.
            if let Some(active) = self.resolved.last_mut() {
                active.view.refresh();
            } else if let Some((_, root)) = self.root.as_mut() {
                root.refresh();
            }
        }
    }

    fn ensure_root_view(&mut self) {
        let rebuild = match &self.root {
            Some((tab, _)) => *tab != self.tab,
            None => true,
        };
        if rebuild {
            self.root = Some((
                self.tab,
                Box::new(GridView::new(self.tab, Rc::clone(&self.provider))),
            ));
        }
    }

    pub(super) fn dispatch_key_to_view(&mut self, key: KeyEvent) -> bool {
        let consumed = if let Some(active) = self.resolved.last_mut() {
            let mut nav = Navigator::new(&mut self.nav, &mut self.status);
            active.view.handle_key(key, &mut nav)
        } else if let Some((_, root)) = self.root.as_mut() {
            let mut nav = Navigator::new(&mut self.nav, &mut self.status);
            root.handle_key(key, &mut nav)
        } else {
            false
        };
        self.sync();
        consumed
    }
}
