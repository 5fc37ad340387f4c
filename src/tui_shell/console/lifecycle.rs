use super::*;

impl Console {
    pub fn new(config: ShellConfig, provider: Rc<dyn DirectoryProvider>) -> Result<Console> {
        let registry = ViewRegistry::with_defaults(Rc::clone(&provider));
        Self::with_registry(config, provider, registry)
    }

    /// Construct with a caller-supplied registry. Embedders use this to swap
    /// in their own view set.
    pub fn with_registry(
        config: ShellConfig,
        provider: Rc<dyn DirectoryProvider>,
        registry: ViewRegistry,
    ) -> Result<Console> {
        let tab = match config.start_tab.as_deref() {
            Some(slug) => Entity::parse(slug).ok_or_else(|| {
                anyhow!(
                    "unknown tab {:?} (one of: employees, drivers, allies, vehicles, hotels, zones, routes)",
                    slug
                )
            })?,
            None => Entity::Employees,
        };

        let mut console = Console {
            config,
            provider,
            registry,
            tab,
            nav: NavigationStore::new(),
            actions: ActionBarStore::new(),
            pending: Rc::new(RefCell::new(Vec::new())),
            resolved: Vec::new(),
            root: None,
            status: None,
            quit: false,
        };
        console.sync();
        console.set_status(
            StatusKind::Info,
            "tab switches tabs · enter drills in · esc backs out",
        );
        Ok(console)
    }

    pub fn selected_tab(&self) -> Entity {
        self.tab
    }

    pub fn navigation(&self) -> &NavigationStore {
        &self.nav
    }

    pub fn action_bar(&self) -> &ActionBarStore {
        &self.actions
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// Title of the resolved drill-down view on top of the stack, if any.
    pub fn active_view_title(&self) -> Option<&str> {
        self.resolved.last().map(|r| r.view.title())
    }

    pub(super) fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusLine {
            at: now_ts(),
            kind,
            text: text.into(),
        });
    }
}
