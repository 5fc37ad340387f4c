use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

/// Styling emphasis for one action. `Primary` marks the currently selected
/// entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionVariant {
    Primary,
    Secondary,
}

type ActivateFn = Rc<dyn Fn()>;

/// One entry in the contextual action bar.
#[derive(Clone)]
pub struct ActionDescriptor {
    key: String,
    label: String,
    icon: &'static str,
    variant: ActionVariant,
    on_activate: ActivateFn,
}

impl ActionDescriptor {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        icon: &'static str,
        variant: ActionVariant,
        on_activate: impl Fn() + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon,
            variant,
            on_activate: Rc::new(on_activate),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> &'static str {
        self.icon
    }

    pub fn variant(&self) -> ActionVariant {
        self.variant
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("variant", &self.variant)
            .finish()
    }
}

/// Holds the actions rendered in the persistent bottom bar.
///
/// The bar belongs to the tab root: the composition shell clears it for as
/// long as the navigation stack is non-empty and repopulates it when the
/// stack empties again. Callers always hand over the complete desired set;
/// there is no partial merge.
#[derive(Default)]
pub struct ActionBarStore {
    actions: Vec<ActionDescriptor>,
    revision: u64,
}

impl ActionBarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole action set atomically. Caller order is display
    /// order. Duplicate keys are kept (dropping an action over a styling
    /// mistake would be worse) but flagged in the trace.
    pub fn set_actions(&mut self, actions: Vec<ActionDescriptor>) {
        for i in 1..actions.len() {
            if actions[..i].iter().any(|a| a.key == actions[i].key) {
                warn!(key = actions[i].key.as_str(), "duplicate action key in one population");
            }
        }
        debug!(count = actions.len(), "set actions");
        self.actions = actions;
        self.revision += 1;
    }

    pub fn clear_actions(&mut self) {
        if self.actions.is_empty() {
            return;
        }
        debug!(discarded = self.actions.len(), "clear actions");
        self.actions.clear();
        self.revision += 1;
    }

    /// Invoke the callback of the action with the given key. Returns false
    /// when no action matches; an unknown key is not an error.
    pub fn activate(&self, key: &str) -> bool {
        match self.actions.iter().find(|a| a.key == key) {
            Some(action) => {
                (action.on_activate)();
                true
            }
            None => false,
        }
    }

    /// Invoke the callback of the n-th action (display order).
    pub fn activate_index(&self, index: usize) -> bool {
        match self.actions.get(index) {
            Some(action) => {
                (action.on_activate)();
                true
            }
            None => false,
        }
    }

    pub fn actions(&self) -> &[ActionDescriptor] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn action(key: &str, variant: ActionVariant) -> ActionDescriptor {
        ActionDescriptor::new(key, key.to_uppercase(), "▸", variant, || {})
    }

    #[test]
    fn set_actions_replaces_the_whole_set() {
        let mut bar = ActionBarStore::new();
        bar.set_actions(vec![action("employees", ActionVariant::Primary)]);
        bar.set_actions(vec![
            action("drivers", ActionVariant::Primary),
            action("vehicles", ActionVariant::Secondary),
        ]);

        let keys: Vec<&str> = bar.actions().iter().map(|a| a.key()).collect();
        assert_eq!(keys, vec!["drivers", "vehicles"]);
    }

    #[test]
    fn clear_on_empty_bar_leaves_revision_untouched() {
        let mut bar = ActionBarStore::new();
        let before = bar.revision();
        bar.clear_actions();
        assert_eq!(bar.revision(), before);

        bar.set_actions(vec![action("employees", ActionVariant::Primary)]);
        bar.clear_actions();
        assert!(bar.is_empty());
    }

    #[test]
    fn activate_runs_the_matching_callback() {
        let hits = Rc::new(Cell::new(0u32));
        let observed = Rc::clone(&hits);

        let mut bar = ActionBarStore::new();
        bar.set_actions(vec![ActionDescriptor::new(
            "drivers",
            "Drivers",
            "▸",
            ActionVariant::Secondary,
            move || observed.set(observed.get() + 1),
        )]);

        assert!(bar.activate("drivers"));
        assert!(!bar.activate("ghosts"));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn activate_index_follows_display_order() {
        let hit = Rc::new(Cell::new(' '));
        let first = Rc::clone(&hit);
        let second = Rc::clone(&hit);

        let mut bar = ActionBarStore::new();
        bar.set_actions(vec![
            ActionDescriptor::new("a", "A", "▸", ActionVariant::Primary, move || first.set('a')),
            ActionDescriptor::new("b", "B", "▸", ActionVariant::Secondary, move || {
                second.set('b')
            }),
        ]);

        assert!(bar.activate_index(1));
        assert_eq!(hit.get(), 'b');
        assert!(!bar.activate_index(2));
    }
}
