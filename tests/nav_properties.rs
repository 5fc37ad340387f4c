use std::collections::BTreeMap;
use std::rc::Rc;

use proptest::prelude::*;

use fleetdesk::config::ShellConfig;
use fleetdesk::directory::{Entity, SampleDirectory};
use fleetdesk::nav::{ActionBarStore, NavigationStore, Payload, ViewFrame, ViewKind};
use fleetdesk::tui_shell::Console;

fn frame(id: &str, kind: ViewKind) -> ViewFrame {
    ViewFrame::new(id, id, kind, Payload::new().with_arg("id", "1"))
}

fn new_console() -> Console {
    let provider = Rc::new(SampleDirectory::seeded().expect("seed sample data"));
    Console::new(ShellConfig::default(), provider).expect("construct console")
}

fn bar_snapshot(bar: &ActionBarStore) -> Vec<(String, String, bool)> {
    use fleetdesk::nav::ActionVariant;
    bar.actions()
        .iter()
        .map(|a| {
            (
                a.key().to_string(),
                a.label().to_string(),
                a.variant() == ActionVariant::Primary,
            )
        })
        .collect()
}

#[derive(Clone, Debug)]
enum StackOp {
    Push(usize),
    Pop,
}

fn stack_ops() -> impl Strategy<Value = Vec<StackOp>> {
    proptest::collection::vec(
        prop_oneof![(0usize..64).prop_map(StackOp::Push), Just(StackOp::Pop)],
        0..64,
    )
}

#[derive(Clone, Debug)]
enum ConsoleOp {
    Drill(usize),
    Back,
    Switch(usize),
    Activate(usize),
}

fn console_ops() -> impl Strategy<Value = Vec<ConsoleOp>> {
    proptest::collection::vec(
        prop_oneof![
            (0usize..32).prop_map(ConsoleOp::Drill),
            Just(ConsoleOp::Back),
            (0usize..Entity::ALL.len()).prop_map(ConsoleOp::Switch),
            (0usize..Entity::ALL.len()).prop_map(ConsoleOp::Activate),
        ],
        0..40,
    )
}

fn apply(console: &mut Console, op: &ConsoleOp, counter: &mut usize) {
    match op {
        ConsoleOp::Drill(seed) => {
            *counter += 1;
            let kind = ViewKind::ALL[seed % ViewKind::ALL.len()];
            console.push_view(ViewFrame::new(
                format!("frame-{}-{}", counter, kind.as_str()),
                format!("Frame {}", counter),
                kind,
                Payload::new().with_arg("id", "1"),
            ));
        }
        ConsoleOp::Back => console.pop_view(),
        ConsoleOp::Switch(i) => console.select_tab(Entity::ALL[i % Entity::ALL.len()]),
        ConsoleOp::Activate(i) => {
            console.activate_action(&format!("tab-{}", Entity::ALL[i % Entity::ALL.len()].slug()));
        }
    }
}

proptest! {
    // Stack depth is exactly pushes minus pops, clamped at zero.
    #[test]
    fn depth_is_push_pop_arithmetic_clamped(ops in stack_ops()) {
        let mut nav = NavigationStore::new();
        let mut expected = 0usize;
        for op in &ops {
            match op {
                StackOp::Push(n) => {
                    nav.push_view(frame(&format!("frame-{}", n), ViewKind::EmployeeDetail));
                    expected += 1;
                }
                StackOp::Pop => {
                    nav.pop_view();
                    expected = expected.saturating_sub(1);
                }
            }
        }
        prop_assert_eq!(nav.depth(), expected);
    }

    // After n pushes and k pops, the (n-k)-th push is visible.
    #[test]
    fn current_frame_follows_lifo_order(n in 1usize..16, pops in 0usize..20) {
        let mut nav = NavigationStore::new();
        for i in 0..n {
            nav.push_view(frame(&format!("f{}", i), ViewKind::DriverDetail));
        }
        for _ in 0..pops {
            nav.pop_view();
        }

        let remaining = n.saturating_sub(pops);
        prop_assert_eq!(nav.depth(), remaining);
        match remaining {
            0 => prop_assert!(nav.current_frame().is_none()),
            _ => prop_assert_eq!(
                nav.current_frame().map(|f| f.id().to_string()),
                Some(format!("f{}", remaining - 1))
            ),
        }
    }

    // Popping an empty stack any number of times stays a no-op.
    #[test]
    fn pop_on_empty_never_panics(pops in 1usize..16) {
        let mut nav = NavigationStore::new();
        for _ in 0..pops {
            nav.pop_view();
        }
        prop_assert_eq!(nav.depth(), 0);
        prop_assert!(nav.current_frame().is_none());
    }

    // A pushed frame sees the arguments as they were at push time, no matter
    // what happens to the source map afterwards.
    #[test]
    fn payload_is_fixed_at_push_time(
        key in "[a-z]{1,8}",
        before in "[a-z0-9]{1,8}",
        after in "[a-z0-9]{1,8}",
    ) {
        let mut args = BTreeMap::new();
        args.insert(key.clone(), serde_json::Value::from(before.clone()));

        let mut nav = NavigationStore::new();
        nav.push_view(ViewFrame::new(
            "form",
            "Form",
            ViewKind::EmployeeForm,
            Payload::from_args(&args),
        ));

        args.insert(key.clone(), serde_json::Value::from(after));
        args.insert("extra".to_string(), serde_json::Value::from(true));

        let seen = nav
            .current_frame()
            .and_then(|f| f.payload().str_arg(&key))
            .map(str::to_string);
        prop_assert_eq!(seen.as_deref(), Some(before.as_str()));
        prop_assert!(nav.current_frame().unwrap().payload().arg("extra").is_none());
    }

    // In every reachable shell state, a populated action bar implies an
    // empty stack, and an empty stack implies the full tab set with the
    // selected tab as primary.
    #[test]
    fn actions_and_stack_never_coexist(ops in console_ops()) {
        let mut console = new_console();
        let mut counter = 0usize;
        for op in &ops {
            apply(&mut console, op, &mut counter);

            let depth = console.navigation().depth();
            let actions = console.action_bar().len();
            prop_assert!(actions == 0 || depth == 0, "depth={} actions={}", depth, actions);

            if depth == 0 {
                prop_assert_eq!(actions, Entity::ALL.len());
                let primary: Vec<&str> = console
                    .action_bar()
                    .actions()
                    .iter()
                    .filter(|a| a.variant() == fleetdesk::nav::ActionVariant::Primary)
                    .map(|a| a.key())
                    .collect();
                let expected_primary = format!("tab-{}", console.selected_tab().slug());
                prop_assert_eq!(primary, vec![expected_primary.as_str()]);
            }
        }
    }

    // Round trip: the action bar after push+pop equals the bar before the
    // push, entry for entry.
    #[test]
    fn action_bar_round_trips_across_a_drill_down(
        tab in 0usize..Entity::ALL.len(),
        kind in 0usize..ViewKind::ALL.len(),
    ) {
        let mut console = new_console();
        console.select_tab(Entity::ALL[tab]);

        let before = bar_snapshot(console.action_bar());
        console.push_view(frame("drill", ViewKind::ALL[kind]));
        prop_assert!(console.action_bar().is_empty());

        console.pop_view();
        prop_assert_eq!(bar_snapshot(console.action_bar()), before);
    }
}
