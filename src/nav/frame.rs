use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

/// The closed set of drill-down views the shell can put on the stack.
///
/// Frames carry this tag instead of a widget or constructor reference, so
/// navigation state stays plain data: comparable, loggable, and inert until
/// the composition root resolves it against the view registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViewKind {
    EmployeeDetail,
    EmployeeForm,
    DriverDetail,
    DriverForm,
    AllyDetail,
    AllyForm,
    VehicleDetail,
    VehicleForm,
    HotelDetail,
    HotelForm,
    ZoneDetail,
    ZoneForm,
    RouteDetail,
    RouteForm,
}

impl ViewKind {
    pub const ALL: [ViewKind; 14] = [
        ViewKind::EmployeeDetail,
        ViewKind::EmployeeForm,
        ViewKind::DriverDetail,
        ViewKind::DriverForm,
        ViewKind::AllyDetail,
        ViewKind::AllyForm,
        ViewKind::VehicleDetail,
        ViewKind::VehicleForm,
        ViewKind::HotelDetail,
        ViewKind::HotelForm,
        ViewKind::ZoneDetail,
        ViewKind::ZoneForm,
        ViewKind::RouteDetail,
        ViewKind::RouteForm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::EmployeeDetail => "employee-detail",
            ViewKind::EmployeeForm => "employee-form",
            ViewKind::DriverDetail => "driver-detail",
            ViewKind::DriverForm => "driver-form",
            ViewKind::AllyDetail => "ally-detail",
            ViewKind::AllyForm => "ally-form",
            ViewKind::VehicleDetail => "vehicle-detail",
            ViewKind::VehicleForm => "vehicle-form",
            ViewKind::HotelDetail => "hotel-detail",
            ViewKind::HotelForm => "hotel-form",
            ViewKind::ZoneDetail => "zone-detail",
            ViewKind::ZoneForm => "zone-form",
            ViewKind::RouteDetail => "route-detail",
            ViewKind::RouteForm => "route-form",
        }
    }
}

type UpdateFn = Rc<dyn Fn()>;

/// Named arguments handed to a drill-down view, fixed at push time.
///
/// Arguments are copied in at construction and there is no mutation API; a
/// view that wants different arguments pops and pushes a fresh frame. The
/// optional `on_update` callback is opaque to the navigation core: the pushed
/// view invokes it (via [`Payload::notify_update`]) after a successful
/// mutation so the caller can refresh its own data on return.
#[derive(Clone, Default)]
pub struct Payload {
    args: BTreeMap<String, Value>,
    on_update: Option<UpdateFn>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the given arguments in. Later mutation of `args` by the caller
    /// is not observable through the constructed payload.
    pub fn from_args(args: &BTreeMap<String, Value>) -> Self {
        Self {
            args: args.clone(),
            on_update: None,
        }
    }

    pub fn with_arg(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.args.insert(key.to_string(), value.into());
        self
    }

    pub fn with_on_update(mut self, f: impl Fn() + 'static) -> Self {
        self.on_update = Some(Rc::new(f));
        self
    }

    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(|v| v.as_str())
    }

    pub fn args(&self) -> &BTreeMap<String, Value> {
        &self.args
    }

    pub fn has_on_update(&self) -> bool {
        self.on_update.is_some()
    }

    /// Invoke the caller-supplied refresh callback, if one was attached.
    /// No-op otherwise.
    pub fn notify_update(&self) {
        if let Some(f) = &self.on_update {
            f();
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("args", &self.args)
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}

/// One entry in the navigation stack.
#[derive(Clone, Debug)]
pub struct ViewFrame {
    id: String,
    label: String,
    kind: ViewKind,
    payload: Payload,
}

impl ViewFrame {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: ViewKind,
        payload: Payload,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            payload,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn payload_copies_arguments_at_construction() {
        let mut source = BTreeMap::new();
        source.insert("employeeId".to_string(), Value::from("1"));

        let payload = Payload::from_args(&source);
        source.insert("employeeId".to_string(), Value::from("999"));
        source.insert("extra".to_string(), Value::from(true));

        assert_eq!(payload.str_arg("employeeId"), Some("1"));
        assert!(payload.arg("extra").is_none());
    }

    #[test]
    fn notify_update_without_callback_is_noop() {
        let payload = Payload::new().with_arg("mode", "edit");
        payload.notify_update();
    }

    #[test]
    fn notify_update_invokes_callback_each_time() {
        let hits = Rc::new(Cell::new(0u32));
        let observed = Rc::clone(&hits);
        let payload = Payload::new().with_on_update(move || observed.set(observed.get() + 1));

        payload.notify_update();
        payload.notify_update();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn view_kind_names_are_unique() {
        for (i, a) in ViewKind::ALL.iter().enumerate() {
            for b in &ViewKind::ALL[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }
}
