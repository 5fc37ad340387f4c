use std::collections::BTreeMap;
use std::rc::Rc;

use crate::directory::{DirectoryProvider, Entity};
use crate::nav::{ViewFrame, ViewKind};

use super::view::FrameView;
use super::views::{DetailView, FormView};

pub type FrameBuilder = Box<dyn Fn(&ViewFrame) -> Box<dyn FrameView>>;

/// Resolves a frame's view-kind tag into a concrete renderer.
///
/// Frames never carry constructors or widget references; the registry is the
/// one place where the symbolic tag meets executable code. An unregistered
/// kind resolves to `None` and the shell shows a placeholder instead of
/// tearing the stack down.
#[derive(Default)]
pub struct ViewRegistry {
    builders: BTreeMap<ViewKind, FrameBuilder>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: ViewKind, builder: FrameBuilder) {
        self.builders.insert(kind, builder);
    }

    pub fn is_registered(&self, kind: ViewKind) -> bool {
        self.builders.contains_key(&kind)
    }

    pub fn resolve(&self, frame: &ViewFrame) -> Option<Box<dyn FrameView>> {
        self.builders.get(&frame.kind()).map(|build| build(frame))
    }

    /// Registry with the stock detail and form renderers for every entity
    /// family.
    pub fn with_defaults(provider: Rc<dyn DirectoryProvider>) -> Self {
        let mut registry = Self::new();
        for kind in ViewKind::ALL {
            let provider = Rc::clone(&provider);
            let builder: FrameBuilder = if kind_is_form(kind) {
                Box::new(move |frame| Box::new(FormView::from_frame(frame, Rc::clone(&provider))))
            } else {
                Box::new(move |frame| Box::new(DetailView::from_frame(frame, Rc::clone(&provider))))
            };
            registry.register(kind, builder);
        }
        registry
    }
}

pub(super) fn detail_kind(entity: Entity) -> ViewKind {
    match entity {
        Entity::Employees => ViewKind::EmployeeDetail,
        Entity::Drivers => ViewKind::DriverDetail,
        Entity::Allies => ViewKind::AllyDetail,
        Entity::Vehicles => ViewKind::VehicleDetail,
        Entity::Hotels => ViewKind::HotelDetail,
        Entity::Zones => ViewKind::ZoneDetail,
        Entity::Routes => ViewKind::RouteDetail,
    }
}

pub(super) fn form_kind(entity: Entity) -> ViewKind {
    match entity {
        Entity::Employees => ViewKind::EmployeeForm,
        Entity::Drivers => ViewKind::DriverForm,
        Entity::Allies => ViewKind::AllyForm,
        Entity::Vehicles => ViewKind::VehicleForm,
        Entity::Hotels => ViewKind::HotelForm,
        Entity::Zones => ViewKind::ZoneForm,
        Entity::Routes => ViewKind::RouteForm,
    }
}

pub(super) fn kind_entity(kind: ViewKind) -> Entity {
    match kind {
        ViewKind::EmployeeDetail | ViewKind::EmployeeForm => Entity::Employees,
        ViewKind::DriverDetail | ViewKind::DriverForm => Entity::Drivers,
        ViewKind::AllyDetail | ViewKind::AllyForm => Entity::Allies,
        ViewKind::VehicleDetail | ViewKind::VehicleForm => Entity::Vehicles,
        ViewKind::HotelDetail | ViewKind::HotelForm => Entity::Hotels,
        ViewKind::ZoneDetail | ViewKind::ZoneForm => Entity::Zones,
        ViewKind::RouteDetail | ViewKind::RouteForm => Entity::Routes,
    }
}

pub(super) fn kind_is_form(kind: ViewKind) -> bool {
    matches!(
        kind,
        ViewKind::EmployeeForm
            | ViewKind::DriverForm
            | ViewKind::AllyForm
            | ViewKind::VehicleForm
            | ViewKind::HotelForm
            | ViewKind::ZoneForm
            | ViewKind::RouteForm
    )
}
