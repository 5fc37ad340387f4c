use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The entity families the console administers. One grid tab per family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Entity {
    Employees,
    Drivers,
    Allies,
    Vehicles,
    Hotels,
    Zones,
    Routes,
}

impl Entity {
    pub const ALL: [Entity; 7] = [
        Entity::Employees,
        Entity::Drivers,
        Entity::Allies,
        Entity::Vehicles,
        Entity::Hotels,
        Entity::Zones,
        Entity::Routes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Entity::Employees => "Employees",
            Entity::Drivers => "Drivers",
            Entity::Allies => "Allies",
            Entity::Vehicles => "Vehicles",
            Entity::Hotels => "Hotels",
            Entity::Zones => "Zones",
            Entity::Routes => "Routes",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Entity::Employees => "employee",
            Entity::Drivers => "driver",
            Entity::Allies => "ally",
            Entity::Vehicles => "vehicle",
            Entity::Hotels => "hotel",
            Entity::Zones => "zone",
            Entity::Routes => "route",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Entity::Employees => "employees",
            Entity::Drivers => "drivers",
            Entity::Allies => "allies",
            Entity::Vehicles => "vehicles",
            Entity::Hotels => "hotels",
            Entity::Zones => "zones",
            Entity::Routes => "routes",
        }
    }

    /// Grid/form columns, in display order. The first column doubles as the
    /// record's display name.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Entity::Employees => &["name", "role", "phone"],
            Entity::Drivers => &["name", "license", "vehicle"],
            Entity::Allies => &["company", "contact", "phone"],
            Entity::Vehicles => &["plate", "model", "seats"],
            Entity::Hotels => &["name", "zone"],
            Entity::Zones => &["name", "coverage"],
            Entity::Routes => &["name", "origin", "destination"],
        }
    }

    pub fn parse(s: &str) -> Option<Entity> {
        Entity::ALL.iter().copied().find(|e| e.slug() == s)
    }

    pub fn next(self) -> Entity {
        let i = Entity::ALL.iter().position(|&e| e == self).unwrap_or(0);
        Entity::ALL[(i + 1) % Entity::ALL.len()]
    }

    pub fn prev(self) -> Entity {
        let i = Entity::ALL.iter().position(|&e| e == self).unwrap_or(0);
        Entity::ALL[(i + Entity::ALL.len() - 1) % Entity::ALL.len()]
    }
}

/// One row of an entity family, as the backing service serializes it. The
/// console treats fields as opaque named strings; typing and validation live
/// with the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl Record {
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Display name: first column of the owning entity.
    pub fn display_name(&self, entity: Entity) -> &str {
        entity
            .columns()
            .first()
            .map(|c| self.field(c))
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.id)
    }
}
