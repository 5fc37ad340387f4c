use std::cell::RefCell;
use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::records::{Entity, Record};

/// Boundary to the backing directory service. In production this sits in
/// front of a REST API; caching, retries and auth live on that side of the
/// line, not here.
pub trait DirectoryProvider {
    fn list(&self, entity: Entity) -> Vec<Record>;
    fn fetch(&self, entity: Entity, id: &str) -> Option<Record>;
    /// Upsert. An empty id means "create"; the stored record (with its
    /// assigned id) is returned.
    fn save(&self, entity: Entity, record: Record) -> Result<Record>;
}

#[derive(Deserialize)]
struct SeedFile {
    employees: Vec<Record>,
    drivers: Vec<Record>,
    allies: Vec<Record>,
    vehicles: Vec<Record>,
    hotels: Vec<Record>,
    zones: Vec<Record>,
    routes: Vec<Record>,
}

/// In-memory provider seeded with demo data so the console runs without a
/// backend.
pub struct SampleDirectory {
    data: RefCell<BTreeMap<Entity, Vec<Record>>>,
}

impl SampleDirectory {
    pub fn empty() -> Self {
        let mut data = BTreeMap::new();
        for entity in Entity::ALL {
            data.insert(entity, Vec::new());
        }
        Self {
            data: RefCell::new(data),
        }
    }

    pub fn seeded() -> Result<Self> {
        let seed: SeedFile = serde_json::from_str(include_str!("sample_data.json"))
            .context("parse embedded sample data")?;

        let mut data = BTreeMap::new();
        data.insert(Entity::Employees, seed.employees);
        data.insert(Entity::Drivers, seed.drivers);
        data.insert(Entity::Allies, seed.allies);
        data.insert(Entity::Vehicles, seed.vehicles);
        data.insert(Entity::Hotels, seed.hotels);
        data.insert(Entity::Zones, seed.zones);
        data.insert(Entity::Routes, seed.routes);
        Ok(Self {
            data: RefCell::new(data),
        })
    }

    fn assign_id(rows: &[Record]) -> String {
        let max = rows
            .iter()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }
}

impl DirectoryProvider for SampleDirectory {
    fn list(&self, entity: Entity) -> Vec<Record> {
        self.data
            .borrow()
            .get(&entity)
            .cloned()
            .unwrap_or_default()
    }

    fn fetch(&self, entity: Entity, id: &str) -> Option<Record> {
        self.data
            .borrow()
            .get(&entity)
            .and_then(|rows| rows.iter().find(|r| r.id == id).cloned())
    }

    fn save(&self, entity: Entity, mut record: Record) -> Result<Record> {
        let mut data = self.data.borrow_mut();
        let rows = data.entry(entity).or_default();

        if record.id.is_empty() {
            record.id = Self::assign_id(rows);
            rows.push(record.clone());
            return Ok(record);
        }

        match rows.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => rows.push(record.clone()),
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_directory_has_rows_for_every_entity() -> Result<()> {
        let dir = SampleDirectory::seeded()?;
        for entity in Entity::ALL {
            assert!(!dir.list(entity).is_empty(), "{} is empty", entity.slug());
        }
        Ok(())
    }

    #[test]
    fn fetch_finds_seeded_records_by_id() -> Result<()> {
        let dir = SampleDirectory::seeded()?;
        let employee = dir.fetch(Entity::Employees, "1").expect("employee 1");
        assert_eq!(employee.field("name"), "Juan Pérez");
        assert!(dir.fetch(Entity::Employees, "999").is_none());
        Ok(())
    }

    #[test]
    fn save_with_empty_id_assigns_the_next_one() -> Result<()> {
        let dir = SampleDirectory::seeded()?;
        let before = dir.list(Entity::Zones).len();

        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), "Sur".to_string());
        let saved = dir.save(
            Entity::Zones,
            Record {
                id: String::new(),
                fields,
            },
        )?;

        assert_eq!(saved.id, "4");
        assert_eq!(dir.list(Entity::Zones).len(), before + 1);
        Ok(())
    }

    #[test]
    fn save_with_known_id_overwrites_in_place() -> Result<()> {
        let dir = SampleDirectory::seeded()?;
        let mut employee = dir.fetch(Entity::Employees, "2").expect("employee 2");
        employee
            .fields
            .insert("role".to_string(), "Lead dispatcher".to_string());

        dir.save(Entity::Employees, employee)?;
        let reread = dir.fetch(Entity::Employees, "2").expect("employee 2");
        assert_eq!(reread.field("role"), "Lead dispatcher");
        Ok(())
    }
}
