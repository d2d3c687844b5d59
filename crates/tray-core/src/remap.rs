use std::collections::HashMap;

use uuid::Uuid;

use crate::model::ConvertedTray;

/// Original id => freshly generated UUID v4.
///
/// Built from a flattened export and applied to `uuid`, `children` and
/// `parentUuid` alike so the references stay consistent.
#[derive(Debug, Clone, Default)]
pub struct IdRemap {
    mapping: HashMap<String, Uuid>,
}

impl IdRemap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a new id to every record's `uuid`.
    pub fn generate(records: &[ConvertedTray]) -> Self {
        let mut remap = Self::new();
        for record in records {
            remap.get_or_create(&record.uuid);
        }
        remap
    }

    pub fn get_or_create(&mut self, original: &str) -> Uuid {
        *self
            .mapping
            .entry(original.to_string())
            .or_insert_with(Uuid::new_v4)
    }

    pub fn lookup(&self, original: &str) -> Option<Uuid> {
        self.mapping.get(original).copied()
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Unknown ids (null parents, parents outside the export) pass through.
    fn rewrite(&self, id: &str) -> String {
        self.lookup(id)
            .map(|uuid| uuid.to_string())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn apply(&self, records: Vec<ConvertedTray>) -> Vec<ConvertedTray> {
        records
            .into_iter()
            .map(|mut record| {
                record.uuid = self.rewrite(&record.uuid);
                if let Some(children) = record.children.as_mut() {
                    for child in children.iter_mut() {
                        *child = self.rewrite(child);
                    }
                }
                for parent in record.parent_uuid.iter_mut().flatten() {
                    *parent = self.rewrite(parent);
                }
                record
            })
            .collect()
    }
}
