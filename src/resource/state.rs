use std::collections::BTreeMap;

/// State of one declarative resource instance, as held by the orchestration
/// host.
///
/// The identifier marks lifecycle: `Some` while the resource is present,
/// `None` while it is absent. Fields are stored as strings, matching the
/// host-facing schema.
pub trait ResourceState {
    /// Stable identifier of the resource, `None` while the resource is
    /// absent.
    fn id(&self) -> Option<String>;

    /// Marks the resource present under `id`.
    fn set_id(&mut self, id: &str);

    /// Marks the resource absent.
    fn clear_id(&mut self);

    /// Reads a stored field.
    fn get(&self, field: &str) -> Option<String>;

    /// Writes a stored field.
    fn set(&mut self, field: &str, value: &str);
}

/// In-memory [`ResourceState`], for hosts without their own state
/// representation and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateMap {
    id: Option<String>,
    fields: BTreeMap<String, String>,
}

impl ResourceState for StateMap {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn set_id(&mut self, id: &str) {
        self.id = Some(id.to_string());
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn get(&self, field: &str) -> Option<String> {
        self.fields.get(field).cloned()
    }

    fn set(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
    }
}
