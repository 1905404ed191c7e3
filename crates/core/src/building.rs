use std::sync::{Arc, RwLock};

/// Read-only accessor for the building the user is currently looking at
pub trait BuildingIdSource: Send + Sync {
    fn building_id(&self) -> Option<String>;
}

/// A building identifier fixed at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticBuildingId(Option<String>);

impl StaticBuildingId {
    pub fn new(building_id: Option<String>) -> Self {
        Self(building_id.filter(|id| !id.is_empty()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl BuildingIdSource for StaticBuildingId {
    fn building_id(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A building identifier that another part of the application can change
#[derive(Debug, Clone, Default)]
pub struct SharedBuildingId {
    inner: Arc<RwLock<Option<String>>>,
}

impl SharedBuildingId {
    pub fn new(building_id: Option<String>) -> Self {
        Self { inner: Arc::new(RwLock::new(building_id)) }
    }

    /// Select a different building, or clear the selection
    pub fn set(&self, building_id: Option<String>) {
        match self.inner.write() {
            Ok(mut guard) => *guard = building_id,
            Err(poisoned) => *poisoned.into_inner() = building_id,
        }
    }
}

impl BuildingIdSource for SharedBuildingId {
    fn building_id(&self) -> Option<String> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
