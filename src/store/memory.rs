//! In-memory ontology store with live snapshot subscriptions

use super::{OntologyStore, StoreError, StoreResult};
use crate::ontology::{
    LinkType, NewWritebackAction, ObjectType, OntologyData, OntologySnapshot, PropertyType,
    WritebackAction, WritebackStatus, WritebackUpdate,
};
use chrono::Utc;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};
use uuid::Uuid;

const ACTION_CHANNEL_CAPACITY: usize = 256;

#[derive(Default)]
struct Inner {
    data: OntologyData,
    actions: IndexMap<String, WritebackAction>,
}

impl Inner {
    fn snapshot(&self) -> OntologySnapshot {
        OntologySnapshot::from(&self.data)
    }
}

/// In-memory store.
///
/// Every schema mutation publishes a fresh snapshot to subscribers, so
/// several views stay in sync with one source of truth.
pub struct MemoryStore {
    inner: Mutex<Inner>,
    snapshots: watch::Sender<Arc<OntologySnapshot>>,
    actions: broadcast::Sender<WritebackAction>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl MemoryStore {
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(Arc::new(OntologySnapshot::default()));
        let (actions, _) = broadcast::channel(ACTION_CHANNEL_CAPACITY);
        Self {
            inner: Mutex::new(Inner::default()),
            snapshots,
            actions,
        }
    }

    /// Store pre-populated with `data` (ids are reassigned)
    pub fn with_data(data: OntologyData) -> StoreResult<Self> {
        let store = Self::new();
        store.replace_all(data)?;
        Ok(store)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn publish(&self, inner: &Inner) {
        self.snapshots.send_replace(Arc::new(inner.snapshot()));
    }

    /// Latest snapshot without copying the collections
    pub fn current(&self) -> Arc<OntologySnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Receiver that always holds the latest snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<OntologySnapshot>> {
        self.snapshots.subscribe()
    }

    pub fn create_object_type(&self, mut object_type: ObjectType) -> StoreResult<String> {
        if object_type.name.trim().is_empty() {
            return Err(StoreError::EmptyName("Object type"));
        }
        let mut inner = self.lock()?;
        if inner.data.object_types.iter().any(|o| o.name == object_type.name) {
            return Err(StoreError::DuplicateObjectType(object_type.name));
        }
        object_type.id = new_id();
        let id = object_type.id.clone();
        info!("Created object type {} ({})", object_type.name, id);
        inner.data.object_types.push(object_type);
        self.publish(&inner);
        Ok(id)
    }

    pub fn create_link_type(&self, mut link_type: LinkType) -> StoreResult<String> {
        if link_type.name.trim().is_empty() {
            return Err(StoreError::EmptyName("Link type"));
        }
        let mut inner = self.lock()?;
        link_type.id = new_id();
        let id = link_type.id.clone();
        info!(
            "Created link type {} ({} -> {})",
            link_type.name, link_type.from_type, link_type.to_type
        );
        inner.data.link_types.push(link_type);
        self.publish(&inner);
        Ok(id)
    }

    pub fn create_property_type(&self, mut property_type: PropertyType) -> StoreResult<String> {
        if property_type.name.trim().is_empty() {
            return Err(StoreError::EmptyName("Property type"));
        }
        let mut inner = self.lock()?;
        property_type.id = new_id();
        let id = property_type.id.clone();
        debug!("Created property type {}", property_type.name);
        inner.data.property_types.push(property_type);
        self.publish(&inner);
        Ok(id)
    }

    /// Atomically replace every collection, dropping write-back actions.
    ///
    /// Subscribers see either the previous or the new snapshot.
    pub fn replace_all(&self, mut data: OntologyData) -> StoreResult<()> {
        for o in &mut data.object_types {
            o.id = new_id();
        }
        for l in &mut data.link_types {
            l.id = new_id();
        }
        for p in &mut data.property_types {
            p.id = new_id();
        }
        for a in &mut data.action_types {
            a.id = new_id();
        }

        let mut inner = self.lock()?;
        info!(
            "Replacing ontology: {} object types, {} link types, {} property types",
            data.object_types.len(),
            data.link_types.len(),
            data.property_types.len()
        );
        inner.data = data;
        inner.actions.clear();
        self.publish(&inner);
        Ok(())
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.replace_all(OntologyData::default())
    }

    /// Full dataset, action types included
    pub fn data(&self) -> StoreResult<OntologyData> {
        Ok(self.lock()?.data.clone())
    }

    /// Record a new write-back action in `pending` state
    pub fn execute_writeback(&self, action: NewWritebackAction) -> StoreResult<String> {
        let record = WritebackAction {
            id: new_id(),
            action_type_id: action.action_type_id,
            decision: action.decision,
            status: WritebackStatus::Pending,
            progress: 0,
            logs: action.logs,
            results: Vec::new(),
            created_at: Utc::now(),
        };
        let id = record.id.clone();

        let mut inner = self.lock()?;
        info!("Write-back action {} queued for {}", id, record.action_type_id);
        inner.actions.insert(id.clone(), record.clone());
        let _ = self.actions.send(record);
        Ok(id)
    }

    pub fn update_writeback_action(
        &self,
        id: &str,
        update: WritebackUpdate,
    ) -> StoreResult<WritebackAction> {
        if let Some(progress) = update.progress {
            if progress > 100 {
                return Err(StoreError::InvalidProgress(progress));
            }
        }

        let mut inner = self.lock()?;
        let action = inner
            .actions
            .get_mut(id)
            .ok_or_else(|| StoreError::ActionNotFound(id.to_string()))?;

        if let Some(status) = update.status {
            action.status = status;
        }
        if let Some(progress) = update.progress {
            action.progress = progress;
        }
        action.logs.extend(update.append_logs);
        if let Some(results) = update.results {
            action.results = results;
        }

        debug!("Write-back action {} now {:?} at {}%", id, action.status, action.progress);
        let updated = action.clone();
        let _ = self.actions.send(updated.clone());
        Ok(updated)
    }

    pub fn writeback_action(&self, id: &str) -> StoreResult<Option<WritebackAction>> {
        Ok(self.lock()?.actions.get(id).cloned())
    }

    /// Every change to any write-back action
    pub fn subscribe_actions(&self) -> broadcast::Receiver<WritebackAction> {
        self.actions.subscribe()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OntologyStore for MemoryStore {
    fn list_object_types(&self) -> StoreResult<Vec<ObjectType>> {
        Ok(self.current().object_types.clone())
    }

    fn list_link_types(&self) -> StoreResult<Vec<LinkType>> {
        Ok(self.current().link_types.clone())
    }

    fn list_property_types(&self) -> StoreResult<Vec<PropertyType>> {
        Ok(self.current().property_types.clone())
    }

    fn snapshot(&self) -> StoreResult<OntologySnapshot> {
        Ok(self.current().as_ref().clone())
    }
}
