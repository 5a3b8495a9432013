//! In-memory reference backend.
//!
//! Versions are published as `Arc` snapshots behind a single `RwLock`:
//! a reader either sees a fully-constructed version or none at all, and
//! `approve` swaps the snapshot under the write lock, which makes it
//! linearizable with respect to concurrent `get_active_version` calls.
//!
//! Mutations are administrative and rare, so the backend favors
//! simplicity over write throughput: id lookup is a scan over the pair
//! map.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::info;

use crate::error::StoreError;
use crate::record::{RequiredDocument, RuleSetVersion};
use crate::traits::{validate_documents, RuleSetStore};

type PairKey = (String, String);

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<PairKey, Vec<Arc<RuleSetVersion>>>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&self) -> String {
        // Ids are opaque to callers; a relational backend would use
        // surrogate keys here.
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("rsv-{}", n)
    }

    fn read_lock(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<PairKey, Vec<Arc<RuleSetVersion>>>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_lock(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<PairKey, Vec<Arc<RuleSetVersion>>>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn find_by_id<'a>(
    map: &'a mut HashMap<PairKey, Vec<Arc<RuleSetVersion>>>,
    id: &str,
) -> Option<(&'a mut Vec<Arc<RuleSetVersion>>, usize)> {
    for versions in map.values_mut() {
        if let Some(idx) = versions.iter().position(|v| v.id == id) {
            return Some((versions, idx));
        }
    }
    None
}

#[async_trait]
impl RuleSetStore for MemoryStore {
    async fn get_active_version(
        &self,
        country_code: &str,
        visa_type: &str,
    ) -> Result<Arc<RuleSetVersion>, StoreError> {
        let map = self.read_lock();
        map.get(&(country_code.to_owned(), visa_type.to_owned()))
            .and_then(|versions| {
                versions
                    .iter()
                    .filter(|v| v.is_approved)
                    .max_by_key(|v| v.version)
            })
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                country_code: country_code.to_owned(),
                visa_type: visa_type.to_owned(),
            })
    }

    async fn create_draft(
        &self,
        country_code: &str,
        visa_type: &str,
        documents: Vec<RequiredDocument>,
    ) -> Result<RuleSetVersion, StoreError> {
        validate_documents(&documents)?;

        let has_conditions = documents.iter().any(RequiredDocument::has_condition);
        let mut map = self.write_lock();
        let versions = map
            .entry((country_code.to_owned(), visa_type.to_owned()))
            .or_default();

        let max_version = versions.iter().map(|v| v.version).max().unwrap_or(0);
        let mut version = max_version + 1;
        if version == 1 && has_conditions {
            // Conditions require the version-2 schema capability
            version = 2;
        }

        let record = RuleSetVersion {
            id: self.fresh_id(),
            country_code: country_code.to_owned(),
            visa_type: visa_type.to_owned(),
            version,
            is_approved: false,
            documents,
            financial_requirements: serde_json::Value::Null,
            processing_info: serde_json::Value::Null,
            fees: serde_json::Value::Null,
        };
        versions.push(Arc::new(record.clone()));

        info!(
            id = %record.id,
            country = country_code,
            visa = visa_type,
            version,
            "created rule set draft"
        );
        Ok(record)
    }

    async fn approve(&self, id: &str) -> Result<(), StoreError> {
        let mut map = self.write_lock();
        let (versions, idx) =
            find_by_id(&mut map, id).ok_or_else(|| StoreError::VersionNotFound {
                id: id.to_owned(),
            })?;

        if versions[idx].is_approved {
            return Err(StoreError::AlreadyApproved { id: id.to_owned() });
        }

        let mut approved = (*versions[idx]).clone();
        approved.is_approved = true;
        let version = approved.version;
        let country = approved.country_code.clone();
        let visa = approved.visa_type.clone();
        versions[idx] = Arc::new(approved);

        info!(id, country = %country, visa = %visa, version, "approved rule set version");
        Ok(())
    }

    async fn patch(
        &self,
        id: &str,
        documents: Vec<RequiredDocument>,
    ) -> Result<RuleSetVersion, StoreError> {
        validate_documents(&documents)?;

        let has_conditions = documents.iter().any(RequiredDocument::has_condition);
        let mut map = self.write_lock();
        let (versions, idx) =
            find_by_id(&mut map, id).ok_or_else(|| StoreError::VersionNotFound {
                id: id.to_owned(),
            })?;

        if versions[idx].is_approved {
            return Err(StoreError::ImmutableVersion { id: id.to_owned() });
        }

        let mut draft = (*versions[idx]).clone();
        draft.documents = documents;
        if draft.version == 1 && has_conditions {
            // Promote to the version-2 schema capability. If a later
            // version already took number 2, step past the pair's
            // highest to keep numbers strictly increasing.
            let max_other = versions
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, v)| v.version)
                .max()
                .unwrap_or(0);
            draft.version = u32::max(2, max_other + 1);
        }
        let record = draft.clone();
        versions[idx] = Arc::new(draft);

        info!(id, version = record.version, "patched rule set draft");
        Ok(record)
    }
}
