use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{EvaluationId, Tool, ToolId, ToolProfile};
use super::repository::{EvaluationRecord, EvaluationRepository, RepositoryError, ToolCatalogue};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store poisoned".to_string()))
}

#[derive(Debug, Default)]
struct CatalogueState {
    tools: BTreeMap<ToolId, Tool>,
    last_id: u32,
}

impl CatalogueState {
    fn name_taken(&self, profile: &ToolProfile, except: Option<ToolId>) -> bool {
        self.tools.values().any(|tool| {
            Some(tool.id) != except
                && (tool.profile.name == profile.name || tool.profile.slug == profile.slug)
        })
    }

    fn push(&mut self, profile: ToolProfile) -> Tool {
        self.last_id += 1;
        let tool = Tool {
            id: ToolId(self.last_id),
            profile,
        };
        self.tools.insert(tool.id, tool.clone());
        tool
    }
}

/// Process-local catalogue. Names and slugs are unique; ids are assigned sequentially.
#[derive(Debug, Default, Clone)]
pub struct InMemoryToolCatalogue {
    state: Arc<Mutex<CatalogueState>>,
}

impl InMemoryToolCatalogue {
    pub fn seeded(profiles: Vec<ToolProfile>) -> Result<Self, RepositoryError> {
        let catalogue = Self::default();
        catalogue.replace_all(profiles)?;
        Ok(catalogue)
    }
}

impl ToolCatalogue for InMemoryToolCatalogue {
    fn list(&self) -> Result<Vec<Tool>, RepositoryError> {
        let guard = lock(&self.state)?;
        Ok(guard.tools.values().cloned().collect())
    }

    fn fetch(&self, id: ToolId) -> Result<Option<Tool>, RepositoryError> {
        let guard = lock(&self.state)?;
        Ok(guard.tools.get(&id).cloned())
    }

    fn insert(&self, profile: ToolProfile) -> Result<Tool, RepositoryError> {
        let mut guard = lock(&self.state)?;
        if guard.name_taken(&profile, None) {
            return Err(RepositoryError::Conflict);
        }
        Ok(guard.push(profile))
    }

    fn update(&self, tool: Tool) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.state)?;
        if !guard.tools.contains_key(&tool.id) {
            return Err(RepositoryError::NotFound);
        }
        if guard.name_taken(&tool.profile, Some(tool.id)) {
            return Err(RepositoryError::Conflict);
        }
        guard.tools.insert(tool.id, tool);
        Ok(())
    }

    fn remove(&self, id: ToolId) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.state)?;
        guard
            .tools
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn replace_all(&self, profiles: Vec<ToolProfile>) -> Result<Vec<Tool>, RepositoryError> {
        let mut replacement = CatalogueState::default();
        let mut created = Vec::with_capacity(profiles.len());
        for profile in profiles {
            if replacement.name_taken(&profile, None) {
                return Err(RepositoryError::Conflict);
            }
            created.push(replacement.push(profile));
        }

        let mut guard = lock(&self.state)?;
        *guard = replacement;
        Ok(created)
    }
}

/// Process-local evaluation store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEvaluationRepository {
    records: Arc<Mutex<BTreeMap<EvaluationId, EvaluationRecord>>>,
}

impl EvaluationRepository for InMemoryEvaluationRepository {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard.values().cloned().collect())
    }

    fn remove(&self, id: &EvaluationId) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records)?;
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
