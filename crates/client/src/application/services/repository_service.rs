//! Repository Service - settings form use cases

use std::rc::Rc;

use issuedraft_domain::entities::{find_duplicate, sort_newest_first};
use issuedraft_domain::{DomainError, Record, Repository};

use super::record_store::{AddOutcome, RepositoryStore, StoreError};
use crate::application::ServiceError;
use crate::ports::outbound::TimeProvider;

/// Raw values submitted by the repository form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryForm {
    pub owner: String,
    pub name: String,
}

impl RepositoryForm {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

#[derive(Clone)]
pub struct RepositoryService {
    store: RepositoryStore,
    time: Rc<dyn TimeProvider>,
}

impl RepositoryService {
    pub fn new(store: RepositoryStore, time: Rc<dyn TimeProvider>) -> Self {
        Self { store, time }
    }

    /// Validate and register a repository from form input.
    ///
    /// Rejects blank fields and any `(owner, name)` already registered,
    /// compared case-insensitively.
    pub fn register(&self, form: &RepositoryForm) -> Result<Repository, ServiceError> {
        let repository = Repository::new(&form.owner, &form.name, self.time.now())?;

        let existing = self.store.get_all()?;
        if let Some(dup) = find_duplicate(&existing, &repository.owner, &repository.name) {
            return Err(DomainError::duplicate(Repository::ENTITY_TYPE, dup.full_name()).into());
        }

        match self.store.add(repository.clone())? {
            AddOutcome::Added => {
                tracing::info!(repository = %repository.full_name(), "Repository registered");
                Ok(repository)
            }
            // Generated ids are UUIDs; a clash means the store was edited by hand
            AddOutcome::Duplicate => Err(DomainError::duplicate(
                Repository::ENTITY_TYPE,
                repository.id.to_string(),
            )
            .into()),
        }
    }

    /// All repositories, newest first.
    pub fn list(&self) -> Result<Vec<Repository>, StoreError> {
        let mut repositories = self.store.get_all()?;
        sort_newest_first(&mut repositories);
        Ok(repositories)
    }

    /// Repositories that can be offered as issue targets.
    pub fn valid_targets(&self) -> Result<Vec<Repository>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(Repository::is_valid)
            .collect())
    }

    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self.store.remove(id)?;
        if removed {
            tracing::info!(id, "Repository deleted");
        }
        Ok(removed)
    }
}
