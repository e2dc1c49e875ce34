//! Store use-case service.

use crate::listing::registry::store_fields;
use crate::listing::{ListOptions, Query, ResultPage};
use crate::model::store::{Store, StoreId};
use crate::repo::store_repo::StoreRepository;
use crate::repo::RepoResult;
use crate::service::listing::{run_listing, ListServiceResult};

pub struct StoreService<R: StoreRepository> {
    repo: R,
}

impl<R: StoreRepository> StoreService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a store and returns its stable ID.
    pub fn create_store(&self, name: impl Into<String>) -> RepoResult<StoreId> {
        self.repo.create_store(&Store::new(name))
    }

    pub fn get_store(&self, id: StoreId) -> RepoResult<Option<Store>> {
        self.repo.get_store(id)
    }

    /// Lists stores for the store picker.
    pub fn list_stores(
        &self,
        query: &Query,
        options: &ListOptions,
    ) -> ListServiceResult<ResultPage> {
        let stores = self.repo.list_stores()?;
        run_listing("stores", &stores, query, store_fields(), options)
    }

    pub fn soft_delete_store(&self, id: StoreId) -> RepoResult<()> {
        self.repo.soft_delete_store(id)
    }
}
