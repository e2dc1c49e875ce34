//! Customer use-case service.
//!
//! # Invariants
//! - Every read is scoped to the caller's selected store.

use crate::listing::registry::customer_fields;
use crate::listing::{ListOptions, Query, ResultPage};
use crate::model::customer::{Customer, CustomerId};
use crate::model::store::StoreId;
use crate::repo::customer_repo::CustomerRepository;
use crate::repo::RepoResult;
use crate::service::listing::{run_listing, ListServiceResult};

/// Request model for registering a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCustomerRequest {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

pub struct CustomerService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a customer under `store_id`.
    ///
    /// Blank phone/address inputs are stored as absent.
    pub fn create_customer(
        &self,
        store_id: StoreId,
        request: &NewCustomerRequest,
    ) -> RepoResult<CustomerId> {
        let mut customer = Customer::new(store_id, request.name.trim());
        customer.phone = non_blank(request.phone.as_deref());
        customer.address = non_blank(request.address.as_deref());
        self.repo.create_customer(&customer)
    }

    pub fn update_customer(&self, customer: &Customer) -> RepoResult<()> {
        self.repo.update_customer(customer)
    }

    pub fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        self.repo.get_customer(id)
    }

    /// Lists one store's customers through the list engine.
    pub fn list_customers(
        &self,
        store_id: StoreId,
        query: &Query,
        options: &ListOptions,
    ) -> ListServiceResult<ResultPage> {
        let customers = self.repo.list_customers(store_id)?;
        run_listing("customers", &customers, query, customer_fields(), options)
    }

    pub fn soft_delete_customer(&self, id: CustomerId) -> RepoResult<()> {
        self.repo.soft_delete_customer(id)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
