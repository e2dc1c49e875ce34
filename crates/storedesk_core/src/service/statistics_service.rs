//! Statistics use-case service.
//!
//! # Responsibility
//! - Derive average delivery lead time per customer.
//! - Serve the statistics list screen through the list engine.
//!
//! # Invariants
//! - Only delivered, non-deleted orders contribute samples.
//! - Customers without deliveries do not appear.
//! - Averages are rounded to one decimal day.

use crate::listing::registry::{
    lead_time_fields, LEAD_TIME_CUSTOMER_ID, LEAD_TIME_CUSTOMER_NAME, LEAD_TIME_DAYS,
    LEAD_TIME_SAMPLES,
};
use crate::listing::{ListOptions, Query, Record, ResultPage, ToRecord};
use crate::model::customer::CustomerId;
use crate::model::store::StoreId;
use crate::repo::order_repo::{LeadTimeSample, OrderRepository};
use crate::repo::RepoResult;
use crate::service::listing::{run_listing, ListServiceResult};
use serde::Serialize;

/// Average lead time of one customer's delivered orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerLeadTime {
    pub customer_id: CustomerId,
    pub customer_name: String,
    /// Mean days from order to delivery, one decimal.
    pub average_days: f64,
    pub samples: usize,
}

impl ToRecord for CustomerLeadTime {
    fn to_record(&self) -> Record {
        Record::new()
            .with(LEAD_TIME_CUSTOMER_ID, self.customer_id.to_string())
            .with(LEAD_TIME_CUSTOMER_NAME, self.customer_name.as_str())
            .with(LEAD_TIME_DAYS, self.average_days)
            .with(LEAD_TIME_SAMPLES, self.samples as i64)
    }
}

pub struct StatisticsService<R: OrderRepository> {
    repo: R,
}

impl<R: OrderRepository> StatisticsService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Computes per-customer lead times for one store, ordered by customer name.
    pub fn customer_lead_times(&self, store_id: StoreId) -> RepoResult<Vec<CustomerLeadTime>> {
        let samples = self.repo.list_lead_time_samples(store_id)?;
        Ok(aggregate_lead_times(&samples))
    }

    /// Lists lead-time statistics through the list engine.
    pub fn list_lead_times(
        &self,
        store_id: StoreId,
        query: &Query,
        options: &ListOptions,
    ) -> ListServiceResult<ResultPage> {
        let stats = self.customer_lead_times(store_id)?;
        run_listing("lead_times", &stats, query, lead_time_fields(), options)
    }
}

/// Groups samples by customer, keeping first-seen customer order.
pub fn aggregate_lead_times(samples: &[LeadTimeSample]) -> Vec<CustomerLeadTime> {
    let mut totals: Vec<(CustomerId, String, i64, usize)> = Vec::new();
    for sample in samples {
        match totals
            .iter_mut()
            .find(|(customer_id, ..)| *customer_id == sample.customer_id)
        {
            Some((_, _, sum, count)) => {
                *sum += sample.lead_days;
                *count += 1;
            }
            None => totals.push((
                sample.customer_id,
                sample.customer_name.clone(),
                sample.lead_days,
                1,
            )),
        }
    }

    totals
        .into_iter()
        .map(|(customer_id, customer_name, sum, count)| CustomerLeadTime {
            customer_id,
            customer_name,
            average_days: round_one_decimal(sum as f64 / count as f64),
            samples: count,
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
