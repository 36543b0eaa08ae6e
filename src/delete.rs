//! Bulk deletion of objects by identifier.

use crate::error::{ClientError, Result};
use crate::extract::extract_ids;
use crate::query::fetch_ids;
use crate::transport::{ApiRequest, Transport};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

/// One identifier that could not be deleted, and why.
#[derive(Debug)]
pub struct DeletionFailure {
    pub id: String,
    pub error: ClientError,
}

/// Outcome of one bulk delete.
///
/// Every identifier handed to the deleter ends up either counted in
/// `deleted` or listed in `failures`.
#[derive(Debug, Default)]
pub struct DeletionReport {
    pub total_found: usize,
    pub deleted: usize,
    pub failures: Vec<DeletionFailure>,
}

impl DeletionReport {
    pub fn new(total_found: usize) -> Self {
        Self {
            total_found,
            deleted: 0,
            failures: Vec::new(),
        }
    }

    fn record(&mut self, id: String, outcome: Result<()>) {
        match outcome {
            Ok(()) => self.deleted += 1,
            Err(error) => {
                warn!(%id, %error, "delete failed");
                self.failures.push(DeletionFailure { id, error });
            }
        }
    }

    /// Identifiers that were not deleted, in processing order.
    pub fn failed_ids(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.id.as_str()).collect()
    }

    /// True when every identifier has been accounted for.
    pub fn is_balanced(&self) -> bool {
        self.deleted + self.failures.len() == self.total_found
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Delete one object. Any 2xx answer counts as success.
pub async fn delete_object<T: Transport + ?Sized>(transport: &T, id: &str) -> Result<()> {
    let response = transport
        .execute(ApiRequest::delete(["v1", "objects", id]))
        .await?;
    if response.is_success() {
        debug!(%id, status = response.status, "deleted");
        Ok(())
    } else {
        Err(ClientError::DeleteFailed {
            status: response.status,
            body: response.body,
        })
    }
}

/// Delete every identifier, keeping at most `concurrency` requests in flight.
///
/// Failures are collected, never propagated; the report lists them in the
/// order the identifiers were given. A `concurrency` of 0 or 1 runs strictly
/// sequentially.
pub async fn delete_all<T: Transport + ?Sized>(
    transport: &T,
    ids: Vec<String>,
    concurrency: usize,
) -> DeletionReport {
    let mut report = DeletionReport::new(ids.len());
    if ids.is_empty() {
        return report;
    }

    let outcomes: Vec<(String, Result<()>)> = stream::iter(ids)
        .map(|id| async move {
            let outcome = delete_object(transport, &id).await;
            (id, outcome)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    for (id, outcome) in outcomes {
        report.record(id, outcome);
    }
    report
}

/// Query every object of `class` and delete it.
///
/// Query and parsing errors abort before anything is deleted. Delete errors
/// end up in the report.
pub async fn delete_class_objects<T: Transport + ?Sized>(
    transport: &T,
    class: &str,
    concurrency: usize,
) -> Result<DeletionReport> {
    let response = fetch_ids(transport, class).await?;
    let ids = extract_ids(&response.body, class)?;
    info!(class, found = ids.len(), "deleting objects");

    let report = delete_all(transport, ids, concurrency).await;
    info!(
        class,
        found = report.total_found,
        deleted = report.deleted,
        failed = report.failures.len(),
        "bulk delete finished"
    );
    Ok(report)
}
