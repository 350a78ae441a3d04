//! Hire request repository trait definition.

use folio_types::error::RepositoryError;
use folio_types::hire::HireRequest;

/// Append-only store of leads submitted through the hire form.
pub trait HireRequestRepository: Send + Sync {
    /// Persist a new hire request. The referenced gig must exist.
    fn create(
        &self,
        request: &HireRequest,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
