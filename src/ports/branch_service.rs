use crate::domain::value_objects::BranchId;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Branch service port
///
/// Rentals only know the BranchId, never the branch details.
#[async_trait]
pub trait BranchService: Send + Sync {
    /// Used to validate the branch before a rental is created.
    async fn exists(&self, branch_id: BranchId) -> Result<bool>;
}
