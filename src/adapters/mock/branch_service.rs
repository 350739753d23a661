use crate::domain::value_objects::BranchId;
use crate::ports::branch_service::{BranchService as BranchServiceTrait, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// Mock implementation of BranchService
///
/// Stateful: only registered branch IDs exist.
pub struct BranchService {
    branches: Mutex<HashSet<BranchId>>,
}

impl BranchService {
    pub fn new() -> Self {
        Self {
            branches: Mutex::new(HashSet::new()),
        }
    }

    /// Register a branch for testing purposes
    pub fn add_branch(&self, branch_id: BranchId) {
        self.branches.lock().unwrap().insert(branch_id);
    }
}

impl Default for BranchService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BranchServiceTrait for BranchService {
    async fn exists(&self, branch_id: BranchId) -> Result<bool> {
        Ok(self.branches.lock().unwrap().contains(&branch_id))
    }
}
