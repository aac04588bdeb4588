//! The computed outcome of one selection pass.

use super::id::RecordUri;

/// Records scheduled for removal, consumed once by the execution driver.
///
/// Both sequences preserve input iteration order and contain no duplicates
/// within or across them, so identical inputs always produce identical
/// plans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionPlan {
    pub likes_to_remove: Vec<RecordUri>,
    pub posts_to_delete: Vec<RecordUri>,
}

impl DeletionPlan {
    /// True when the plan schedules nothing.
    pub fn is_empty(&self) -> bool {
        self.likes_to_remove.is_empty() && self.posts_to_delete.is_empty()
    }

    /// Total number of scheduled mutations.
    pub fn len(&self) -> usize {
        self.likes_to_remove.len() + self.posts_to_delete.len()
    }
}
