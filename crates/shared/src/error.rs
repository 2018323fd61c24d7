use thiserror::Error;

use crate::domain::{StepId, WorkItemId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate work item id '{0}'")]
    DuplicateWorkItem(WorkItemId),
    #[error("duplicate process step '{0}'")]
    DuplicateStep(StepId),
    #[error("work item '{0}' has an empty title")]
    UntitledWorkItem(WorkItemId),
}
