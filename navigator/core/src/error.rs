//! Navigation Errors
//!
//! The navigator never treats these as faults. Command-surface operations log
//! them at warn level and become no-ops; the `try_*` variants and the registry
//! hand them back to callers that want to react.

use thiserror::Error;

use crate::element::ElementId;
use crate::navigator::NavigatorState;

/// Conditions reported by the navigator and its registry
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The operation referenced an element that was never registered
    #[error("No UI element registered as '{0}'")]
    UnknownIdentity(ElementId),

    /// A second element tried to register under an existing identity
    #[error("UI element '{0}' is already registered; keeping the first registration")]
    DuplicateRegistration(ElementId),

    /// `go_back` found no history and no default view
    #[error("No navigation history available")]
    EmptyHistory,

    /// The navigator is not accepting commands in its current state
    #[error("Navigator is not ready (state: {0})")]
    NotReady(NavigatorState),
}

impl NavigationError {
    /// The element the error refers to, if any
    #[must_use]
    pub fn element(&self) -> Option<&ElementId> {
        match self {
            Self::UnknownIdentity(id) | Self::DuplicateRegistration(id) => Some(id),
            Self::EmptyHistory | Self::NotReady(_) => None,
        }
    }
}
