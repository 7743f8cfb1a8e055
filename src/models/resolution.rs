//! Outcome of a calculation that may depend on an external index rate.

use serde::{Deserialize, Serialize};

use super::IncreaseMethod;

/// Either a fully computed value or the index method that blocked it.
///
/// Index-based increase methods (wage index, PPI, CPI) cannot be resolved by
/// the engine itself. Rather than guessing a rate, a calculation returns
/// [`Resolution::NeedsExternalRate`] so the caller can supply the real rate
/// on the [`IncreasePolicy`](super::IncreasePolicy) and retry, or reject the
/// configuration.
///
/// # Example
///
/// ```
/// use housing_plan_engine::models::{IncreaseMethod, Resolution};
///
/// let pending: Resolution<u32> = Resolution::NeedsExternalRate(IncreaseMethod::Cpi);
/// assert!(!pending.is_resolved());
/// assert_eq!(pending.pending_method(), Some(IncreaseMethod::Cpi));
///
/// let done = Resolution::Resolved(7).map(|v| v * 2);
/// assert_eq!(done.resolved(), Some(14));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Resolution<T> {
    /// The calculation completed.
    Resolved(T),
    /// The calculation needs a caller-supplied rate for this method.
    NeedsExternalRate(IncreaseMethod),
}

impl<T> Resolution<T> {
    /// Returns true if the value was computed.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    /// Consumes the resolution, returning the computed value if any.
    pub fn resolved(self) -> Option<T> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::NeedsExternalRate(_) => None,
        }
    }

    /// Borrows the computed value if any.
    pub fn as_resolved(&self) -> Option<&T> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::NeedsExternalRate(_) => None,
        }
    }

    /// The method still waiting for a rate, if any.
    pub fn pending_method(&self) -> Option<IncreaseMethod> {
        match self {
            Resolution::Resolved(_) => None,
            Resolution::NeedsExternalRate(method) => Some(*method),
        }
    }

    /// Maps the computed value, passing an unresolved method through.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resolution<U> {
        match self {
            Resolution::Resolved(value) => Resolution::Resolved(f(value)),
            Resolution::NeedsExternalRate(method) => Resolution::NeedsExternalRate(method),
        }
    }
}
