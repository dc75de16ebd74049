//! Navigation state: which view is active and which record is selected.
//!
//! The URL query parameter is the only source of truth for the selection.
//! It is reconciled against the store on every request, so a stale link
//! (for example to a deleted record) quietly falls back to the list.

use serde::{Deserialize, Serialize};

use crate::types::OpportunityId;

/// Query parameter carrying the selected opportunity id.
pub const QUERY_PARAM: &str = "opportunity_id";

/// Result of reconciling the URL parameter with the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    /// No parameter: list view, nothing selected.
    List,
    /// Parameter names an existing record: detail view.
    Detail(OpportunityId),
    /// Parameter names an unknown record: list view, and the parameter must
    /// be cleared from the URL.
    Stale,
}

impl Reconciled {
    pub fn selected_id(&self) -> Option<&str> {
        match self {
            Self::Detail(id) => Some(id),
            Self::List | Self::Stale => None,
        }
    }

    /// Whether the caller has to drop the parameter from the URL.
    pub fn clears_param(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Derive the selection from the URL parameter.
///
/// Any selection held from an earlier request is ignored; only `param` and
/// the current contents of the store (via `exists`) matter.
pub fn reconcile(param: Option<&str>, exists: impl Fn(&str) -> bool) -> Reconciled {
    match param {
        None => Reconciled::List,
        Some(id) if exists(id) => Reconciled::Detail(id.to_string()),
        Some(_) => Reconciled::Stale,
    }
}

/// Counter bumped every time navigation returns to the list.
///
/// Detail forms carry the key they were rendered with. A submission with an
/// older key belongs to a form that was left behind and its edits are
/// dropped.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ViewKey(pub u64);

impl ViewKey {
    /// Advance to the next key and return it.
    pub fn bump(&mut self) -> ViewKey {
        self.0 += 1;
        *self
    }

    /// Whether a form rendered with `submitted` is still current.
    pub fn accepts(self, submitted: ViewKey) -> bool {
        self == submitted
    }
}

impl std::fmt::Display for ViewKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
