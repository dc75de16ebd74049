//! Domain model for the product opportunity intake form.
//!
//! Everything in this crate is pure and in-memory: the row schema, option
//! sets, the decision workflow and the navigation rules. Persistence lives in
//! `intake-db`, the HTTP surface in `intake-api`.

pub mod decision;
pub mod error;
pub mod navigation;
pub mod opportunity;
pub mod status;
pub mod types;
pub mod validation;
