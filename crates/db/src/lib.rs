//! Flat-file persistence for the opportunity table.
//!
//! The table lives in a single CSV file that is rewritten in full after every
//! mutation. [`OpportunityStore`] owns the in-memory rows; [`csv`] and
//! [`xlsx`] are the codecs for the persisted file and the download.

pub mod csv;
pub mod error;
pub mod store;
pub mod xlsx;

pub use error::StoreError;
pub use store::OpportunityStore;
