//! Persistence adapter — maps the in-memory document and tracker models
//! to/from the hosted row store.
//!
//! Every query is scoped by the authenticated user's id. No transaction
//! spans multiple tables: a tracker view may briefly show a resume title
//! that was since renamed, refreshed on the next list fetch.

pub mod applications;
pub mod handlers;
pub mod resumes;
