//! Graphics-state attribute vocabulary and the save/restore-scoped binding
//! store.

pub mod attrs;
pub mod store;
