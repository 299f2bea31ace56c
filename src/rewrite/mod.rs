//! The rewrite engine: applies the mapping table to template contents.

pub mod engine;
pub mod record;

pub use engine::{predict, rewrite, Rewrite};
pub use record::{ChangeItem, ChangeRecord};
