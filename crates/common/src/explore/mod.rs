//! Single-level exploration of a flat namespace
//!
//! The core pipeline for rendering a bucket's flat key space as one
//! directory level at a time:
//!
//! - **[`Node`]**: the decorated result entity, a directory or an object
//! - **[`classify`]**: maps one raw listing row to its node shape
//! - **[`stream_entries`] / [`drain_entries`]**: the query engine, draining
//!   a paginated listing with the self-reference filter applied
//! - **[`Explorer`]**: orchestrates metadata fetch + listing + classification
//!
//! Descending into a directory is the caller's move: re-invoke the explorer
//! with the directory's full path as the new prefix.

mod classify;
mod explorer;
mod node;
mod query;

pub use classify::{classify, Classified, ClassifyError, EntryKind};
pub use explorer::{ExploreError, Explorer, DELIMITER};
pub use node::{Node, NodeKind};
pub use query::{drain_entries, stream_entries};
