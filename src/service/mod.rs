//! GenericService: repository orchestration and partial-update merge.

mod generic;
pub use generic::{decode_record, merge_partial, GenericService};
