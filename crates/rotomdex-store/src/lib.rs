//! Annotation persistence: per-generation seen/caught id sets, one JSON
//! file, written on every mutation and rehydrated tolerantly at startup.

mod annotations;
mod error;

pub use annotations::{AnnotationStore, Partition};
pub use error::StoreError;
