pub mod headers;
pub mod reconcile;
