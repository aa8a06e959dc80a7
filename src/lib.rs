pub mod models;
pub mod processing;
pub mod reconciler;
pub mod utils;
pub mod validation;

pub use reconciler::{ReconcileStage, Reconciler};
pub use utils::ReconcileError;
