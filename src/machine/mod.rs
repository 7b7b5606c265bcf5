//! # Machine Module
//!
//! The machine record plus the two pure policies applied to it on the
//! read path: default classification and disclosure masking.

pub mod classify;
pub mod errors;
pub mod mask;
pub mod model;

pub use classify::{any_real, is_default};
pub use errors::{MachineError, MachineResult};
pub use mask::{mask, mask_all, SecretField, MASK};
pub use model::{Machine, MachineId, SortKey};
