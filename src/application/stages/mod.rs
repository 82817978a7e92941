//! Pure per-symbol pipeline stages. None of these perform I/O or fail.

pub mod confirmation;
pub mod context;
pub mod levels;
pub mod risk;
pub mod setup;
