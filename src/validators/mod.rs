//! Project file validation
//!
//! Schema data and the walk that applies it. [`rules`] carries the static
//! per-element schemas, [`tasks`] the built-in task table, and
//! [`validation`] the pre-order walk that turns both into issues.

pub mod rules;
pub mod tasks;
pub mod validation;

pub use rules::{AttributePolicy, ChildPolicy, ElementSchema};
pub use tasks::{built_in_task, TaskSchema};
pub use validation::validate;
