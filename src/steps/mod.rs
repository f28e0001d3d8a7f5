//! Workflow steps and task templating.
//!
//! - [`Step`] - A named unit of work bound to an executable unit
//! - [`Condition`] - Guard deciding whether a step runs
//! - [`template`] - `{variable}` substitution for task templates

pub mod step;
pub mod template;

pub use step::{Condition, Step};
pub use template::{parse_template, placeholders, render, Segment};
