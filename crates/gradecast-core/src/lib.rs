//! gradecast-core: grade standing, feasibility and what-if projection.
//!
//! The engine modules (`standing`, `feasibility`, `whatif`, `scale`,
//! `structure`) are pure functions over caller-supplied assessments. File and
//! config I/O live in `parser`, `config`, and `report`.

pub mod api;
pub mod config;
pub mod error;
pub mod feasibility;
mod ledger;
pub mod model;
pub mod parser;
pub mod report;
pub mod scale;
pub mod standing;
pub mod structure;
pub mod whatif;
