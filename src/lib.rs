//! tfcost library
//!
//! Core parsing and pricing pipeline for the tfcost CLI: Terraform text in,
//! priced cost lines out, plus the Gemini advisor boundary.

pub mod advisor;
pub mod config;
pub mod error;
pub mod parser;
pub mod prices;
pub mod pricing;
pub mod report;

// Re-export commonly used types
pub use parser::{parse_terraform, ParsedResource};
pub use pricing::{calculate_costs, total_cost, CostLine, Provider};
