// Candidate screening: keyword heuristic scoring, batch ranking, pool reports.
// The engine is pure; handlers and validation are the only HTTP-aware parts.

pub mod batch;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod report;
pub mod tables;
pub mod text;
pub mod validation;
