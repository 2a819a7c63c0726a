//! seoscore - SEO checklist auditing with weighted scoring
//!
//! Walks a site through a categorized SEO checklist, scores each category by
//! importance-weighted pass rate, and exports the result as text, JSON, CSV,
//! Markdown or a printable HTML page. A best-effort page analyzer can fetch a
//! URL and suggest statuses for the checks it is able to recognize.

pub mod analyzer;
pub mod answers;
pub mod checklist;
pub mod cli;
pub mod config;
pub mod models;
pub mod reporters;
pub mod scoring;
