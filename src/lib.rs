//! # repo-rank
//!
//! A search proxy over GitHub's repository search. It turns keywords or tag
//! filters into an upstream query, fetches one page or merges the first few,
//! deduplicates and ranks the results by stars, and caps what it reports to
//! the first 100 results.
//!
//! ## Pipeline
//!
//! ```text
//!   GET /api/projects?q=..&tags=..&page=..&all=..
//!                  │
//!                  ▼
//!        ┌───────────────────┐
//!        │   Query Builder   │  tags > keywords > "stars:>0"
//!        └─────────┬─────────┘
//!                  ▼
//!        ┌───────────────────┐      ┌──────────────────────┐
//!        │    Aggregator     │ ───▶ │  PageSource (GitHub) │
//!        │ single page (≤10) │      │  10 per page, stars  │
//!        │ or pages 1..=5    │ ◀─── │  desc, with timeout  │
//!        └─────────┬─────────┘      └──────────────────────┘
//!                  ▼
//!        ┌───────────────────┐
//!        │ Normalize, Dedupe │  first occurrence wins
//!        │   & Rank (stable) │  stars descending
//!        └─────────┬─────────┘
//!                  ▼
//!        ┌───────────────────┐
//!        │   Window Capper   │  total ≤ 100, page ∈ 1..=10
//!        └─────────┬─────────┘
//!                  ▼
//!        { items, total_count }  or  { error, details }
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration (bind address, GitHub URL, token, CORS)
//! - [`models`] - Request parsing, raw/normalized records and response types
//! - [`error`] - Failure classification for upstream fetches
//! - [`upstream`] - The `PageSource` trait and the GitHub client
//! - [`search`] - Query building, aggregation, normalization, ranking, capping
//! - [`api`] - Axum router and handlers
//! - [`state`] - Shared application state

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod state;
pub mod upstream;
