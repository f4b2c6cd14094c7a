//! Region allow-list.
//!
//! Regions live in a relational table and gate every listing and file
//! request. The HTTP layer only sees the [`RegionStore`] trait, so the
//! SQLite backend can be swapped for a mock in tests.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP handlers              │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │            RegionValidator              │
//! │   (per-request lookup, fails closed)    │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           RegionStore Trait             │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │          SqliteRegionStore              │
//! └─────────────────────────────────────────┘
//! ```

mod store;
mod validator;

pub use store::{Region, RegionStore, SqliteRegionStore};
pub use validator::RegionValidator;
