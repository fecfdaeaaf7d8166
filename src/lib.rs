//! Rotating assignment of people to the recurring roles of midweek meetings.
//!
//! A pool sheet lists who may serve each role and when they last did;
//! [`schedule::build_pool_index`] turns it into priority queues,
//! [`schedule::plan_meetings`] fills every meeting from those queues and
//! a [`ledger::LedgerWriter`] records each pick for the next run.

pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod parser;
pub mod schedule;

pub use config::RosterConfig;
pub use error::{Result, RosterError};
