//! Interactive explorer for an energy supplier's customer data API.
//!
//! Models a mock customer account, explains its fields through a catalog of
//! API concepts and drives the dashboard and guided story with two small
//! state machines.

/// Mock customer account fixture.
pub mod account;
/// API concept catalog.
pub mod concepts;
pub mod config;
pub mod io;
pub mod machine;
pub mod tariff;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "tui")]
pub mod tui;
