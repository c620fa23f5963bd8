//! Skin analysis recommendation service.
//!
//! A capture source produces an [`models::Analysis`]; the resolver in
//! [`services::resolver`] maps it, together with the user's profile, onto the
//! static product [`catalog`] and a list of care tips.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
