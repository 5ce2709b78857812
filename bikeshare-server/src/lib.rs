//! Bike-share station availability server.
//!
//! Polls the GBFS station information and station status feeds, joins them
//! per station, and serves the latest joined snapshot over HTTP and as a
//! terminal table without readers ever waiting on the upstream.

pub mod config;
pub mod display;
pub mod gbfs;
pub mod join;
pub mod refresh;
pub mod view;
pub mod web;
