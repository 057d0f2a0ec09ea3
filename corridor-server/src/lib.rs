//! Route advisory server for a single bus corridor.
//!
//! Answers: "I'm at this stop (or here), how do I get to that stop, and
//! where is my bus?" Resolution picks a direct route or a single transfer
//! and decorates each segment with road geometry and a status relative to
//! the nearest bus behind the rider.

pub mod cache;
pub mod domain;
pub mod geometry;
pub mod planner;
pub mod registry;
pub mod web;
