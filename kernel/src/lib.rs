//! Thicket Kernel: the value-level contracts of the Thicket search engine.
//!
//! # API Surface
//!
//! - [`cost::Cost`] -- checked path-cost arithmetic with a total order
//! - [`functor::NodeGenerator`], [`functor::CostFunction`], [`functor::Heuristic`]
//!   -- what a search domain implements
//! - [`functor::FiniteSetGenerator`], [`functor::LevelGenerator`] -- domains
//!   described by candidate values instead of successor lists
//! - [`functor::NodeIsState`] -- marker for node-keyed domains
//! - [`memo::Memoized`] -- caching decorator over node-keyed functors
//!
//! # Module Dependency Direction
//!
//! `cost` ← `functor` ← `memo`
//!
//! One-way only. The kernel knows nothing about traversal state; that lives
//! in `thicket_search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cost;
pub mod functor;
pub mod memo;
