//! # homedash-app
//!
//! Application layer — the animation driver and the dashboard use-cases.
//!
//! ## Responsibilities
//! - Provide the [`animation::AnimationDriver`], a restartable periodic tick
//!   source built on `tokio::time`
//! - Provide the [`services::dashboard::Dashboard`] service that registers,
//!   removes, switches and reports devices, and advances brightness ramps
//!   one step per tick
//!
//! ## Dependency rule
//! Depends on `homedash-domain` only (plus `tokio::time` for the ticker).
//! Never performs console or file IO; the binary does that.

pub mod animation;
pub mod services;
