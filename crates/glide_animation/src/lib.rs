//! Glide Timing
//!
//! Timer and frame scheduling for Glide widgets.
//!
//! # Features
//!
//! - **One-shot and repeating timers** keyed by [`TimerId`](glide_core::TimerId)
//! - **Frame requests** for "apply, yield one rendering tick, apply" sequencing
//! - **Deterministic clock**: advance time explicitly with [`TimerScheduler::advance`]
//! - **Wall clock**: drive from a host loop with [`TimerScheduler::tick`]
//! - **Weak handles**: widgets hold a [`SchedulerHandle`] that degrades to a
//!   no-op once the scheduler is gone

pub mod scheduler;

pub use scheduler::{SchedulerHandle, SchedulerStats, TimerScheduler};
