//! Dem: energy-adaptive three-day health plans across diet, exercise and
//! mental wellness.

pub mod ai;
pub mod catalog;
pub mod config;
pub mod core;
pub mod planner;
pub mod progress;
pub mod selector;
pub mod tracker;

pub use crate::catalog::Catalog;
pub use crate::config::Config;
pub use crate::core::{AppState, DemError, EnergyLevel, Pillar, Plan, Result, Store, UserProfile};
pub use crate::planner::PlanGenerator;
pub use crate::tracker::{PlanTracker, MIN_SELECTED_FOODS};
