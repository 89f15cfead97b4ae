//! Parameter catalog, discrepancy engine and panel layout engine for
//! checking analytic line-shape derivatives against finite differences.
//!
//! This crate is free of I/O beyond reading configuration files and has no
//! plotting dependency:
//! - [`catalog`] holds the table of perturbed parameters
//! - [`discrepancy`] turns a perturbed profile into a normalized error curve
//! - [`layout`] places catalog entries on the figure grid
//! - [`render`] is the interface plotting backends implement

pub mod axis;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod discrepancy;
pub mod error;
pub mod layout;
pub mod render;
pub mod stokes;

pub use axis::FrequencyGrid;
pub use catalog::{Catalog, KnownDeviation, PerturbationEntry};
pub use config::{CheckConfig, DerivativeTolerances};
pub use dataset::{Dataset, FieldSelector, Record, STOKES_COMPONENTS};
pub use discrepancy::{Baseline, ErrorCurve, compute, compute_entry};
pub use error::{Error, Result};
pub use layout::{GridLayout, Panel, PanelCoord, Placement, place};
pub use render::{FigureRenderer, PanelContent};
pub use stokes::{Stokvec, StokvecMatrix};
