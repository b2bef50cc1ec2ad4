//! Quantities derived during assembly that the source model does not carry.

pub mod airflow;
pub mod histogram;
pub mod window;

pub use airflow::{VentilationRates, peak_airflow_m3h};
pub use histogram::{VentilationDemand, bin_into_periods, four_period_pattern};
pub use window::{WindowPerformance, iso_10077_1, iso_10077_1_reference};
