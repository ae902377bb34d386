//! Report rendering and output.
//!
//! [`ReportFormatter`] is pure presentation: it renders numeric results as
//! fixed-structure markdown (the strength/direction labels and table layout
//! are part of the observable contract). [`AnalysisReport`] +
//! [`ReportWriter`] produce the JSON envelope consumed by frontends and the
//! `--emit-report` CLI flag.

mod generator;

pub use generator::{AnalysisReport, ReportFormatter, ReportWriter};
