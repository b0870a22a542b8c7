//! Read-only query surface over an extracted report dataset.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use crate::cli::{FacetsArgs, MunicipalityArgs, ReportsArgs};
use crate::model::ReportRecord;
use crate::util::read_json;

mod criteria;
mod dataset;
mod links;
mod output;
mod run;
#[cfg(test)]
mod tests;

pub use criteria::{FilterCriteria, FilterParams};
pub use dataset::{Dataset, Facets};
pub use links::{LinkedRecord, link_record};
pub use run::{run_facets, run_municipality, run_reports};

use output::*;
