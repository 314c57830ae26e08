//! Dataset store: the immutable base record set.
//!
//! Loaded once at startup and shared read-only (behind `Arc`) by every session.
//! The region and product sequences are discovered from the data at load time,
//! sorted and deduplicated, and never change afterwards.

mod column_helpers;
mod error;
mod loader;


use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use salesdash_types::RegionSet;

use crate::context::{IStr, intern, resolve};

pub use error::DatasetError;
pub use loader::REQUIRED_COLUMNS;

/// One row of the sales CSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub region: IStr,
    pub product: IStr,
    pub units: f64,
    pub revenue: f64,
}

impl SalesRecord {
    pub fn new(date: NaiveDate, region: &str, product: &str, units: f64, revenue: f64) -> Self {
        Self {
            date,
            region: intern(region),
            product: intern(product),
            units,
            revenue,
        }
    }

    pub fn region_name(&self) -> &'static str {
        resolve(self.region)
    }

    pub fn product_name(&self) -> &'static str {
        resolve(self.product)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// chrono format string for the `date` column
    pub date_format: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SalesRecord>,
    regions: Vec<String>,
    products: Vec<String>,
}

impl Dataset {
    /// Load the sales CSV at `path`. Fails as a whole on the first bad row.
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file, options)?;

        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            regions = dataset.regions.len(),
            products = dataset.products.len(),
            "Loaded sales dataset"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self, DatasetError> {
        let records = loader::read_records(reader, options)?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        let regions = distinct(records.iter().map(|r| r.region));
        let products = distinct(records.iter().map(|r| r.product));
        Self {
            records,
            regions,
            products,
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Regions observed in the data, sorted and deduplicated.
    pub fn distinct_regions(&self) -> &[String] {
        &self.regions
    }

    /// Products observed in the data, sorted and deduplicated.
    pub fn distinct_products(&self) -> &[String] {
        &self.products
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.regions
            .binary_search_by(|r| r.as_str().cmp(region))
            .is_ok()
    }

    /// Every region, as a selection value.
    pub fn all_regions(&self) -> RegionSet {
        self.regions.iter().cloned().collect()
    }
}

/// Sorted, deduplicated label sequence for a set of interned keys.
pub(crate) fn distinct(keys: impl Iterator<Item = IStr>) -> Vec<String> {
    let unique: hashbrown::HashSet<IStr> = keys.collect();
    let mut labels: Vec<String> = unique.into_iter().map(|k| resolve(k).to_string()).collect();
    labels.sort();
    labels
}
