//! Lifecycle classification: where a car sits in the import pipeline.
//!
//! The stage is derived from which logistics fields are filled in, not from
//! the free-form `status` column. Precedence, first match wins:
//!
//! 1. `Shipping`: a container number is present.
//! 2. `Warehouse`: a valid warehouse date is present.
//! 3. `New`: a valid purchase date is present.
//! 4. `Unclassified`: none of the above.

use serde::Serialize;

use crate::model::Car;

/// Date sentinel the backend stores for "no date".
const ZERO_DATE: &str = "0000-00-00";

/// The logistics fields that decide a car's stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleInput<'a> {
    pub purchase_date: Option<&'a str>,
    pub warehouse_date: Option<&'a str>,
    pub container_number: Option<&'a str>,
}

/// A car's coarse position in the import pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStage {
    /// Purchased, not yet in the warehouse.
    New,
    /// Received at the warehouse, not yet containerized.
    Warehouse,
    /// Loaded into a container.
    Shipping,
    /// No usable lifecycle signal yet.
    Unclassified,
}

impl LifecycleStage {
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Warehouse => "warehouse",
            Self::Shipping => "shipping",
            Self::Unclassified => "unclassified",
        }
    }
}

/// Classify a car's lifecycle stage.
pub fn classify(input: &LifecycleInput<'_>) -> LifecycleStage {
    if has_container(input.container_number) {
        LifecycleStage::Shipping
    } else if is_valid_date(input.warehouse_date) {
        LifecycleStage::Warehouse
    } else if is_valid_date(input.purchase_date) {
        LifecycleStage::New
    } else {
        LifecycleStage::Unclassified
    }
}

/// Whether a date field carries a date.
///
/// Blank values, the `0000-00-00` sentinel, and a literal `null` (any case)
/// don't count. Anything else does; the calendar value itself is not checked.
pub fn is_valid_date(value: Option<&str>) -> bool {
    value.map(str::trim).is_some_and(|v| {
        !v.is_empty() && v != ZERO_DATE && !v.eq_ignore_ascii_case("null")
    })
}

/// Whether a container number is filled in.
pub fn has_container(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Per-stage car counts for a dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    pub all: usize,
    pub new: usize,
    pub warehouse: usize,
    pub shipping: usize,
    pub unclassified: usize,
}

impl StageCounts {
    /// Classify each car once and count the results.
    pub fn tally<'a>(cars: impl IntoIterator<Item = &'a Car>) -> Self {
        let mut counts = Self::default();
        for car in cars {
            counts.all += 1;
            match classify(&car.lifecycle()) {
                LifecycleStage::New => counts.new += 1,
                LifecycleStage::Warehouse => counts.warehouse += 1,
                LifecycleStage::Shipping => counts.shipping += 1,
                LifecycleStage::Unclassified => counts.unclassified += 1,
            }
        }
        counts
    }

    /// Count for a single stage.
    pub fn get(&self, stage: LifecycleStage) -> usize {
        match stage {
            LifecycleStage::New => self.new,
            LifecycleStage::Warehouse => self.warehouse,
            LifecycleStage::Shipping => self.shipping,
            LifecycleStage::Unclassified => self.unclassified,
        }
    }
}

/// Cars currently at `stage`, in their original order.
pub fn filter_by_stage(cars: &[Car], stage: LifecycleStage) -> Vec<&Car> {
    cars.iter()
        .filter(|car| classify(&car.lifecycle()) == stage)
        .collect()
}
