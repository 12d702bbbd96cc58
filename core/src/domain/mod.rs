//! Business domains. Each one supplies its record types, vocabulary and
//! field distributions to the generic generator.

pub mod education;
pub mod manufacturing;
pub mod retail;

pub use education::{EducationModel, EducationParams};
pub use manufacturing::{ManufacturingModel, ManufacturingParams};
pub use retail::{RetailModel, RetailParams};

use crate::error::{SimError, SimResult};

/// Every vocabulary list a generator picks from must have at least one entry.
pub(crate) fn non_empty<T>(field: &'static str, items: &[T]) -> SimResult<()> {
    if items.is_empty() {
        return Err(SimError::EmptyVocabulary { field });
    }
    Ok(())
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
