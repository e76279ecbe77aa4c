//! JSON dataset documents and the providers they feed.

use std::collections::BTreeSet;
use std::io::{self, BufReader};

use accessmatch_core::{
    CandidateRecord, CatalogIndex, CatalogSnapshot, EntityRef, JobId, JobRecord,
    MemoryCandidateProvider, MemoryJobProvider,
};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::DatasetError;
use crate::fs::open_utf8_file;

/// Reference catalog plus the candidates and jobs to score against it.
///
/// Every section is optional in the JSON document and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Reference catalog.
    #[serde(default)]
    pub catalog: CatalogSnapshot,
    /// Candidate records.
    #[serde(default)]
    pub candidates: Vec<CandidateRecord>,
    /// Job postings.
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
    /// Explicit active-job listing.
    ///
    /// When absent the listing is every job whose `is_active` flag is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_listing: Option<Vec<JobId>>,
}

/// Providers built from a [`Dataset`], ready to hand to the engine.
#[derive(Debug, Clone)]
pub struct DatasetProviders {
    /// Indexed catalog.
    pub catalog: CatalogIndex,
    /// Candidate profile source.
    pub candidates: MemoryCandidateProvider,
    /// Job source.
    pub jobs: MemoryJobProvider,
}

impl Dataset {
    /// Load a dataset from a JSON file.
    ///
    /// # Errors
    /// Returns [`DatasetError::Open`] when the file cannot be opened,
    /// [`DatasetError::Read`] when reading fails, and
    /// [`DatasetError::Parse`] when the document is malformed.
    ///
    /// # Examples
    /// ```no_run
    /// use accessmatch_data::Dataset;
    /// use camino::Utf8Path;
    ///
    /// let dataset = Dataset::load(Utf8Path::new("dataset.json"))?;
    /// let providers = dataset.into_providers()?;
    /// assert!(!providers.candidates.is_empty());
    /// # Ok::<(), accessmatch_data::DatasetError>(())
    /// ```
    pub fn load(path: &Utf8Path) -> Result<Self, DatasetError> {
        let file = open_utf8_file(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                if source.is_io() {
                    DatasetError::Read {
                        path: path.to_path_buf(),
                        source: io::Error::from(source),
                    }
                } else {
                    DatasetError::Parse {
                        path: path.to_path_buf(),
                        source,
                    }
                }
            })?;
        log::info!(
            "loaded dataset {path}: {} subtypes, {} candidates, {} jobs",
            dataset.catalog.subtypes.len(),
            dataset.candidates.len(),
            dataset.jobs.len()
        );
        Ok(dataset)
    }

    /// Index the catalog and wrap the records in in-memory providers.
    ///
    /// # Errors
    /// Returns [`DatasetError::DuplicateRecord`] when a candidate or job id
    /// repeats and [`DatasetError::Catalog`] when the catalog repeats an id.
    pub fn into_providers(self) -> Result<DatasetProviders, DatasetError> {
        ensure_unique(self.candidates.iter().map(|record| record.id))?;
        ensure_unique(self.jobs.iter().map(|record| record.id))?;
        let catalog = CatalogIndex::build(self.catalog)?;
        let candidates = MemoryCandidateProvider::new(self.candidates);
        let mut jobs = MemoryJobProvider::new(self.jobs);
        if let Some(listing) = self.active_listing {
            log::debug!("using explicit listing of {} active jobs", listing.len());
            jobs = jobs.with_listing(listing);
        }
        Ok(DatasetProviders {
            catalog,
            candidates,
            jobs,
        })
    }
}

fn ensure_unique<T>(ids: impl IntoIterator<Item = T>) -> Result<(), DatasetError>
where
    T: Copy + Ord + Into<EntityRef>,
{
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DatasetError::DuplicateRecord { entity: id.into() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
