//! Test helpers for writing datasets and invoking commands.

use std::fs;

use accessmatch_core::test_support::{
    NARROW_DOORWAYS, RAMPS, STAIRS, WHEELCHAIR_USER, WIDE_DOORS, candidate, job, sample_snapshot,
};
use accessmatch_core::{JobRecord, WorkRegime};
use accessmatch_data::Dataset;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use super::*;

/// Candidate with a wheelchair and two barriers.
pub(super) const CANDIDATE: u64 = 1;
/// Job accepting the candidate and resolving both barriers.
pub(super) const FULL_FIT: u64 = 10;
/// Job resolving stairs only and accepting no subtype.
pub(super) const PARTIAL_FIT: u64 = 11;

/// Temporary directory holding a dataset and any cache databases.
pub(super) struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write the sample dataset and return its path.
    pub(super) fn dataset(&self) -> Utf8PathBuf {
        let payload = serde_json::to_vec_pretty(&sample_dataset()).expect("serialise dataset");
        self.write("dataset.json", &payload)
    }

    pub(super) fn write(&self, name: &str, contents: &[u8]) -> Utf8PathBuf {
        let path = self.root.join(name);
        fs::write(&path, contents).expect("write workspace file");
        path
    }
}

pub(super) fn sample_dataset() -> Dataset {
    let remote = JobRecord {
        work_regime: Some(WorkRegime::Remote),
        ..job(FULL_FIT, &[WHEELCHAIR_USER], &[RAMPS, WIDE_DOORS])
    };
    Dataset {
        catalog: sample_snapshot(),
        candidates: vec![candidate(
            CANDIDATE,
            &[(WHEELCHAIR_USER, &[STAIRS, NARROW_DOORWAYS])],
        )],
        jobs: vec![remote, job(PARTIAL_FIT, &[], &[RAMPS])],
        active_listing: None,
    }
}

/// Parse `argv` (without the binary name) and run the command into `stdout`.
pub(super) fn invoke(argv: &[&str], stdout: &mut Vec<u8>) -> Result<(), CliError> {
    let cli = Cli::try_parse_from(std::iter::once("accessmatch").chain(argv.iter().copied()))?;
    dispatch(cli.command, stdout)
}
