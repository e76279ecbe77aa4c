//! Tests for dataset loading and provider construction.

use std::fs;

use accessmatch_core::test_support::{
    RAMPS, STAIRS, WHEELCHAIR_USER, WIDE_DOORS, candidate, job, sample_snapshot,
};
use accessmatch_core::{
    CandidateId, CandidateProfileProvider, CatalogError, CatalogProvider, DisabilityType,
    JobProvider, JobRecord,
};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;

struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn write(&self, name: &str, contents: &[u8]) -> Utf8PathBuf {
        let path = self.root.join(name);
        fs::write(&path, contents).expect("write dataset");
        path
    }

    fn write_dataset(&self, dataset: &Dataset) -> Utf8PathBuf {
        let payload = serde_json::to_vec_pretty(dataset).expect("serialise dataset");
        self.write("dataset.json", &payload)
    }
}

#[fixture]
fn workspace() -> Workspace {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 temp dir");
    Workspace { _tmp: tmp, root }
}

fn sample_dataset() -> Dataset {
    let closed = JobRecord {
        is_active: false,
        ..job(3, &[WHEELCHAIR_USER], &[RAMPS])
    };
    Dataset {
        catalog: sample_snapshot(),
        candidates: vec![candidate(1, &[(WHEELCHAIR_USER, &[STAIRS])])],
        jobs: vec![job(1, &[WHEELCHAIR_USER], &[RAMPS, WIDE_DOORS]), job(2, &[], &[]), closed],
        active_listing: None,
    }
}

#[rstest]
fn written_datasets_load_unchanged(workspace: Workspace) {
    let path = workspace.write_dataset(&sample_dataset());
    let loaded = Dataset::load(&path).expect("load dataset");
    assert_eq!(loaded, sample_dataset());
}

#[rstest]
fn providers_expose_the_loaded_records(workspace: Workspace) {
    let path = workspace.write_dataset(&sample_dataset());
    let providers = Dataset::load(&path)
        .and_then(Dataset::into_providers)
        .expect("build providers");

    assert_eq!(providers.catalog.barriers_for_subtype(WHEELCHAIR_USER).len(), 2);
    assert!(providers.candidates.get_profile(CandidateId(1)).is_ok());
    assert_eq!(
        providers.jobs.active_jobs().expect("listing"),
        vec![JobId(1), JobId(2)]
    );
}

#[rstest]
fn explicit_listing_overrides_active_flags(workspace: Workspace) {
    let dataset = Dataset {
        active_listing: Some(vec![JobId(3), JobId(1)]),
        ..sample_dataset()
    };
    let path = workspace.write_dataset(&dataset);
    let providers = Dataset::load(&path)
        .and_then(Dataset::into_providers)
        .expect("build providers");
    assert_eq!(
        providers.jobs.active_jobs().expect("listing"),
        vec![JobId(3), JobId(1)]
    );
}

#[rstest]
fn empty_documents_default_every_section(workspace: Workspace) {
    let path = workspace.write("empty.json", b"{}");
    let dataset = Dataset::load(&path).expect("load dataset");
    assert_eq!(dataset, Dataset::default());
}

#[rstest]
fn missing_files_fail_to_open(workspace: Workspace) {
    let path = workspace.root.join("absent.json");
    let err = Dataset::load(&path).expect_err("file is missing");
    match err {
        DatasetError::Open { path: reported, source } => {
            assert_eq!(reported, path);
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected Open, found {other:?}"),
    }
}

#[rstest]
#[case::truncated(b"{ \"candidates\": [".as_slice())]
#[case::wrong_shape(b"{ \"jobs\": { \"id\": 1 } }".as_slice())]
#[case::negative_id(b"{ \"candidates\": [{ \"id\": -1 }] }".as_slice())]
fn malformed_documents_fail_to_parse(workspace: Workspace, #[case] contents: &[u8]) {
    let path = workspace.write("broken.json", contents);
    let err = Dataset::load(&path).expect_err("document is malformed");
    assert!(
        matches!(&err, DatasetError::Parse { path: reported, .. } if *reported == path),
        "unexpected error: {err:?}"
    );
}

#[test]
fn repeated_candidates_are_rejected() {
    let dataset = Dataset {
        candidates: vec![candidate(1, &[]), candidate(2, &[]), candidate(1, &[])],
        ..Dataset::default()
    };
    let err = dataset.into_providers().expect_err("duplicate candidate");
    assert!(matches!(
        err,
        DatasetError::DuplicateRecord {
            entity: EntityRef::Candidate(CandidateId(1))
        }
    ));
}

#[test]
fn repeated_jobs_are_rejected() {
    let dataset = Dataset {
        jobs: vec![job(7, &[], &[]), job(7, &[], &[])],
        ..Dataset::default()
    };
    let err = dataset.into_providers().expect_err("duplicate job");
    assert_eq!(err.to_string(), "dataset lists job 7 more than once");
}

#[test]
fn catalog_errors_are_wrapped() {
    let mut snapshot = sample_snapshot();
    let first = snapshot.types.first().cloned().expect("sample has types");
    snapshot.types.push(DisabilityType {
        name: "Duplicate".to_owned(),
        ..first
    });
    let dataset = Dataset {
        catalog: snapshot,
        ..Dataset::default()
    };
    let err = dataset.into_providers().expect_err("duplicate type");
    assert!(matches!(
        err,
        DatasetError::Catalog(CatalogError::DuplicateEntity { .. })
    ));
}
