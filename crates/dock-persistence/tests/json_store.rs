use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};
use dock_core::{hash_report, AttestationRecord, InteractionMap, RunStatus};
use dock_domain::RankedLigand;
use dock_persistence::{AnalysisRecord, AnalysisStore, InMemoryAnalysisStore, JsonFileStore, ListQuery, MetadataUpdate,
                       PersistenceError};

fn ranked(name: &str, affinity: f64) -> RankedLigand {
    RankedLigand { ligand_name: name.to_string(),
                   source: format!("{name}.log"),
                   best_affinity: affinity,
                   best_pose_index: 1,
                   total_pose_count: 3 }
}

fn record(id: &str, ligands: Vec<RankedLigand>, attested: bool) -> AnalysisRecord {
    let attestation = attested.then(|| AttestationRecord { analysis_id: id.to_string(),
                                                           input_hash: hash_report("in"),
                                                           report_hash: hash_report("report"),
                                                           transaction_ref: format!("mock_tx_{id}"),
                                                           network: "devnet".to_string() });
    AnalysisRecord { analysis_id: id.to_string(),
                     timestamp: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
                     status: RunStatus::Complete,
                     uploaded_files: ligands.iter().map(|l| l.source.clone()).collect(),
                     ranked_ligands: ligands,
                     interactions: InteractionMap::new(),
                     visualizations: vec![],
                     report: Some("report".to_string()),
                     attestation,
                     errors: vec![],
                     warnings: vec![],
                     ranking_fingerprint: None,
                     tags: vec![],
                     project: None,
                     notes: String::new() }
}

#[test]
fn save_then_get_returns_same_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    let rec = record("analysis_a", vec![ranked("E", -9.5), ranked("B", -8.2)], true);
    store.save(&rec).unwrap();
    assert!(store.record_path("analysis_a").exists());
    assert_eq!(store.get("analysis_a").unwrap(), rec);

    let entries = store.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].ligand_count, 2);
    assert_eq!(entries[0].top_candidate.as_ref().map(|t| t.name.as_str()), Some("E"));
    assert!(entries[0].attestation.verified);
}

#[test]
fn index_is_most_recent_first_and_upserts() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    store.save(&record("first", vec![ranked("A", -6.0)], false)).unwrap();
    store.save(&record("second", vec![ranked("B", -7.0)], false)).unwrap();
    store.save(&record("first", vec![ranked("A", -6.5)], false)).unwrap();
    let ids: Vec<_> = store.entries().unwrap().into_iter().map(|e| e.analysis_id).collect();
    assert_eq!(ids, vec!["first", "second"]);
}

#[test]
fn missing_record_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    assert!(matches!(store.get("nope"), Err(PersistenceError::NotFound(id)) if id == "nope"));
    assert!(matches!(store.get("../etc"), Err(PersistenceError::InvalidId(_))));
}

#[test]
fn corrupt_index_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.json"), "{ not json").unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    assert!(store.entries().unwrap().is_empty());
    store.save(&record("fresh", vec![ranked("A", -6.0)], false)).unwrap();
    assert_eq!(store.entries().unwrap().len(), 1);
}

#[test]
fn corrupt_record_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.json"), "[]").unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    assert!(matches!(store.get("broken"), Err(PersistenceError::Corrupt { .. })));
}

#[test]
fn delete_removes_document_and_entry() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    store.save(&record("gone", vec![ranked("A", -6.0)], false)).unwrap();
    assert!(store.delete("gone").unwrap());
    assert!(!store.record_path("gone").exists());
    assert!(store.entries().unwrap().is_empty());
    assert!(!store.delete("gone").unwrap());
}

#[test]
fn metadata_update_touches_index_and_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    store.save(&record("tagged", vec![ranked("A", -6.0)], false)).unwrap();
    let update = MetadataUpdate { tags: Some(vec!["egfr".into(), "batch1".into()]),
                                  project: Some("Kinase".into()),
                                  notes: Some("rerun with new grid".into()) };
    assert!(store.update_metadata("tagged", &update).unwrap());
    assert!(!store.update_metadata("missing", &update).unwrap());

    let rec = store.get("tagged").unwrap();
    assert_eq!(rec.project.as_deref(), Some("Kinase"));
    assert_eq!(rec.notes, "rerun with new grid");
    assert_eq!(store.all_tags().unwrap(), vec!["batch1", "egfr"]);
    assert_eq!(store.all_projects().unwrap(), vec!["Kinase"]);

    let q = ListQuery { project: Some("kinase".into()), ..Default::default() };
    assert_eq!(store.list(&q).unwrap().len(), 1);
}

#[test]
fn statistics_over_saved_runs() {
    let store = InMemoryAnalysisStore::new();
    store.save(&record("a", vec![ranked("X", -7.0), ranked("Y", -5.0)], true)).unwrap();
    store.save(&record("b", vec![ranked("Z", -9.0)], false)).unwrap();
    let stats = store.statistics().unwrap();
    assert_eq!(stats.total_analyses, 2);
    assert_eq!(stats.total_ligands_tested, 3);
    assert_eq!(stats.verified_analyses, 1);
    assert_eq!(stats.best_overall_candidate.map(|c| c.name), Some("Z".to_string()));
}

#[test]
fn concurrent_saves_keep_every_entry() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::open(dir.path()).unwrap());
    let handles: Vec<_> = (0..8).map(|i| {
                                    let store = Arc::clone(&store);
                                    thread::spawn(move || {
                                        store.save(&record(&format!("run_{i}"), vec![ranked("A", -6.0)], false))
                                             .unwrap();
                                    })
                                })
                                .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(store.entries().unwrap().len(), 8);
}
