use dock_core::RunStatus;
use dock_persistence::{AnalysisStore, JsonFileStore, ListQuery};
use docksight::{AppConfig, DockingAnalysisPipeline};
use tempfile::TempDir;

fn config(dir: &TempDir) -> AppConfig {
    let storage = dir.path().join("analyses").to_string_lossy().into_owned();
    let viz = dir.path().join("viz").to_string_lossy().into_owned();
    AppConfig::from_lookup(move |key| match key {
                               "DOCKSIGHT_STORAGE_DIR" => Some(storage.clone()),
                               "DOCKSIGHT_VISUALIZATION_DIR" => Some(viz.clone()),
                               _ => None,
                           }).unwrap()
}

#[test]
fn completed_run_is_saved_listed_and_counted() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);
    let ligand = dir.path().join("aspirin.log");
    std::fs::write(&ligand, "   1        -7.9      0.000      0.000\n   2        -7.1      1.900      2.400\n").unwrap();

    let result = DockingAnalysisPipeline::from_config(&cfg).run(&[ligand.to_string_lossy().into_owned()]);
    assert!(result.is_complete());

    let store = JsonFileStore::from_config(&cfg.storage).unwrap();
    store.save(&result.to_record(vec!["cox".into()], Some("Analgesics".into()), None)).unwrap();

    let loaded = store.get(&result.analysis_id).unwrap();
    assert_eq!(loaded.ranked_ligands, result.ranked_ligands);
    assert_eq!(loaded.ranking_fingerprint, result.ranking_fingerprint);
    assert_eq!(loaded.attestation, result.attestation);

    let hits = store.list(&ListQuery { search: Some("aspirin".into()),
                                       ..Default::default() })
                    .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].project.as_deref(), Some("Analgesics"));
    assert!(hits[0].attestation.verified);

    let stats = store.statistics().unwrap();
    assert_eq!(stats.total_analyses, 1);
    assert_eq!(stats.verified_analyses, 1);
    assert_eq!(stats.best_overall_candidate.map(|c| c.affinity), Some(-7.9));
}

#[test]
fn failed_run_is_persisted_with_its_errors() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);
    let result = DockingAnalysisPipeline::from_config(&cfg).run(&["missing/ligand.log"]);
    assert_eq!(result.status, RunStatus::Failed);

    let store = JsonFileStore::from_config(&cfg.storage).unwrap();
    store.save(&result.to_record(vec![], None, Some("bad upload".into()))).unwrap();
    let loaded = store.get(&result.analysis_id).unwrap();
    assert_eq!(loaded.status, RunStatus::Failed);
    assert_eq!(loaded.errors, vec!["File not found: missing/ligand.log".to_string()]);
    assert_eq!(loaded.notes, "bad upload");
    assert!(store.entries().unwrap()[0].top_candidate.is_none());
}
