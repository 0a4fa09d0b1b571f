use std::fs;

use dock_core::hashing::hash_inputs_detailed;
use dock_core::{empty_digest, hash_inputs, hash_report};
use tempfile::tempdir;

#[test]
fn input_hash_is_order_independent() {
    let dir = tempdir().unwrap();
    let mut paths = Vec::new();
    for (name, body) in [("a.log", "   1  -8.5 0 0\n"), ("b.log", "   1  -7.1 0 0\n"), ("c.pdbqt", "REMARK VINA RESULT: -9.0\n")] {
        let p = dir.path().join(name);
        fs::write(&p, body).unwrap();
        paths.push(p.to_string_lossy().into_owned());
    }
    let (a, b, c) = (paths[0].clone(), paths[1].clone(), paths[2].clone());

    let h1 = hash_inputs(&[a.clone(), b.clone(), c.clone()]);
    let h2 = hash_inputs(&[c.clone(), a.clone(), b.clone()]);
    let h3 = hash_inputs(&[b, c, a]);
    assert_eq!(h1, h2);
    assert_eq!(h2, h3);
    assert_ne!(h1, empty_digest());
}

#[test]
fn input_hash_covers_file_content() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("x.log");
    fs::write(&p, "first").unwrap();
    let id = p.to_string_lossy().into_owned();
    let before = hash_inputs(&[id.clone()]);
    fs::write(&p, "second").unwrap();
    assert_ne!(before, hash_inputs(&[id]));
}

#[test]
fn unreadable_input_degrades_to_identifier() {
    let missing = "/no/such/dir/ghost.log";
    let detailed = hash_inputs_detailed(&[missing]);
    assert_eq!(detailed.unreadable, vec![missing.to_string()]);
    assert_eq!(detailed.digest, hash_report(missing));
    // determinista en llamadas repetidas
    assert_eq!(hash_inputs(&[missing]), detailed.digest);
}

#[test]
fn report_hash_is_deterministic() {
    let text = "# Report\n\nE ranks first.";
    assert_eq!(hash_report(text), hash_report(text));
    assert_ne!(hash_report(text), hash_report("# Report"));
    assert_eq!(hash_report(""), hash_inputs::<String>(&[]));
}
