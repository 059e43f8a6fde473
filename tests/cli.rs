#![allow(deprecated)]

#[allow(unused_imports)]
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn store_path(temp: &TempDir) -> PathBuf {
    temp.path().join("notes.json")
}

fn cmd(temp: &TempDir) -> assert_cmd::Command {
    let mut c = assert_cmd::Command::cargo_bin("card_notes").unwrap();
    c.current_dir(temp.path())
        .env("CARD_NOTES_FILE", store_path(temp))
        .env("NO_COLOR", "1")
        .env_remove("CARD_NOTES_THEME")
        .env_remove("RUST_LOG");
    c
}

/// `(id, title, content)` for every stored note, in file order.
fn stored_notes(path: &Path) -> Vec<(String, String, String)> {
    let raw = fs::read_to_string(path).expect("store file");
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    doc["notes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| {
            (
                n["id"].as_str().unwrap().to_string(),
                n["title"].as_str().unwrap().to_string(),
                n["content"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn stdout_of(c: &mut assert_cmd::Command) -> String {
    let out = c.assert().success().get_output().stdout.clone();
    String::from_utf8_lossy(&out).to_string()
}

#[test]
fn new_persists_and_lists_as_card() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["new", "Groceries", "Milk,", "eggs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created note"));

    let notes = stored_notes(&store_path(&temp));
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].1, "Groceries");
    assert_eq!(notes[0].2, "Milk, eggs");

    let out = stdout_of(cmd(&temp).args(["list"]));
    assert!(out.contains("Notes"));
    assert!(out.contains("1 note"));
    assert!(out.contains("Groceries"));
    assert!(out.contains("Milk, eggs"));
    assert!(out.contains(&notes[0].0[..8]));
}

#[test]
fn blank_title_saves_nothing() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["new", "   ", "body"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title cannot be empty"));
    assert!(!store_path(&temp).exists());

    cmd(&temp).args(["new"]).assert().failure();
}

#[test]
fn list_orders_by_date() {
    let temp = TempDir::new().unwrap();
    fs::write(
        store_path(&temp),
        r#"{
  "notes": [
    { "title": "first", "content": "", "date": "01.01.2024 10:00" },
    { "title": "second", "content": "", "date": "02.01.2024 09:00" },
    { "title": "third", "content": "", "date": "15.06.2023 08:00" }
  ]
}"#,
    )
    .unwrap();

    let out = stdout_of(cmd(&temp).args(["list"]));
    let pos = |needle: &str| out.find(needle).unwrap();
    assert!(pos("02.01.2024") < pos("01.01.2024"));
    assert!(pos("01.01.2024") < pos("15.06.2023"));
    assert!(out.contains("3 notes"));
}

#[test]
fn malformed_store_lists_empty() {
    let temp = TempDir::new().unwrap();
    fs::write(store_path(&temp), "{ broken").unwrap();
    cmd(&temp)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 notes"))
        .stdout(predicate::str::contains("No notes yet"));
}

#[test]
fn edit_with_flags_keeps_identity() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["new", "Draft", "old body"]).assert().success();
    let (id, _, _) = stored_notes(&store_path(&temp)).remove(0);

    cmd(&temp)
        .args(["edit", &id[..8], "--title", "Final"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    let notes = stored_notes(&store_path(&temp));
    assert_eq!(
        notes,
        vec![(id.clone(), "Final".to_string(), "old body".to_string())]
    );

    cmd(&temp)
        .args(["view", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Final"))
        .stdout(predicate::str::contains("old body"));

    cmd(&temp)
        .args(["edit", &id, "--title", " "])
        .assert()
        .failure();
    assert_eq!(stored_notes(&store_path(&temp))[0].1, "Final");
}

#[test]
fn edit_through_editor() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["new", "Keep", "same body"]).assert().success();
    let (id, _, _) = stored_notes(&store_path(&temp)).remove(0);

    cmd(&temp)
        .env("EDITOR", "true")
        .args(["edit", &id])
        .assert()
        .success();
    let notes = stored_notes(&store_path(&temp));
    assert_eq!(notes[0].1, "Keep");
    assert_eq!(notes[0].2, "same body");

    cmd(&temp)
        .env("EDITOR", "false")
        .args(["edit", &id])
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn cleared_title_in_editor_echoes_the_edit() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["new", "Keep", "old body"]).assert().success();
    let (id, _, _) = stored_notes(&store_path(&temp)).remove(0);

    let script = temp.path().join("clear-title.sh");
    fs::write(
        &script,
        "#!/bin/sh\nprintf 'Title: \\n---\\nrewritten body\\n' > \"$1\"\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    cmd(&temp)
        .env("EDITOR", &script)
        .args(["edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Your edit was not saved"))
        .stderr(predicate::str::contains("rewritten body"))
        .stderr(predicate::str::contains("title cannot be empty"));
    assert_eq!(stored_notes(&store_path(&temp))[0].2, "old body");
}

#[test]
fn select_output_keeps_diagnostics_on_stderr() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["new", "pick"]).assert().success();
    let (id, _, _) = stored_notes(&store_path(&temp)).remove(0);

    cmd(&temp)
        .args(["select", &id, "zzzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped").not())
        .stderr(predicate::str::contains("Skipped zzzz"));
}

#[test]
fn edit_rejects_extra_positional() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["new", "Only"]).assert().success();
    let (id, _, _) = stored_notes(&store_path(&temp)).remove(0);
    cmd(&temp)
        .args(["edit", &id, "other", "--title", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unexpected argument"));
    assert_eq!(stored_notes(&store_path(&temp))[0].1, "Only");
}

#[test]
fn unknown_ids_are_errors_for_view_and_edit() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["new", "Only"]).assert().success();
    cmd(&temp)
        .args(["view", "zzzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no note matches"));
    cmd(&temp)
        .args(["edit", "zzzz", "--title", "x"])
        .assert()
        .failure();
}

#[test]
fn delete_selected_notes() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["new", "drop me"]).assert().success();
    cmd(&temp).args(["new", "keep me"]).assert().success();
    cmd(&temp).args(["new", "drop me too"]).assert().success();
    let notes = stored_notes(&store_path(&temp));
    let drop_a = notes[0].0.clone();
    let drop_b = notes[2].0.clone();

    cmd(&temp)
        .args(["delete", &drop_a[..8], &drop_b, &drop_a, "zzzz"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipped zzzz"))
        .stdout(predicate::str::contains("Deleted 2 note(s)"));

    let left = stored_notes(&store_path(&temp));
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].1, "keep me");

    cmd(&temp)
        .args(["delete", &drop_a])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes deleted."));
    cmd(&temp).args(["delete"]).assert().failure();
}

#[test]
fn select_previews_without_deleting() {
    let temp = TempDir::new().unwrap();
    cmd(&temp).args(["new", "pick"]).assert().success();
    cmd(&temp).args(["new", "leave"]).assert().success();
    let (id, _, _) = stored_notes(&store_path(&temp)).remove(0);

    cmd(&temp)
        .args(["select", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("✔"))
        .stdout(predicate::str::contains("[ delete 1 selected ]"));
    assert_eq!(stored_notes(&store_path(&temp)).len(), 2);

    cmd(&temp)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✔").not())
        .stdout(predicate::str::contains("delete").not());
}

#[test]
fn theme_palette_follows_env() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["theme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("light"))
        .stdout(predicate::str::contains("#007AFF"));

    cmd(&temp)
        .env("CARD_NOTES_THEME", "dark")
        .args(["theme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1C2526"))
        .stdout(predicate::str::contains("card_pressed"));
}

#[test]
fn default_store_lives_in_working_directory() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .env_remove("CARD_NOTES_FILE")
        .args(["new", "Here"])
        .assert()
        .success();
    assert!(temp.path().join("notes_data.json").exists());

    cmd(&temp)
        .env_remove("CARD_NOTES_FILE")
        .args(["path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notes_data.json"));
}

#[test]
fn failed_save_warns_but_succeeds() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .env("CARD_NOTES_FILE", temp.path())
        .args(["new", "Lost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created note"))
        .stderr(predicate::str::contains("warning: Could not save notes"));
}

#[test]
fn help_and_unknown_command() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Card Notes"));
    cmd(&temp)
        .args(["frobnicate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command: frobnicate"));
    cmd(&temp).args(["list", "--bogus"]).assert().failure();
}
