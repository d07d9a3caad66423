use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn travex(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("travex").expect("travex binary");
    cmd.env("TRAVEX_DATA_DIR", data_dir.path())
        .env_remove("TRAVEX_USER")
        .env_remove("RUST_LOG");
    cmd
}

/// Initialized data dir with one travel, a rate and two expenses
fn morocco_trip() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");

    travex(&dir).arg("init").assert().success();
    travex(&dir)
        .args([
            "travel", "create", "Morocco", "--currency", "MAD", "--home", "EUR", "--country",
            "ma", "--start", "2025-04-01", "--no-rate",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created travel: Morocco"));
    travex(&dir)
        .args(["rate", "add", "Morocco", "MAD", "0.1"])
        .assert()
        .success();
    travex(&dir)
        .args([
            "expense", "add", "Morocco", "Riad", "1000", "--category", "Lodging", "--date",
            "2025-04-02",
        ])
        .assert()
        .success();
    travex(&dir)
        .args([
            "expense", "add", "Morocco", "Tagine", "400", "--category", "food", "--date",
            "2025-04-03",
        ])
        .assert()
        .success();

    dir
}

#[test]
fn init_seeds_system_categories() {
    let dir = tempfile::tempdir().expect("tempdir");

    travex(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    travex(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lodging"))
        .stdout(predicate::str::contains("system"));
}

#[test]
fn config_shows_data_directory() {
    let dir = tempfile::tempdir().expect("tempdir");

    travex(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Default home currency: EUR"))
        .stdout(predicate::str::contains("User: local"));
}

#[test]
fn summary_breaks_down_spend_by_category() {
    let dir = morocco_trip();

    travex(&dir)
        .args(["travel", "summary", "morocco"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Travel Summary: Morocco"))
        .stdout(predicate::str::contains("1,000.00 MAD"))
        .stdout(predicate::str::contains("71.43%"))
        .stdout(predicate::str::contains("28.57%"))
        .stdout(predicate::str::contains("140.00 EUR"));

    travex(&dir)
        .args(["travel", "summaries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,400.00 MAD"));
}

#[test]
fn unrated_currency_is_reported() {
    let dir = morocco_trip();

    travex(&dir)
        .args([
            "expense", "add", "Morocco", "Airport taxi", "30", "--category", "Transport",
            "--currency", "USD", "--date", "2025-04-01",
        ])
        .assert()
        .success();

    travex(&dir)
        .args(["travel", "summary", "Morocco"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No rate to EUR for: USD"))
        .stdout(predicate::str::contains("170.00 EUR"));

    travex(&dir)
        .args(["travel", "summary", "Morocco", "--exclude-unrated"])
        .assert()
        .success()
        .stdout(predicate::str::contains("140.00 EUR"));
}

#[test]
fn json_export_contains_summaries() {
    let dir = morocco_trip();

    let output = travex(&dir)
        .args(["export", "--format", "json"])
        .output()
        .expect("run export");
    assert!(output.status.success());

    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).expect("export json");
    assert_eq!(payload["user_id"], "local");
    let travels = payload["travels"].as_array().expect("travels array");
    assert_eq!(travels.len(), 1);
    assert_eq!(travels[0]["name"], "Morocco");
    assert_eq!(travels[0]["categories"][0]["name"], "Lodging");
}

#[test]
fn csv_export_writes_file() {
    let dir = morocco_trip();
    let out = dir.path().join("summaries.csv");

    travex(&dir)
        .args(["export", "--format", "csv", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 travel summaries"));

    let contents = std::fs::read_to_string(&out).expect("csv file");
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.contains("Morocco"));
}

#[test]
fn other_users_cannot_see_travels() {
    let dir = morocco_trip();

    travex(&dir)
        .args(["--user", "bob", "travel", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No travels found."));

    travex(&dir)
        .args(["--user", "bob", "travel", "show", "Morocco"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Travel not found: Morocco"));
}

#[test]
fn category_with_expenses_cannot_be_deleted() {
    let dir = morocco_trip();

    travex(&dir)
        .args(["category", "create", "Souvenirs"])
        .assert()
        .success();

    let list = travex(&dir)
        .args(["expense", "list", "--travel", "Morocco"])
        .output()
        .expect("run expense list");
    let stdout = String::from_utf8(list.stdout).expect("utf8");
    let riad_id = stdout
        .lines()
        .find(|line| line.contains("Riad"))
        .and_then(|line| line.split_whitespace().next())
        .expect("riad row")
        .to_string();

    travex(&dir)
        .args(["expense", "edit", &riad_id, "--category", "Souvenirs"])
        .assert()
        .success();

    travex(&dir)
        .args(["category", "delete", "Souvenirs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("still has expenses"));

    travex(&dir)
        .args(["category", "delete", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Access denied"));
}

#[test]
fn deleting_a_travel_removes_its_expenses() {
    let dir = morocco_trip();

    travex(&dir)
        .args(["travel", "delete", "Morocco"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 expenses, 1 rates"));

    travex(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}
