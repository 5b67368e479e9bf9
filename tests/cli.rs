use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn brandreg(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("brandreg").unwrap();
    cmd.env("BRAND_REGISTRY_DATA_DIR", dir.path())
        .env("BRAND_REGISTRY_USER_ID", "1")
        .env("BRAND_REGISTRY_USER_EMAIL", "u1@example.com")
        .env_remove("BRAND_REGISTRY_LOG")
        .env_remove("BRAND_REGISTRY_CLIENT_IP");
    cmd
}

#[test]
fn test_init_creates_data_files() {
    let dir = TempDir::new().unwrap();

    brandreg(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("brands.json").exists());
}

#[test]
fn test_brand_lifecycle() {
    let dir = TempDir::new().unwrap();

    brandreg(&dir)
        .args(["brand", "create", "Acme", "--owner", "Jane", "-r", "RN-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created brand: Acme"))
        .stdout(predicate::str::contains("brd-1"));

    brandreg(&dir)
        .args(["brand", "status", "acme", "registered"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Brand 'Acme' status changed: PENDING → REGISTERED",
        ));

    brandreg(&dir)
        .args(["brand", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme"))
        .stdout(predicate::str::contains("REGISTERED"));

    brandreg(&dir)
        .args(["brand", "delete", "brd-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted brand: Acme (brd-1)"));

    // History outlives the brand
    brandreg(&dir)
        .args(["audit", "brand", "brd-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("STATUS_CHANGE"))
        .stdout(predicate::str::contains("DELETE"));

    brandreg(&dir)
        .args(["audit", "show", "aud-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status changed: PENDING → REGISTERED"));
}

#[test]
fn test_mutation_requires_user() {
    let dir = TempDir::new().unwrap();

    brandreg(&dir)
        .env_remove("BRAND_REGISTRY_USER_ID")
        .args(["brand", "create", "Acme", "--owner", "Jane"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("acting user is required"));

    brandreg(&dir)
        .args(["audit", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total"));
}

#[test]
fn test_duplicate_registration_number_fails() {
    let dir = TempDir::new().unwrap();

    brandreg(&dir)
        .args(["brand", "create", "Acme", "--owner", "Jane", "-r", "RN-1"])
        .assert()
        .success();

    brandreg(&dir)
        .args(["brand", "create", "Globex", "--owner", "Hank", "-r", "RN-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RN-1"));

    brandreg(&dir)
        .args(["audit", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Globex").not());
}

#[test]
fn test_audit_export_json() {
    let dir = TempDir::new().unwrap();

    brandreg(&dir)
        .args(["brand", "create", "Acme", "--owner", "Jane"])
        .assert()
        .success();

    let output = brandreg(&dir)
        .args(["audit", "export", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let export: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(export["records"].as_array().unwrap().len(), 1);
    assert_eq!(export["records"][0]["action"], "CREATE");
    assert_eq!(export["statistics"]["creations"], 1);
}

#[test]
fn test_reversed_range_is_rejected() {
    let dir = TempDir::new().unwrap();

    brandreg(&dir)
        .args(["audit", "range", "2024-03-02", "2024-03-01"])
        .assert()
        .failure();
}
