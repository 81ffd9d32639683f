use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

const REGISTRY: &str = r#"{
    "nextId": 4,
    "version": "1.0",
    "created": "2024-01-01T00:00:00Z",
    "lastUpdated": "2024-02-01T00:00:00Z",
    "diagrams": {
        "10": {
            "id": "10", "name": "Ledger", "originalName": "Ledger.drawio",
            "currentVersion": "v2", "currentPngFile": "10_Ledger_v2.svg",
            "category": "Finance", "created": "2024-01-01T00:00:00Z",
            "lastModified": "2024-02-01T00:00:00Z", "versions": ["v1", "v2"],
            "status": "active"
        },
        "2": {
            "id": "2", "name": "Landscape", "originalName": "Landscape.drawio",
            "currentVersion": "v1", "currentPngFile": "2_Landscape_v1.svg",
            "category": "Architecture", "created": "2024-01-01T00:00:00Z",
            "lastModified": "2024-01-05T00:00:00Z", "versions": ["v1"],
            "status": "active"
        },
        "3": {
            "id": "3", "name": "Retired", "originalName": "Retired.drawio",
            "currentVersion": "v1", "currentPngFile": "3_Retired_v1.svg",
            "category": "Architecture", "created": "2023-01-01T00:00:00Z",
            "lastModified": "2023-06-01T00:00:00Z", "versions": ["v1"],
            "status": "archived"
        }
    }
}"#;

fn write_site(root: &Path) {
    std::fs::write(root.join("diagram-registry.json"), REGISTRY).unwrap();
    let images = root.join("png_files");
    std::fs::create_dir_all(&images).unwrap();
    std::fs::write(images.join("2_Landscape_v1.svg"), "<svg>landscape</svg>").unwrap();
    std::fs::write(images.join("10_Ledger_v1.svg"), "<svg>ledger one</svg>").unwrap();
    std::fs::write(images.join("10_Ledger_v2.svg"), "<svg>ledger two</svg>").unwrap();
}

fn diagz(home: &Path, site: &Path) -> Command {
    let mut cmd = Command::cargo_bin("diagz").unwrap();
    cmd.env("DIAGZ_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("DIAGZ_DMS_API_URL")
        .env_remove("DIAGZ_DMS_CLIENT_ID")
        .env_remove("DIAGZ_DMS_CLIENT_SECRET")
        .env_remove("DIAGZ_DMS_XSUAA_URL")
        .env_remove("DIAGZ_DMS_REPOSITORY_ID")
        .env_remove("DIAGZ_REGISTRY_ROOT")
        .env_remove("DIAGZ_REGISTRY_FILE")
        .env_remove("DIAGZ_IMAGE_DIR")
        .arg("--root")
        .arg(site);
    cmd
}

#[test]
fn test_list_groups_active_diagrams() {
    let home = tempfile::tempdir().unwrap();
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());

    let output = diagz(home.path(), site.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Architecture (1)"))
        .stdout(predicate::str::contains("Finance (1)"))
        .stdout(predicate::str::contains("Landscape"))
        .stdout(predicate::str::contains("Retired").not())
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let architecture = stdout.find("Architecture").unwrap();
    let finance = stdout.find("Finance").unwrap();
    assert!(architecture < finance, "categories follow id order");
}

#[test]
fn test_list_json_is_sorted_by_id() {
    let home = tempfile::tempdir().unwrap();
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());

    let output = diagz(home.path(), site.path())
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let diagrams: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let ids: Vec<&str> = diagrams
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["2", "10"]);
}

#[test]
fn test_search_is_case_insensitive() {
    let home = tempfile::tempdir().unwrap();
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());

    diagz(home.path(), site.path())
        .args(["search", "FINANCE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ledger"))
        .stdout(predicate::str::contains("Landscape").not());

    diagz(home.path(), site.path())
        .args(["search", "nothing-like-this"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No diagrams match your search."));
}

#[test]
fn test_describe_then_view() {
    let home = tempfile::tempdir().unwrap();
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());

    diagz(home.path(), site.path())
        .args(["view", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Architecture"));

    diagz(home.path(), site.path())
        .args(["describe", "2", "Our", "system", "landscape"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved description for 2 Landscape"));

    assert!(home.path().join("diagram-descriptions.json").exists());

    diagz(home.path(), site.path())
        .args(["view", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Our system landscape"));
}

#[test]
fn test_view_unknown_diagram_fails() {
    let home = tempfile::tempdir().unwrap();
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());

    diagz(home.path(), site.path())
        .args(["view", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("99"));
}

#[test]
fn test_download_current_and_historical_version() {
    let home = tempfile::tempdir().unwrap();
    let site = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_site(site.path());

    diagz(home.path(), site.path())
        .args(["download", "10", "-o"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Downloaded 10_Ledger_v2.svg"));
    let current = std::fs::read_to_string(out.path().join("10_Ledger_v2.svg")).unwrap();
    assert_eq!(current, "<svg>ledger two</svg>");

    let target = out.path().join("old.svg");
    diagz(home.path(), site.path())
        .args(["download", "10", "--version", "v1", "-o"])
        .arg(&target)
        .assert()
        .success();
    assert_eq!(
        std::fs::read_to_string(target).unwrap(),
        "<svg>ledger one</svg>"
    );
}

#[test]
fn test_missing_registry_reports_retry() {
    let home = tempfile::tempdir().unwrap();
    let site = tempfile::tempdir().unwrap();

    diagz(home.path(), site.path())
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("retry"));
}

#[test]
fn test_source_reports_local_registry() {
    let home = tempfile::tempdir().unwrap();
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());

    diagz(home.path(), site.path())
        .arg("source")
        .assert()
        .success()
        .stdout(predicate::str::contains("local registry"))
        .stdout(predicate::str::contains("diagram-registry.json"));
}

#[test]
fn test_remote_settings_from_config_file() {
    let home = tempfile::tempdir().unwrap();
    let site = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join("diagz.toml"),
        r#"
[remote]
api_url = "https://dms.example.com/"
client_id = "client"
client_secret = "hunter2"
token_url = "https://auth.example.com"
repository_id = "repo"
"#,
    )
    .unwrap();

    diagz(home.path(), site.path())
        .arg("source")
        .assert()
        .success()
        .stdout(predicate::str::contains("remote repository"))
        .stdout(predicate::str::contains("https://dms.example.com"))
        .stdout(predicate::str::contains("hunter2").not());
}
