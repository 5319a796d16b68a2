use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const LINE_AND_POLYGON: &str = r#"[
    {"event": "start_line"},
    {"event": "point", "lat": 22.80, "lng": 89.50},
    {"event": "point", "lat": 22.90, "lng": 89.60},
    {"event": "key", "key": "Enter"},
    {"event": "insert_polygon", "waypoint": 0, "position": "after"},
    {"event": "point", "lat": 22.84, "lng": 89.52},
    {"event": "point", "lat": 22.86, "lng": 89.55},
    {"event": "point", "lat": 22.83, "lng": 89.57},
    {"event": "finish"},
    {"event": "import"}
]"#;

fn session_cmd() -> Command {
    let mut cmd = Command::cargo_bin("route_session").unwrap();
    cmd.env_remove("ROUTE_OUTPUT")
        .env_remove("ROUTE_MIN_POLYGON_POINTS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn distance_command() {
    session_cmd()
        .args(["distance", "0.0", "0.0", "1.0", "0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("111194.93 m"));
}

#[test]
fn distance_accepts_negative_coordinates() {
    session_cmd()
        .args(["distance", "-33.0", "-117.0", "-33.0", "-117.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.00 m"));
}

#[test]
fn replay_prints_mission_summary() {
    let script = assert_fs::NamedTempFile::new("session.json").unwrap();
    script.write_str(LINE_AND_POLYGON).unwrap();

    session_cmd()
        .args(["replay", script.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("WP(04)"))
        .stdout(predicate::str::contains("[polygon]"))
        .stdout(predicate::str::contains("Polygons: 1"))
        .stdout(predicate::str::contains("Total: "));
}

#[test]
fn replay_json_output() {
    let script = assert_fs::NamedTempFile::new("session.json").unwrap();
    script.write_str(LINE_AND_POLYGON).unwrap();

    session_cmd()
        .args(["replay", "--format", "json", script.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"revision\""))
        .stdout(predicate::str::contains("\"polygon-start\""));
}

#[test]
fn replay_stops_on_invalid_event() {
    let script = assert_fs::NamedTempFile::new("bad.json").unwrap();
    script
        .write_str(r#"[{"event": "start_line"}, {"event": "start_polygon", "index": 0}]"#)
        .unwrap();

    session_cmd()
        .args(["replay", script.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("event #2 (start_polygon) failed"));
}

#[test]
fn replay_keep_going_skips_invalid_event() {
    let script = assert_fs::NamedTempFile::new("bad.json").unwrap();
    script
        .write_str(
            r#"[
                {"event": "import"},
                {"event": "start_line"},
                {"event": "point", "lat": 1.0, "lng": 1.0},
                {"event": "finish"}
            ]"#,
        )
        .unwrap();

    session_cmd()
        .args(["replay", "--keep-going", script.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("WP(00)"));
}

#[test]
fn replay_rejects_small_polygon_with_raised_minimum() {
    let script = assert_fs::NamedTempFile::new("session.json").unwrap();
    script.write_str(LINE_AND_POLYGON).unwrap();

    session_cmd()
        .args([
            "replay",
            "--min-polygon-points",
            "4",
            script.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("event #10 (import) failed"));
}

#[test]
fn replay_missing_script_fails() {
    session_cmd()
        .args(["replay", "/no/such/script.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}
