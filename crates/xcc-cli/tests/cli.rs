//! End-to-end tests for the xcc binary

use std::fs;
use std::process::Command;

fn xcc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xcc"))
}

#[test]
fn eval_prints_verdicts() {
    let output = xcc()
        .args(["eval", "--symbols", "DEBUG", "condition:DEBUG", "condition:!DEBUG", "urn:ui"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "condition:DEBUG\tinclude\ncondition:!DEBUG\texclude\nurn:ui\tnot a condition\n"
    );
}

#[test]
fn process_writes_only_changed_files() {
    let dir = tempfile::tempdir().unwrap();
    let changed = dir.path().join("Changed.xaml");
    let unchanged = dir.path().join("Unchanged.xaml");
    fs::write(
        &changed,
        r#"<Page xmlns:debug="condition:DEBUG"><debug:Grid/></Page>"#,
    )
    .unwrap();
    fs::write(&unchanged, "<Page><Grid/></Page>").unwrap();
    let out = dir.path().join("out");

    let output = xcc()
        .args(["process", "--symbols", "DEBUG", "--format", "json", "--output-dir"])
        .arg(&out)
        .arg(&changed)
        .arg(&unchanged)
        .output()
        .unwrap();
    assert!(output.status.success());

    assert_eq!(
        fs::read_to_string(out.join("Changed.xaml")).unwrap(),
        "<Page><Grid/></Page>"
    );
    assert!(!out.join("Unchanged.xaml").exists());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["total"], 2);
    assert_eq!(report["summary"]["changed"], 1);
}

#[test]
fn task_manifest_produces_linked_items() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Views")).unwrap();
    fs::write(
        dir.path().join("Views").join("MainPage.xaml"),
        r#"<Page xmlns:wp81="condition:WINDOWS_PHONE_APP"><wp81:Grid/></Page>"#,
    )
    .unwrap();
    fs::write(dir.path().join("App.xaml"), "<Application/>").unwrap();

    let manifest = serde_json::json!({
        "defined_symbols": "WINDOWS_APP",
        "base_dir": dir.path(),
        "output_path": dir.path().join("obj"),
        "application_definitions": [{ "item_spec": "App.xaml" }],
        "pages": [{ "item_spec": "Views/MainPage.xaml", "metadata": { "SubType": "Designer" } }],
    });
    let manifest_path = dir.path().join("xcc.json");
    fs::write(&manifest_path, manifest.to_string()).unwrap();
    let output_path = dir.path().join("task-output.json");

    let status = xcc()
        .args(["task", "--manifest"])
        .arg(&manifest_path)
        .arg("--output")
        .arg(&output_path)
        .status()
        .unwrap();
    assert!(status.success());

    let output: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(output["new_application_definitions"][0]["item_spec"], "App.xaml");
    assert_eq!(output["new_pages"][0]["link"], "Views/MainPage.xaml");
    assert_eq!(output["new_pages"][0]["metadata"]["SubType"], "Designer");
    assert_eq!(output["generated_files"].as_array().unwrap().len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("obj").join("Views").join("MainPage.xaml")).unwrap(),
        "<Page/>"
    );
}

#[test]
fn malformed_input_fails_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("Broken.xaml");
    fs::write(&broken, "<Page><Grid></Page>").unwrap();

    let output = xcc()
        .args(["process", "--output-dir"])
        .arg(dir.path().join("out"))
        .arg(&broken)
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Broken.xaml"));
}
