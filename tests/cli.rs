use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

fn compute_sales(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_compute-sales"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn results_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{name}-{}.txt", std::process::id()));
    let _ = fs::remove_file(&path);
    path
}

#[test]
fn cli_fn_prints_report_and_warnings() {
    let out = compute_sales(&[
        "testdata/tc1_products.json",
        "testdata/tc3_sales.json",
        "--no-results",
    ]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8(out.stdout).unwrap();
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stdout.contains("TOTAL COST: 83.36\n"), "{stdout}");
    assert!(stderr.contains("product 'Elotes' not in catalogue"), "{stderr}");
    assert!(stderr.contains("negative quantity -4 for 'Brown eggs'"), "{stderr}");
}

#[test]
fn cli_fn_prints_json_report() {
    let out = compute_sales(&[
        "testdata/tc1_products.json",
        "testdata/tc1_sales.json",
        "--no-results",
        "--format",
        "json",
    ]);
    assert_eq!(out.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["total"], "198.46");
    assert_eq!(json["processed"], 6);
    assert_eq!(json["warnings"], serde_json::json!([]));
}

#[test]
fn cli_fn_exits_with_error_for_missing_file() {
    let out = compute_sales(&["testdata/tc1_products.json", "testdata/bogus.json", "--no-results"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("bogus.json"));
    assert!(out.stdout.is_empty());
}

#[test]
fn cli_fn_exits_with_usage_error_without_arguments() {
    let out = compute_sales(&[]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
}

#[test]
fn cli_fn_appends_results_file_unless_disabled() {
    let path = results_path("cli-results");
    let results = path.to_str().unwrap();
    let args = ["testdata/tc1_products.json", "testdata/tc2_sales.json", "-o", results];

    let mut disabled = args.to_vec();
    disabled.push("--no-results");
    let out = compute_sales(&disabled);
    assert_eq!(out.status.code(), Some(0));
    assert!(!path.exists());

    assert_eq!(compute_sales(&args).status.code(), Some(0));
    assert_eq!(compute_sales(&args).status.code(), Some(0));
    let contents = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(contents.matches("===== RUN =====").count(), 2);
    assert!(contents.contains("TOTAL COST: 83.36\n"));
}
