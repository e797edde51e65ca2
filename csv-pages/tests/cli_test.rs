use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_csv-pages"))
        .args(args)
        .current_dir(cwd)
        .output()
        .unwrap()
}

#[test]
fn generates_default_output_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("topics.csv"), "Topic,Pages\nMath,2\nHistory,1\n").unwrap();

    let out = run(&["--csv", "topics.csv"], dir.path());

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim(), "PDF generated successfully: output.pdf");
    let pdf = std::fs::read(dir.path().join("output.pdf")).unwrap();
    let pdf = String::from_utf8_lossy(&pdf);
    assert!(pdf.contains("/Count 3"));
    assert!(pdf.contains("/Title (topics)"));
}

#[test]
fn honours_output_lines_and_fontsize() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in.csv"), "Topic,Pages\nMath,1\n").unwrap();

    let out = run(
        &["--csv", "in.csv", "--output", "ruled.pdf", "--lines", "50", "--fontsize", "18"],
        dir.path(),
    );

    assert!(out.status.success());
    let pdf = std::fs::read(dir.path().join("ruled.pdf")).unwrap();
    let pdf = String::from_utf8_lossy(&pdf);
    assert_eq!(pdf.matches(" l\nS\n").count(), 5);
    assert!(pdf.contains("/F2 18 Tf"));
}

#[test]
fn missing_csv_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();

    let out = run(&["--csv", "nope.csv"], dir.path());

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error: CSV file not found: nope.csv"));
    assert!(!dir.path().join("output.pdf").exists());
}

#[test]
fn missing_column_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in.csv"), "Topic,Count\nMath,1\n").unwrap();

    let out = run(&["--csv", "in.csv"], dir.path());

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("missing: Pages"));
    assert!(!dir.path().join("output.pdf").exists());
}

#[test]
fn zero_line_spacing_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in.csv"), "Topic,Pages\nMath,1\n").unwrap();

    let out = run(&["--csv", "in.csv", "--lines", "0"], dir.path());

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("line spacing"));
    assert!(!dir.path().join("output.pdf").exists());
}

#[test]
fn csv_flag_is_required() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(&[], dir.path());
    assert_eq!(out.status.code(), Some(2));
}
