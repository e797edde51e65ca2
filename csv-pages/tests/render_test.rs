use csv_pages::{read_rows, render, render_to_file, Error, RenderConfig, Row};

fn render_str(rows: &[Row], config: &RenderConfig) -> String {
    let bytes = render(rows, config, Vec::new()).unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn page_count(output: &str) -> usize {
    output.matches("/Type /Page /Parent").count()
}

/// Text of every `Tj` operator, in content order. Each page shows
/// its topic twice: header, then footer.
fn shown_text(output: &str) -> Vec<&str> {
    output
        .split(") Tj\n")
        .filter_map(|chunk| chunk.rsplit_once("\n(").map(|(_, text)| text))
        .collect()
}

#[test]
fn math_and_history_scenario() {
    let rows = read_rows("Topic,Pages\nMath,2\nHistory,1\n".as_bytes()).unwrap();
    let output = render_str(&rows, &RenderConfig::default());

    assert_eq!(page_count(&output), 3);
    assert!(output.contains("/Count 3"));
    assert_eq!(
        shown_text(&output),
        ["Math", "Math", "Math", "Math", "History", "History"]
    );
}

#[test]
fn page_total_is_sum_of_floored_counts() {
    let rows = vec![
        Row::new("A", 3),
        Row::new("B", 0),
        Row::new("C", -4),
        Row::new("D", 1),
    ];
    let output = render_str(&rows, &RenderConfig::default());
    assert_eq!(page_count(&output), 3 + 1 + 1 + 1);
}

#[test]
fn non_numeric_pages_render_one_page() {
    let rows = read_rows("Topic,Pages\nArt,many\nMusic,\n".as_bytes()).unwrap();
    let output = render_str(&rows, &RenderConfig::default());
    assert_eq!(page_count(&output), 2);
}

#[test]
fn row_without_pages_field_renders_one_page() {
    let rows = read_rows("Topic,Pages\nMath\nHistory,2\n".as_bytes()).unwrap();
    let output = render_str(&rows, &RenderConfig::default());
    assert_eq!(page_count(&output), 3);
}

#[test]
fn spacing_50_draws_five_rules_per_page() {
    let rows = vec![Row::new("Math", 2)];
    let config = RenderConfig::default().with_line_spacing(50.0);
    let output = render_str(&rows, &config);
    assert_eq!(output.matches(" l\nS\n").count(), 5 * 2);
}

#[test]
fn default_spacing_draws_27_rules() {
    let output = render_str(&[Row::new("Math", 1)], &RenderConfig::default());
    assert_eq!(output.matches(" l\nS\n").count(), 27);
    // Rules span 10 mm to 200 mm; the first sits 20 mm from the top.
    assert!(output.contains("28.3465 785.1969 m\n566.9291 785.1969 l\nS\n"));
}

#[test]
fn tiny_spacing_is_a_config_error_not_a_panic() {
    let config = RenderConfig::default().with_line_spacing(1e-300);
    let err = render(&[Row::new("Math", 1)], &config, Vec::new()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn header_uses_bold_font_at_configured_size() {
    let config = RenderConfig::default().with_font_size(30.0);
    let output = render_str(&[Row::new("Math", 1)], &config);
    assert!(output.contains("/F2 30 Tf"));
    assert!(output.contains("/F3 8 Tf"));
    assert!(output.contains("0.3922 0.3922 0.3922 rg\n"));
    assert!(output.contains("0.7059 0.7059 0.7059 rg\n"));
}

#[test]
fn topics_with_delimiters_are_escaped() {
    let output = render_str(&[Row::new("Sets (intro)", 1)], &RenderConfig::default());
    assert!(output.contains("(Sets \\(intro\\)) Tj"));
}

#[test]
fn info_dictionary_has_creator_and_title() {
    let config = RenderConfig::default().with_title("topics");
    let output = render_str(&[Row::new("Math", 1)], &config);
    assert!(output.contains("/Creator (csv-pages)"));
    assert!(output.contains("/Title (topics)"));
}

#[test]
fn compression_hides_operators() {
    let config = RenderConfig::default().with_compression(true);
    let output = render_str(&[Row::new("Math", 1)], &config);
    assert!(output.contains("/Filter /FlateDecode"));
    assert!(!output.contains("(Math) Tj"));
}

#[test]
fn no_rows_gives_empty_page_tree() {
    let output = render_str(&[], &RenderConfig::default());
    assert_eq!(page_count(&output), 0);
    assert!(output.contains("/Count 0"));
}

#[test]
fn render_to_file_writes_complete_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("topics.pdf");
    std::fs::write(&path, b"stale").unwrap();

    let rows = vec![Row::new("Math", 2), Row::new("History", 1)];
    let config = RenderConfig::default().with_output(&path);
    let summary = render_to_file(&rows, &config).unwrap();

    assert_eq!(summary.pages, 3);
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.output, path);
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    // Only the finished document is left behind.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn bad_config_leaves_existing_output_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    std::fs::write(&path, b"previous").unwrap();

    let config = RenderConfig::default()
        .with_output(&path)
        .with_line_spacing(-1.0);
    let err = render_to_file(&[Row::new("Math", 1)], &config).unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert_eq!(std::fs::read(&path).unwrap(), b"previous");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn unwritable_output_dir_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.pdf");
    let config = RenderConfig::default().with_output(&path);
    let err = render_to_file(&[Row::new("Math", 1)], &config).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!path.exists());
}
