use super::*;
use fstream_fs::FileSystem;

async fn stat_record(path: &std::path::Path) -> PathRecord {
    FileSystem::default()
        .stat(path)
        .collect_records()
        .await
        .expect("stat ok")
        .remove(0)
}

#[tokio::test]
async fn human_printer_shows_size_and_path() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = tmp.path().join("a.txt");
    std::fs::write(&file, b"hello").expect("write file");
    let rec = stat_record(&file).await;

    let mut printer = HumanPrinter::new(Vec::new(), Vec::new(), PrinterConfig::default());
    printer.record(&rec).expect("print");
    printer
        .finish(Summary {
            records: 1,
            errors: 0,
        })
        .expect("finish");

    let (out, err) = printer.into_inner();
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out, format!("{:>10}  {}\n", 5, file.display()));
    assert_eq!(
        String::from_utf8(err).unwrap(),
        "[done] 1 record(s), 0 error(s)\n"
    );
}

#[tokio::test]
async fn human_printer_appends_contents_when_asked() {
    let rec = FileSystem::default()
        .of(["unused"])
        .collect_records()
        .await
        .expect("ok")
        .remove(0);
    let cfg = PrinterConfig {
        contents: true,
        ..PrinterConfig::default()
    };

    let mut printer = HumanPrinter::new(Vec::new(), Vec::new(), cfg);
    printer.record(&rec).expect("print");
    let (out, _) = printer.into_inner();
    // No contents attached, so only the path.
    assert_eq!(String::from_utf8(out).unwrap(), "unused\n");
}

#[tokio::test]
async fn json_printer_emits_one_object_per_line() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = tmp.path().join("data.json");
    std::fs::write(&file, b"{}").expect("write file");
    let rec = stat_record(&file).await;

    let mut printer = JsonPrinter::new(Vec::new(), Vec::new(), PrinterConfig::default());
    printer.record(&rec).expect("print");
    printer.record(&rec).expect("print");

    let (out, _) = printer.into_inner();
    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);

    let value: serde_json::Value = serde_json::from_str(lines[0]).expect("valid json");
    assert_eq!(value["name"], "data");
    assert_eq!(value["extension"], ".json");
    assert_eq!(value["kind"], "file");
    assert_eq!(value["size"], 2);
    assert!(value.get("text").is_none());
}

#[tokio::test]
async fn json_printer_reports_errors_with_context() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let err = FileSystem::default()
        .unlink(tmp.path().join("missing"))
        .collect_records()
        .await
        .expect_err("unlink should fail");

    let mut printer = JsonPrinter::new(Vec::new(), Vec::new(), PrinterConfig::default());
    printer.error(&err).expect("print");

    let (_, errs) = printer.into_inner();
    let value: serde_json::Value =
        serde_json::from_slice(errs.trim_ascii_end()).expect("valid json");
    assert_eq!(value["op"], "unlink");
    assert!(value["error"].as_str().unwrap().contains("not found"));
}

#[test]
fn color_choice_parses_known_values() {
    assert_eq!(ColorChoice::parse("always"), ColorChoice::Always);
    assert_eq!(ColorChoice::parse("never"), ColorChoice::Never);
    assert_eq!(ColorChoice::parse("auto"), ColorChoice::Auto);
    assert_eq!(ColorChoice::parse("bogus"), ColorChoice::Auto);
}
