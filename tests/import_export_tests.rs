mod common;

use common::{at, entry, temp_dir};
use rconverter::export::csv_report::to_csv_string;
use rconverter::export::{ExportFormat, ExportLogic, ExportOutcome, parse_csv, report_path};
use rconverter::models::{ConversionEntry, Direction};
use std::fs;

fn sample() -> Vec<ConversionEntry> {
    vec![
        entry(at(2025, 3, 15, 9), 100.0, 68087.0, Direction::SarToSdg, Some(680.87)),
        entry(at(2025, 3, 14, 18), 5000.0, 7.36, Direction::SdgToSar, None),
    ]
}

#[test]
fn test_csv_header_and_quoting() {
    let log = sample();
    let refs: Vec<&ConversionEntry> = log.iter().collect();
    let csv = to_csv_string(&refs).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[0],
        r#""Date","From Amount","To Amount","Conversion Type","Rate Used""#
    );
    assert_eq!(
        lines[1],
        r#""2025-03-15 09:00:00",100.00,68087.00,"SAR to SDG",680.870000"#
    );
    assert_eq!(
        lines[2],
        r#""2025-03-14 18:00:00",5000.00,7.36,"SDG to SAR","N/A""#
    );
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_csv_round_trip_preserves_rows() {
    let log = sample();
    let refs: Vec<&ConversionEntry> = log.iter().collect();
    let csv = to_csv_string(&refs).unwrap();

    let report = parse_csv(csv.as_bytes()).unwrap();
    assert_eq!(report.imported(), 2);
    assert!(report.skipped.is_empty());

    for (orig, back) in log.iter().zip(&report.entries) {
        assert_eq!(back.timestamp, orig.timestamp);
        assert_eq!(back.from_amount_str(), orig.from_amount_str());
        assert_eq!(back.to_amount_str(), orig.to_amount_str());
        assert_eq!(back.direction, orig.direction);
        assert_eq!(back.rate_used, orig.rate_used);
        assert_ne!(back.id, orig.id, "imported rows get fresh ids");
    }
}

#[test]
fn test_import_skips_invalid_rows() {
    let input = "\
Date,From Amount,To Amount,Conversion Type,Rate Used
2025-01-01 10:00:00,1.00,680.87,SAR to SDG,680.870000
2025-01-02 10:00:00,2.00,1361.74,SAR to SDG,680.870000
not a date,3.00,3.00,SAR to SDG,1.000000
2025-01-03 10:00:00,1000.00,1.47,SDG to SAR,0.001471
2025-01-04 10:00:00,abc,1.00,SDG to SAR,0.001471
\"03/01/2025, 11:30:00\",10.00,6808.70,SAR to SDG,N/A
2025-01-05,4.00,2723.48,SAR to SDG,680.870000
";
    let report = parse_csv(input.as_bytes()).unwrap();

    assert_eq!(report.imported(), 5);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].line, 4);
    assert_eq!(report.skipped[1].line, 6);
    assert_eq!(report.entries[3].rate_used, None);
    assert_eq!(report.entries[3].direction, Direction::SarToSdg);
}

#[test]
fn test_import_line_numbers_follow_multiline_fields() {
    let input = "\
Date,From Amount,To Amount,Conversion Type,Rate Used
2025-01-01 10:00:00,1.00,680.87,\"SAR to SDG
extra\",680.870000
2025-01-02 10:00:00,2.00,1361.74,SAR to SDG,680.870000
not a date,3.00,3.00,SAR to SDG,1.000000
";
    let report = parse_csv(input.as_bytes()).unwrap();

    assert_eq!(report.imported(), 1);
    let lines: Vec<u64> = report.skipped.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![2, 5]);
}

#[test]
fn test_import_rejects_wrong_header() {
    let input = "When,Amount,Result,Type,Rate\n2025-01-01,1,1,SAR to SDG,1\n";
    assert!(parse_csv(input.as_bytes()).is_err());
    assert!(parse_csv("".as_bytes()).is_err());
}

#[test]
fn test_empty_export_writes_nothing() {
    let dir = temp_dir("export_empty");
    for format in [ExportFormat::Csv, ExportFormat::Pdf, ExportFormat::Json] {
        let outcome = ExportLogic::export(&[], format, &dir, "All", false).unwrap();
        assert_eq!(outcome, ExportOutcome::Empty);
        assert!(!report_path(&dir, format).exists());
    }
}

#[test]
fn test_csv_export_writes_report_file() {
    let dir = temp_dir("export_csv");
    let log = sample();
    let refs: Vec<&ConversionEntry> = log.iter().collect();

    let outcome = ExportLogic::export(&refs, ExportFormat::Csv, &dir, "All", false).unwrap();
    let path = dir.join("conversion_history_report.csv");
    assert_eq!(
        outcome,
        ExportOutcome::Written {
            path: path.clone(),
            rows: 2
        }
    );

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, to_csv_string(&refs).unwrap());
}

#[test]
fn test_pdf_export_produces_pdf() {
    let dir = temp_dir("export_pdf");
    let log: Vec<ConversionEntry> = (0..120)
        .map(|i| {
            entry(
                at(2025, 1, 1 + (i % 28) as u32, 12),
                i as f64,
                i as f64 * 680.87,
                Direction::SarToSdg,
                Some(680.87),
            )
        })
        .collect();
    let refs: Vec<&ConversionEntry> = log.iter().collect();

    ExportLogic::export(&refs, ExportFormat::Pdf, &dir, "All · timestamp desc", false).unwrap();

    let bytes = fs::read(report_path(&dir, ExportFormat::Pdf)).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("Conversion History Report"));
}

#[test]
fn test_json_export_matches_storage_layout() {
    let dir = temp_dir("export_json");
    let log = sample();
    let refs: Vec<&ConversionEntry> = log.iter().collect();

    ExportLogic::export(&refs, ExportFormat::Json, &dir, "All", false).unwrap();

    let raw = fs::read_to_string(report_path(&dir, ExportFormat::Json)).unwrap();
    let back: Vec<ConversionEntry> = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, log);

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["fromAmount"], "100.00");
    assert_eq!(value[0]["direction"], "SAR to SDG");
    assert!(value[1]["rateUsed"].is_null());
}
