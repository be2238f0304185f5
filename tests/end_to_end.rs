mod common;

use common::{FakeEngine, table};
use faculty_roster::{config::Config, export::ExportFormat, pipeline::Pipeline};
use std::path::PathBuf;

fn two_colleges() -> FakeEngine {
    FakeEngine::new()
        .with_doc(
            "CollegeA.pdf",
            vec![Ok(vec![table(&[
                &["1", "John Doe", "45", "Professor"],
                &["2", "Jane Roe", ""],
            ])])],
        )
        .with_doc(
            "CollegeB.pdf",
            vec![Ok(vec![table(&[
                &["S No", "Name", "Age", "Gender"],
                &["1", "Amy Lee", "29", "f"],
            ])])],
        )
}

#[test]
fn two_documents_consolidate_into_one_table() {
    let cfg = Config::default();
    let pipeline = Pipeline::new(&cfg, two_colleges());
    let inputs = vec![PathBuf::from("CollegeA.pdf"), PathBuf::from("CollegeB.pdf")];

    let out = pipeline.run_corpus(&inputs).expect("corpus");
    let rows = &out.table.rows;
    assert_eq!(rows.len(), 3);

    let finals: Vec<usize> = rows.iter().map(|r| r.final_serial).collect();
    assert_eq!(finals, vec![1, 2, 3]);

    let names: Vec<&str> = rows.iter().map(|r| r.record.name.as_str()).collect();
    assert_eq!(names, vec!["John Doe", "Jane Roe", "Amy Lee"]);

    assert_eq!(rows[0].record.institution, "CollegeA");
    assert_eq!(rows[0].record.age, "45");
    assert_eq!(rows[0].record.designation, "Professor");

    let amy = &rows[2].record;
    assert_eq!(amy.institution, "CollegeB");
    assert_eq!(amy.gender, "f");
    assert_eq!(amy.age, "29");

    assert_eq!(out.table.stats.institutions, 2);
    assert_eq!(out.documents.len(), 2);
}

#[test]
fn broken_document_does_not_stop_the_run() {
    let cfg = Config::default();
    let engine = two_colleges().with_broken_doc("Broken.pdf", "xref table corrupt");
    let pipeline = Pipeline::new(&cfg, engine);
    let inputs = vec![
        PathBuf::from("Broken.pdf"),
        PathBuf::from("CollegeA.pdf"),
        PathBuf::from("CollegeB.pdf"),
    ];

    let out = pipeline.run_corpus(&inputs).expect("corpus");
    assert_eq!(out.table.rows.len(), 3);
    assert!(out.documents[0].error.is_some());
    assert_eq!(pipeline.engine().opened.borrow().len(), 3);
}

#[test]
fn nothing_extracted_is_a_failure_and_skips_export() {
    let cfg = Config::default();
    let engine = FakeEngine::new().with_doc(
        "Empty.pdf",
        vec![Ok(vec![table(&[&["Particulars", "Built-up area"], &["Total", "1200"]])])],
    );
    let pipeline = Pipeline::new(&cfg, engine);

    assert!(pipeline.run_corpus(&[PathBuf::from("Empty.pdf")]).is_err());
    assert!(pipeline.engine().xlsx_calls.borrow().is_empty());
}

#[test]
fn export_writes_combined_and_per_institution_files() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut cfg = Config::default();
    cfg.output.candidate_dirs = vec![];
    cfg.output.split_by_institution = true;
    cfg.output.fallback_csv_path = tmp.path().join("emergency.csv").display().to_string();

    let pipeline = Pipeline::new(&cfg, two_colleges());
    let inputs = vec![PathBuf::from("CollegeA.pdf"), PathBuf::from("CollegeB.pdf")];
    let out = pipeline.run_corpus(&inputs).expect("corpus");

    let out_dir = tmp.path().join("out");
    let exports = pipeline
        .export(&out.table, Some(out_dir.as_path()), "20240101_000000")
        .expect("export");

    assert_eq!(exports.len(), 3);
    assert!(exports.iter().all(|e| e.format == ExportFormat::Xlsx));
    assert_eq!(
        PathBuf::from(&exports[0].path),
        out_dir.join("faculty_data_20240101_000000.xlsx")
    );
    assert_eq!(
        PathBuf::from(&exports[1].path),
        out_dir.join("CollegeA_Faculty_Data.xlsx")
    );
    assert_eq!(exports[1].records, 2);
    assert_eq!(exports[2].records, 1);
}

#[test]
fn without_out_dir_the_configured_candidates_decide() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut cfg = Config::default();
    cfg.output.candidate_dirs = vec![tmp.path().join("desktop").display().to_string()];
    cfg.output.fallback_csv_path = tmp.path().join("emergency.csv").display().to_string();

    let pipeline = Pipeline::new(&cfg, two_colleges());
    let inputs = vec![PathBuf::from("CollegeA.pdf"), PathBuf::from("CollegeB.pdf")];
    let out = pipeline.run_corpus(&inputs).expect("corpus");
    let exports = pipeline
        .export(&out.table, None, "20240101_000000")
        .expect("export");

    assert_eq!(exports.len(), 1);
    assert_eq!(
        PathBuf::from(&exports[0].path),
        tmp.path().join("desktop").join("faculty_data_20240101_000000.xlsx")
    );
    assert!(
        !PathBuf::from(&cfg.paths.out_dir)
            .join("faculty_data_20240101_000000.xlsx")
            .exists()
    );
}
