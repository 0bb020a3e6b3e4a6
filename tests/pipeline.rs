use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use fairbench::api::cli::Cli;
use fairbench::api::{run_assess, run_validate};
use fairbench::assessment::{AssessmentRecord, ParticipantRecord, Provenance};
use fairbench::common::config::{AppCfg, RunConfig};
use fairbench::data::domain::Workflow;
use fairbench::BenchCode;

fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

fn config(workflow: Workflow, input: PathBuf, reference: Option<PathBuf>, output: PathBuf) -> RunConfig {
    RunConfig {
        workflow,
        input,
        reference,
        output,
        provenance: Provenance {
            community: "BAIHA".into(),
            challenges: vec!["afib".into()],
            participant: "Nuubo".into(),
        },
        delimiter: None,
        max_unmatched: None,
    }
}

fn read_assessments(path: &Path) -> Vec<AssessmentRecord> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn value(records: &[AssessmentRecord], metric: &str) -> f64 {
    records
        .iter()
        .find(|r| r.metric == metric)
        .map(|r| r.value)
        .unwrap_or_else(|| panic!("metric {metric} missing"))
}

#[test]
fn scores_model_output_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(dir.path(), "sub.csv", "ID,output\np1,Yes\np2,No\np3,Yes\n");
    let gold = write(dir.path(), "gold.csv", "ID,true_value\np1,1\np2,1\np3,0\n");
    let out = dir.path().join("results/assessment.json");

    let summary = run_assess(&config(Workflow::ModelOutput, sub, Some(gold), out.clone())).unwrap();
    assert_eq!(summary.records, 5);

    let records = read_assessments(&out);
    assert_eq!(value(&records, "OA"), 1.0 / 3.0);
    assert_eq!(value(&records, "SP"), 2.0 / 3.0);
    assert_eq!(value(&records, "EO"), 0.5);
    assert_eq!(value(&records, "PE"), 1.0);
    assert_eq!(value(&records, "FNR"), 0.5);
    assert!(records.iter().all(|r| r.kind == "assessment" && r.error_margin == 0.0));
    assert_eq!(records[0].id, "BAIHA:_OA_Nuubo_A");
}

#[test]
fn group_metrics_follow_overall() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(
        dir.path(),
        "sub.csv",
        "ID,output,sex\na,Yes,Male\nb,No,Female\nc,Yes,Female\nd,No,Male\n",
    );
    let gold = write(dir.path(), "gold.csv", "ID,true_value\na,Yes\nb,Yes\nc,Yes\nd,No\n");
    let out = dir.path().join("out.json");

    run_assess(&config(Workflow::ModelOutput, sub, Some(gold), out.clone())).unwrap();
    let records = read_assessments(&out);
    let names: Vec<&str> = records.iter().map(|r| r.metric.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "OA", "SP", "EO", "PE", "FNR", "OA_Female", "SP_Female", "EO_Female", "PE_Female",
            "FNR_Female", "OA_Male", "SP_Male", "EO_Male", "PE_Male", "FNR_Male",
        ]
    );
    assert_eq!(value(&records, "EO_Female"), 0.5);
    assert_eq!(value(&records, "OA_Male"), 1.0);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(dir.path(), "sub.csv", "ID,output,sex\na,Yes,Male\nb,No,Female\n");
    let gold = write(dir.path(), "gold.csv", "ID,true_value\na,1\nb,0\n");
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    run_assess(&config(Workflow::ModelOutput, sub.clone(), Some(gold.clone()), first.clone())).unwrap();
    run_assess(&config(Workflow::ModelOutput, sub, Some(gold), second.clone())).unwrap();
    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn schema_failure_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(dir.path(), "sub.csv", "ID,output\np1,maybe\n");
    let gold = write(dir.path(), "gold.csv", "ID,true_value\np1,1\n");
    let out = dir.path().join("out.json");

    let err = run_assess(&config(Workflow::ModelOutput, sub, Some(gold), out.clone())).unwrap_err();
    assert_eq!(err.code(), BenchCode::Schema);
    assert!(err.to_string().contains("maybe"));
    assert!(!out.exists());
}

#[test]
fn disjoint_ids_score_zero_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(dir.path(), "sub.csv", "ID,output\nx,Yes\n");
    let gold = write(dir.path(), "gold.csv", "ID,true_value\ny,1\n");
    let out = dir.path().join("out.json");

    run_assess(&config(Workflow::ModelOutput, sub, Some(gold), out.clone())).unwrap();
    let records = read_assessments(&out);
    assert!(records.iter().all(|r| r.value == 0.0));
}

#[test]
fn padded_ids_do_not_join() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(dir.path(), "sub.csv", "ID,output\np1 ,Yes\np2, No\n");
    let gold = write(dir.path(), "gold.csv", "ID,true_value\np1,1\np2,0\n");
    let out = dir.path().join("out.json");

    let mut cfg = config(Workflow::ModelOutput, sub, Some(gold), out.clone());
    cfg.max_unmatched = Some(0);
    let err = run_assess(&cfg).unwrap_err();
    assert_eq!(err.code(), BenchCode::Join);
    assert!(err.to_string().starts_with("2 ids did not match"));
}

#[test]
fn unmatched_limit_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(dir.path(), "sub.csv", "ID,output\nx,Yes\nz,No\n");
    let gold = write(dir.path(), "gold.csv", "ID,true_value\nx,1\ny,1\n");
    let out = dir.path().join("out.json");

    let mut cfg = config(Workflow::ModelOutput, sub, Some(gold), out.clone());
    cfg.max_unmatched = Some(1);
    let err = run_assess(&cfg).unwrap_err();
    assert_eq!(err.code(), BenchCode::Join);
    assert!(!out.exists());
}

#[test]
fn tab_separated_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(
        dir.path(),
        "sub.tsv",
        "patient_id\tdiagnosis\tsex\na\tYes\tFemale\nb\tNo\tMale\nc\tYes\tMale\n",
    );
    let gold = write(dir.path(), "gold.tsv", "patient_id\ttrue_value\na\t1\nb\t0\nc\t0\n");
    let out = dir.path().join("out.json");

    run_assess(&config(Workflow::ModelOutputTsv, sub, Some(gold), out.clone())).unwrap();
    let records = read_assessments(&out);
    assert_eq!(value(&records, "OA"), 2.0 / 3.0);
    assert_eq!(value(&records, "PE"), 0.5);
    assert_eq!(value(&records, "EO_Female"), 1.0);
}

#[test]
fn tab_separated_gold_must_be_digits() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(dir.path(), "sub.tsv", "patient_id\tdiagnosis\na\tYes\n");
    let gold = write(dir.path(), "gold.tsv", "patient_id\ttrue_value\na\tYes\n");
    let out = dir.path().join("out.json");

    let err = run_assess(&config(Workflow::ModelOutputTsv, sub, Some(gold), out.clone())).unwrap_err();
    assert_eq!(err.code(), BenchCode::Schema);
    assert!(err.to_string().contains("reference table"));
    assert!(!out.exists());
}

#[test]
fn training_composition() {
    let dir = tempfile::tempdir().unwrap();
    let mut body = String::from("ID,Sexo,AF\n");
    for i in 0..8 {
        body.push_str(&format!("m{i},Male,{}\n", if i < 4 { "Yes" } else { "No" }));
    }
    body.push_str("f0,Female,Yes\nf1,Female,No\n");
    let sub = write(dir.path(), "train.csv", &body);
    let out = dir.path().join("out.json");

    run_assess(&config(Workflow::TrainingDataset, sub, None, out.clone())).unwrap();
    let records = read_assessments(&out);
    assert_eq!(records.len(), 7);
    assert_eq!(value(&records, "CI"), 0.6);
}

#[test]
fn validate_writes_participant_record() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(dir.path(), "sub.csv", "ID,output\np1,YES\np2,no\n");
    let out = dir.path().join("validation/participant.json");

    run_validate(&config(Workflow::ModelOutput, sub, None, out.clone())).unwrap();
    let records: Vec<ParticipantRecord> =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "BAIHA:Nuubo_P");
    assert_eq!(records[0].challenge, vec!["afib"]);
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");
    let err = run_validate(&config(Workflow::ModelOutput, dir.path().join("absent.csv"), None, out))
        .unwrap_err();
    assert_eq!(err.code(), BenchCode::Io);
}

#[test]
fn cli_drives_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let sub = write(dir.path(), "sub.csv", "ID,output\np1,Yes\n");
    let gold = write(dir.path(), "gold.csv", "ID,true_value\np1,1\n");
    let out = dir.path().join("out.json");

    let (sub, gold, out_arg) = (
        sub.to_str().unwrap(),
        gold.to_str().unwrap(),
        out.to_str().unwrap(),
    );
    let cli = Cli::try_parse_from([
        "fairbench", "assess", "-i", sub, "--com", "BAIHA", "-c", "afib", "-p", "Nuubo", "-o",
        out_arg, "-m", gold,
    ])
    .unwrap();
    let summary = cli.execute(&AppCfg::default()).unwrap();
    assert_eq!(summary.records, 5);
    assert_eq!(value(&read_assessments(&out), "OA"), 1.0);
}
