use anyhow::Result;
use log::info;

use clinical_recon::{MappingTable, ReconConfig, ReconSession, SourceRow};

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // In production these rows come from the sheet/database collaborators;
    // here a small in-memory sample demonstrates the full run.
    let demographics: Vec<SourceRow> = vec![
        [
            ("hospital_id", "12345"),
            ("name", "Sample Patient"),
            ("birth_date", "19570301"),
            ("sex", "F"),
        ]
        .into_iter()
        .collect(),
    ];

    let medications: Vec<SourceRow> = vec![
        med_row("654321", "20240101", "30"),
        med_row("654321", "20240201", "30"),
        med_row("654321", "20240301", "30"),
        med_row("111222", "20240301", "5"),
    ];

    let db_diagnoses: Vec<SourceRow> = vec![
        [
            ("condition_source_value", "E11"),
            ("concept_name", "Type 2 diabetes mellitus"),
        ]
        .into_iter()
        .collect(),
    ];

    let adrs: Vec<SourceRow> = vec![
        [
            ("hospital_id", "12345"),
            ("annotation", "Rash on penicillin"),
            ("action_plan", "switch to macrolide"),
        ]
        .into_iter()
        .collect(),
    ];

    let lookup: MappingTable = [
        ("000654321", vec!["C08CA01".to_string()]),
        ("000111222", vec!["N02BE01".to_string()]),
    ]
    .into_iter()
    .collect();

    let mut session = ReconSession::new("12345", ReconConfig::default());
    session.load_demographics(&demographics, chrono::Local::now().date_naive());
    session.load_medications(&medications, &lookup)?;
    session.load_diagnoses(&db_diagnoses, &[]);
    session.load_adrs(&adrs);

    let candidates = session.comorbidity_candidates();
    info!("inferred {} comorbidity candidates", candidates.len());
    session.accept_candidates(candidates);

    // Select everything, standing in for the reviewer
    for code in session
        .medications
        .current
        .iter()
        .map(|m| m.drug_code.clone())
        .collect::<Vec<_>>()
    {
        session.select_current_medication(&code, true);
    }
    for code in session
        .diagnoses
        .iter()
        .map(|d| d.code.clone())
        .collect::<Vec<_>>()
    {
        session.select_diagnosis(&code, true);
    }
    session.select_adr(0, true);

    let profile = session.finalize()?;
    info!("absorbed anomalies: {}", session.anomalies.total());

    println!("{}", serde_json::to_string_pretty(&profile)?);
    println!("{}", serde_json::to_string_pretty(&profile.to_export_json())?);

    Ok(())
}

fn med_row(code: &str, date: &str, days: &str) -> SourceRow {
    [
        ("hospital_id", "12345"),
        ("drug_code", code),
        ("prescription_date", date),
        ("days_supplied", days),
        ("product_name", "Sample Product"),
        ("ingredient_name", "sample ingredient"),
    ]
    .into_iter()
    .collect()
}
