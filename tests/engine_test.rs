#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use clinical_recon::{
        DiagnosisSource, MappingTable, ReconConfig, ReconError, ReconSession, SourceRow,
    };

    fn med_row(pid: &str, code: &str, date: &str, days: &str, product: &str) -> SourceRow {
        [
            ("hospital_id", pid),
            ("drug_code", code),
            ("prescription_date", date),
            ("days_supplied", days),
            ("product_name", product),
            ("ingredient_name", "ingredient"),
        ]
        .into_iter()
        .collect()
    }

    fn sample_lookup() -> MappingTable {
        [
            ("000654321", vec!["C08CA01".to_string()]),  // amlodipine -> hypertension rule
            ("000222333", vec!["A10BA02".to_string()]),  // metformin -> diabetes rule
            ("000111222", vec!["N02BE01".to_string()]),  // paracetamol -> no rule
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_full_run_produces_complete_profile() {
        let demographics: Vec<SourceRow> = vec![
            [
                ("hospital_id", "12345"),
                ("name", "Sample Patient"),
                ("birth_date", "1957-03-01"),
                ("sex", "F"),
            ]
            .into_iter()
            .collect(),
        ];

        // Amlodipine over three months (current), one short paracetamol
        // prescription at the end (new)
        let medications = vec![
            med_row("12345", "654321", "20240101", "30", "Amlodipine 5mg"),
            med_row("12345", "654321", "20240201", "30", "Amlodipine 5mg"),
            med_row("12345", "654321", "20240301", "30", "Amlodipine 5mg"),
            med_row("12345", "111222", "20240301", "5", "Paracetamol 500mg"),
        ];

        let db_diagnoses: Vec<SourceRow> = vec![
            [
                ("condition_source_value", "E11"),
                ("concept_name", "Type 2 diabetes mellitus"),
            ]
            .into_iter()
            .collect(),
        ];
        let sheet_diagnoses: Vec<SourceRow> = vec![
            [
                ("hospital_id", "12345"),
                ("diagnosis_code", "E11"),
                ("name", "diabetes (sheet)"),
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

        let mut session = ReconSession::new("12345", ReconConfig::default());
        session.load_demographics(&demographics, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        session.load_medications(&medications, &sample_lookup()).unwrap();
        session.load_diagnoses(&db_diagnoses, &sheet_diagnoses);
        session.load_adrs(&adrs);

        // Database wins the shared E11 code
        assert_eq!(session.diagnoses.len(), 1);
        assert_eq!(session.diagnoses[0].source, DiagnosisSource::Database);

        // Only the hypertension rule fires: amlodipine's C08 code matches
        // its prefix list, and no current medication maps to A10 or C10
        let candidates = session.comorbidity_candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].diagnosis.code, "I10.0");
        assert_eq!(candidates[0].trigger_atc, "C08CA01");
        session.accept_candidates(candidates);
        assert_eq!(session.diagnoses.len(), 2);

        session.select_diagnosis("E11", true);
        session.select_diagnosis("I10.0", true);
        session.select_current_medication("000654321", true);
        session.select_new_medication("000111222", true);
        session.select_adr(0, true);

        let profile = session.finalize().unwrap();
        assert_eq!(profile.demographics.patient_id, "00012345");
        assert_eq!(profile.demographics.age, Some(67));
        assert_eq!(profile.diagnosis.len(), 2);
        assert_eq!(profile.current_medication.len(), 1);
        assert_eq!(profile.current_medication[0].code, "000654321");
        assert_eq!(profile.new_medication.len(), 1);
        assert_eq!(profile.adr.len(), 1);
        assert_eq!(profile.adr[0].label, "Rash on penicillin (switch to macrolide)");

        let export = profile.to_export_json();
        assert_eq!(export["gender"], "Female");
        assert_eq!(export["comorbidities"].as_array().unwrap().len(), 2);
        assert_eq!(export["currentMedication"][0]["kdCode"], "000654321");
    }

    #[test]
    fn test_empty_sources_still_assemble() {
        let mut session = ReconSession::new("12345", ReconConfig::default());
        session.load_medications(&[], &sample_lookup()).unwrap();
        session.load_diagnoses(&[], &[]);
        session.load_adrs(&[]);

        assert!(session.medications.is_empty());
        assert!(session.diagnoses.is_empty());
        assert!(session.comorbidity_candidates().is_empty());

        let profile = session.finalize().unwrap();
        assert!(profile.diagnosis.is_empty());
        assert!(profile.current_medication.is_empty());
        assert!(profile.new_medication.is_empty());
        assert!(profile.adr.is_empty());
    }

    #[test]
    fn test_malformed_patient_id_fails_finalize() {
        let session = ReconSession::new("ABC-123", ReconConfig::default());
        assert!(matches!(
            session.finalize(),
            Err(ReconError::MissingIdentifier { .. })
        ));
    }

    #[test]
    fn test_promoted_medication_reaches_inference() {
        // Long-running amlodipine, one short metformin prescription: the
        // threshold puts metformin in the new set
        let medications = vec![
            med_row("12345", "654321", "20240101", "30", "Amlodipine 5mg"),
            med_row("12345", "654321", "20240301", "30", "Amlodipine 5mg"),
            med_row("12345", "222333", "20240301", "7", "Metformin 500mg"),
        ];

        let mut session = ReconSession::new("12345", ReconConfig::default());
        session.load_medications(&medications, &sample_lookup()).unwrap();
        assert_eq!(session.medications.new.len(), 1);

        // Below the threshold, the A10 drug cannot trigger the diabetes rule
        let codes: Vec<String> = session
            .comorbidity_candidates()
            .iter()
            .map(|c| c.diagnosis.code.clone())
            .collect();
        assert_eq!(codes, vec!["I10.0"]);

        // Reviewer checks metformin into the current set
        assert!(session.promote_to_current("000222333"));
        assert!(session.medications.new.is_empty());

        let codes: Vec<String> = session
            .comorbidity_candidates()
            .iter()
            .map(|c| c.diagnosis.code.clone())
            .collect();
        assert_eq!(codes, vec!["I10.0", "E10.0"]);

        session.select_current_medication("000222333", true);
        session.select_current_medication("000654321", true);
        let profile = session.finalize().unwrap();
        assert_eq!(profile.current_medication.len(), 2);
        assert!(profile.new_medication.is_empty());
    }

    #[test]
    fn test_anomalies_are_tallied_not_raised() {
        let medications = vec![
            med_row("12345", "not-a-code", "20240101", "30", "Mystery"),
            med_row("12345", "999999", "20240101", "30", "Unmapped drug"),
        ];
        let sheet_diagnoses: Vec<SourceRow> = vec![
            [("hospital_id", "12345"), ("diagnosis_code", "I10.0")]
                .into_iter()
                .collect(),
        ];

        let mut session = ReconSession::new("12345", ReconConfig::default());
        session.load_medications(&medications, &sample_lookup()).unwrap();
        session.load_diagnoses(&[], &sheet_diagnoses);

        assert_eq!(session.anomalies.invalid_codes, 1);
        assert_eq!(session.anomalies.unmapped_drugs, 1);
        assert_eq!(session.anomalies.source_fallbacks, 1);

        // Both groups retained for display, neither feeds inference
        assert_eq!(session.medications.current.len(), 2);
        assert_eq!(session.medications.current_atc_string(), "");
        assert!(session.comorbidity_candidates().is_empty());
    }

    #[test]
    fn test_repeated_loads_are_idempotent() {
        let medications = vec![med_row("12345", "654321", "20240101", "30", "Amlodipine 5mg")];
        let mut session = ReconSession::new("12345", ReconConfig::default());

        session.load_medications(&medications, &sample_lookup()).unwrap();
        let first = session.medications.clone();
        session.load_medications(&medications, &sample_lookup()).unwrap();
        assert_eq!(session.medications, first);
    }
}
