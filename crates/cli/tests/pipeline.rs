use flagger_cli::commands::{check_db, flag_field, DbCheck, FlagOptions};
use flagger_core::config::AppConfig;
use std::fs;
use storage::report::OutputFormat;
use storage::Field;
use tempfile::tempdir;

#[tokio::test]
async fn test_industry_csv_run() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("unique_industries.csv");
    let out_dir = temp.path().join("reports");
    fs::write(
        &input,
        "industry\n\
         Software Development\n\
         n/a\n\
         \"Staffing, Recruiting, Consulting, Security Services, Network Solutions\"\n\
         acountign services\n\
         jane@acme.io\n\
         B2B\n",
    )
    .unwrap();

    let opts = FlagOptions {
        input: Some(input),
        output_dir: Some(out_dir.clone()),
        ..FlagOptions::default()
    };
    let outcome = flag_field(&AppConfig::default(), Field::Industry, &opts)
        .await
        .unwrap();

    assert_eq!(outcome.report.records.len(), 6);
    assert_eq!(outcome.report.flagged_count(), 5);
    let summary = &outcome.report.summary;
    assert_eq!(summary.get("Blank/None/Other"), 1);
    assert_eq!(summary.get("Suspicious phrase"), 1);
    assert_eq!(summary.get("Possible typo"), 1);
    assert_eq!(summary.get("Possibly personal info"), 1);
    assert_eq!(summary.get("Generic/Unspecific"), 1);

    assert_eq!(
        outcome.paths.all,
        out_dir.join("all_industries_with_flags_and_reasons.csv")
    );
    let flagged = fs::read_to_string(&outcome.paths.flagged).unwrap();
    assert_eq!(flagged.lines().count(), 6);
    assert!(!flagged.contains("Software Development"));
}

#[tokio::test]
async fn test_city_run_uses_config_and_rules() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("cities.csv");
    let rules = temp.path().join("rules.toml");
    fs::write(&input, "town,lead_ids\nAlesund 2,\"{a1}\"\nBoston,\"{b1,b2}\"\n").unwrap();
    fs::write(&rules, "[city]\nwhitelist = [\"Alesund 2\"]\n").unwrap();

    let mut cfg = AppConfig::default();
    cfg.input.city.csv = Some(input.to_string_lossy().into_owned());
    cfg.input.city.column = Some("town".to_string());
    cfg.rules.path = Some(rules.to_string_lossy().into_owned());
    cfg.output.dir = temp.path().to_string_lossy().into_owned();
    cfg.output.format = OutputFormat::Json;

    let outcome = flag_field(&cfg, Field::City, &FlagOptions::default())
        .await
        .unwrap();
    assert_eq!(outcome.report.flagged_count(), 0);
    assert_eq!(outcome.report.records[1].lead_ids, vec!["b1", "b2"]);
    assert!(outcome
        .paths
        .flagged
        .ends_with("flagged_cities_with_reason.json"));
    let flagged = fs::read_to_string(&outcome.paths.flagged).unwrap();
    assert_eq!(flagged.trim(), "[]");
}

#[tokio::test]
async fn test_missing_column_fails() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("cities.csv");
    fs::write(&input, "name\nBoston\n").unwrap();
    let opts = FlagOptions {
        input: Some(input),
        output_dir: Some(temp.path().to_path_buf()),
        ..FlagOptions::default()
    };
    let err = flag_field(&AppConfig::default(), Field::City, &opts)
        .await
        .err()
        .unwrap();
    assert!(format!("{err:#}").contains("column 'city' not found"));
}

#[tokio::test]
async fn test_check_db_reports_failure() {
    let mut cfg = AppConfig::default();
    cfg.database.url = Some("not a database url".to_string());
    match check_db(&cfg).await {
        DbCheck::Failed(msg) => assert!(!msg.is_empty()),
        DbCheck::Connected(_) => panic!("unexpected connection"),
    }
}
