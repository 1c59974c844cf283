//! End-to-end tests of the train/predict lifecycle through the library
//! API, using a synthetic dataset with a known feature/target relation.

use tempfile::TempDir;

use bp_predictor::config::{Config, StorageConfig, TrainingConfig};
use bp_predictor::model::trainer;
use bp_predictor::{BpRecord, Error, Predictor};

fn synthetic_records(n: usize) -> Vec<BpRecord> {
    (0..n)
        .map(|i| {
            let workday = (i % 2) as f64;
            let stress = (i % 10) as f64;
            let sleep = (i % 8) as f64 + 1.0;
            let tiredness = (i % 6) as f64;
            BpRecord {
                workday,
                stress_levels: stress,
                sleep_quality: sleep,
                tiredness,
                upper_bp: 100.0 + 4.0 * stress - sleep + 2.0 * tiredness + 3.0 * workday,
                lower_bp: 65.0 + 2.0 * stress - 0.5 * sleep + tiredness,
            }
        })
        .collect()
}

fn write_dataset(config: &Config, records: &[BpRecord]) {
    let mut writer = csv::Writer::from_path(&config.storage.dataset_path).unwrap();
    for record in records {
        writer.serialize(record).unwrap();
    }
    writer.flush().unwrap();
}

fn lifecycle_config(dir: &TempDir) -> Config {
    Config {
        storage: StorageConfig {
            dataset_path: dir.path().join("records.csv"),
            model_dir: dir.path().join("models"),
        },
        training: TrainingConfig {
            n_trees: 20,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_retrain_reports_held_out_scores() {
    let dir = TempDir::new().unwrap();
    let config = lifecycle_config(&dir);
    write_dataset(&config, &synthetic_records(120));

    let report = trainer::retrain(&config).unwrap();

    assert_eq!(report.train_rows + report.test_rows, 120);
    assert_eq!(report.test_rows, 24);

    // The relation is noiseless, so the forest should explain most of
    // the held-out variance
    let upper = report.upper.expect("held-out scores for upper model");
    let lower = report.lower.expect("held-out scores for lower model");
    assert!(upper.r2 > 0.5, "upper r2 was {}", upper.r2);
    assert!(lower.r2 > 0.5, "lower r2 was {}", lower.r2);
}

#[test]
fn test_prediction_close_to_known_relation() {
    let dir = TempDir::new().unwrap();
    let config = lifecycle_config(&dir);
    write_dataset(&config, &synthetic_records(120));
    trainer::retrain(&config).unwrap();

    let predictor = Predictor::new(&config.storage);

    // A mid-range row from the training distribution
    let (upper, lower) = predictor.predict(1.0, 5.0, 4.0, 3.0).unwrap();
    let expected_upper = 100.0 + 4.0 * 5.0 - 4.0 + 2.0 * 3.0 + 3.0;
    let expected_lower = 65.0 + 2.0 * 5.0 - 0.5 * 4.0 + 3.0;

    assert!(
        (upper - expected_upper).abs() < 15.0,
        "upper prediction {upper} too far from {expected_upper}"
    );
    assert!(
        (lower - expected_lower).abs() < 15.0,
        "lower prediction {lower} too far from {expected_lower}"
    );
}

#[test]
fn test_retrain_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let config = lifecycle_config(&dir);
    write_dataset(&config, &synthetic_records(80));

    trainer::retrain(&config).unwrap();
    let predictor = Predictor::new(&config.storage);
    let first = predictor.predict(1.0, 5.0, 4.0, 3.0).unwrap();

    trainer::retrain(&config).unwrap();
    let second = predictor.predict(1.0, 5.0, 4.0, 3.0).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_predict_without_models_is_not_found() {
    let dir = TempDir::new().unwrap();
    let config = lifecycle_config(&dir);

    let predictor = Predictor::new(&config.storage);
    match predictor.predict(1.0, 3.0, 7.0, 2.0) {
        Err(Error::ModelNotFound(_)) => {}
        other => panic!("expected ModelNotFound, got {other:?}"),
    }
}

#[test]
fn test_retrain_on_empty_dataset_fails() {
    let dir = TempDir::new().unwrap();
    let config = lifecycle_config(&dir);
    std::fs::write(
        &config.storage.dataset_path,
        "Workday,Stress_Levels,Sleep_Quality,Tiredness,Upper_BP,Lower_BP\n",
    )
    .unwrap();

    match trainer::retrain(&config) {
        Err(Error::EmptyDataset) => {}
        other => panic!("expected EmptyDataset, got {other:?}"),
    }
}
