use fts_forecast::data::{CsvColumns, DataLoader};
use fts_forecast::error::ForecastError;
use fts_math::MathError;
use std::io;

#[test]
fn test_error_conversion() {
    // Test IO error conversion
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    // Test math error conversion
    let math_error = MathError::InvalidInput("Series is empty".to_string());
    match ForecastError::from(math_error) {
        ForecastError::InvalidInput(msg) => assert_eq!(msg, "Series is empty"),
        other => panic!("Expected InvalidInput, got {:?}", other),
    }

    // Test JSON error conversion
    let json_error = serde_json::from_str::<Vec<f64>>("[1.0,").unwrap_err();
    assert!(matches!(
        ForecastError::from(json_error),
        ForecastError::SerializationError(_)
    ));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("inertia must be finite".to_string());
    assert!(error.to_string().contains("inertia must be finite"));

    let error = ForecastError::UnclassifiedValue {
        index: 4,
        value: 15_321.5,
    };
    let error_string = error.to_string();
    assert!(error_string.contains("15321.5"));
    assert!(error_string.contains("index 4"));

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}

#[test]
fn test_csv_error_conversion() {
    // A row with more fields than the header is rejected by the csv reader.
    let data = "Tanggal,Kurs Jual\n2024-01-01,15000,1\n";
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let csv_error = reader.records().next().unwrap().unwrap_err();

    match ForecastError::from(csv_error) {
        ForecastError::CsvError(msg) => assert!(!msg.is_empty()),
        other => panic!("Expected CsvError, got {:?}", other),
    }

    // The loader surfaces the same failure through `?`
    let data = "Tanggal,Kurs Jual\n2024-01-01,15000\n2024-01-02,15010,7\n";
    assert!(matches!(
        DataLoader::from_reader(data.as_bytes(), &CsvColumns::default()),
        Err(ForecastError::CsvError(_))
    ));
}
