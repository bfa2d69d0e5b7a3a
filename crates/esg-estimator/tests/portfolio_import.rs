use std::io::Write;

use esg_estimator::portfolio::{PortfolioImportError, PortfolioImporter};
use esg_estimator::scoring::{FleetType, ScoringEngine, LEADER_RECOMMENDATION};

const EXPORT: &str = "\
Company,Industry,Size,Location,Monthly kWh,Waste kg,Fleet,Sustainable Materials %,Annual Revenue,Tax Bracket %
Lumen Systems,Technology,11-250,European Union,0,0,100% Electric,100,1000000,21
Harbor Freight Co,Logistics,250+,United States,10000,2400,Internal Combustion (Gas/Diesel),10,2750000,25
";

fn write_export(contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!(
        "esg-portfolio-{}-{}.csv",
        std::process::id(),
        contents.len()
    ));
    let mut file = std::fs::File::create(&path).expect("temp file created");
    file.write_all(contents.as_bytes()).expect("temp file written");
    path
}

#[test]
fn scores_each_company_in_the_export() {
    let path = write_export(EXPORT);

    let summary = PortfolioImporter::from_path(&path, &ScoringEngine::standard())
        .expect("portfolio scores");
    let _ = std::fs::remove_file(&path);

    assert_eq!(summary.entries.len(), 2);

    let leader = &summary.entries[0];
    assert_eq!(leader.company_name, "Lumen Systems");
    assert_eq!(leader.result.score, 100);
    assert_eq!(
        leader.result.recommendations,
        vec![LEADER_RECOMMENDATION.to_string()]
    );

    let laggard = &summary.entries[1];
    assert_eq!(laggard.company_name, "Harbor Freight Co");
    assert_eq!(laggard.result.energy_score, 0);
    assert_eq!(laggard.result.waste_score, 0);
    assert_eq!(laggard.result.score, 3);
    assert_eq!(laggard.result.estimated_tax_offset, 0.0);
    assert_eq!(laggard.result.recommendations.len(), 4);

    assert_eq!(summary.average_score, Some(51.5));
    assert_eq!(summary.total_estimated_offset, 50_000.0);
}

#[test]
fn parsed_companies_keep_their_fleet() {
    let companies =
        PortfolioImporter::read_companies(EXPORT.as_bytes()).expect("portfolio parses");

    assert_eq!(companies[0].fleet_type, FleetType::Electric);
    assert_eq!(companies[1].fleet_type, FleetType::Ice);
    assert_eq!(companies[1].tax_bracket, 25.0);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("esg-portfolio-does-not-exist.csv");

    let err = PortfolioImporter::from_path(&path, &ScoringEngine::standard())
        .expect_err("file missing");
    assert!(matches!(err, PortfolioImportError::Io(_)));
}
