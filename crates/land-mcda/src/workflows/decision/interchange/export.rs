use std::io::Write;

use super::super::domain::Scenario;

/// Write one row per ranked alternative: rank, id, name, total, then raw scores.
///
/// Score columns follow the scenario's criterion order; missing scores are
/// left blank.
pub fn write_results_csv<W: Write>(writer: W, scenario: &Scenario) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![
        "rank".to_string(),
        "id".to_string(),
        "name".to_string(),
        "total_score".to_string(),
    ];
    header.extend(
        scenario
            .criteria()
            .iter()
            .map(|criterion| criterion.id.to_string()),
    );
    csv_writer.write_record(&header)?;

    for entry in scenario.alternatives() {
        let mut row = vec![
            entry.rank.to_string(),
            entry.id().to_string(),
            entry.name().to_string(),
            entry.total_score.to_string(),
        ];
        row.extend(scenario.criteria().iter().map(|criterion| {
            entry
                .alternative
                .score(&criterion.id)
                .map(|score| score.to_string())
                .unwrap_or_default()
        }));
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn results_csv_string(scenario: &Scenario) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_results_csv(&mut buffer, scenario)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
