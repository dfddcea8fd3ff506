//! Load lease scenarios from JSON and rent tables from CSV

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::Reader;
use serde::Deserialize;

use super::{LeaseScenario, RentStep};
use crate::error::{LeaseError, LeaseResult};

/// A scenario file holds either one record or an array of records
#[derive(Deserialize)]
#[serde(untagged)]
enum ScenarioFile {
    Many(Vec<LeaseScenario>),
    One(Box<LeaseScenario>),
}

/// Raw CSV row of a rent table
#[derive(Debug, Deserialize)]
struct RentStepRow {
    #[serde(alias = "startMonth", alias = "StartMonth")]
    start_month: i64,
    #[serde(alias = "endMonth", alias = "EndMonth")]
    end_month: i64,
    #[serde(alias = "ratePsfYr", alias = "Rate")]
    rate_psf_yr: f64,
}

impl RentStepRow {
    fn into_step(self, line: usize) -> LeaseResult<RentStep> {
        if !self.rate_psf_yr.is_finite() {
            return Err(LeaseError::InvalidInput {
                field: format!("rent step row {}", line),
                reason: "rate is not a finite number".to_string(),
            });
        }
        Ok(RentStep {
            start_month: self.start_month,
            end_month: self.end_month,
            rate_psf_yr: self.rate_psf_yr,
        })
    }
}

/// Load all scenarios from a JSON file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> LeaseResult<Vec<LeaseScenario>> {
    let file = File::open(path)?;
    load_scenarios_from_reader(BufReader::new(file))
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> LeaseResult<Vec<LeaseScenario>> {
    let parsed: ScenarioFile = serde_json::from_reader(reader)?;
    let scenarios = match parsed {
        ScenarioFile::Many(list) => list,
        ScenarioFile::One(one) => vec![*one],
    };
    log::debug!("Loaded {} lease scenario(s)", scenarios.len());
    Ok(scenarios)
}

/// Load a rent table from a CSV file with `start_month,end_month,rate_psf_yr` columns
pub fn load_rent_steps<P: AsRef<Path>>(path: P) -> LeaseResult<Vec<RentStep>> {
    let file = File::open(path)?;
    load_rent_steps_from_reader(file)
}

pub fn load_rent_steps_from_reader<R: Read>(reader: R) -> LeaseResult<Vec<RentStep>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut steps = Vec::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: RentStepRow = result?;
        steps.push(row.into_step(i + 1)?);
    }

    Ok(steps)
}
