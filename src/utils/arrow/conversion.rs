//! Conversion of finalized rows into Arrow record batches
//!
//! Column names and order come from [`OUTPUT_COLUMNS`]. The presidential flag
//! is written as an integer 0/1 column.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::{DemographicsRecord, OUTPUT_COLUMNS, OutputColumn};

/// Arrow type and nullability of an output column
#[must_use]
pub fn column_type(column: OutputColumn) -> (DataType, bool) {
    match column {
        OutputColumn::State => (DataType::Utf8, false),
        OutputColumn::Year | OutputColumn::YearsSince2000 => (DataType::Int32, false),
        OutputColumn::TotalBallots => (DataType::Int64, true),
        OutputColumn::Presidential => (DataType::Int64, false),
        OutputColumn::PercentVotingEligibleVotes
        | OutputColumn::PercentBachelors
        | OutputColumn::Income
        | OutputColumn::PercentWhite
        | OutputColumn::AverageAge
        | OutputColumn::Population
        | OutputColumn::LandAreaSqm
        | OutputColumn::PopulationDensity => (DataType::Float64, true),
    }
}

/// Schema shared by every output table
#[must_use]
pub fn demographics_schema() -> SchemaRef {
    let fields: Vec<Field> = OUTPUT_COLUMNS
        .iter()
        .map(|&column| {
            let (data_type, nullable) = column_type(column);
            Field::new(column.header(), data_type, nullable)
        })
        .collect();
    Arc::new(Schema::new(fields))
}

fn float_column(rows: &[DemographicsRecord], get: impl Fn(&DemographicsRecord) -> Option<f64>) -> ArrayRef {
    Arc::new(rows.iter().map(get).collect::<Float64Array>())
}

fn build_column(rows: &[DemographicsRecord], column: OutputColumn) -> ArrayRef {
    match column {
        OutputColumn::State => Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.state.as_str()),
        )),
        OutputColumn::Year => Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
        OutputColumn::YearsSince2000 => Arc::new(Int32Array::from_iter_values(
            rows.iter().map(|r| r.years_since_2000),
        )),
        OutputColumn::TotalBallots => {
            Arc::new(rows.iter().map(|r| r.total_ballots).collect::<Int64Array>())
        }
        OutputColumn::Presidential => Arc::new(Int64Array::from_iter_values(
            rows.iter().map(DemographicsRecord::presidential_code),
        )),
        OutputColumn::PercentVotingEligibleVotes => float_column(rows, |r| r.percent_voting_eligible),
        OutputColumn::PercentBachelors => float_column(rows, |r| r.percent_bachelors),
        OutputColumn::Income => float_column(rows, |r| r.income),
        OutputColumn::PercentWhite => float_column(rows, |r| r.percent_white),
        OutputColumn::AverageAge => float_column(rows, |r| r.average_age),
        OutputColumn::Population => float_column(rows, |r| r.population),
        OutputColumn::LandAreaSqm => float_column(rows, |r| r.land_area),
        OutputColumn::PopulationDensity => float_column(rows, |r| r.population_density),
    }
}

/// Build a record batch with freshly allocated buffers from finalized rows
pub fn records_to_batch(rows: &[DemographicsRecord]) -> Result<RecordBatch> {
    let columns: Vec<ArrayRef> = OUTPUT_COLUMNS
        .iter()
        .map(|&column| build_column(rows, column))
        .collect();
    Ok(RecordBatch::try_new(demographics_schema(), columns)?)
}
