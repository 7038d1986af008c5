use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::telemetry::DispatchTelemetry;

/// Export all completed booking records to a parquet file.
pub fn write_completed_bookings_parquet<P: AsRef<Path>>(
    path: P,
    telemetry: &DispatchTelemetry,
) -> Result<(), Box<dyn Error>> {
    let records = telemetry.completed_bookings();

    let mut booking_ids = Vec::with_capacity(records.len());
    let mut requested_at = Vec::with_capacity(records.len());
    let mut driver_acquired_at = Vec::with_capacity(records.len());
    let mut picked_up_at = Vec::with_capacity(records.len());
    let mut completed_at = Vec::with_capacity(records.len());

    for record in &records {
        booking_ids.push(record.booking_id);
        requested_at.push(record.requested_at_ms);
        driver_acquired_at.push(record.driver_acquired_at_ms);
        picked_up_at.push(record.picked_up_at_ms);
        completed_at.push(record.completed_at_ms);
    }

    let schema = Schema::new(vec![
        Field::new("booking_id", DataType::UInt64, false),
        Field::new("passenger", DataType::Utf8, false),
        Field::new("driver", DataType::Utf8, false),
        Field::new("region", DataType::Utf8, false),
        Field::new("requested_at_ms", DataType::UInt64, false),
        Field::new("driver_acquired_at_ms", DataType::UInt64, false),
        Field::new("picked_up_at_ms", DataType::UInt64, false),
        Field::new("completed_at_ms", DataType::UInt64, false),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(booking_ids)),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.passenger_name.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.driver_name.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.region_name.as_str()),
        )),
        Arc::new(UInt64Array::from(requested_at)),
        Arc::new(UInt64Array::from(driver_acquired_at)),
        Arc::new(UInt64Array::from(picked_up_at)),
        Arc::new(UInt64Array::from(completed_at)),
    ];

    write_record_batch(path, schema, arrays)
}

fn write_record_batch<P: AsRef<Path>>(
    path: P,
    schema: Schema,
    arrays: Vec<ArrayRef>,
) -> Result<(), Box<dyn Error>> {
    let schema = Arc::new(schema);
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
