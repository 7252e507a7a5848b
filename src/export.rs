use crate::error::Result;
use crate::schema::{SalesRecord, DATE_FORMAT, MONTHLY_SENTINEL};
use crate::RowOrigin;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Output row shape. Field order is the output column order; synthesized
/// rows leave Periodo, Fecha, Categoria (when unmapped) and MES empty.
#[derive(Serialize)]
struct OutputRow<'a> {
    #[serde(rename = "Periodo")]
    periodo: Option<&'a str>,
    #[serde(rename = "Fecha")]
    fecha: Option<String>,
    #[serde(rename = "Marca")]
    marca: &'a str,
    #[serde(rename = "Region")]
    region: &'a str,
    #[serde(rename = "Categoria")]
    categoria: Option<&'a str>,
    #[serde(rename = "CajasVirt")]
    cajas_virt: f64,
    #[serde(rename = "Venta")]
    venta: f64,
    #[serde(rename = "AÑO")]
    anio: i32,
    #[serde(rename = "MES")]
    mes: Option<u32>,
}

impl<'a> OutputRow<'a> {
    fn from_record(record: &'a SalesRecord) -> Self {
        let periodo = match record.origin {
            RowOrigin::Observed => Some(MONTHLY_SENTINEL),
            RowOrigin::Synthesized => None,
        };
        Self {
            periodo,
            fecha: record.date.map(|d| d.format(DATE_FORMAT).to_string()),
            marca: &record.brand,
            region: &record.region,
            categoria: record.category.as_deref(),
            cajas_virt: record.volume,
            venta: record.sales,
            anio: record.year,
            mes: record.month,
        }
    }
}

/// Serialize the output collection as CSV into any writer, preserving the
/// collection's row order.
pub fn write_collection<W: Write>(records: &[SalesRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(OutputRow::from_record(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the output collection to a CSV file. Invoked only after processing
/// has succeeded, so a failed run never leaves a partial file behind.
pub fn save_collection<P: AsRef<Path>>(records: &[SalesRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_collection(records, file)?;
    info!("wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
