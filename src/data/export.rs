//! CSV export of loaded series as a wide, date-keyed table.

use {
    crate::{domain::Series, utils::format_date},
    anyhow::{Context, Result, anyhow},
    chrono::NaiveDate,
    std::{
        collections::{BTreeMap, BTreeSet},
        io,
        path::Path,
        sync::Arc,
    },
};

fn writer<W: io::Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(inner)
}

/// Header `date,<asset...>`, then one record per date any asset has.
///
/// Values are written as observed. A date an asset lacks is an empty field,
/// not a carried-forward value.
fn write_table<W: io::Write>(
    out: &mut csv::Writer<W>,
    series: &BTreeMap<String, Arc<Series>>,
) -> csv::Result<()> {
    let dates: BTreeSet<NaiveDate> = series
        .values()
        .flat_map(|s| s.points().iter().map(|p| p.date))
        .collect();

    out.write_record(std::iter::once("date").chain(series.keys().map(String::as_str)))?;

    for date in dates {
        let record = std::iter::once(format_date(date)).chain(
            series
                .values()
                .map(|s| s.value_on(date).map(|v| v.to_string()).unwrap_or_default()),
        );
        out.write_record(record)?;
    }
    out.flush()?;
    Ok(())
}

pub fn to_csv(series: &BTreeMap<String, Arc<Series>>) -> Result<String> {
    let mut out = writer(Vec::new());
    write_table(&mut out, series).context("formatting CSV")?;
    let bytes = out
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV buffer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

pub fn write_csv(path: &Path, series: &BTreeMap<String, Arc<Series>>) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_table(&mut writer(file), series)
        .with_context(|| format!("writing CSV to {}", path.display()))?;
    log::info!("Exported {} series to {}", series.len(), path.display());
    Ok(())
}
