use {
    crate::{
        domain::{AlignedRow, Granularity, WeekNumbering},
        utils::{approx_week_number, finite_mean},
    },
    chrono::{Datelike, NaiveDate},
    itertools::Itertools,
    std::collections::{BTreeMap, BTreeSet},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PeriodKey {
    Week { year: i32, week: u32 },
    Month { year: i32, month: u32 },
}

fn period_key(date: NaiveDate, granularity: Granularity, numbering: WeekNumbering) -> Option<PeriodKey> {
    match granularity {
        Granularity::Daily => None,
        Granularity::Weekly => Some(match numbering {
            WeekNumbering::Approximate => PeriodKey::Week {
                year: date.year(),
                week: approx_week_number(date),
            },
            WeekNumbering::Iso => {
                let iso = date.iso_week();
                PeriodKey::Week {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
        }),
        Granularity::Monthly => Some(PeriodKey::Month {
            year: date.year(),
            month: date.month(),
        }),
    }
}

/// Reduces date-sorted rows to weekly or monthly buckets using the approximate week key.
pub fn downsample(rows: &[AlignedRow], granularity: Granularity) -> Vec<AlignedRow> {
    downsample_with(rows, granularity, WeekNumbering::default())
}

/// Buckets are runs of consecutive rows sharing a period key. Each bucket becomes
/// one row dated at its last row, every field averaged over the rows that hold a
/// finite value for it (`0` when none do).
pub fn downsample_with(
    rows: &[AlignedRow],
    granularity: Granularity,
    numbering: WeekNumbering,
) -> Vec<AlignedRow> {
    debug_assert!(
        rows.windows(2).all(|w| w[0].date < w[1].date),
        "downsample expects strictly increasing dates"
    );

    if granularity == Granularity::Daily {
        return rows.to_vec();
    }

    let buckets = rows
        .iter()
        .chunk_by(|row| period_key(row.date, granularity, numbering));

    let mut out = Vec::new();
    for (_, bucket) in &buckets {
        let bucket: Vec<&AlignedRow> = bucket.collect();
        let Some(last) = bucket.last() else {
            continue;
        };

        let fields: BTreeSet<&str> = bucket
            .iter()
            .flat_map(|row| row.values.keys().map(String::as_str))
            .collect();

        let values: BTreeMap<String, f64> = fields
            .into_iter()
            .map(|field| {
                let mean = finite_mean(bucket.iter().filter_map(|row| row.values.get(field)));
                (field.to_string(), mean.unwrap_or(0.0))
            })
            .collect();

        out.push(AlignedRow {
            date: last.date,
            values,
        });
    }
    out
}
