use {
    crate::domain::{AlignedCell, AlignedRow, Series, TrackedRow},
    chrono::NaiveDate,
    std::collections::{BTreeMap, BTreeSet},
};

/// Merges named series onto the union of their dates, forward-filling gaps.
///
/// A row holds a value for an asset if the asset was observed on that date or
/// on any earlier date; before its first observation the key is absent.
pub fn align<S: AsRef<Series>>(series: &BTreeMap<String, S>) -> Vec<AlignedRow> {
    align_tracked(series).into_iter().map(AlignedRow::from).collect()
}

/// Same rows as [`align`], with each cell marked observed or filled.
pub fn align_tracked<S: AsRef<Series>>(series: &BTreeMap<String, S>) -> Vec<TrackedRow> {
    let dates: BTreeSet<NaiveDate> = series
        .values()
        .flat_map(|s| s.as_ref().points().iter().map(|p| p.date))
        .collect();

    // One cursor per asset. Each series is sorted, so a single forward walk suffices.
    let mut cursors: Vec<(&str, &Series, usize, Option<f64>)> = series
        .iter()
        .map(|(name, s)| (name.as_str(), s.as_ref(), 0, None))
        .collect();

    let mut rows = Vec::with_capacity(dates.len());
    for date in dates {
        let mut cells = BTreeMap::new();
        for (name, s, idx, last) in cursors.iter_mut() {
            let points = s.points();
            // Every point's date is on the axis, so the cursor never trails `date`.
            if *idx < points.len() && points[*idx].date == date {
                let value = points[*idx].value;
                *last = Some(value);
                *idx += 1;
                cells.insert(name.to_string(), AlignedCell::Observed(value));
            } else if let Some(value) = *last {
                cells.insert(name.to_string(), AlignedCell::Filled(value));
            }
        }
        rows.push(TrackedRow { date, cells });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimePoint;
    use crate::utils::parse_date;

    fn d(text: &str) -> NaiveDate {
        parse_date(text).unwrap()
    }

    fn series(points: &[(&str, f64)]) -> Series {
        Series::try_from_points(
            points
                .iter()
                .map(|(date, value)| TimePoint::new(d(date), *value))
                .collect(),
        )
        .unwrap()
    }

    fn input(entries: Vec<(&str, Series)>) -> BTreeMap<String, Series> {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn forward_fills_between_observations() {
        let map = input(vec![
            ("A", series(&[("2024-01-01", 100.0), ("2024-01-03", 102.0)])),
            (
                "B",
                series(&[("2024-01-01", 50.0), ("2024-01-02", 51.0), ("2024-01-03", 52.0)]),
            ),
        ]);
        let rows = align(&map);

        let dates: Vec<_> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d("2024-01-01"), d("2024-01-02"), d("2024-01-03")]);
        assert_eq!(rows[1].get("A"), Some(100.0));
        assert_eq!(rows[1].get("B"), Some(51.0));
        assert_eq!(rows[2].get("A"), Some(102.0));
    }

    #[test]
    fn key_absent_before_first_observation() {
        let map = input(vec![
            ("A", series(&[("2024-01-01", 1.0), ("2024-01-02", 2.0)])),
            ("B", series(&[("2024-01-02", 20.0)])),
        ]);
        let rows = align(&map);
        assert!(!rows[0].values.contains_key("B"));
        assert_eq!(rows[1].get("B"), Some(20.0));
    }

    #[test]
    fn date_axis_is_sorted_union() {
        let map = input(vec![
            ("A", series(&[("2024-01-05", 1.0), ("2024-02-01", 2.0)])),
            ("B", series(&[("2023-12-31", 3.0), ("2024-01-05", 4.0), ("2024-01-20", 5.0)])),
            ("C", series(&[("2024-01-10", 6.0)])),
        ]);
        let rows = align(&map);
        let dates: Vec<_> = rows.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![
                d("2023-12-31"),
                d("2024-01-05"),
                d("2024-01-10"),
                d("2024-01-20"),
                d("2024-02-01")
            ]
        );
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        // C fills forward from 01-10 only.
        assert_eq!(rows[4].get("C"), Some(6.0));
        assert_eq!(rows[1].get("C"), None);
    }

    #[test]
    fn empty_series_contributes_nothing() {
        let map = input(vec![
            ("A", series(&[("2024-01-01", 1.0)])),
            ("Empty", Series::default()),
        ]);
        let rows = align(&map);
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].values.contains_key("Empty"));
    }

    #[test]
    fn empty_input_gives_no_rows() {
        assert!(align(&BTreeMap::<String, Series>::new()).is_empty());
    }

    #[test]
    fn tracked_rows_mark_filled_cells() {
        let map = input(vec![
            ("A", series(&[("2024-01-01", 100.0), ("2024-01-03", 102.0)])),
            ("B", series(&[("2024-01-02", 51.0)])),
        ]);
        let rows = align_tracked(&map);
        assert_eq!(rows[1].cells["A"], AlignedCell::Filled(100.0));
        assert_eq!(rows[1].cells["B"], AlignedCell::Observed(51.0));
        assert_eq!(rows[2].cells["A"], AlignedCell::Observed(102.0));
        assert!(rows[2].cells["B"].is_filled());
    }
}
