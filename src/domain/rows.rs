use {
    chrono::NaiveDate,
    serde::{
        Deserialize, Serialize, Serializer,
        ser::SerializeMap,
    },
    std::collections::BTreeMap,
};

/// One date of the union axis. A missing key means the asset had no data yet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AlignedRow {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl AlignedRow {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, asset: &str, value: f64) -> Self {
        self.values.insert(asset.to_string(), value);
        self
    }

    /// The value for `asset` if it is present and a real number.
    pub fn get(&self, asset: &str) -> Option<f64> {
        self.values.get(asset).copied().filter(|v| v.is_finite())
    }
}

/// Aligned value with its provenance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AlignedCell {
    /// Observed on this exact date.
    Observed(f64),
    /// Carried forward from an earlier date.
    Filled(f64),
}

impl AlignedCell {
    pub fn value(&self) -> f64 {
        match *self {
            AlignedCell::Observed(v) | AlignedCell::Filled(v) => v,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, AlignedCell::Filled(_))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackedRow {
    pub date: NaiveDate,
    pub cells: BTreeMap<String, AlignedCell>,
}

impl From<TrackedRow> for AlignedRow {
    fn from(row: TrackedRow) -> Self {
        AlignedRow {
            date: row.date,
            values: row
                .cells
                .into_iter()
                .map(|(asset, cell)| (asset, cell.value()))
                .collect(),
        }
    }
}

/// Chart-ready row: normalized values plus the raw value each came from.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub date: NaiveDate,
    pub values: BTreeMap<String, f64>,
    pub originals: BTreeMap<String, f64>,
}

impl NormalizedRow {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            values: BTreeMap::new(),
            originals: BTreeMap::new(),
        }
    }

    pub fn original_key(asset: &str) -> String {
        format!("{}_original", asset)
    }
}

// Flat shape consumed by the chart layer: {"date", "<asset>", "<asset>_original", ...}
impl Serialize for NormalizedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.values.len() + self.originals.len()))?;
        map.serialize_entry("date", &self.date)?;
        for (asset, value) in &self.values {
            map.serialize_entry(asset, value)?;
        }
        for (asset, value) in &self.originals {
            map.serialize_entry(&Self::original_key(asset), value)?;
        }
        map.end()
    }
}
