// Chart definition domain models
use serde_json::Value;

/// One named series-group with its raw time-indexed data.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDefinition {
    pub title: String,
    pub data: Vec<RawDatum>,
}

impl ChartDefinition {
    pub fn new(title: String, data: Vec<RawDatum>) -> Self {
        Self { title, data }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatumValue {
    Single(Option<f64>),
    Multi(Vec<Option<f64>>),
}

impl DatumValue {
    /// Value of series `index`, null when the entry is missing.
    pub fn series_value(&self, index: usize) -> Option<f64> {
        match self {
            DatumValue::Single(value) if index == 0 => *value,
            DatumValue::Single(_) => None,
            DatumValue::Multi(values) => values.get(index).copied().flatten(),
        }
    }

    /// Every non-null entry, whatever the shape.
    pub fn present_values(&self) -> Vec<f64> {
        match self {
            DatumValue::Single(value) => value.iter().copied().collect(),
            DatumValue::Multi(values) => values.iter().flatten().copied().collect(),
        }
    }
}

/// A `(timestamp, value)` sample. A non-numeric timestamp is carried as NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDatum {
    pub timestamp: f64,
    pub value: DatumValue,
}

impl RawDatum {
    pub fn single(timestamp: f64, value: Option<f64>) -> Self {
        Self {
            timestamp,
            value: DatumValue::Single(value),
        }
    }

    pub fn multi(timestamp: f64, values: Vec<Option<f64>>) -> Self {
        Self {
            timestamp,
            value: DatumValue::Multi(values),
        }
    }

    /// Build a datum from one JSON entry of a chart's `data` array.
    ///
    /// Malformed entries never fail here: a bad timestamp becomes NaN (the
    /// renderer rejects the whole chart) and a bad value becomes null.
    pub fn from_json(entry: &Value) -> Self {
        let Some(pair) = entry.as_array().filter(|pair| !pair.is_empty()) else {
            return Self::single(f64::NAN, None);
        };

        let timestamp = pair[0].as_f64().unwrap_or(f64::NAN);
        match pair.get(1) {
            Some(Value::Array(values)) => {
                Self::multi(timestamp, values.iter().map(Value::as_f64).collect())
            }
            value => Self::single(timestamp, value.and_then(Value::as_f64)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesShape {
    Single,
    Multi(usize),
}

impl SeriesShape {
    /// The first datum decides the shape of the whole chart.
    pub fn detect(data: &[RawDatum]) -> Self {
        match data.first().map(|datum| &datum.value) {
            Some(DatumValue::Multi(values)) => SeriesShape::Multi(values.len()),
            _ => SeriesShape::Single,
        }
    }

    pub fn series_count(&self) -> usize {
        match self {
            SeriesShape::Single => 1,
            SeriesShape::Multi(count) => *count,
        }
    }
}
