// Linear scales and axis tick layout

/// Maps a data domain linearly onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// A zero-span domain maps every value to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Tick labels formatted with the precision implied by the tick step.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let (lo, hi) = ordered(self.domain);
        let decimals = match tick_step(lo, hi, count) {
            Some(step) => step_decimals(step),
            // a single tick carries the value itself
            None => value_decimals(lo),
        };
        self.ticks(count)
            .into_iter()
            .map(|value| (value, format_tick(value, decimals)))
            .collect()
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Extent of `values`, `None` when there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Step between "nice" ticks (1, 2 or 5 times a power of ten) for roughly
/// `count` ticks over `[start, stop]`.
pub fn tick_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    let span = stop - start;
    if count == 0 || span <= 0.0 || !span.is_finite() {
        return None;
    }
    let raw = span / count as f64;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    Some(factor * base)
}

pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = ordered((start, stop));
    if !lo.is_finite() || !hi.is_finite() || count == 0 {
        return Vec::new();
    }
    if lo == hi {
        return vec![lo];
    }
    let Some(step) = tick_step(lo, hi, count) else {
        return Vec::new();
    };
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    // integer multiples of the step, divided for fractional steps so 0.6 stays 0.6
    (first..=last)
        .map(|i| if step < 1.0 { i as f64 / (1.0 / step).round() } else { i as f64 * step })
        .collect()
}

fn step_decimals(step: f64) -> usize {
    let exponent = step.log10().floor();
    if exponent < 0.0 { (-exponent) as usize } else { 0 }
}

/// Fractional digits in the shortest exact rendering of `value`.
fn value_decimals(value: f64) -> usize {
    if !value.is_finite() {
        return 0;
    }
    format!("{}", value.abs())
        .split_once('.')
        .map_or(0, |(_, frac)| frac.len())
}

/// Fixed-precision label with thousands grouped by commas.
pub fn format_tick(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    let is_zero = text.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}
