/// Upper bound on ticks generated for one axis.
const MAX_TICKS: i64 = 1000;

/// Minor ticks between consecutive major ticks, counting the major one.
const MINOR_DIVISIONS: f64 = 5.0;

/// A linear data axis: limits, optional label and precomputed ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub label: String,
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
    pub minor_ticks: Vec<f64>,
}

impl Axis {
    /// Axis covering `[lo, hi]`, widened outward to the nearest tick.
    ///
    /// A zero-width range becomes `[lo - 1, hi + 1]`.
    pub fn auto_linear(lo: f64, hi: f64, target_ticks: usize) -> Self {
        if (hi - lo).abs() < 1e-15 {
            return Self::fixed(lo - 1.0, hi + 1.0).with_ticks(1.0);
        }
        let step = tick_step(lo, hi, target_ticks);
        Self::fixed((lo / step).floor() * step, (hi / step).ceil() * step).with_ticks(step)
    }

    /// Axis with exactly `[min, max]` as limits and ticks inside them.
    ///
    /// Non-finite or empty ranges get no ticks.
    pub fn bounded(min: f64, max: f64, target_ticks: usize) -> Self {
        let axis = Self::fixed(min, max);
        if min.is_finite() && max.is_finite() && max > min {
            axis.with_ticks(tick_step(min, max, target_ticks))
        } else {
            axis
        }
    }

    /// Axis with the given limits and no ticks.
    pub fn fixed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            label: String::new(),
            tick_positions: Vec::new(),
            tick_labels: Vec::new(),
            minor_ticks: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Keep the tick marks, drop their text.
    pub fn without_tick_labels(mut self) -> Self {
        self.tick_labels.clear();
        self
    }

    /// Linear map from data space onto `[px_lo, px_hi]`; the pixel range
    /// may be reversed for vertical axes.
    pub fn data_to_pixel(&self, value: f64, px_lo: f64, px_hi: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return px_lo;
        }
        px_lo + (value - self.min) / span * (px_hi - px_lo)
    }

    fn with_ticks(mut self, step: f64) -> Self {
        self.tick_positions = multiples(self.min, self.max, step).collect();
        self.tick_labels = self.tick_positions.iter().map(|&v| tick_label(v, step)).collect();

        let minor = step / MINOR_DIVISIONS;
        let majors = &self.tick_positions;
        self.minor_ticks = multiples(self.min, self.max, minor)
            .filter(|v| majors.iter().all(|m| (m - v).abs() >= minor * 0.01))
            .collect();
        self
    }
}

/// Integer multiples of `step` lying in `[min, max]`, with a small tolerance
/// at both ends.
fn multiples(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
    let usable = step.is_finite() && step > 0.0 && (max - min) / step <= MAX_TICKS as f64;
    let (first, last) = if usable {
        ((min / step - 1e-6).ceil() as i64, (max / step + 1e-6).floor() as i64)
    } else {
        (1, 0)
    };
    (first..=last).map(move |k| k as f64 * step)
}

fn tick_step(lo: f64, hi: f64, target_ticks: usize) -> f64 {
    nice_step((hi - lo) / (target_ticks.max(2) - 1) as f64)
}

/// Round `rough` to 1, 2 or 5 times a power of ten.
fn nice_step(rough: f64) -> f64 {
    const STEPS: [(f64, f64); 3] = [(1.5, 1.0), (3.5, 2.0), (7.5, 5.0)];
    let scale = 10f64.powf(rough.abs().log10().floor());
    let mantissa = rough / scale;
    let nice = STEPS.iter().find(|(limit, _)| mantissa <= *limit).map_or(10.0, |&(_, s)| s);
    nice * scale
}

fn tick_label(value: f64, step: f64) -> String {
    let value = if value.abs() < step * 0.01 { 0.0 } else { value };
    if step >= 1.0 {
        return format!("{}", value.round() as i64);
    }
    let decimals = (-step.log10().floor()) as usize;
    format!("{value:.decimals$}")
}
