//! FFT-based Dominant Frequency Analysis

use crate::columns::FeatureKind;
use crate::error::FeatureError;
use rustfft::{num_complex::Complex, FftPlanner};
use sensor_table::{ChannelSet, SensorTable};
use tracing::debug;

/// Windows with this many samples or fewer get no spectral estimate
pub const MIN_SPECTRAL_SAMPLES: usize = 10;

/// Strongest non-DC component of a window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DominantFrequency {
    /// Frequency in cycles per sample
    pub frequency: f64,
    /// Spectral magnitude `|X_k|`
    pub magnitude: f64,
}

/// Dominant frequency and magnitude for every row of a column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectralSeries {
    pub frequency: Vec<f64>,
    pub magnitude: Vec<f64>,
}

/// Frequencies of the non-negative FFT bins of an `n`-sample window
/// (`k / n` for `k` in `0..=n/2`)
pub fn rfft_frequencies(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    (0..=n / 2).map(|k| k as f64 / n as f64).collect()
}

/// Sliding-window dominant frequency extractor
///
/// Every row gets its own trailing window of up to `window` samples, so the
/// cost is one FFT per row per channel. The planner caches plans per window
/// length.
pub struct SpectralFeatureExtractor {
    /// FFT planner for efficient computation
    planner: FftPlanner<f64>,
    /// Trailing window size (samples)
    window: usize,
    buffer: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl SpectralFeatureExtractor {
    /// Default window size (samples)
    pub const DEFAULT_WINDOW: usize = 100;

    /// Create an extractor with the given window size
    pub fn new(window: usize) -> Result<Self, FeatureError> {
        if window == 0 {
            return Err(FeatureError::InvalidWindow(window));
        }
        Ok(Self {
            planner: FftPlanner::new(),
            window,
            buffer: Vec::new(),
            scratch: Vec::new(),
        })
    }

    /// Window size in samples
    pub fn window(&self) -> usize {
        self.window
    }

    /// Magnitude spectrum of a real signal (`n / 2 + 1` bins)
    ///
    /// No taper or scaling is applied.
    pub fn magnitude_spectrum(&mut self, signal: &[f64]) -> Vec<f64> {
        let n = signal.len();
        if n == 0 {
            return Vec::new();
        }

        self.buffer.clear();
        self.buffer.extend(signal.iter().map(|&v| Complex::new(v, 0.0)));

        let fft = self.planner.plan_fft_forward(n);
        let scratch_len = fft.get_inplace_scratch_len();
        if self.scratch.len() < scratch_len {
            self.scratch.resize(scratch_len, Complex::new(0.0, 0.0));
        }
        fft.process_with_scratch(&mut self.buffer, &mut self.scratch[..scratch_len]);

        // Real input: bins above n/2 mirror the lower half
        self.buffer.iter().take(n / 2 + 1).map(|c| c.norm()).collect()
    }

    /// Dominant non-DC frequency of one window
    ///
    /// Short windows and windows containing missing samples yield zeros.
    pub fn dominant(&mut self, signal: &[f64]) -> DominantFrequency {
        if signal.len() <= MIN_SPECTRAL_SAMPLES || signal.iter().any(|v| !v.is_finite()) {
            return DominantFrequency::default();
        }

        let spectrum = self.magnitude_spectrum(signal);
        let frequencies = rfft_frequencies(signal.len());

        // Skip DC; first maximum wins on ties
        let mut best: Option<(usize, f64)> = None;
        for (idx, &magnitude) in spectrum.iter().enumerate().skip(1) {
            if best.map_or(true, |(_, m)| magnitude > m) {
                best = Some((idx, magnitude));
            }
        }

        match best {
            Some((idx, magnitude)) if idx < frequencies.len() => DominantFrequency {
                frequency: frequencies[idx],
                magnitude,
            },
            _ => DominantFrequency::default(),
        }
    }

    /// Dominant frequency series of one column
    pub fn compute(&mut self, values: &[f64]) -> SpectralSeries {
        let mut series = SpectralSeries {
            frequency: Vec::with_capacity(values.len()),
            magnitude: Vec::with_capacity(values.len()),
        };

        for i in 0..values.len() {
            let start = (i + 1).saturating_sub(self.window);
            let dominant = self.dominant(&values[start..=i]);
            series.frequency.push(dominant.frequency);
            series.magnitude.push(dominant.magnitude);
        }
        series
    }

    /// Append `dom_freq`/`dom_mag` columns for every channel
    pub fn apply(
        &mut self,
        table: &SensorTable,
        channels: &ChannelSet,
    ) -> Result<SensorTable, FeatureError> {
        channels.validate(table)?;

        debug!(
            "Spectral features: window={}, {} rows x {} channels",
            self.window,
            table.num_rows(),
            channels.len()
        );

        let mut result = table.clone();
        for channel in channels.iter() {
            let series = self.compute(table.column(channel)?);
            result.push_column(FeatureKind::DomFreq.column_name(channel), series.frequency)?;
            result.push_column(FeatureKind::DomMag.column_name(channel), series.magnitude)?;
        }
        Ok(result)
    }
}

impl Default for SpectralFeatureExtractor {
    fn default() -> Self {
        Self {
            planner: FftPlanner::new(),
            window: Self::DEFAULT_WINDOW,
            buffer: Vec::new(),
            scratch: Vec::new(),
        }
    }
}
