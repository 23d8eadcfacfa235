//! Indicator trait definitions.

/// Trait for batch technical indicators.
///
/// Indicators process a price series and produce a derived series. The
/// output is shorter than the input by the warm-up length; values are
/// aligned to the END of the input.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// Returns an empty vector when `data` is shorter than the warm-up.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Minimum number of data points required.
    fn period(&self) -> usize;

    /// Indicator name.
    fn name(&self) -> &str;
}

/// Multi-output indicator (e.g. MACD produces line, signal, histogram).
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Minimum number of data points required.
    fn period(&self) -> usize;

    /// Indicator name.
    fn name(&self) -> &str;
}
