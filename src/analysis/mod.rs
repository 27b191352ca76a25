// Pure time-series stages: align -> downsample -> normalize | correlate
mod aligner;
mod correlation;
mod downsampler;
mod normalizer;
pub mod pipeline;

pub use aligner::{align, align_tracked};
pub use correlation::{MissingPolicy, correlate, correlate_with, pearson};
pub use downsampler::{downsample, downsample_with};
pub use normalizer::{NormalizeConfig, normalize};
pub use pipeline::{
    ChartRequest, ChartView, CorrelationRequest, CorrelationView, PipelineError, chart_rows,
    correlation_series, correlation_view,
};
