//! Cross-scenario comparison over a shared time window

mod equalized;
mod window;

pub use equalized::{compare_equalized, windowed_metrics, EqualizedComparisonResult, WindowedMetrics};
pub use window::{
    clip_to_window, fractional_months, natural_window, ClippedMonth, ComparisonWindow, CustomWindow,
    WindowSource, DAYS_PER_YEAR,
};
