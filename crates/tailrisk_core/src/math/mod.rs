//! Mathematical utilities.
//!
//! - [`distributions`]: Standard normal CDF, PDF and quantile function
//! - [`statistics`]: Sample moments, empirical CDF and density grids

pub mod distributions;
pub mod statistics;

pub use distributions::{erf, norm_cdf, norm_inv_cdf, norm_pdf};
pub use statistics::{
    empirical_cdf, empirical_density, probability_at_or_below, sample_mean, sample_variance,
    DistributionGrid,
};
