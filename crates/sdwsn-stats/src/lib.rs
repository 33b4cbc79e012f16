//! Statistical kernels for the SD-WSN analysis pipeline.
//!
//! This crate provides the numeric building blocks used to post-process
//! scheduling-simulation observations:
//!
//! - **Confidence statistics**: mean, sample standard deviation, and 95%
//!   confidence intervals for a set of values
//! - **Cubic polynomials**: evaluation of `f(x) = a·x + b·x² + c·x³ + d`
//!   models over scalars and ordered sequences
//! - **Least-squares fitting**: deriving cubic coefficients from `(x, y)`
//!   data with a bounded, damped optimizer
//!
//! # Modules
//!
//! - [`confidence`]: confidence-bounded summary statistics
//! - [`cubic`]: cubic polynomial models
//! - [`fit`]: least-squares cubic fitting
//!
//! # Examples
//!
//! ## Summarizing a group of values
//!
//! ```
//! use sdwsn_stats::confidence::ConfidenceStats;
//!
//! let stats = ConfidenceStats::from_values(&[0.26, 0.27]).unwrap();
//! assert_eq!(stats.count, 2);
//! assert!((stats.mean - 0.265).abs() < 1e-12);
//! ```
//!
//! ## Evaluating a cubic model
//!
//! ```
//! use sdwsn_stats::cubic::Cubic;
//!
//! let model = Cubic::new(1.0, 0.0, 0.0, 2.0); // f(x) = x + 2
//! assert_eq!(model.eval(3.0), 5.0);
//! ```
//!
//! ## Fitting a cubic to data
//!
//! ```
//! use sdwsn_stats::fit::fit_cubic;
//!
//! let points: Vec<(f64, f64)> = (0..6)
//!     .map(|i| {
//!         let x = f64::from(i) * 10.0;
//!         (x, 2.0 * x - 0.5)
//!     })
//!     .collect();
//! let model = fit_cubic(&points).unwrap();
//! assert!((model.a - 2.0).abs() < 1e-6);
//! ```

pub mod confidence;
pub mod cubic;
pub mod fit;
