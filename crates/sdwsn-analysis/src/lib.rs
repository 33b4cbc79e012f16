//! Post-processing of SD-WSN scheduling-simulation observations.
//!
//! The simulation emits one observation per cycle: network power draw,
//! end-to-end delay, packet delivery ratio, the slotframe size in force,
//! and the scalar reward the scheduler optimized. This crate turns a run's
//! observations into confidence-bounded summary curves over slotframe size
//! and into model-based reward estimates, ready for an external renderer.
//!
//! # Pipeline
//!
//! 1. **Load** ([`observation`]): adapt the data source's key-value records
//!    into an [`ObservationTable`](observation::ObservationTable) with
//!    schema and type checking
//! 2. **Aggregate** ([`aggregate`]): group a metric by an independent
//!    column and compute per-group mean, count, std, and CI95
//! 3. **Model** ([`models`], [`sdwsn_stats::fit`]): evaluate the fixed
//!    cubic approximations, or recalibrate them from aggregated means
//! 4. **Estimate reward** ([`reward`]): recombine modeled metrics under
//!    the run's α/β/δ weights
//! 5. **Export** ([`series`]): package everything as index-aligned
//!    `(x, y, low, high)` series for the rendering collaborator
//!
//! # Example
//!
//! ```
//! use sdwsn_analysis::{
//!     aggregate::aggregate,
//!     observation::{Column, ObservationTable},
//! };
//! use serde_json::{Map, Value, json};
//!
//! let records: Vec<Map<String, Value>> = [10, 10, 20]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &sf)| {
//!         let record = json!({
//!             "timestamp": i,
//!             "current_sf_len": sf,
//!             "power_avg": 0.26,
//!             "delay_avg": 11.2,
//!             "pdr_mean": 0.95,
//!             "reward": -1.4,
//!             "alpha": 0.8,
//!             "beta": 0.1,
//!             "delta": 0.1,
//!             "last_ts_in_schedule": 9,
//!         });
//!         match record {
//!             Value::Object(map) => map,
//!             _ => unreachable!(),
//!         }
//!     })
//!     .collect();
//!
//! let table = ObservationTable::from_records(&records)?;
//! let groups = aggregate(&table, Column::SlotframeSize, Column::PowerAvg)?;
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0].key, 10.0);
//! assert_eq!(groups[0].count, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
pub mod models;
pub mod observation;
pub mod reward;
pub mod series;
