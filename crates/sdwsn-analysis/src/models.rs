//! Fixed cubic approximations of each metric over slotframe size
//!
//! These coefficients are calibration constants derived from simulation
//! sweeps over slotframe sizes 10–60 and are the reproducible baseline for
//! reward estimation when a run has too few distinct slotframe sizes to
//! refit reliably. Callers that do have richer data can recalibrate with
//! [`sdwsn_stats::fit::fit_cubic`] and use the result in place of these —
//! the choice always belongs to the caller.
//!
//! Keeping every coefficient here, rather than scattered through call
//! sites, makes recalibration a one-module change.

use sdwsn_stats::cubic::Cubic;

/// Average network power draw (mW) as a function of slotframe size.
///
/// Falls from ≈0.26 mW at slotframe size 10 toward ≈0.22 mW at 50 as the
/// radio duty cycle thins out.
pub const POWER_MODEL: Cubic = Cubic::new(-3.0467e-3, 5.1823e-5, -3.1162e-7, 2.8737e-1);

/// Average end-to-end delay (ms) as a function of slotframe size.
///
/// Rises from ≈11 ms at slotframe size 10 toward ≈18 ms at 50; packets
/// wait longer for their slot in a longer frame.
pub const DELAY_MODEL: Cubic = Cubic::new(3.5576e-1, -4.2243e-3, 2.3125e-5, 8.0542);

/// Mean packet delivery ratio as a function of slotframe size.
///
/// Eases from ≈0.95 at slotframe size 10 toward ≈0.90 at 50.
pub const PDR_MODEL: Cubic = Cubic::new(1.1219e-3, -6.3522e-5, 4.0815e-7, 9.4935e-1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_model_evaluation_is_deterministic() {
        assert_eq!(POWER_MODEL.eval(20.0), POWER_MODEL.eval(20.0));
        assert_eq!(DELAY_MODEL.eval(20.0), DELAY_MODEL.eval(20.0));
        assert_eq!(PDR_MODEL.eval(20.0), PDR_MODEL.eval(20.0));
    }

    #[test]
    fn models_stay_in_physical_ranges_over_the_calibrated_domain() {
        for sf in (10..=60).step_by(5) {
            let x = f64::from(sf);
            let power = POWER_MODEL.eval(x);
            let delay = DELAY_MODEL.eval(x);
            let pdr = PDR_MODEL.eval(x);
            assert!((0.1..0.4).contains(&power), "power {power} at sf {sf}");
            assert!((5.0..30.0).contains(&delay), "delay {delay} at sf {sf}");
            assert!((0.5..1.0).contains(&pdr), "pdr {pdr} at sf {sf}");
        }
    }
}
