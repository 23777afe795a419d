//! Virtual fermenters: free-standing fermentation telemetry.
//!
//! Models the slow variables of an active fermentation: temperature held in
//! the ale band, head pressure near one bar, and CO2 saturation following a
//! logistic curve toward 100 %. Stands in for a fleet of instrumented
//! fermenters when none are connected.

use rand::Rng;
use rand::rngs::SmallRng;

/// Logistic growth rate of the CO2 curve (per second).
const CO2_GROWTH_RATE: f64 = 0.03;

/// Inflection point of the CO2 curve (seconds since pitch).
const CO2_MIDPOINT_S: f64 = 2000.0;

/// One bounded random-walk step: move by `uniform(-step, +step)` and clamp
/// into `[min, max]`.
pub fn random_walk(value: f64, min: f64, max: f64, step: f64, rng: &mut SmallRng) -> f64 {
    (value + rng.random_range(-step..=step)).clamp(min, max)
}

/// Normalized logistic curve (0-100) used for CO2 generation over a typical
/// fermentation.
pub fn logistic_pct(elapsed_s: f64) -> f64 {
    100.0 / (1.0 + (-CO2_GROWTH_RATE * (elapsed_s - CO2_MIDPOINT_S)).exp())
}

/// A fermenter emitting simulated process telemetry.
#[derive(Debug, Clone)]
pub struct VirtualFermenter {
    pub id: String,
    /// Beer temperature in °C.
    pub temperature: f64,
    /// Head pressure in bar.
    pub pressure: f64,
    /// CO2 saturation in percent.
    pub co2: f64,
    elapsed_s: f64,
}

impl VirtualFermenter {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            temperature: 20.0,
            pressure: 1.0,
            co2: 0.0,
            elapsed_s: 0.0,
        }
    }

    /// Advance the fermentation by `interval_s` seconds.
    ///
    /// Temperature walks within 18-22 °C, pressure within 0.8-1.2 bar, and
    /// CO2 tracks the logistic baseline for the accumulated elapsed time with
    /// walk noise on top.
    pub fn step(&mut self, interval_s: f64, rng: &mut SmallRng) {
        self.elapsed_s += interval_s;

        self.temperature = random_walk(self.temperature, 18.0, 22.0, 0.05, rng);
        self.pressure = random_walk(self.pressure, 0.8, 1.2, 0.01, rng);

        let base = logistic_pct(self.elapsed_s);
        self.co2 = random_walk(base, 0.0, 100.0, 1.0, rng);
    }

    /// Topic-style readings for publication or display.
    pub fn readings(&self) -> [(String, f64); 3] {
        let base = format!("brewery/fermentation/{}", self.id);
        [
            (format!("{base}/temperature"), self.temperature),
            (format!("{base}/pressure"), self.pressure),
            (format!("{base}/co2"), self.co2),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn logistic_curve_shape() {
        assert!(logistic_pct(0.0) < 1.0);
        assert!((logistic_pct(CO2_MIDPOINT_S) - 50.0).abs() < 1e-9);
        assert!(logistic_pct(10_000.0) > 99.0);
    }

    #[test]
    fn step_keeps_variables_in_band() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut fermenter = VirtualFermenter::new("FERMENTER_1");

        for _ in 0..500 {
            fermenter.step(3.0, &mut rng);
            assert!((18.0..=22.0).contains(&fermenter.temperature));
            assert!((0.8..=1.2).contains(&fermenter.pressure));
            assert!((0.0..=100.0).contains(&fermenter.co2));
        }
    }

    #[test]
    fn co2_rises_over_the_fermentation() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut fermenter = VirtualFermenter::new("FERMENTER_1");

        fermenter.step(3.0, &mut rng);
        let early = fermenter.co2;

        // Push well past the logistic midpoint.
        for _ in 0..2000 {
            fermenter.step(3.0, &mut rng);
        }
        assert!(fermenter.co2 > early);
        assert!(fermenter.co2 > 90.0);
    }

    #[test]
    fn readings_follow_topic_convention() {
        let fermenter = VirtualFermenter::new("FERMENTER_2");
        let readings = fermenter.readings();
        assert_eq!(readings[0].0, "brewery/fermentation/FERMENTER_2/temperature");
        assert_eq!(readings[1].0, "brewery/fermentation/FERMENTER_2/pressure");
        assert_eq!(readings[2].0, "brewery/fermentation/FERMENTER_2/co2");
    }
}
