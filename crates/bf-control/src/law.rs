//! Control law implementations.

use serde::{Deserialize, Serialize};

/// Lower bound of the drive output.
pub const OUTPUT_MIN: f64 = 0.0;

/// Upper bound of the drive output.
pub const OUTPUT_MAX: f64 = 100.0;

/// Output step per unit of error per tick, used by the step-proportional
/// law. Fixed for every loop; the per-controller gains do not participate.
pub const STEP_GAIN_PER_TICK: f64 = 2.0;

/// Which update law the engine runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlLaw {
    /// `output' = clamp(output + error * STEP_GAIN_PER_TICK)`.
    ///
    /// Not a textbook PID: there is no accumulated integral and no
    /// derivative term. Kept as the default because it is the plant's
    /// established behavior.
    #[default]
    StepProportional,
    /// Parallel-form three-term PID on the controller's `kp`/`ki`/`kd`.
    FullPid,
}

/// Per-loop state of the full PID law. Lives in the engine, keyed by
/// controller id; the controller entity itself does not persist it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PidTerms {
    /// Integral accumulator (error-seconds).
    pub integral: f64,
    /// Previous measurement, for derivative-on-measurement.
    pub last_measurement: Option<f64>,
}

/// One step of the step-proportional law.
pub fn step_proportional(output: f64, error: f64) -> f64 {
    (output + error * STEP_GAIN_PER_TICK).clamp(OUTPUT_MIN, OUTPUT_MAX)
}

/// One step of the parallel-form PID law.
///
/// Derivative acts on the measurement rather than the error, so setpoint
/// changes do not kick the output. Anti-windup is conditional: when the raw
/// output saturates, the integral keeps its previous value.
///
/// Returns the updated terms and the clamped output.
pub fn full_pid(
    terms: &PidTerms,
    kp: f64,
    ki: f64,
    kd: f64,
    error: f64,
    measurement: f64,
    dt_s: f64,
) -> (PidTerms, f64) {
    let new_integral = terms.integral + error * dt_s;
    let i_term = ki * new_integral;

    let d_term = match terms.last_measurement {
        Some(prev) => -kd * (measurement - prev) / dt_s,
        None => 0.0,
    };

    let raw = kp * error + i_term + d_term;
    let output = raw.clamp(OUTPUT_MIN, OUTPUT_MAX);

    let final_integral = if output == raw {
        new_integral
    } else {
        terms.integral
    };

    (
        PidTerms {
            integral: final_integral,
            last_measurement: Some(measurement),
        },
        output,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_core::{nearly_equal, Tolerances};

    #[test]
    fn step_law_concrete_scenario() {
        // setpoint 66.0, measurement 65.5, previous output 75.
        let error = 66.0 - 65.5;
        let output = step_proportional(75.0, error);
        assert!(output > 75.0);
        assert!(output <= OUTPUT_MAX);
        assert!(nearly_equal(output, 76.0, Tolerances::default()));
    }

    #[test]
    fn step_law_clamps_both_ends() {
        assert_eq!(step_proportional(95.0, 1e6), OUTPUT_MAX);
        assert_eq!(step_proportional(5.0, -1e6), OUTPUT_MIN);
    }

    #[test]
    fn step_law_zero_error_holds_output() {
        assert_eq!(step_proportional(42.5, 0.0), 42.5);
    }

    #[test]
    fn full_pid_accumulates_integral() {
        let mut terms = PidTerms::default();
        // Constant error of 1.0 against a steady measurement.
        for _ in 0..10 {
            let (next, _) = full_pid(&terms, 1.0, 0.5, 0.0, 1.0, 10.0, 2.0);
            terms = next;
        }
        assert!(terms.integral > 10.0);
    }

    #[test]
    fn full_pid_freezes_integral_when_saturated() {
        let terms = PidTerms::default();
        let (next, output) = full_pid(&terms, 50.0, 1.0, 0.0, 100.0, 0.0, 2.0);
        assert_eq!(output, OUTPUT_MAX);
        // Saturated: integral keeps its previous value.
        assert_eq!(next.integral, terms.integral);
    }

    #[test]
    fn full_pid_derivative_acts_on_measurement() {
        // First call has no previous measurement, so no derivative term.
        let terms = PidTerms::default();
        let (terms, first) = full_pid(&terms, 1.0, 0.0, 10.0, 1.0, 20.0, 2.0);

        // Rising measurement with unchanged error: derivative pushes down.
        let (_, second) = full_pid(&terms, 1.0, 0.0, 10.0, 1.0, 25.0, 2.0);
        assert!(second < first);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn step_law_output_always_in_range(
            output in OUTPUT_MIN..=OUTPUT_MAX,
            error in -1e9f64..1e9,
        ) {
            let next = step_proportional(output, error);
            prop_assert!((OUTPUT_MIN..=OUTPUT_MAX).contains(&next));
        }

        #[test]
        fn full_pid_output_always_in_range(
            integral in -1e6f64..1e6,
            kp in 0.0f64..1e3,
            ki in 0.0f64..1e3,
            kd in 0.0f64..1e3,
            error in -1e6f64..1e6,
            measurement in -1e6f64..1e6,
        ) {
            let terms = PidTerms {
                integral,
                last_measurement: Some(measurement / 2.0),
            };
            let (_, output) = full_pid(&terms, kp, ki, kd, error, measurement, 2.0);
            prop_assert!((OUTPUT_MIN..=OUTPUT_MAX).contains(&output));
        }
    }
}
