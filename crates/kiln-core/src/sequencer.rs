//! Program sequencer.
//!
//! Advances a firing program step by step, loading each step's target and
//! rate into the outer controller and deciding when to move on based on the
//! outer loop's `at_target` predicate.

use crate::fixed_point::Q16;
use crate::outer_p::OuterP;
use crate::program::Program;

/// Converts a °C/h magnitude into a signed °C/s `Q16`, negative for cooling.
pub fn gradient_to_q16(magnitude_degph: u16, cooling: bool) -> Q16 {
    let per_s = Q16::from_ratio(magnitude_degph as i32, 3600);
    if cooling {
        -per_s
    } else {
        per_s
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Running,
    Finished,
}

pub struct Sequencer {
    program: Option<Program>,
    step_index: u8,
    state: SequencerState,
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            program: None,
            step_index: 0,
            state: SequencerState::Idle,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn step_index(&self) -> u8 {
        self.step_index
    }

    pub fn is_running(&self) -> bool {
        self.state == SequencerState::Running
    }

    /// Attaches a program and loads its first step into the outer
    /// controller. The caller is responsible for resetting the inner PI
    /// before the first tick, per the tick driver's program-start contract.
    pub fn start(&mut self, program: Program, outer: &mut OuterP) -> Result<(), crate::error::KilnError> {
        if program.length == 0 {
            return Err(crate::error::KilnError::ProgramEmpty);
        }
        self.program = Some(program);
        self.step_index = 0;
        self.state = SequencerState::Running;
        self.load_step(outer);
        Ok(())
    }

    pub fn stop(&mut self, outer: &mut OuterP) {
        self.program = None;
        self.step_index = 0;
        self.state = SequencerState::Idle;
        outer.set_enabled(false);
    }

    fn load_step(&mut self, outer: &mut OuterP) {
        let program = self.program.expect("load_step called without a program");
        let step = program.step(self.step_index).expect("step_index in range");
        let g_max = gradient_to_q16(step.gradient_magnitude_degph, step.cooling).abs();
        outer.set_target(step.target_temperature_deg as i32 * 1000, g_max, step.cooling);
        outer.set_enabled(true);
    }

    /// Call once per tick after the current step's control math has run.
    /// Advances to the next step (or finishes) if the outer loop reports
    /// `at_target`.
    pub fn advance_if_at_target(&mut self, t_meas_mdeg: i32, outer: &mut OuterP) {
        if self.state != SequencerState::Running {
            return;
        }
        if !outer.at_target(t_meas_mdeg) {
            return;
        }

        let program = self.program.expect("running sequencer always has a program");
        self.step_index += 1;
        if self.step_index >= program.length {
            self.state = SequencerState::Finished;
            outer.set_enabled(false);
        } else {
            self.load_step(outer);
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_conversion_matches_hour_to_second() {
        let g = gradient_to_q16(3600, false);
        assert_eq!(g, Q16::ONE);
        let g = gradient_to_q16(3600, true);
        assert_eq!(g, -Q16::ONE);
    }

    #[test]
    fn advances_through_steps_and_finishes() {
        let program = Program::from_steps(&[
            crate::program::Step::new(300, false, 100),
            crate::program::Step::new(300, true, 50),
        ]);
        let mut outer = OuterP::new(Q16::from_float(0.061), 5_000);
        let mut seq = Sequencer::new();
        seq.start(program, &mut outer).unwrap();
        assert_eq!(seq.state(), SequencerState::Running);
        assert_eq!(seq.step_index(), 0);

        // reach first step's target
        seq.advance_if_at_target(100_000, &mut outer);
        assert_eq!(seq.step_index(), 1);
        assert_eq!(seq.state(), SequencerState::Running);

        // reach second (cooling) step's target
        seq.advance_if_at_target(50_000, &mut outer);
        assert_eq!(seq.state(), SequencerState::Finished);
    }

    #[test]
    fn empty_program_rejected() {
        let program = Program { length: 0, steps: [crate::program::Step::new(0, false, 0); crate::program::MAX_PROGRAM_STEPS] };
        let mut outer = OuterP::new(Q16::from_float(0.061), 5_000);
        let mut seq = Sequencer::new();
        assert!(seq.start(program, &mut outer).is_err());
    }
}
