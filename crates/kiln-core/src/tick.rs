//! Periodic tick driver.
//!
//! Owns every controller state and orchestrates one 1 Hz cycle: read sensor,
//! update the gradient estimator, run whichever of the heating/cooling
//! branches applies, advance the sequencer, and drive the SSR window. This
//! is the only component allowed to mutate controller state; the foreground
//! (UI) side only reaches it through `program_start`/`program_stop`/
//! `apply_settings`/`set_door_open`.

use crate::cooling_brake::CoolingBrake;
use crate::error::{KilnError, Result};
use crate::fixed_point::Q16;
use crate::gradient::GradientEstimator;
use crate::inner_pi::InnerPi;
use crate::outer_p::OuterP;
use crate::persistence::Settings;
use crate::program::Program;
use crate::sensor::{CoilOutput, DoorSensor, TemperatureSource};
use crate::sequencer::{Sequencer, SequencerState};
use crate::ssr::SsrWindow;
use crate::telemetry::{ControlMode, Telemetry};

const TS_MS: i32 = 1000;
/// Three consecutive sensor faults escalate to a safety hold.
const FAULT_STREAK_LIMIT: u8 = 3;

pub struct KilnController {
    gradient: GradientEstimator,
    inner: InnerPi,
    outer: OuterP,
    brake: CoolingBrake,
    sequencer: Sequencer,
    ssr: SsrWindow,
    settings: Settings,
    fault_streak: u8,
    safety_hold: bool,
    last_ssr_on: bool,
}

impl KilnController {
    pub fn new(settings: Settings) -> Self {
        Self::build(settings)
    }

    fn build(settings: Settings) -> Self {
        let gc_ti_inv_ts = Q16::from_ratio(TS_MS, settings.gc_ti_s * 1000);
        let gc_taw_inv_ts = Q16::from_ratio(TS_MS, settings.gc_taw_s * 1000);
        Self {
            gradient: GradientEstimator::new(settings.gc_alpha(), TS_MS),
            inner: InnerPi::new(
                Q16::from_ratio(settings.gc_kc, 1),
                gc_ti_inv_ts,
                gc_taw_inv_ts,
                Q16::ZERO,
                Q16::ONE,
            ),
            outer: OuterP::new(settings.tc_kp(), settings.tc_t_band_deg * 1000),
            brake: CoolingBrake::new(
                settings.cb_kb(),
                Q16::from_ratio(settings.cb_hysteresis_degph, 3600),
                settings.cb_u_brake_max(),
            ),
            sequencer: Sequencer::new(),
            ssr: SsrWindow::new(settings.ssr_window_seconds as u32, settings.ssr_min_switch_seconds as u32),
            settings,
            fault_streak: 0,
            safety_hold: false,
            last_ssr_on: false,
        }
    }

    /// Replaces the running tuning parameters. Takes effect on the next
    /// tick; no partial application is possible since the whole record is
    /// swapped atomically by the caller before this is invoked.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<()> {
        if !settings.validate() {
            return Err(KilnError::RangeCheck);
        }
        *self = Self::build(settings);
        Ok(())
    }

    pub fn program_start(&mut self, program: Program) -> Result<()> {
        if self.safety_hold {
            return Err(KilnError::PreconditionFailed);
        }
        self.gradient.reset();
        self.inner.reset();
        self.brake.reset();
        self.sequencer.start(program, &mut self.outer)?;
        #[cfg(feature = "defmt-logging")]
        defmt::info!("program started, {} step(s)", program.length);
        Ok(())
    }

    /// Stops the running program synchronously: disables the outer loop and
    /// forces the SSR off on this same call, so no intermediate tick can
    /// re-energise the coils before the sequencer's disabled state takes
    /// effect.
    pub fn program_stop<C: CoilOutput>(&mut self, coils: &mut C) {
        self.sequencer.stop(&mut self.outer);
        self.ssr.force_off();
        self.last_ssr_on = false;
        coils.set(false);
        #[cfg(feature = "defmt-logging")]
        defmt::info!("program stopped");
    }

    pub fn is_running(&self) -> bool {
        self.sequencer.is_running()
    }

    pub fn is_safety_hold(&self) -> bool {
        self.safety_hold
    }

    /// Runs one 1 Hz tick: read, estimate, control, sequence, window,
    /// actuate. `now_ms` is a monotonic millisecond clock.
    pub fn tick<S, C, D>(&mut self, now_ms: u32, sensor: &mut S, coils: &mut C, door: &mut D) -> Telemetry
    where
        S: TemperatureSource,
        C: CoilOutput,
        D: DoorSensor,
    {
        let door_open = door.is_open();

        let sample = match sensor.read() {
            Ok(sample) if sample.fault.is_none() => sample,
            Ok(sample) => {
                return self.handle_sensor_fault(sample.fault, coils);
            }
            Err(KilnError::SensorFault(kind)) => return self.handle_sensor_fault(Some(kind), coils),
            Err(_) => return self.handle_sensor_fault(None, coils),
        };
        self.fault_streak = 0;

        let t_mdeg = sample.thermo_mdeg;
        let g_f = self.gradient.update(t_mdeg);

        let mut duty = Q16::ZERO;
        let mut mode = ControlMode::Idle;

        if self.sequencer.is_running() {
            if self.outer.is_cooling() {
                self.brake.set_limit(-Q16::from_ratio(self.settings.cb_g_min_degph, 3600));
                let u_brake = self.brake.update(g_f);
                self.inner.freeze_integrator();
                if u_brake > Q16::ZERO {
                    duty = u_brake;
                    mode = ControlMode::CoolBrake;
                } else {
                    mode = ControlMode::CoolPassive;
                }
            } else {
                self.brake.reset();
                let g_sp = self.outer.update(t_mdeg);
                self.inner.set_setpoint(g_sp);
                duty = self.inner.run(g_f);
                mode = ControlMode::Heat;
            }

            self.sequencer.advance_if_at_target(t_mdeg, &mut self.outer);
        }

        let result = self.ssr.update(now_ms, duty, door_open);
        coils.set(result.ssr_on);
        self.last_ssr_on = result.ssr_on;

        Telemetry {
            measured_mdeg: t_mdeg,
            filtered_gradient_degph: g_f * Q16::from_int(3600),
            duty,
            ssr_on: result.ssr_on,
            mode,
            step_index: self.sequencer.step_index(),
            window_started: result.window_started,
        }
    }

    fn handle_sensor_fault<C: CoilOutput>(&mut self, fault: Option<crate::error::FaultKind>, coils: &mut C) -> Telemetry {
        let _ = fault;
        self.fault_streak = self.fault_streak.saturating_add(1);
        #[cfg(feature = "defmt-logging")]
        defmt::warn!("sensor fault, streak={}", self.fault_streak);
        if self.fault_streak >= FAULT_STREAK_LIMIT {
            self.safety_hold = true;
            #[cfg(feature = "defmt-logging")]
            defmt::error!("safety hold: {} consecutive sensor faults", self.fault_streak);
            self.sequencer.stop(&mut self.outer);
            self.last_ssr_on = false;
            coils.set(false);
        } else {
            coils.set(self.last_ssr_on);
        }

        let mode = if self.safety_hold { ControlMode::SafetyHold } else { ControlMode::Idle };

        Telemetry {
            measured_mdeg: 0,
            filtered_gradient_degph: Q16::ZERO,
            duty: Q16::ZERO,
            ssr_on: self.last_ssr_on,
            mode,
            step_index: self.sequencer.step_index(),
            window_started: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaultKind;
    use crate::program::{Program, Step};
    use crate::sensor::ThermocoupleSample;

    struct FixedSensor {
        mdeg: i32,
        fault: Option<FaultKind>,
    }
    impl TemperatureSource for FixedSensor {
        fn read(&mut self) -> Result<ThermocoupleSample> {
            Ok(ThermocoupleSample { thermo_mdeg: self.mdeg, cold_junction_mdeg: 20_000, fault: self.fault })
        }
    }

    struct RecordingCoils {
        on: bool,
    }
    impl CoilOutput for RecordingCoils {
        fn set(&mut self, on: bool) {
            self.on = on;
        }
    }

    struct NoDoor;
    impl DoorSensor for NoDoor {
        fn is_open(&mut self) -> bool {
            false
        }
    }

    struct OpenDoor;
    impl DoorSensor for OpenDoor {
        fn is_open(&mut self) -> bool {
            true
        }
    }

    #[test]
    fn idle_no_program_produces_zero_duty() {
        let mut ctrl = KilnController::new(Settings::defaults());
        let mut sensor = FixedSensor { mdeg: 20_000, fault: None };
        let mut coils = RecordingCoils { on: true };
        let mut door = NoDoor;
        for t in (0..60_000).step_by(1000) {
            let telemetry = ctrl.tick(t, &mut sensor, &mut coils, &mut door);
            assert_eq!(telemetry.duty, Q16::ZERO);
        }
        assert!(!coils.on);
    }

    #[test]
    fn three_faults_trigger_safety_hold() {
        let mut ctrl = KilnController::new(Settings::defaults());
        let program = Program::from_steps(&[Step::new(300, false, 100)]);
        ctrl.program_start(program).unwrap();

        let mut good = FixedSensor { mdeg: 20_000, fault: None };
        let mut coils = RecordingCoils { on: false };
        let mut door = NoDoor;
        ctrl.tick(0, &mut good, &mut coils, &mut door);

        let mut faulty = FixedSensor { mdeg: 20_000, fault: Some(FaultKind::OpenCircuit) };
        ctrl.tick(1000, &mut faulty, &mut coils, &mut door);
        ctrl.tick(2000, &mut faulty, &mut coils, &mut door);
        assert!(!ctrl.is_safety_hold());
        ctrl.tick(3000, &mut faulty, &mut coils, &mut door);

        assert!(ctrl.is_safety_hold());
        assert!(!coils.on);
        assert!(!ctrl.is_running());
        assert!(ctrl.program_start(Program::from_steps(&[Step::new(300, false, 100)])).is_err());
    }

    #[test]
    fn door_open_forces_coils_off() {
        let mut ctrl = KilnController::new(Settings::defaults());
        let program = Program::from_steps(&[Step::new(300, false, 200)]);
        ctrl.program_start(program).unwrap();
        let mut sensor = FixedSensor { mdeg: 20_000, fault: None };
        let mut coils = RecordingCoils { on: false };
        let mut door = OpenDoor;
        for t in (0..30_000).step_by(1000) {
            ctrl.tick(t, &mut sensor, &mut coils, &mut door);
            assert!(!coils.on, "t={t}");
        }
    }

    #[test]
    fn program_stop_forces_coils_off_on_the_same_call() {
        let mut ctrl = KilnController::new(Settings::defaults());
        let program = Program::from_steps(&[Step::new(300, false, 300)]);
        ctrl.program_start(program).unwrap();
        let mut sensor = FixedSensor { mdeg: 20_000, fault: None };
        let mut coils = RecordingCoils { on: false };
        let mut door = NoDoor;

        // Run until the SSR has actually energised, so the stop has
        // something live to undo.
        let mut energised = false;
        for t in (0..10_000).step_by(1000) {
            ctrl.tick(t, &mut sensor, &mut coils, &mut door);
            if coils.on {
                energised = true;
                break;
            }
        }
        assert!(energised, "setup failed to energise the coils");

        ctrl.program_stop(&mut coils);
        assert!(!coils.on);
        assert!(!ctrl.is_running());

        // No subsequent tick re-energises the coils even though a pulse was
        // already scheduled within the current SSR window.
        let next = ctrl.tick(11_000, &mut sensor, &mut coils, &mut door);
        assert!(!next.ssr_on);
        assert!(!coils.on);
    }
}
