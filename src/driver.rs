use image::RgbImage;
use tracing::{debug, info, warn};

use seeker_kinematics::{DifferentialDriveRobot, Pose};
use seeker_navigation::{ControlAction, GoToGoalController, GoalPoint};
use seeker_vision::{BlobLocator, Detection};

use crate::config::SeekerConfig;
use crate::error::{SetupError, SimulationError};
use crate::progress::{Phase, ProgressSink, StepEvent};

/// How a run that got past sensing ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The controller signalled stop after `steps` moves.
    Reached { steps: usize, final_distance: f64 },
    /// The step budget ran out first. Not an error.
    Exhausted { steps: usize, final_distance: f64 },
}

impl Outcome {
    pub fn steps(&self) -> usize {
        match *self {
            Outcome::Reached { steps, .. } | Outcome::Exhausted { steps, .. } => steps,
        }
    }

    pub fn final_distance(&self) -> f64 {
        match *self {
            Outcome::Reached { final_distance, .. } | Outcome::Exhausted { final_distance, .. } => {
                final_distance
            }
        }
    }
}

/// Everything a run hands to the reporting side.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub goal: GoalPoint,
    /// `None` when the goal was supplied directly instead of sensed.
    pub detection: Option<Detection>,
    pub outcome: Outcome,
    /// Every pose from the start pose onwards.
    pub history: Vec<Pose>,
}

/// Sense once, then drive the robot towards the sensed goal.
///
/// Init → Sensing → Running → (Reached | Exhausted), or Sensing → Failed when
/// no goal is found.
#[derive(Debug, Clone)]
pub struct Simulation {
    locator: BlobLocator,
    controller: GoToGoalController,
    start: Pose,
    wheel_base: f64,
    dt: f64,
    max_steps: usize,
}

impl Simulation {
    /// Builds and validates every component.
    pub fn new(cfg: &SeekerConfig) -> Result<Self, SetupError> {
        let start = Pose::new(cfg.robot.start_x, cfg.robot.start_y, cfg.robot.start_heading);
        DifferentialDriveRobot::new(start, cfg.robot.wheel_base)?;

        if !(cfg.sim.dt > 0.0) || !cfg.sim.dt.is_finite() {
            return Err(SetupError::InvalidTimeStep("must be positive and finite"));
        }
        if cfg.sim.max_steps == 0 {
            return Err(SetupError::InvalidStepBudget("must be at least one step"));
        }

        Ok(Self {
            locator: BlobLocator::new(cfg.vision)?,
            controller: GoToGoalController::new(cfg.controller)?,
            start,
            wheel_base: cfg.robot.wheel_base,
            dt: cfg.sim.dt,
            max_steps: cfg.sim.max_steps,
        })
    }

    pub fn locator(&self) -> &BlobLocator {
        &self.locator
    }

    pub fn controller(&self) -> &GoToGoalController {
        &self.controller
    }

    /// Locates the goal in `image` and drives to it.
    ///
    /// # Errors
    ///
    /// `SimulationError::GoalNotFound` if no blob is detected; no trajectory is
    /// produced in that case.
    pub fn run(
        &self,
        image: &RgbImage,
        progress: &mut dyn ProgressSink,
    ) -> Result<SimulationReport, SimulationError> {
        progress.on_phase(Phase::Init);
        let robot = DifferentialDriveRobot::new(self.start, self.wheel_base)?;

        progress.on_phase(Phase::Sensing);
        let Some(detection) = self.locator.locate(image) else {
            warn!("Could not find the goal. Cannot run simulation.");
            progress.on_phase(Phase::Failed);
            return Err(SimulationError::GoalNotFound);
        };
        let goal = GoalPoint::from_subpixel(detection.x, detection.y);
        info!(%goal, radius = detection.radius, "Goal detected");

        let mut report = self.drive(robot, goal, progress)?;
        report.detection = Some(detection);
        Ok(report)
    }

    /// Drives to a known goal without sensing.
    pub fn run_to_goal(
        &self,
        goal: GoalPoint,
        progress: &mut dyn ProgressSink,
    ) -> Result<SimulationReport, SimulationError> {
        progress.on_phase(Phase::Init);
        let robot = DifferentialDriveRobot::new(self.start, self.wheel_base)?;
        self.drive(robot, goal, progress)
    }

    fn drive(
        &self,
        mut robot: DifferentialDriveRobot,
        goal: GoalPoint,
        progress: &mut dyn ProgressSink,
    ) -> Result<SimulationReport, SimulationError> {
        progress.on_phase(Phase::Running { goal });
        info!(start = %robot.get_pose(), %goal, max_steps = self.max_steps, "Starting robot simulation");

        for step in 0..self.max_steps {
            let pose = robot.get_pose();
            match self.controller.compute(&pose, goal) {
                ControlAction::Stop { distance } => {
                    info!(step, distance, "Goal reached");
                    progress.on_phase(Phase::Reached);
                    return Ok(SimulationReport {
                        goal,
                        detection: None,
                        outcome: Outcome::Reached {
                            steps: step,
                            final_distance: distance,
                        },
                        history: robot.into_history(),
                    });
                }
                ControlAction::Drive { command, mode, distance, .. } => {
                    progress.on_step(&StepEvent {
                        step,
                        pose,
                        distance,
                        command,
                        mode,
                    });
                    if let Err(e) = robot.apply(command, self.dt) {
                        progress.on_phase(Phase::Failed);
                        return Err(e.into());
                    }
                    debug!(step, pose = %robot.get_pose(), "Advanced");
                }
            }
        }

        let (gx, gy) = goal.as_f64();
        let final_distance = robot.get_pose().distance_to(gx, gy);
        info!(steps = self.max_steps, final_distance, "Stopped after maximum steps");
        progress.on_phase(Phase::Exhausted);

        Ok(SimulationReport {
            goal,
            detection: None,
            outcome: Outcome::Exhausted {
                steps: self.max_steps,
                final_distance,
            },
            history: robot.into_history(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SeekerConfig, WorldConfig};
    use crate::progress::Recorder;
    use crate::world;
    use image::Rgb;
    use seeker_kinematics::KinematicsError;
    use seeker_navigation::NavigationError;
    use seeker_vision::VisionError;

    fn world_image() -> RgbImage {
        world::synthesize(&WorldConfig::default(), (50.0, 250.0))
    }

    fn config_with_dt(dt: f64) -> SeekerConfig {
        let mut cfg = SeekerConfig::default();
        cfg.sim.dt = dt;
        cfg
    }

    #[test]
    fn test_reaches_detected_goal() {
        let sim = Simulation::new(&config_with_dt(1.0)).unwrap();
        let mut rec = Recorder::default();
        let report = sim.run(&world_image(), &mut rec).unwrap();

        assert!((report.goal.x - 400).abs() <= 1);
        assert!((report.goal.y - 400).abs() <= 1);
        assert!(report.detection.is_some());

        match report.outcome {
            Outcome::Reached { steps, final_distance } => {
                assert!(steps < 300);
                assert!(final_distance < 15.0);
                assert_eq!(report.history.len(), steps + 1);
            }
            other => panic!("expected Reached, got {other:?}"),
        }
        assert_eq!(report.history[0], Pose::new(50.0, 250.0, 0.0));
    }

    #[test]
    fn test_default_time_step_exhausts_budget() {
        // 0.5 px per step cannot cover the ~381 px gap in 300 steps.
        let sim = Simulation::new(&SeekerConfig::default()).unwrap();
        let mut rec = Recorder::default();
        let report = sim.run(&world_image(), &mut rec).unwrap();

        match report.outcome {
            Outcome::Exhausted { steps, final_distance } => {
                assert_eq!(steps, 300);
                assert!(final_distance > 15.0);
                assert!(final_distance < 380.0 - 100.0);
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
        assert_eq!(report.history.len(), 301);
        assert_eq!(rec.phases.last(), Some(&Phase::Exhausted));
    }

    #[test]
    fn test_no_goal_fails_without_trajectory() {
        let sim = Simulation::new(&SeekerConfig::default()).unwrap();
        let blank = RgbImage::from_pixel(500, 500, Rgb([255, 255, 255]));
        let mut rec = Recorder::default();

        assert_eq!(sim.run(&blank, &mut rec), Err(SimulationError::GoalNotFound));
        assert_eq!(rec.phases, vec![Phase::Init, Phase::Sensing, Phase::Failed]);
        assert!(rec.steps.is_empty());
    }

    #[test]
    fn test_phase_sequence_and_step_events() {
        let sim = Simulation::new(&config_with_dt(1.0)).unwrap();
        let mut rec = Recorder::default();
        let report = sim.run(&world_image(), &mut rec).unwrap();

        assert_eq!(rec.phases.len(), 4);
        assert_eq!(rec.phases[0], Phase::Init);
        assert_eq!(rec.phases[1], Phase::Sensing);
        assert_eq!(rec.phases[2], Phase::Running { goal: report.goal });
        assert_eq!(rec.phases[3], Phase::Reached);

        assert_eq!(rec.steps.len(), report.outcome.steps());
        for (i, event) in rec.steps.iter().enumerate() {
            assert_eq!(event.step, i);
            assert_eq!(event.pose, report.history[i]);
        }
    }

    #[test]
    fn test_run_to_fixed_goal() {
        let mut cfg = config_with_dt(1.0);
        cfg.controller.stop_distance = 10.0;
        let sim = Simulation::new(&cfg).unwrap();
        let mut rec = Recorder::default();
        let report = sim.run_to_goal(GoalPoint::new(400, 400), &mut rec).unwrap();

        assert!(matches!(report.outcome, Outcome::Reached { .. }));
        assert!(report.outcome.final_distance() < 10.0);
        assert!(report.detection.is_none());
        assert_eq!(rec.phases.first(), Some(&Phase::Init));
    }

    #[test]
    fn test_goal_already_reached() {
        let mut cfg = SeekerConfig::default();
        cfg.robot.start_x = 395.0;
        cfg.robot.start_y = 400.0;
        let sim = Simulation::new(&cfg).unwrap();
        let report = sim.run_to_goal(GoalPoint::new(400, 400), &mut Recorder::default()).unwrap();

        assert_eq!(report.outcome, Outcome::Reached { steps: 0, final_distance: 5.0 });
        assert_eq!(report.history.len(), 1);
    }

    #[test]
    fn test_invalid_configuration_fails_fast() {
        let mut cfg = SeekerConfig::default();
        cfg.robot.wheel_base = 0.0;
        assert!(matches!(
            Simulation::new(&cfg),
            Err(SetupError::Kinematics(KinematicsError::InvalidWheelBase(_)))
        ));

        for dt in [-0.1, 0.0, f64::NAN] {
            let cfg = config_with_dt(dt);
            assert!(matches!(Simulation::new(&cfg), Err(SetupError::InvalidTimeStep(_))));
        }

        let mut cfg = SeekerConfig::default();
        cfg.sim.max_steps = 0;
        assert!(matches!(Simulation::new(&cfg), Err(SetupError::InvalidStepBudget(_))));

        let mut cfg = SeekerConfig::default();
        cfg.controller.stop_distance = -1.0;
        assert!(matches!(
            Simulation::new(&cfg),
            Err(SetupError::Navigation(NavigationError::InvalidStopDistance(_)))
        ));

        let mut cfg = SeekerConfig::default();
        cfg.vision.color.lower = [20, 100, 100];
        assert!(matches!(
            Simulation::new(&cfg),
            Err(SetupError::Vision(VisionError::EmptyColorRange(_)))
        ));
    }
}
