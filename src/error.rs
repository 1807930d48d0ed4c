use seeker_kinematics::KinematicsError;
use seeker_navigation::NavigationError;
use seeker_vision::VisionError;

/// A configuration that cannot produce a valid simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    Kinematics(KinematicsError),
    Navigation(NavigationError),
    Vision(VisionError),
    /// `dt` must be positive and finite.
    InvalidTimeStep(&'static str),
    /// The step budget must allow at least one step.
    InvalidStepBudget(&'static str),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::Kinematics(e) => write!(f, "robot: {}", e),
            SetupError::Navigation(e) => write!(f, "controller: {}", e),
            SetupError::Vision(e) => write!(f, "vision: {}", e),
            SetupError::InvalidTimeStep(msg) => write!(f, "Invalid time step: {}", msg),
            SetupError::InvalidStepBudget(msg) => write!(f, "Invalid step budget: {}", msg),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Kinematics(e) => Some(e),
            SetupError::Navigation(e) => Some(e),
            SetupError::Vision(e) => Some(e),
            _ => None,
        }
    }
}

impl From<KinematicsError> for SetupError {
    fn from(e: KinematicsError) -> Self {
        SetupError::Kinematics(e)
    }
}

impl From<NavigationError> for SetupError {
    fn from(e: NavigationError) -> Self {
        SetupError::Navigation(e)
    }
}

impl From<VisionError> for SetupError {
    fn from(e: VisionError) -> Self {
        SetupError::Vision(e)
    }
}

/// A run that could not be completed.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The blob locator found no target; no trajectory was produced.
    GoalNotFound,
    /// The kinematic model rejected a step.
    Kinematics(KinematicsError),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::GoalNotFound => write!(f, "goal not found in the world image"),
            SimulationError::Kinematics(e) => write!(f, "kinematics: {}", e),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Kinematics(e) => Some(e),
            SimulationError::GoalNotFound => None,
        }
    }
}

impl From<KinematicsError> for SimulationError {
    fn from(e: KinematicsError) -> Self {
        SimulationError::Kinematics(e)
    }
}
