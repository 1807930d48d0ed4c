use seeker_kinematics::{DifferentialDriveRobot, Pose};
use seeker_navigation::{ControlAction, ControllerConfig, GoToGoalController, GoalPoint};

fn main() {
    // Standalone run: fixed goal, 10 px stop distance.
    let goal = GoalPoint::new(400, 400);
    let config = ControllerConfig {
        stop_distance: 10.0,
        ..ControllerConfig::default()
    };
    let controller = GoToGoalController::new(config).expect("default gains are valid");
    let mut robot = DifferentialDriveRobot::new(Pose::new(50.0, 250.0, 0.0), 20.0).expect("wheel base is positive");

    let dt = 1.0;
    let max_steps = 200;

    println!("Driving from {} to {}", robot.get_pose(), goal);
    for step in 0..max_steps {
        match controller.compute(&robot.get_pose(), goal) {
            ControlAction::Stop { distance } => {
                println!("Goal reached after {} steps (distance {:.1} px)", step, distance);
                return;
            }
            ControlAction::Drive { command, mode, distance, .. } => {
                if step % 20 == 0 {
                    let pose = robot.get_pose();
                    println!(
                        "Step {:>3}: Position ({:.1}, {:.1}), Distance: {:.1}, Mode: {:?}",
                        step, pose.x, pose.y, distance, mode
                    );
                }
                if let Err(e) = robot.apply(command, dt) {
                    eprintln!("Kinematics error at step {}: {}", step, e);
                    return;
                }
            }
        }
    }
    println!("Stopped after {} steps.", max_steps);
}
