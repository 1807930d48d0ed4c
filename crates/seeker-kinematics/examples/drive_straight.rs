use seeker_kinematics::*;

fn main() {
    let wheel_base = 20.0;
    let start = Pose::new(0.0, 0.0, 0.0);
    let command = WheelCommand::new(5.0, 5.0); // 5 px/s on both wheels, no turning
    let dt = 0.1; // Time step in seconds
    let num_steps = 10;

    match DifferentialDriveRobot::new(start, wheel_base) {
        Ok(mut robot) => {
            println!("Initializing simulation...");
            println!("  Differential Drive Parameters:");
            println!("    Wheel Base:     {} px", robot.wheel_base());
            println!("  Initial State:");
            println!("    Pose:           {:?}", robot.get_pose());
            println!("    Wheel Command:  {}", command);
            println!("    Chassis Speeds: {}", robot.forward_kinematics(command));
            println!("  Simulation Settings:");
            println!("    Time Step:      {} s", dt);
            println!("    Num Steps:      {}", num_steps);
            println!("\nSimulating...");

            for i in 0..num_steps {
                match robot.apply(command, dt) {
                    Ok(pose) => println!("Step {:>2}: Pose: {}", i + 1, pose),
                    Err(e) => {
                        eprintln!("Error during simulation step {}: {}", i + 1, e);
                        break; // Stop loop on error
                    }
                }
            }

            println!("\nSimulation complete.");
            println!("Final Pose: {:?}", robot.get_pose());
            println!("History:    {} poses", robot.history().len());
        }
        Err(e) => {
            eprintln!("Failed to initialize robot: {}", e);
            eprintln!("Please ensure wheel_base ({}) is positive.", wheel_base);
        }
    }
}
