use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use seeker_kinematics::Pose;
use seeker_navigation::GoalPoint;

/// One row of the performance data: position, heading and distance to goal per step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryRow {
    pub step: usize,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub distance_to_goal: f64,
}

/// Aggregate figures for a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub path_length: f64,
    pub min_distance: f64,
    pub final_distance: f64,
}

pub fn trajectory(history: &[Pose], goal: GoalPoint) -> Vec<TrajectoryRow> {
    let (gx, gy) = goal.as_f64();
    history
        .iter()
        .enumerate()
        .map(|(step, pose)| TrajectoryRow {
            step,
            x: pose.x,
            y: pose.y,
            heading: pose.theta,
            distance_to_goal: pose.distance_to(gx, gy),
        })
        .collect()
}

pub fn summarize(rows: &[TrajectoryRow]) -> Option<Summary> {
    let last = rows.last()?;
    let path_length: f64 = rows
        .windows(2)
        .map(|w| (w[1].x - w[0].x).hypot(w[1].y - w[0].y))
        .sum();
    let min_distance = rows
        .iter()
        .map(|r| r.distance_to_goal)
        .fold(f64::INFINITY, f64::min);

    Some(Summary {
        path_length,
        min_distance,
        final_distance: last.distance_to_goal,
    })
}

pub fn write_csv(path: &Path, rows: &[TrajectoryRow]) -> anyhow::Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Could not create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
