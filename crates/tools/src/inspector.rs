use planarvis_scene::{RobotModel, Scene};

/// Scene inspector for diagnostics.
///
/// Read-only queries used to log a scene before dispatch and to look up a
/// body by the index of the obstacle record it came from.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary<M: RobotModel>(scene: &Scene<M>) -> SceneSummary {
        SceneSummary {
            model: scene.robot().name().to_string(),
            joint_names: scene.joint_names().into_iter().map(String::from).collect(),
            obstacle_count: scene.obstacle_count(),
        }
    }

    /// Placement of the body built from obstacle record `index`.
    pub fn inspect_body<M: RobotModel>(scene: &Scene<M>, index: usize) -> Option<BodyInfo> {
        scene.obstacles().get(index).map(|body| {
            let c = body.center();
            let d = body.dimensions;
            let (lo, hi) = body.mesh.bounds();
            BodyInfo {
                index,
                center: [c.x, c.y, c.z],
                dimensions: [d.x, d.y, d.z],
                bounds_min: [lo.x, lo.y, lo.z],
                bounds_max: [hi.x, hi.y, hi.z],
            }
        })
    }

    /// Info for every body, in obstacle order.
    pub fn list_bodies<M: RobotModel>(scene: &Scene<M>) -> Vec<BodyInfo> {
        (0..scene.obstacle_count())
            .filter_map(|i| Self::inspect_body(scene, i))
            .collect()
    }
}

/// Summary of a scene for the inspector.
#[derive(Debug, Clone)]
pub struct SceneSummary {
    pub model: String,
    pub joint_names: Vec<String>,
    pub obstacle_count: usize,
}

impl SceneSummary {
    pub fn joint_count(&self) -> usize {
        self.joint_names.len()
    }
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: model={} joints={} obstacles={} [{}]",
            self.model,
            self.joint_count(),
            self.obstacle_count,
            self.joint_names.join(", ")
        )
    }
}

/// Placement of a single obstacle body.
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub index: usize,
    pub center: [f32; 3],
    pub dimensions: [f32; 3],
    pub bounds_min: [f32; 3],
    pub bounds_max: [f32; 3],
}

impl std::fmt::Display for BodyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Obstacle [{}] center=({:.2}, {:.2}, {:.2}) dim=({:.2}, {:.2}, {:.2}) aabb=({:.2}, {:.2}, {:.2})..({:.2}, {:.2}, {:.2})",
            self.index,
            self.center[0],
            self.center[1],
            self.center[2],
            self.dimensions[0],
            self.dimensions[1],
            self.dimensions[2],
            self.bounds_min[0],
            self.bounds_min[1],
            self.bounds_min[2],
            self.bounds_max[0],
            self.bounds_max[1],
            self.bounds_max[2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planarvis_scene::{ObstacleRecord, PlanarRobot, PositionedBody, RobotConfig, RobotError};

    fn scene(records: &[ObstacleRecord]) -> Scene<PlanarRobot> {
        Scene::build(records, |bodies: &[PositionedBody]| -> Result<_, RobotError> {
            PlanarRobot::new(RobotConfig::default(), bodies)
        })
        .unwrap()
    }

    fn boxes() -> Vec<ObstacleRecord> {
        vec![
            ObstacleRecord::new([0.2, 1.2, 0.1], [1.55, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]),
            ObstacleRecord::new([0.4, 0.4, 0.4], [0.0, 1.8, 0.0], [1.0, 0.0, 0.0, 0.0]),
        ]
    }

    #[test]
    fn summary_empty_scene() {
        let summary = SceneInspector::summary(&scene(&[]));
        assert_eq!(summary.obstacle_count, 0);
        assert_eq!(summary.joint_count(), 10);
        assert_eq!(summary.model, "planar-arm");
    }

    #[test]
    fn inspect_body_by_record_index() {
        let scene = scene(&boxes());
        let info = SceneInspector::inspect_body(&scene, 1).unwrap();
        assert_eq!(info.index, 1);
        assert!((info.center[1] - 1.8).abs() < 1e-5);
        assert!((info.bounds_max[0] - 0.2).abs() < 1e-5);
    }

    #[test]
    fn inspect_body_out_of_range() {
        assert!(SceneInspector::inspect_body(&scene(&boxes()), 5).is_none());
    }

    #[test]
    fn list_bodies_preserves_order() {
        let bodies = SceneInspector::list_bodies(&scene(&boxes()));
        assert_eq!(bodies.len(), 2);
        assert!((bodies[0].center[0] - 1.55).abs() < 1e-5);
        assert_eq!(bodies[1].index, 1);
    }

    #[test]
    fn summary_display() {
        let s = format!("{}", SceneInspector::summary(&scene(&boxes())));
        assert!(s.contains("joints=10"));
        assert!(s.contains("obstacles=2"));
        assert!(s.contains("joint_1, joint_2"));
    }
}
