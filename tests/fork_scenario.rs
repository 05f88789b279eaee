#![allow(clippy::unwrap_used)]

use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use tubefork::fork::{AssignOutcome, BranchAssignment, BranchKind, LateralSide};
use tubefork::math::{Point3, Vector3};
use tubefork::path::{ArcPath, StraightPath};
use tubefork::tessellation::TriangleMesh;
use tubefork::{Fork, ForkManager, ForkParams, MainPath};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn straight() -> StraightPath {
    StraightPath::new(Point3::origin(), Vector3::x()).unwrap()
}

fn params() -> ForkParams {
    ForkParams::default()
        .with_fork_distance(100.0)
        .with_branch_length(60.0)
        .with_max_separation(3.0)
        .with_branch_radius(2.8)
        .with_transition_distance(30.0)
}

fn mirrored(p: &Point3) -> Point3 {
    Point3::new(p.x, p.y, -p.z)
}

fn contains_vertex(mesh: &TriangleMesh, p: &Point3) -> bool {
    mesh.vertices.iter().any(|v| (v - p).norm() < 1e-9)
}

#[test]
fn straight_fork_midpoint_offsets_and_blend() {
    init_tracing();
    let main = straight();
    let fork = Fork::new(params(), &main).unwrap();

    for index in 0..2 {
        let frame = fork.branch_frame(index, 130.0).unwrap();
        let main_frame = main.frame_at(130.0);
        assert_relative_eq!((frame.position - main_frame.position).norm(), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(frame.forward.dot(&Vector3::x()), 1.0, epsilon = 1e-9);
    }

    assert_abs_diff_eq!(fork.branch_blend(115.0), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(fork.branch_blend(145.0), 0.5, epsilon = 1e-12);
}

#[test]
fn branches_touch_the_main_centerline_at_both_ends() {
    init_tracing();
    let main = straight();
    let fork = Fork::new(params(), &main).unwrap();

    for index in 0..2 {
        let start = fork.branch_frame(index, 100.0).unwrap();
        let end = fork.branch_frame(index, 160.0).unwrap();
        assert_abs_diff_eq!((start.position - main.frame_at(100.0).position).norm(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!((end.position - main.frame_at(160.0).position).norm(), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn blend_rises_then_falls() {
    let fork = Fork::new(params(), &straight()).unwrap();

    let mut previous = 0.0;
    for step in 0..=30 {
        let blend = fork.branch_blend(100.0 + f64::from(step));
        assert!(blend >= previous - 1e-12);
        previous = blend;
    }
    assert_abs_diff_eq!(previous, 1.0, epsilon = 1e-12);

    for step in 0..=30 {
        let blend = fork.branch_blend(130.0 + f64::from(step));
        assert!(blend <= previous + 1e-12);
        previous = blend;
    }
    assert_abs_diff_eq!(previous, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(fork.branch_blend(90.0), 0.0);
    assert_abs_diff_eq!(fork.branch_blend(170.0), 0.0);
}

#[test]
fn player_latch_and_announcement() {
    init_tracing();
    let mut fork = Fork::new(params(), &straight()).unwrap();
    let mut routes = Vec::new();
    let mut announcer = |_: usize, branch: &tubefork::fork::Branch| {
        routes.push(branch.kind().to_string());
    };

    assert_eq!(fork.assign_player(100.0, &mut announcer), AssignOutcome::Latched(1));
    assert_eq!(fork.branch(1).unwrap().side(), LateralSide::Left);
    assert_eq!(fork.assign_player(0.0, &mut announcer), AssignOutcome::AlreadyAssigned(1));
    assert_eq!(routes, vec![BranchKind::Risky.to_string()]);
    assert_eq!(routes[0], "RISKY ROUTE");

    fork.reset_player_branch();
    assert_eq!(fork.player_branch(), BranchAssignment::Unassigned);
}

#[test]
fn ai_choice_tracks_aggression() {
    let fork = Fork::new(params(), &straight()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let trials = 4000;
    let risky = (0..trials)
        .filter(|_| fork.ai_branch(0.5, &mut rng) == 1)
        .count();
    #[allow(clippy::cast_precision_loss)]
    let ratio = risky as f64 / f64::from(trials);
    assert!((ratio - 0.5).abs() < 0.05, "ratio {ratio}");

    assert!((0..100).all(|_| fork.ai_branch(0.0, &mut rng) == 0));
    assert!((0..100).all(|_| fork.ai_branch(1.0, &mut rng) == 1));
}

#[test]
fn straight_fork_meshes_mirror_across_the_main_plane() {
    init_tracing();
    let fork = Fork::new(params(), &straight()).unwrap();
    let meshes = fork.meshes();

    let [right, left] = &meshes.tubes;
    assert_eq!(right.vertices.len(), left.vertices.len());
    for v in &right.vertices {
        assert!(contains_vertex(left, &mirrored(v)));
    }

    for junction in [&meshes.entry, &meshes.exit] {
        let [arm_right, arm_left] = &junction.arms;
        for v in &arm_right.vertices {
            assert!(contains_vertex(arm_left, &mirrored(v)));
        }
    }
}

#[test]
fn septum_is_tallest_where_the_branches_are_apart() {
    let params = params();
    let fork = Fork::new(params, &straight()).unwrap();
    let expected = params.septum_height();

    let height = |mesh: &TriangleMesh, ring: usize| (mesh.vertices[ring * 4 + 1] - mesh.vertices[ring * 4]).norm();

    let entry = &fork.meshes().entry.septum;
    let rings = entry.vertices.len() / 4;
    assert_abs_diff_eq!(height(entry, 0), 0.0, epsilon = 1e-12);
    assert_relative_eq!(height(entry, rings - 1), expected, epsilon = 1e-9);

    let exit = &fork.meshes().exit.septum;
    assert_relative_eq!(height(exit, 0), expected, epsilon = 1e-9);
    assert_abs_diff_eq!(height(exit, rings - 1), 0.0, epsilon = 1e-12);
}

#[test]
fn curved_main_path_produces_finite_geometry() {
    init_tracing();
    let main = ArcPath::new(Point3::origin(), 80.0).unwrap();
    let fork = Fork::new(params(), &main).unwrap();

    for index in 0..2 {
        for step in 0..=60 {
            let d = 100.0 + f64::from(step);
            let frame = fork.branch_frame(index, d).unwrap();
            assert!(frame.position.iter().all(|c| c.is_finite()));
            assert_relative_eq!(frame.forward.norm(), 1.0, epsilon = 1e-9);

            let travel = fork.travel_frame(index, d, &main);
            assert_abs_diff_eq!(travel.forward.dot(&travel.up), 0.0, epsilon = 1e-9);
        }
    }

    let meshes = fork.meshes();
    assert!(meshes.tubes.iter().all(TriangleMesh::is_finite));
    assert!(meshes.entry.arms.iter().all(TriangleMesh::is_finite));
    assert!(meshes.exit.septum.is_finite());
}

#[test]
fn manager_tracks_forks_along_a_run() {
    init_tracing();
    let main = straight();
    let mut manager = ForkManager::new();
    let first = manager.insert(Fork::new(params(), &main).unwrap());
    let second = manager.insert(Fork::new(params().with_fork_distance(400.0), &main).unwrap());

    let (id, fork) = manager.fork_at(120.0).unwrap();
    assert_eq!(id, first);
    assert!(fork.contains(120.0));

    manager
        .get_mut(second)
        .unwrap()
        .assign_player(300.0, &mut tubefork::fork::SilentAnnouncer);
    assert_abs_diff_eq!(manager.get(second).unwrap().obstacle_multiplier(), 0.75);

    assert_eq!(manager.prune_before(200.0), 1);
    assert!(manager.get(first).is_none());

    manager.reset_player_branches();
    assert_eq!(manager.get(second).unwrap().player_branch(), BranchAssignment::Unassigned);
}

#[test]
fn mouth_flare_widens_the_emitted_tube_ends() {
    init_tracing();
    let main = straight();
    let flared = Fork::new(params(), &main).unwrap();
    let plain = Fork::new(params().with_flare(1.05, 1.0, 0.08), &main).unwrap();

    let ring_size = params().circum_segments + 1;
    let flared_tube = &flared.meshes().tubes[0];
    let plain_tube = &plain.meshes().tubes[0];
    assert_eq!(flared_tube.vertices.len(), plain_tube.vertices.len());

    let path = flared.path(0).unwrap();
    let radius = |mesh: &TriangleMesh, ring: usize, sample: usize| {
        (mesh.vertices[ring * ring_size] - path.samples()[sample].position).norm()
    };

    // tube rings start at the last sample inside the 15-unit entry junction
    let first_sample = 7;
    let rings = flared_tube.vertices.len() / ring_size;
    assert_relative_eq!(radius(flared_tube, 0, first_sample), 2.8 * 1.15, epsilon = 1e-9);
    assert_relative_eq!(radius(plain_tube, 0, first_sample), 2.8 * 1.05, epsilon = 1e-9);
    assert!(radius(flared_tube, 1, first_sample + 1) > radius(plain_tube, 1, first_sample + 1) + 1e-6);
    assert_relative_eq!(
        radius(flared_tube, rings - 1, first_sample + rings - 1),
        2.8 * 1.15,
        epsilon = 1e-9
    );

    let middle = rings / 2;
    assert_relative_eq!(
        radius(flared_tube, middle, first_sample + middle),
        radius(plain_tube, middle, first_sample + middle),
        epsilon = 1e-12
    );
}

#[test]
fn vertical_main_path_produces_finite_geometry() {
    init_tracing();
    let main = StraightPath::new(Point3::origin(), Vector3::y()).unwrap();
    let fork = Fork::new(params(), &main).unwrap();

    let meshes = fork.meshes();
    assert!(meshes.tubes.iter().all(TriangleMesh::is_finite));
    for junction in [&meshes.entry, &meshes.exit] {
        assert!(junction.arms.iter().all(TriangleMesh::is_finite));
        assert!(junction.septum.is_finite());
    }

    for index in 0..2 {
        let frame = fork.branch_frame(index, 130.0).unwrap();
        assert_relative_eq!((frame.position - main.frame_at(130.0).position).norm(), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(frame.forward.dot(&frame.right), 0.0, epsilon = 1e-9);
        let travel = fork.travel_frame(index, 130.0, &main);
        assert!(travel.up.iter().all(|c| c.is_finite()));
    }
}

#[test]
fn invalid_parameters_are_reported() {
    let main = straight();
    assert!(Fork::new(params().with_branch_length(f64::NAN), &main).is_err());
    assert!(Fork::new(params().with_sample_spacing(0.0), &main).is_err());
    assert!(Fork::new(params().with_circum_segments(2), &main).is_err());
}
