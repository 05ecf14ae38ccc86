//! The rotating-gravity demo scene: a five-panel containing bin, a
//! uniform grid of falling spheres with seeded placement jitter, and
//! one heavy ball dropped on top of the grid.

use granular_core::error::SimResult;
use granular_core::physics::{BodyDescriptor, Material, PhysicsEngine, Shape};
use granular_core::types::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// SMC material shared by the bin and the balls.
const YOUNGS_MODULUS: f64 = 2e6;
const FRICTION: f64 = 0.4;
const RESTITUTION: f64 = 0.4;

/// Ball grid: (2 * COUNT_X + 1) columns by (2 * COUNT_Y + 1) rows per
/// layer, layers every 0.35 from z = 10 up to 15.
const COUNT_X: i32 = 10;
const COUNT_Y: i32 = 10;
const GRID_SPACING: f64 = 0.35;
const BALL_RADIUS: f64 = 0.15;
const BALL_MASS: f64 = 1.0;

/// The heavy ball released above the grid.
const BIG_BALL_RADIUS: f64 = 1.0;
const BIG_BALL_MASS: f64 = 10.0;
const BIG_BALL_DROP_HEIGHT: f64 = 23.0;

/// Placement jitter keeps the grid from being perfectly degenerate
/// while staying reproducible for a given seed.
const JITTER: f64 = 0.01;

fn shared_material() -> Material {
    Material {
        youngs_modulus: YOUNGS_MODULUS,
        friction:       FRICTION,
        restitution:    RESTITUTION,
        adhesion:       0.0,
    }
}

/// Five box panels attached at the origin: a floor and four walls,
/// 4 x 4 in plan and 15 tall, panels 0.1 thick.
pub fn add_container(engine: &mut dyn PhysicsEngine) -> SimResult<()> {
    let hdim = Vec3::new(4.0, 4.0, 15.0);
    let hthick = 0.1;

    let panels = vec![
        Shape::Box {
            half_extents: Vec3::new(hdim.x, hdim.y, hthick),
            offset:       Vec3::new(0.0, 0.0, -hthick),
        },
        Shape::Box {
            half_extents: Vec3::new(hthick, hdim.y, hdim.z),
            offset:       Vec3::new(-hdim.x - hthick, 0.0, hdim.z),
        },
        Shape::Box {
            half_extents: Vec3::new(hthick, hdim.y, hdim.z),
            offset:       Vec3::new(hdim.x + hthick, 0.0, hdim.z),
        },
        Shape::Box {
            half_extents: Vec3::new(hdim.x, hthick, hdim.z),
            offset:       Vec3::new(0.0, -hdim.y - hthick, hdim.z),
        },
        Shape::Box {
            half_extents: Vec3::new(hdim.x, hthick, hdim.z),
            offset:       Vec3::new(0.0, hdim.y + hthick, hdim.z),
        },
    ];

    let bin = BodyDescriptor::fixed_panels(Vec3::ZERO, shared_material(), panels);
    engine.add_body(&bin)?;
    Ok(())
}

/// Drop the ball grid into the bin. Returns how many balls were added.
pub fn add_falling_balls(engine: &mut dyn PhysicsEngine, seed: u64) -> SimResult<usize> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let material = shared_material();
    let mut added = 0;

    let mut z = 10.0;
    while z < 15.0 {
        for ix in -COUNT_X..=COUNT_X {
            for iy in -COUNT_Y..=COUNT_Y {
                let jitter_x: f64 = rng.gen_range(-JITTER..JITTER);
                let jitter_y: f64 = rng.gen_range(-JITTER..JITTER);
                let position = Vec3::new(
                    GRID_SPACING * ix as f64 + jitter_x,
                    GRID_SPACING * iy as f64 + jitter_y,
                    z,
                );
                let ball =
                    BodyDescriptor::sphere(BALL_MASS, BALL_RADIUS, position, material);
                engine.add_body(&ball)?;
                added += 1;
            }
        }
        z += GRID_SPACING;
    }

    Ok(added)
}

/// One heavy sphere dropped from above the grid, to stir the pile.
pub fn add_big_ball(engine: &mut dyn PhysicsEngine) -> SimResult<()> {
    let ball = BodyDescriptor::sphere(
        BIG_BALL_MASS,
        BIG_BALL_RADIUS,
        Vec3::new(0.0, 0.0, BIG_BALL_DROP_HEIGHT),
        shared_material(),
    );
    engine.add_body(&ball)?;
    Ok(())
}
