mod common;

use common::{approx, enemy_at, flat_state};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tile_runner::camera::follow;
use tile_runner::compute::{new_session, start, tick};
use tile_runner::config::Config;
use tile_runner::entities::*;
use tile_runner::physics::vertical_phase;
use tile_runner::player::{self, Damage};

/// A ceiling row at y = -50..0 and a floor row at y = 500..550.
fn box_platforms() -> Vec<Platform> {
    let mut plats = Vec::new();
    for y in [-50.0, 500.0] {
        for col in 0..10 {
            plats.push(Platform {
                body: Body::at(col as f32 * 50.0, y, 50.0, 50.0),
                kind: PlatformKind::Brick,
            });
        }
    }
    plats
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Mushroom,
    Star,
    Hit,
    Frame,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Mushroom),
        Just(Op::Star),
        Just(Op::Hit),
        Just(Op::Frame),
    ]
}

fn input() -> impl Strategy<Value = InputSnapshot> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, jump)| InputSnapshot {
        left,
        right,
        jump,
    })
}

proptest! {
    #[test]
    fn vertical_phase_leaves_no_overlap_while_moving(
        x in 0.0f32..400.0,
        h in prop_oneof![Just(50.0f32), Just(80.0f32)],
        y_frac in 0.0f32..1.0,
        vy in -20.0f32..20.0,
    ) {
        let plats = box_platforms();
        let y = y_frac * (500.0 - h);
        let mut body = Body { x, y, w: 40.0, h, vx: 0.0, vy };

        vertical_phase(&mut body, 0.8, &plats);

        if body.vy != 0.0 {
            prop_assert!(plats.iter().all(|p| !body.overlaps(&p.body)), "{body:?}");
        }
    }

    #[test]
    fn feet_stay_put_across_size_changes(
        y in 0.0f32..500.0,
        ops in proptest::collection::vec(op(), 1..40),
    ) {
        let config = Config::default();
        let mut p = player::spawn(&config);
        p.body.y = y;
        let bottom = p.body.bottom();

        for op in ops {
            match op {
                Op::Mushroom => player::apply_power_up(&mut p, ItemKind::Mushroom, &config),
                Op::Star => player::apply_power_up(&mut p, ItemKind::Star, &config),
                Op::Hit => { let _ = player::take_damage(&mut p, &config); }
                Op::Frame => player::tick_invincibility(&mut p),
            }
            prop_assert!(approx(p.body.bottom(), bottom));
            let expected_h = if p.is_big() { 80.0 } else { 50.0 };
            prop_assert_eq!(p.body.h, expected_h);
        }
    }

    #[test]
    fn invincibility_flag_tracks_timer(
        ops in proptest::collection::vec(op(), 1..200),
    ) {
        let config = Config::default();
        let mut p = player::spawn(&config);
        player::resize(&mut p, SizeState::Big, &config);

        for op in ops {
            let before = p.invincible_timer;
            match op {
                Op::Mushroom => player::apply_power_up(&mut p, ItemKind::Mushroom, &config),
                Op::Star => player::apply_power_up(&mut p, ItemKind::Star, &config),
                Op::Hit => {
                    if player::take_damage(&mut p, &config) == Damage::Fatal {
                        break;
                    }
                }
                Op::Frame => {
                    player::tick_invincibility(&mut p);
                    prop_assert_eq!(p.invincible_timer, before.saturating_sub(1));
                }
            }
            prop_assert_eq!(p.is_invincible(), p.invincible_timer > 0);
            prop_assert!(p.invincible_timer <= config.star_frames());
        }
    }

    #[test]
    fn stomp_always_wins(
        big in any::<bool>(),
        timer in 0u32..700,
        vy in 0.5f32..12.0,
        dx in -30.0f32..30.0,
    ) {
        let config = Config::default();
        let mut s = flat_state(20);
        s.enemies.push(enemy_at(200.0, 100.0));
        if big {
            player::resize(&mut s.player, SizeState::Big, &config);
        }
        s.player.invincible_timer = timer;
        // After this frame's gravity step the feet sit 5 units into the
        // enemy, which will have walked to x = 198.
        s.player.body.x = 198.0 + dx;
        s.player.body.vy = vy;
        s.player.body.y = 105.0 - s.player.body.h - (vy + config.physics.gravity);

        let s2 = tick(&s, &InputSnapshot::default(), &config);
        prop_assert!(s2.enemies.is_empty());
        prop_assert_eq!(s2.status, SessionState::Playing);
        prop_assert_eq!(s2.player.size, s.player.size);
        prop_assert_eq!(s2.player.score, s.player.score + 100);
        prop_assert_eq!(s2.player.body.vy, config.physics.stomp_bounce);
    }

    #[test]
    fn camera_offset_stays_in_bounds(
        level_width in 800.0f32..6000.0,
        frac in 0.0f32..=1.0,
    ) {
        let view = 800.0;
        let x = frac * level_width;
        let cam = follow(x, level_width, view);
        prop_assert!(cam <= 0.0);
        prop_assert!(cam >= -(level_width - view));
    }

    #[test]
    fn random_play_keeps_player_inside_level(
        seed in 0u64..500,
        inputs in proptest::collection::vec(input(), 1..300),
    ) {
        let config = Config::default();
        let mut s = start(&new_session(&config, &mut StdRng::seed_from_u64(seed)));

        for i in inputs {
            s = tick(&s, &i, &config);
            prop_assert!(s.player.body.x >= 0.0);
            prop_assert!(s.player.body.right() <= s.level_width + 1e-3);
            prop_assert!(s.camera.x <= 0.0 && s.camera.x >= -(s.level_width - 800.0));
            prop_assert_eq!(s.player.is_invincible(), s.player.invincible_timer > 0);
            if s.status != SessionState::Playing {
                break;
            }
        }
    }
}
