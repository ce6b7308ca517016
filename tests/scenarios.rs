//! End-to-end scenarios against the public tick interface

use dash_runner::sim::{
    Character, CharacterState, GameEvent, Level, ObstacleField, TerrainProfile, TickInput, tick,
};
use dash_runner::tuning::{CharacterTuning, SpawnTuning, Tuning};
use dash_runner::GameState;
use rand::SeedableRng;
use rand_pcg::Pcg32;

#[test]
fn scenario_a_jump_arc() {
    let mut character = Character::new(CharacterTuning::default());
    character.position.x = 0.0;
    assert!(character.jump());
    let mut previous = character.velocity.y;
    for _ in 0..10 {
        character.update(0.05, 100.0);
        assert!(character.position.y >= 100.0);
        assert!(character.velocity.y < previous);
        previous = character.velocity.y;
    }
    assert!(previous < 700.0);
}

#[test]
fn scenario_b_first_spawn_window() {
    let spawn = SpawnTuning::default();
    let ground = TerrainProfile::flat(100.0);
    for seed in 0..100 {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut field = ObstacleField::new();
        let x = field.spawn_next(0.0, &ground, &spawn, 3, &mut rng).rect.x;
        assert!((800.0..=1800.0).contains(&x));
    }
}

#[test]
fn scenario_c_level_two_plateau_edges() {
    let tuning = Tuning::default();
    assert_eq!(tuning.ground_height(Level::Two, 5000.0), 100.0);
    assert_eq!(tuning.ground_height(Level::Two, 5800.0), 200.0);
    assert_eq!(tuning.ground_height(Level::Two, 7300.0), 200.0);
}

#[test]
fn scenario_d_last_life_lost() {
    let mut state = GameState::new(11);
    state.drain_events();
    state.character.lives = 1;
    let tuning = state.tuning().clone();
    let x = state.character.position.x;
    state
        .obstacles
        .place(x, 0, tuning.terrain_for(Level::One), &tuning.spawn);

    let frame = tick(&mut state, &TickInput::default(), 1.0 / 60.0);
    assert_eq!(frame.lives, 0);
    assert!(frame.game_over);
    assert_eq!(frame.character_state, CharacterState::Crash);
    assert!(frame.events.contains(&GameEvent::StopMusic));
}

#[test]
fn scenario_e_level_clear() {
    let mut state = GameState::new(12);
    state.level = Level::Three;
    state.character.position.x = 14990.0;
    let mut frame = tick(&mut state, &TickInput::default(), 0.05);
    while !frame.level_cleared {
        frame = tick(&mut state, &TickInput::default(), 0.05);
    }
    let frozen = frame.obstacles.clone();
    let x = frame.position.x;

    let frame = tick(&mut state, &TickInput::default(), 0.05);
    assert!(frame.level_cleared);
    assert_eq!(frame.obstacles, frozen);
    assert!(frame.position.x > x);
    assert_eq!(frame.lives, 3);
}
