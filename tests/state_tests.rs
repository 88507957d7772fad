//! Headless tests for the [`GameState`] machine and the start screen.
//!
//! These tests use [`MinimalPlugins`] (no window, no rendering), so they run
//! fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Default initial state is `NotStarted`.
//! 2. Start requests before the button is revealed are ignored.
//! 3. Enter after the delay transitions `NotStarted` → `Running`.
//! 4. A second start request does not re-run `OnEnter(Running)`.
//! 5. The start screen is despawned on start.
//! 6. Escape while `Running` requests `AppExit`.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use infinite_cosmos::config::CosmosConfig;
use infinite_cosmos::menu::{GameState, MainMenuPlugin, StartButton, StartScreenRoot};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Resource, Default)]
struct RunningEntries(u32);

/// Build a headless app with the menu plugin and the given start-button delay.
fn app_with_delay(delay: f32) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(CosmosConfig {
        start_button_delay_secs: delay,
        ..Default::default()
    });
    app.init_resource::<ButtonInput<KeyCode>>();
    app.init_resource::<RunningEntries>();
    app.add_plugins(MainMenuPlugin);
    app.add_systems(
        OnEnter(GameState::Running),
        |mut entries: ResMut<RunningEntries>| entries.0 += 1,
    );
    app
}

fn press(app: &mut App, key: KeyCode) {
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release(key);
    keys.clear_just_released(key);
    keys.press(key);
}

fn state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<C>>()
        .iter(app.world())
        .count()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn default_state_is_not_started() {
    let mut app = app_with_delay(0.0);
    app.update();
    assert_eq!(state(&app), GameState::NotStarted);
    assert_eq!(count::<StartScreenRoot>(&mut app), 1);
}

/// The button stays hidden, and Enter is ignored, until the delay has elapsed.
#[test]
fn start_is_ignored_before_button_appears() {
    let mut app = app_with_delay(1_000.0);
    app.update();

    press(&mut app, KeyCode::Enter);
    app.update();
    app.update();

    assert_eq!(state(&app), GameState::NotStarted);
    let visibility = *app
        .world_mut()
        .query_filtered::<&Visibility, With<StartButton>>()
        .single(app.world())
        .expect("one start button");
    assert_eq!(visibility, Visibility::Hidden);
}

#[test]
fn enter_after_delay_starts_exploration() {
    let mut app = app_with_delay(0.0);
    app.update(); // reveal

    press(&mut app, KeyCode::Enter);
    app.update(); // request
    app.update(); // StateTransition fires

    assert_eq!(state(&app), GameState::Running);
    assert_eq!(count::<StartScreenRoot>(&mut app), 0, "start screen despawned");
}

/// Requesting `Running` again while already `Running` leaves the state alone
/// and does not re-run `OnEnter(Running)`.
#[test]
fn second_start_request_does_not_double_schedule() {
    let mut app = app_with_delay(0.0);
    app.update();
    press(&mut app, KeyCode::Enter);
    app.update();
    app.update();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Running);
    app.update();
    app.update();

    assert_eq!(state(&app), GameState::Running);
    assert_eq!(app.world().resource::<RunningEntries>().0, 1);
}

#[test]
fn escape_while_running_exits() {
    let mut app = app_with_delay(0.0);
    app.insert_state(GameState::Running);
    app.update();
    app.update();
    assert_eq!(state(&app), GameState::Running);
    assert!(app.should_exit().is_none());

    press(&mut app, KeyCode::Escape);
    app.update();

    assert_eq!(app.should_exit(), Some(AppExit::Success));
}

#[test]
fn escape_on_start_screen_does_nothing() {
    let mut app = app_with_delay(0.0);
    app.update();
    press(&mut app, KeyCode::Escape);
    app.update();
    assert!(app.should_exit().is_none());
}
