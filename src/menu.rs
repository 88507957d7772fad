//! Start screen and the `GameState` machine.
//!
//! ## States
//!
//! | State        | Description                                              |
//! |--------------|----------------------------------------------------------|
//! | `NotStarted` | Initial state; world pre-generated, start screen shown   |
//! | `Running`    | Simulation ticking; HUD and renderer active              |
//!
//! ## Systems (registered by `MainMenuPlugin`)
//!
//! | System                        | Schedule                   | Purpose                         |
//! |-------------------------------|----------------------------|---------------------------------|
//! | `setup_start_screen`          | `OnEnter(NotStarted)`      | Spawn the overlay, button hidden |
//! | `reveal_start_button_system`  | `Update / in NotStarted`   | Show the button after the delay |
//! | `start_request_system`        | `Update / in NotStarted`   | Enter / click → `Running`       |
//! | `cleanup_start_screen`        | `OnEnter(Running)`         | Despawn the overlay             |
//! | `quit_system`                 | `Update / in Running`      | Escape → `AppExit`              |

use crate::config::CosmosConfig;
use bevy::prelude::*;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
///
/// The tick systems in [`crate::simulation::SimulationPlugin`] run under
/// `.run_if(in_state(GameState::Running))`.  They are registered once, so a
/// second start request cannot double-schedule them, and a `NextState` set to
/// the current state does not re-run `OnEnter`.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Start screen; shown on launch.
    #[default]
    NotStarted,
    /// Exploration in progress.
    Running,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the start screen; the whole tree is despawned on `OnEnter(Running)`.
#[derive(Component)]
pub struct StartScreenRoot;

/// Tags the "Start" button.
#[derive(Component)]
pub struct StartButton;

/// Time spent on the start screen so far.
#[derive(Resource, Debug, Default)]
pub struct StartScreen {
    pub elapsed: f32,
    /// Set once the start button has been shown; start requests are ignored before that.
    pub ready: bool,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState`, the start screen, and the shutdown key.
///
/// This plugin must be added to the app **before** any plugin that calls
/// `.run_if(in_state(GameState::Running))`, so the state is always registered
/// first.
pub struct MainMenuPlugin;

impl Plugin for MainMenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<StartScreen>()
            .add_systems(OnEnter(GameState::NotStarted), setup_start_screen)
            .add_systems(OnEnter(GameState::Running), cleanup_start_screen)
            .add_systems(
                Update,
                (reveal_start_button_system, start_request_system)
                    .chain()
                    .run_if(in_state(GameState::NotStarted)),
            )
            .add_systems(Update, quit_system.run_if(in_state(GameState::Running)));
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn start_bg() -> Color {
    Color::srgb(0.04, 0.22, 0.30)
}
fn start_border() -> Color {
    Color::srgb(0.0, 0.85, 0.95)
}
fn start_text() -> Color {
    Color::srgb(0.75, 1.0, 1.0)
}
fn title_color() -> Color {
    Color::srgb(0.85, 0.80, 1.0)
}
fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.55, 0.70)
}
fn hint_color() -> Color {
    Color::srgb(0.35, 0.35, 0.45)
}

// ── OnEnter(NotStarted): spawn UI ─────────────────────────────────────────────

/// Spawn the full-screen start overlay.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │             INFINITE COSMOS                 │
/// │      Explore an endless universe            │
/// │                                             │
/// │            [ BEGIN JOURNEY ]   (after delay)│
/// │                                             │
/// │  WASD / Arrows · Space boost · Wheel zoom   │
/// └─────────────────────────────────────────────┘
/// ```
pub fn setup_start_screen(mut commands: Commands, mut screen: ResMut<StartScreen>) {
    *screen = StartScreen::default();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            StartScreenRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("INFINITE COSMOS"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new("Explore an endless universe"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(root, 52.0);

            // Hidden until reveal_start_button_system decides the delay has passed.
            root.spawn((
                Button,
                Node {
                    width: Val::Px(240.0),
                    height: Val::Px(50.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(start_bg()),
                BorderColor::all(start_border()),
                Visibility::Hidden,
                StartButton,
            ))
            .with_children(|btn| {
                btn.spawn((
                    Text::new("BEGIN JOURNEY"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(start_text()),
                ));
            });

            spacer(root, 52.0);

            root.spawn((
                Text::new("WASD / Arrows: move  ·  Space: boost  ·  Wheel: zoom  ·  E: explore"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

/// Spawn a fixed-height invisible spacer node.
fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

// ── Update (NotStarted only) ──────────────────────────────────────────────────

/// Count time on the start screen and show the button once the delay elapses.
pub fn reveal_start_button_system(
    time: Res<Time>,
    config: Res<CosmosConfig>,
    mut screen: ResMut<StartScreen>,
    mut buttons: Query<&mut Visibility, With<StartButton>>,
) {
    if screen.ready {
        return;
    }
    screen.elapsed += time.delta_secs();
    if screen.elapsed >= config.start_button_delay_secs {
        screen.ready = true;
        for mut visibility in buttons.iter_mut() {
            *visibility = Visibility::Visible;
        }
    }
}

/// Start on Enter or a button press, once the start button is available.
#[allow(clippy::type_complexity)]
pub fn start_request_system(
    keys: Res<ButtonInput<KeyCode>>,
    screen: Res<StartScreen>,
    start_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<StartButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !screen.ready {
        return;
    }

    let mut start = keys.just_pressed(KeyCode::Enter);

    for (interaction, children) in start_query.iter() {
        let tint = match interaction {
            Interaction::Pressed => {
                start = true;
                continue;
            }
            Interaction::Hovered => Color::WHITE,
            Interaction::None => start_text(),
        };
        for child in children.iter() {
            if let Ok(mut color) = btn_text.get_mut(child) {
                *color = TextColor(tint);
            }
        }
    }

    if start {
        next_state.set(GameState::Running);
    }
}

// ── OnEnter(Running) ──────────────────────────────────────────────────────────

/// Recursively despawn the start screen.
pub fn cleanup_start_screen(mut commands: Commands, query: Query<Entity, With<StartScreenRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
    info!("Exploration started");
}

// ── Update (Running only) ─────────────────────────────────────────────────────

/// Escape ends the session.
pub fn quit_system(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        info!("Shutting down");
        exit.write(AppExit::Success);
    }
}
