//! In-game HUD: stats readout, nearby-object panel, and the explore action.
//!
//! ## Layout
//!
//! | Node                  | Position      | Content                                   |
//! |-----------------------|---------------|-------------------------------------------|
//! | Stats                 | top-left      | speed, objects discovered, distance       |
//! | Explore toast         | top-centre    | "You explored the …!" for a few seconds   |
//! | Nearby panel          | bottom-left   | name, description, EXPLORE button         |
//!
//! Every text node the frame loop writes is tagged with a [`HudField`].
//! [`verify_hud_sinks`] runs right after [`setup_hud`] and aborts startup if a
//! field is missing or spawned twice.

use crate::config::{ConfigSet, CosmosConfig};
use crate::cosmos::Cosmos;
use crate::error::CosmosError;
use crate::menu::GameState;
use crate::proximity::{Nearby, NearbyKind, NearbyObject};
use crate::simulation::SimulationSet;
use crate::stats::Stats;
use bevy::ecs::error::BevyError;
use bevy::prelude::*;

// ── Components & resources ────────────────────────────────────────────────────

/// Which value a HUD text node displays.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HudField {
    Speed,
    Discovered,
    Distance,
    NearbyName,
    NearbyDescription,
    Toast,
}

impl HudField {
    pub const ALL: [HudField; 6] = [
        HudField::Speed,
        HudField::Discovered,
        HudField::Distance,
        HudField::NearbyName,
        HudField::NearbyDescription,
        HudField::Toast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Discovered => "discovered",
            Self::Distance => "distance",
            Self::NearbyName => "nearby_name",
            Self::NearbyDescription => "nearby_description",
            Self::Toast => "toast",
        }
    }
}

/// Container shown only while something is nearby.
#[derive(Component)]
pub struct NearbyPanel;

/// Tags the "Explore" button inside the nearby panel.
#[derive(Component)]
pub struct ExploreButton;

/// Acknowledgement of the last explore action.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct ExploreToast {
    pub message: Option<String>,
    /// Seconds left on screen.
    pub remaining: f32,
}

impl ExploreToast {
    pub fn show(&mut self, message: String, secs: f32) {
        self.message = Some(message);
        self.remaining = secs;
    }

    pub fn tick(&mut self, delta: f32) {
        if self.message.is_none() {
            return;
        }
        self.remaining -= delta;
        if self.remaining <= 0.0 {
            self.message = None;
            self.remaining = 0.0;
        }
    }
}

// ── Text ──────────────────────────────────────────────────────────────────────

/// Display name and description of a nearby object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearbyInfo {
    pub name: String,
    pub description: String,
}

/// Describe `nearby`, or `None` if its index no longer points at an object.
pub fn describe_nearby(cosmos: &Cosmos, nearby: &NearbyObject) -> Option<NearbyInfo> {
    match nearby.kind {
        NearbyKind::Planet => {
            let planet = cosmos.planets.get(nearby.index)?;
            let label = planet.planet_type.label();
            let rings = if planet.has_rings {
                "Beautiful rings orbit this celestial body."
            } else {
                "No ring system detected."
            };
            Some(NearbyInfo {
                name: format!("{label} Planet"),
                description: format!(
                    "A {} world with {} moon(s). {}",
                    label.to_lowercase(),
                    planet.moon_count,
                    rings
                ),
            })
        }
        NearbyKind::BlackHole => {
            cosmos.black_holes.get(nearby.index)?;
            Some(NearbyInfo {
                name: "Black Hole".to_string(),
                description: "A massive gravitational anomaly warping spacetime itself. \
                              Approach with extreme caution."
                    .to_string(),
            })
        }
    }
}

pub fn explore_message(name: &str) -> String {
    format!("You explored the {name}! Discovery logged.")
}

/// Text for one stats field.  Nearby and toast fields are handled separately.
fn stat_text(field: HudField, stats: &Stats) -> Option<String> {
    match field {
        HudField::Speed => Some(format!("Speed: {:.1}", stats.current_speed)),
        HudField::Discovered => Some(format!("Discovered: {}", stats.objects_discovered)),
        HudField::Distance => Some(format!("Distance: {:.1}", stats.distance_traveled)),
        _ => None,
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExploreToast>()
            .add_systems(
                Startup,
                (setup_hud, verify_hud_sinks).chain().after(ConfigSet),
            )
            .add_systems(
                Update,
                (explore_system, explore_toast_system, hud_update_system)
                    .chain()
                    .after(SimulationSet)
                    .run_if(in_state(GameState::Running)),
            );
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

fn hud_text(field: HudField, initial: &str, font_size: f32, color: Color) -> impl Bundle {
    (
        Text::new(initial),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        field,
    )
}

/// Spawn every HUD node.  The nearby panel starts hidden.
pub fn setup_hud(mut commands: Commands, config: Res<CosmosConfig>) {
    let size = config.hud_font_size;
    let label = Color::srgb(0.0, 1.0, 1.0);

    // ── Stats ─────────────────────────────────────────────────────────────────
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn(hud_text(HudField::Speed, "Speed: 0.0", size, label));
            parent.spawn(hud_text(HudField::Discovered, "Discovered: 0", size, label));
            parent.spawn(hud_text(HudField::Distance, "Distance: 0.0", size, label));
        });

    // ── Toast ─────────────────────────────────────────────────────────────────
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn(hud_text(
                HudField::Toast,
                "",
                size,
                Color::srgb(0.95, 0.88, 0.45),
            ));
        });

    // ── Nearby panel ──────────────────────────────────────────────────────────
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                bottom: Val::Px(10.0),
                max_width: Val::Px(360.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.05, 0.1, 0.8)),
            BorderColor::all(label),
            Visibility::Hidden,
            NearbyPanel,
        ))
        .with_children(|panel| {
            panel.spawn(hud_text(HudField::NearbyName, "", size, Color::WHITE));
            panel.spawn(hud_text(
                HudField::NearbyDescription,
                "",
                size * 0.75,
                Color::srgb(0.7, 0.7, 0.8),
            ));
            panel
                .spawn((
                    Button,
                    Node {
                        width: Val::Px(120.0),
                        height: Val::Px(32.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.04, 0.22, 0.30)),
                    BorderColor::all(label),
                    ExploreButton,
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new("EXPLORE"),
                        TextFont {
                            font_size: size * 0.8,
                            ..default()
                        },
                        TextColor(label),
                    ));
                });
        });
}

/// Abort startup unless every [`HudField`] has exactly one node.
pub fn verify_hud_sinks(fields: Query<&HudField>) -> Result<(), BevyError> {
    for field in HudField::ALL {
        let count = fields.iter().filter(|f| **f == field).count();
        match count {
            1 => {}
            0 => return Err(CosmosError::MissingUiSink { field: field.name() }.into()),
            count => {
                return Err(CosmosError::DuplicateUiSink {
                    field: field.name(),
                    count,
                }
                .into())
            }
        }
    }
    Ok(())
}

// ── Update (Running only) ─────────────────────────────────────────────────────

/// Explore the nearby object on **E** or the EXPLORE button.  No-op when
/// nothing is nearby.
pub fn explore_system(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<ExploreButton>)>,
    nearby: Res<Nearby>,
    cosmos: Res<Cosmos>,
    config: Res<CosmosConfig>,
    mut toast: ResMut<ExploreToast>,
) {
    let requested = keys.just_pressed(KeyCode::KeyE)
        || buttons.iter().any(|i| *i == Interaction::Pressed);
    if !requested {
        return;
    }
    let Some(info) = nearby.0.and_then(|n| describe_nearby(&cosmos, &n)) else {
        return;
    };
    let message = explore_message(&info.name);
    info!("{message}");
    toast.show(message, config.explore_toast_secs);
}

pub fn explore_toast_system(time: Res<Time>, mut toast: ResMut<ExploreToast>) {
    toast.tick(time.delta_secs());
}

/// Write stats, nearby info and the toast into their text nodes.
pub fn hud_update_system(
    stats: Res<Stats>,
    cosmos: Res<Cosmos>,
    nearby: Res<Nearby>,
    toast: Res<ExploreToast>,
    mut fields: Query<(&HudField, &mut Text)>,
    mut panel: Query<&mut Visibility, With<NearbyPanel>>,
) {
    let info = nearby.0.and_then(|n| describe_nearby(&cosmos, &n));

    for (field, mut text) in fields.iter_mut() {
        let value = match field {
            HudField::NearbyName => info.as_ref().map(|i| i.name.clone()).unwrap_or_default(),
            HudField::NearbyDescription => info
                .as_ref()
                .map(|i| i.description.clone())
                .unwrap_or_default(),
            HudField::Toast => toast.message.clone().unwrap_or_default(),
            other => stat_text(*other, &stats).unwrap_or_default(),
        };
        if text.0 != value {
            *text = Text::new(value);
        }
    }

    let shown = if info.is_some() {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut visibility in panel.iter_mut() {
        if *visibility != shown {
            *visibility = shown;
        }
    }
}
