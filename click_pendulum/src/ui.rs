use bevy::prelude::*;

use crate::{
    resources::Config,
    session::{PendulumEvent, PendulumSession},
    state::{dispatch, Mode},
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FontAssets>()
            .add_startup_system(setup)
            .add_system(button_press.before(dispatch))
            .add_system(button_hover)
            .add_system(update_status.after(dispatch));
    }
}

#[derive(Resource)]
pub struct FontAssets {
    pub ui_font: Handle<Font>,
}

impl FromWorld for FontAssets {
    fn from_world(world: &mut World) -> Self {
        let asset_server = world.resource::<AssetServer>();
        let ui_font = asset_server.load("fonts/FiraSans-Bold.ttf");
        Self { ui_font }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Clear,
    Quit,
}

impl UiAction {
    fn label(self) -> &'static str {
        match self {
            UiAction::Clear => "Clear",
            UiAction::Quit => "Quit",
        }
    }

    fn event(self) -> PendulumEvent {
        match self {
            UiAction::Clear => PendulumEvent::Clear,
            UiAction::Quit => PendulumEvent::Quit,
        }
    }
}

#[derive(Component)]
pub struct StatusText;

const UI_SIZE: f32 = 20.0;
const BUTTON_COLOR: Color = Color::rgb(0.85, 0.85, 0.85);
const BUTTON_HOVER_COLOR: Color = Color::rgb(0.7, 0.7, 0.7);

fn setup(mut commands: Commands, fonts: Res<FontAssets>, config: Res<Config>) {
    let style = TextStyle {
        font: fonts.ui_font.clone(),
        font_size: UI_SIZE,
        color: Color::BLACK,
    };

    commands.spawn((
        TextBundle {
            style: Style {
                position_type: PositionType::Absolute,
                position: UiRect {
                    left: Val::Px(10.0),
                    top: Val::Px(10.0),
                    ..Default::default()
                },
                ..Default::default()
            },
            text: Text::from_section(status_line(Mode::AwaitingPivot, None), style.clone()),
            ..Default::default()
        },
        Name::new("ui Status"),
        StatusText,
    ));

    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    position: UiRect {
                        left: Val::Px(0.0),
                        bottom: Val::Px(0.0),
                        ..Default::default()
                    },
                    size: Size::new(Val::Percent(100.0), Val::Px(config.button_bar_height)),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..Default::default()
                },
                background_color: Color::rgb(0.95, 0.95, 0.95).into(),
                ..Default::default()
            },
            Name::new("ui Buttons"),
        ))
        .with_children(|bar| {
            for action in [UiAction::Clear, UiAction::Quit] {
                bar.spawn((
                    ButtonBundle {
                        style: Style {
                            size: Size::new(Val::Px(80.0), Val::Px(28.0)),
                            margin: UiRect::horizontal(Val::Px(5.0)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..Default::default()
                        },
                        background_color: BUTTON_COLOR.into(),
                        ..Default::default()
                    },
                    action,
                    Name::new(format!("ui {} Button", action.label())),
                ))
                .with_children(|button| {
                    button.spawn(TextBundle::from_section(action.label(), style.clone()));
                });
            }
        });
}

fn button_press(
    query: Query<(&Interaction, &UiAction), Changed<Interaction>>,
    mut events: EventWriter<PendulumEvent>,
) {
    for (interaction, action) in query.iter() {
        if *interaction == Interaction::Clicked {
            events.send(action.event());
        }
    }
}

fn button_hover(
    mut query: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<UiAction>)>,
) {
    for (interaction, mut color) in query.iter_mut() {
        *color = match interaction {
            Interaction::None => BUTTON_COLOR,
            Interaction::Hovered | Interaction::Clicked => BUTTON_HOVER_COLOR,
        }
        .into();
    }
}

fn update_status(
    session: Res<PendulumSession>,
    mut query: Query<&mut Text, With<StatusText>>,
) {
    if !session.is_changed() {
        return;
    }
    let line = status_line(session.mode(), session.length());
    for mut text in query.iter_mut() {
        if text.sections[0].value != line {
            text.sections[0].value = line.clone();
        }
    }
}

pub fn status_line(mode: Mode, length: Option<f32>) -> String {
    let length = length.unwrap_or_default();
    match mode {
        Mode::AwaitingPivot => "Click to place the pivot".to_string(),
        Mode::AwaitingBob => "Click to place the bob".to_string(),
        Mode::Paused => format!("Length {:.1} mm, click to run", length),
        Mode::Running => format!("Length {:.1} mm, click to pause", length),
    }
}
