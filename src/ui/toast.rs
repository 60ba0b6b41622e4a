use bevy::prelude::*;

use crate::input::InputState;

pub const TOAST_DURATION_MS: f64 = 3000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Bite,
    Success,
    Failure,
    Sale,
}

impl ToastKind {
    pub fn color(&self) -> Color {
        match self {
            ToastKind::Info => Color::srgb_u8(0x41, 0x69, 0xE1),
            ToastKind::Bite => Color::srgb_u8(0xFF, 0x98, 0x00),
            ToastKind::Success => Color::srgb_u8(0x4C, 0xAF, 0x50),
            ToastKind::Failure => Color::srgb_u8(0xFF, 0x6B, 0x6B),
            ToastKind::Sale => Color::srgb_u8(0xFF, 0xD7, 0x00),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub shown_at: f64,
}

/// At most one message on screen; a newer one replaces it.
#[derive(Resource, Debug)]
pub struct Toasts {
    current: Option<Toast>,
    duration_ms: f64,
}

impl Default for Toasts {
    fn default() -> Self {
        Self {
            current: None,
            duration_ms: TOAST_DURATION_MS,
        }
    }
}

impl Toasts {
    pub fn show(&mut self, text: impl Into<String>, kind: ToastKind, now: f64) {
        self.current = Some(Toast {
            text: text.into(),
            kind,
            shown_at: now,
        });
    }

    pub fn current(&self, now: f64) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|toast| now - toast.shown_at < self.duration_ms)
    }

    pub fn expire(&mut self, now: f64) {
        if self.current(now).is_none() {
            self.current = None;
        }
    }
}

#[derive(Component)]
pub struct ToastBanner;

pub fn setup_toast_banner(mut commands: Commands) {
    commands
        .spawn(NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                top: Val::Percent(60.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                TextBundle {
                    visibility: Visibility::Hidden,
                    ..TextBundle::from_section(
                        "",
                        TextStyle {
                            font_size: 22.0,
                            color: Color::WHITE,
                            ..default()
                        },
                    )
                    .with_style(Style {
                        padding: UiRect::all(Val::Px(10.0)),
                        ..default()
                    })
                    .with_background_color(Color::NONE)
                },
                ToastBanner,
            ));
        });
}

pub fn update_toast_banner(
    input: Res<InputState>,
    mut toasts: ResMut<Toasts>,
    mut banner_query: Query<(&mut Text, &mut BackgroundColor, &mut Visibility), With<ToastBanner>>,
) {
    toasts.expire(input.now_ms);
    let Ok((mut text, mut background, mut visibility)) = banner_query.get_single_mut() else {
        return;
    };

    match toasts.current(input.now_ms) {
        Some(toast) => {
            text.sections[0].value.clone_from(&toast.text);
            background.0 = toast.kind.color();
            *visibility = Visibility::Inherited;
        }
        None => *visibility = Visibility::Hidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_dismisses_after_three_seconds() {
        let mut toasts = Toasts::default();
        toasts.show("Vara lançada!", ToastKind::Info, 1000.0);
        assert!(toasts.current(3999.0).is_some());
        assert!(toasts.current(4000.0).is_none());
    }

    #[test]
    fn newer_toast_replaces_and_restarts_timer() {
        let mut toasts = Toasts::default();
        toasts.show("first", ToastKind::Info, 0.0);
        toasts.show("second", ToastKind::Sale, 2500.0);
        let current = toasts.current(4000.0).cloned();
        assert_eq!(
            current.map(|t| (t.text, t.kind)),
            Some(("second".to_string(), ToastKind::Sale))
        );
    }

    #[test]
    fn expire_drops_stale_messages_only() {
        let mut toasts = Toasts::default();
        toasts.show("bite", ToastKind::Bite, 0.0);
        toasts.expire(100.0);
        assert!(toasts.current(100.0).is_some());
        toasts.expire(3000.0);
        assert!(toasts.current(3000.0).is_none());
        assert!(toasts.current(0.0).is_none());
    }
}
