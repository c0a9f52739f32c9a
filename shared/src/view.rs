//! Presentation model of the workspace
//!
//! [`Screen::from_state`] turns workspace state into everything a front end
//! draws: labels, button captions and which controls are disabled. Front
//! ends only lay it out.

use crate::models::{ItemKind, Plan, ProfileField, Section};
use crate::workspace::{OverlayStatus, Theme, WorkspaceState};
use serde::Serialize;

pub const APP_TITLE: &str = "💪 AI Fitness Coach";
pub const FORM_TITLE: &str = "Let's Build Your Perfect Fitness Plan";
pub const PLAN_TITLE: &str = "Your Personalized Fitness Plan";
pub const IMAGE_LOADING_TEXT: &str = "Generating image...";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub title: &'static str,
    pub theme: Theme,
    /// Caption of the theme toggle: the theme it switches to
    pub theme_toggle: &'static str,
    pub motivation: Option<String>,
    pub body: Body,
    pub overlay: Option<OverlayView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum Body {
    Form(FormView),
    Plan(PlanView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub title: &'static str,
    pub fields: Vec<FieldView>,
    pub submit: ButtonView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub field: ProfileField,
    pub label: &'static str,
    pub value: String,
    pub placeholder: Option<&'static str>,
    /// `(value, label)` pairs; empty for free-text fields
    pub options: &'static [(&'static str, &'static str)],
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonView {
    pub label: String,
    pub disabled: bool,
}

impl ButtonView {
    fn new(label: impl Into<String>, disabled: bool) -> Self {
        Self {
            label: label.into(),
            disabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanView {
    pub title: &'static str,
    pub read_all: ButtonView,
    pub export: ButtonView,
    pub regenerate: ButtonView,
    pub back: ButtonView,
    pub workout: SectionView,
    pub diet: SectionView,
    /// Absent when the plan carries no tips
    pub tips: Option<Vec<String>>,
}

/// Workout or diet section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub heading: &'static str,
    pub read: ButtonView,
    /// Absent when the plan does not carry this section
    pub cards: Option<Vec<Card>>,
}

/// A workout day or a meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub title: String,
    pub rows: Vec<ItemRow>,
}

/// A selectable exercise or food item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRow {
    pub name: String,
    pub details: String,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayView {
    pub title: String,
    pub content: OverlayContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum OverlayContent {
    Loading(&'static str),
    Image(String),
}

impl Screen {
    pub fn from_state(state: &WorkspaceState) -> Self {
        let body = match &state.plan {
            Some(plan) => Body::Plan(plan_view(state, plan)),
            None => Body::Form(form_view(state)),
        };

        let overlay = state.overlay.as_ref().map(|overlay| OverlayView {
            title: overlay.item_name.clone(),
            content: match &overlay.status {
                OverlayStatus::Loading { .. } => OverlayContent::Loading(IMAGE_LOADING_TEXT),
                OverlayStatus::Shown { image } => OverlayContent::Image(image.clone()),
            },
        });

        Self {
            title: APP_TITLE,
            theme: state.theme,
            theme_toggle: match state.theme {
                Theme::Light => "🌙",
                Theme::Dark => "☀️",
            },
            motivation: state.motivation.clone().filter(|quote| !quote.is_empty()),
            body,
            overlay,
        }
    }
}

fn form_view(state: &WorkspaceState) -> FormView {
    let fields = ProfileField::FORM_ORDER
        .iter()
        .map(|field| FieldView {
            field: *field,
            label: field.label(),
            value: state.profile.get(*field).to_string(),
            placeholder: field.placeholder(),
            options: field.options(),
            required: field.is_required(),
        })
        .collect();

    let submit = if state.is_generating() {
        ButtonView::new("Generating Your Plan...", true)
    } else {
        ButtonView::new("Generate My Fitness Plan 🚀", false)
    };

    FormView {
        title: FORM_TITLE,
        fields,
        submit,
    }
}

fn plan_view(state: &WorkspaceState, plan: &Plan) -> PlanView {
    let reading = state.is_reading();
    let read_button = |section: Section, idle: &str| {
        if state.reading_section() == Some(section) {
            ButtonView::new("Reading...", true)
        } else {
            ButtonView::new(idle, reading)
        }
    };

    let workout_cards = plan.workout_plan.as_ref().map(|days| {
        days.iter()
            .map(|day| Card {
                title: day.day.to_string(),
                rows: day
                    .exercises
                    .iter()
                    .map(|exercise| ItemRow {
                        name: exercise.name.to_string(),
                        details: exercise.details(),
                        kind: ItemKind::Exercise,
                    })
                    .collect(),
            })
            .collect()
    });

    let meal_cards = plan.diet_plan.as_ref().map(|diet| {
        diet.meals
            .iter()
            .map(|meal| Card {
                title: meal.title(),
                rows: meal
                    .items
                    .iter()
                    .map(|item| ItemRow {
                        name: item.name.to_string(),
                        details: item.details(),
                        kind: ItemKind::Food,
                    })
                    .collect(),
            })
            .collect()
    });

    PlanView {
        title: PLAN_TITLE,
        read_all: read_button(Section::All, "🔊 Read Full Plan"),
        export: ButtonView::new(
            if state.is_exporting() {
                "📄 Exporting..."
            } else {
                "📄 Export as PDF"
            },
            false,
        ),
        regenerate: ButtonView::new("🔄 Regenerate Plan", state.is_generating()),
        back: ButtonView::new("← Back to Form", false),
        workout: SectionView {
            heading: "🏋️ Workout Plan",
            read: read_button(Section::Workout, "Read Workout Plan"),
            cards: workout_cards,
        },
        diet: SectionView {
            heading: "🥗 Diet Plan",
            read: read_button(Section::Diet, "Read Diet Plan"),
            cards: meal_cards,
        },
        tips: plan
            .tips
            .as_ref()
            .map(|tips| tips.iter().map(|tip| tip.to_string()).collect()),
    }
}
