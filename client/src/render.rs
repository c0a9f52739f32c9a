//! Plain-text rendering of the workspace screen

use crate::session::Notice;
use fitness_coach_shared::view::{
    Body, ButtonView, Card, FormView, OverlayContent, OverlayView, PlanView, Screen, SectionView,
};
use fitness_coach_shared::Severity;
use std::fmt::Write;

const RULE: &str = "────────────────────────────────────────────────────────";

/// Render the whole screen
pub fn screen(screen: &Screen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}   [theme: {}]", screen.title, screen.theme_toggle);
    if let Some(quote) = &screen.motivation {
        let _ = writeln!(out, "\"{}\"", quote);
    }
    let _ = writeln!(out, "{}", RULE);

    match &screen.body {
        Body::Form(form) => render_form(&mut out, form),
        Body::Plan(plan) => render_plan(&mut out, plan),
    }

    if let Some(overlay) = &screen.overlay {
        render_overlay(&mut out, overlay);
    }
    out
}

/// Render notices with local timestamps
pub fn notices(notices: &[Notice]) -> String {
    let mut out = String::new();
    for notice in notices {
        let marker = match notice.notification.severity {
            Severity::Alert => "!",
            Severity::Notice | Severity::Silent => "i",
        };
        let _ = writeln!(
            out,
            "[{}] {} {}",
            notice.at.with_timezone(&chrono::Local).format("%H:%M:%S"),
            marker,
            notice.notification.message
        );
    }
    out
}

fn button(button: &ButtonView) -> String {
    if button.disabled {
        format!("({})", button.label)
    } else {
        format!("[{}]", button.label)
    }
}

fn render_form(out: &mut String, form: &FormView) {
    let _ = writeln!(out, "{}\n", form.title);
    for field in &form.fields {
        let marker = if field.required { " *" } else { "" };
        let value = if field.value.is_empty() {
            field.placeholder.map(|p| format!("<{}>", p)).unwrap_or_default()
        } else {
            field.value.clone()
        };
        let _ = write!(
            out,
            "  {:<28} {:<24} ({})",
            format!("{}{}", field.label, marker),
            value,
            field.field
        );
        if !field.options.is_empty() {
            let choices: Vec<&str> = field.options.iter().map(|(value, _)| *value).collect();
            let _ = write!(out, "  {}", choices.join(" | "));
        }
        out.push('\n');
    }
    let _ = writeln!(out, "\n{}", button(&form.submit));
}

fn render_plan(out: &mut String, plan: &PlanView) {
    let _ = writeln!(out, "{}", plan.title);
    let _ = writeln!(
        out,
        "{} {} {} {}\n",
        button(&plan.read_all),
        button(&plan.export),
        button(&plan.regenerate),
        button(&plan.back)
    );

    render_section(out, &plan.workout);
    render_section(out, &plan.diet);

    if let Some(tips) = &plan.tips {
        let _ = writeln!(out, "💡 Tips");
        for tip in tips {
            let _ = writeln!(out, "  • {}", tip);
        }
    }
}

fn render_section(out: &mut String, section: &SectionView) {
    let _ = writeln!(out, "{}  {}", section.heading, button(&section.read));
    for (index, card) in section.cards.iter().flatten().enumerate() {
        render_card(out, index + 1, card);
    }
    out.push('\n');
}

fn render_card(out: &mut String, number: usize, card: &Card) {
    let _ = writeln!(out, "  {}. {}", number, card.title);
    for (index, row) in card.rows.iter().enumerate() {
        let _ = writeln!(out, "     {}) {:<24} {}", index + 1, row.name, row.details);
    }
}

fn render_overlay(out: &mut String, overlay: &OverlayView) {
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "🖼  {}   [close]", overlay.title);
    match &overlay.content {
        OverlayContent::Loading(text) => {
            let _ = writeln!(out, "   {}", text);
        }
        OverlayContent::Image(image) => {
            let _ = writeln!(out, "   {}", image);
        }
    }
}
