//! Terminal commands
//!
//! One command per line. Commands that refer to plan items by position are
//! resolved against the current workspace state before they become events.

use fitness_coach_shared::validation::validate_field_input;
use fitness_coach_shared::{Event, ItemKind, ParseError, ProfileField, Section, WorkspaceState};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  set <field> <value>        edit a profile field (e.g. set fitnessLevel advanced)
  submit                     generate a plan from the profile
  regenerate                 request a new plan
  back                       discard the plan and return to the form
  exercise <day#> <ex#>      show an image of an exercise
  food <meal> <item#>        show an image of a food item
  close                      close the image
  read [workout|diet|all]    read part of the plan aloud
  stop                       stop reading
  export                     save the plan as fitness-plan.pdf
  theme                      toggle light/dark
  show                       redraw the screen
  help                       show this help
  quit                       exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: ProfileField, value: String },
    Submit,
    Regenerate,
    Back,
    /// 1-based day and exercise positions
    Exercise { day: usize, exercise: usize },
    /// Meal name and 1-based item position
    Food { meal: String, item: usize },
    Close,
    Read(Section),
    Stop,
    Export,
    Theme,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help` for a list)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("There is no plan on screen")]
    NoPlan,

    #[error("No such item: {0}")]
    NoSuchItem(String),
}

impl Command {
    /// Parse one input line; `None` for a blank line
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_lowercase().as_str() {
            "set" => {
                let (name, value) = match rest.split_once(char::is_whitespace) {
                    Some((name, value)) => (name, value.trim()),
                    None if !rest.is_empty() => (rest, ""),
                    None => return Err(CommandError::Usage("set <field> <value>")),
                };
                let field: ProfileField = name.parse()?;
                validate_field_input(field, value).map_err(|message| ParseError::InvalidValue {
                    field: field.to_string(),
                    message,
                })?;
                Command::Set {
                    field,
                    value: value.to_string(),
                }
            }
            "submit" | "generate" => Command::Submit,
            "regenerate" => Command::Regenerate,
            "back" => Command::Back,
            "exercise" => match args.as_slice() {
                [day, exercise] => Command::Exercise {
                    day: position(day, "exercise <day#> <ex#>")?,
                    exercise: position(exercise, "exercise <day#> <ex#>")?,
                },
                _ => return Err(CommandError::Usage("exercise <day#> <ex#>")),
            },
            "food" => match args.split_last() {
                Some((item, meal)) if !meal.is_empty() => Command::Food {
                    meal: meal.join(" "),
                    item: position(item, "food <meal> <item#>")?,
                },
                _ => return Err(CommandError::Usage("food <meal> <item#>")),
            },
            "close" => Command::Close,
            "read" => match args.as_slice() {
                [] => Command::Read(Section::All),
                [section] => Command::Read(section.parse()?),
                _ => return Err(CommandError::Usage("read [workout|diet|all]")),
            },
            "stop" => Command::Stop,
            "export" => Command::Export,
            "theme" => Command::Theme,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }

    /// Turn the command into a workspace event; `None` for front-end-only commands
    pub fn into_event(self, state: &WorkspaceState) -> Result<Option<Event>, CommandError> {
        let event = match self {
            Command::Set { field, value } => Event::EditField { field, value },
            Command::Submit => Event::Submit,
            Command::Regenerate => Event::Regenerate,
            Command::Back => Event::Back,
            Command::Exercise { day, exercise } => {
                let plan = state.plan.as_ref().ok_or(CommandError::NoPlan)?;
                let found = plan
                    .workout_plan
                    .as_ref()
                    .and_then(|days| days.get(day - 1))
                    .and_then(|d| d.exercises.get(exercise - 1))
                    .ok_or_else(|| CommandError::NoSuchItem(format!("exercise {} of day {}", exercise, day)))?;
                Event::SelectItem {
                    item_name: found.name.to_string(),
                    kind: ItemKind::Exercise,
                }
            }
            Command::Food { meal, item } => {
                let plan = state.plan.as_ref().ok_or(CommandError::NoPlan)?;
                let found = plan
                    .diet_plan
                    .as_ref()
                    .and_then(|diet| diet.meal(&meal))
                    .and_then(|m| m.items.get(item - 1))
                    .ok_or_else(|| CommandError::NoSuchItem(format!("item {} of {}", item, meal)))?;
                Event::SelectItem {
                    item_name: found.name.to_string(),
                    kind: ItemKind::Food,
                }
            }
            Command::Close => Event::DismissOverlay,
            Command::Read(section) => {
                if state.plan.is_none() {
                    return Err(CommandError::NoPlan);
                }
                Event::ReadAloud { section }
            }
            Command::Stop => Event::StopReading,
            Command::Export => {
                if state.plan.is_none() {
                    return Err(CommandError::NoPlan);
                }
                Event::Export
            }
            Command::Theme => Event::ToggleTheme,
            Command::Show | Command::Help | Command::Quit => return Ok(None),
        };
        Ok(Some(event))
    }
}

/// Parse a 1-based position
fn position(text: &str, usage: &'static str) -> Result<usize, CommandError> {
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::Usage(usage)),
    }
}
