//! Data models for the Fitness Coach application
//!
//! The profile is what the user types in; the plan is what the backend sends
//! back. Plans are displayed as received, so every plan field is optional and
//! unknown fields are carried along untouched.

use crate::errors::ParseError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

// ============================================================================
// Profile
// ============================================================================

/// User-entered fitness parameters, sent verbatim to plan generation
///
/// Every field is a string on the wire; numeric fields are never converted
/// client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Age is required"))]
    pub age: String,
    pub gender: String,
    #[validate(length(min = 1, message = "Height is required"))]
    pub height: String,
    #[validate(length(min = 1, message = "Weight is required"))]
    pub weight: String,
    pub goal: String,
    pub fitness_level: String,
    pub location: String,
    pub diet: String,
    pub medical_history: String,
    pub stress_level: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            gender: "male".to_string(),
            height: String::new(),
            weight: String::new(),
            goal: "weight-loss".to_string(),
            fitness_level: "beginner".to_string(),
            location: "gym".to_string(),
            diet: "veg".to_string(),
            medical_history: String::new(),
            stress_level: "low".to_string(),
        }
    }
}

impl Profile {
    /// Read one field
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Age => &self.age,
            ProfileField::Gender => &self.gender,
            ProfileField::Height => &self.height,
            ProfileField::Weight => &self.weight,
            ProfileField::Goal => &self.goal,
            ProfileField::FitnessLevel => &self.fitness_level,
            ProfileField::Location => &self.location,
            ProfileField::Diet => &self.diet,
            ProfileField::MedicalHistory => &self.medical_history,
            ProfileField::StressLevel => &self.stress_level,
        }
    }

    /// Replace one field, leaving every other field as it was
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Age => &mut self.age,
            ProfileField::Gender => &mut self.gender,
            ProfileField::Height => &mut self.height,
            ProfileField::Weight => &mut self.weight,
            ProfileField::Goal => &mut self.goal,
            ProfileField::FitnessLevel => &mut self.fitness_level,
            ProfileField::Location => &mut self.location,
            ProfileField::Diet => &mut self.diet,
            ProfileField::MedicalHistory => &mut self.medical_history,
            ProfileField::StressLevel => &mut self.stress_level,
        };
        *slot = value.into();
    }
}

/// Profile field names, as used on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    Name,
    Age,
    Gender,
    Height,
    Weight,
    Goal,
    FitnessLevel,
    Location,
    Diet,
    MedicalHistory,
    StressLevel,
}

impl ProfileField {
    /// All fields in wire order
    pub const ALL: [ProfileField; 11] = [
        ProfileField::Name,
        ProfileField::Age,
        ProfileField::Gender,
        ProfileField::Height,
        ProfileField::Weight,
        ProfileField::Goal,
        ProfileField::FitnessLevel,
        ProfileField::Location,
        ProfileField::Diet,
        ProfileField::MedicalHistory,
        ProfileField::StressLevel,
    ];

    /// All fields in the order the form presents them
    pub const FORM_ORDER: [ProfileField; 11] = [
        ProfileField::Name,
        ProfileField::Age,
        ProfileField::Gender,
        ProfileField::Height,
        ProfileField::Weight,
        ProfileField::Goal,
        ProfileField::FitnessLevel,
        ProfileField::Location,
        ProfileField::Diet,
        ProfileField::StressLevel,
        ProfileField::MedicalHistory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Age => "age",
            ProfileField::Gender => "gender",
            ProfileField::Height => "height",
            ProfileField::Weight => "weight",
            ProfileField::Goal => "goal",
            ProfileField::FitnessLevel => "fitnessLevel",
            ProfileField::Location => "location",
            ProfileField::Diet => "diet",
            ProfileField::MedicalHistory => "medicalHistory",
            ProfileField::StressLevel => "stressLevel",
        }
    }

    /// Form label shown next to the field
    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::Age => "Age",
            ProfileField::Gender => "Gender",
            ProfileField::Height => "Height (cm)",
            ProfileField::Weight => "Weight (kg)",
            ProfileField::Goal => "Fitness Goal",
            ProfileField::FitnessLevel => "Fitness Level",
            ProfileField::Location => "Workout Location",
            ProfileField::Diet => "Dietary Preference",
            ProfileField::MedicalHistory => "Medical History (Optional)",
            ProfileField::StressLevel => "Stress Level",
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ProfileField::Name => Some("Enter your name"),
            ProfileField::Age => Some("Enter your age"),
            ProfileField::Height => Some("Enter height in cm"),
            ProfileField::Weight => Some("Enter weight in kg"),
            ProfileField::MedicalHistory => {
                Some("Any medical conditions, injuries, or medications...")
            }
            _ => None,
        }
    }

    /// Fixed `(value, label)` choices for select-style fields; empty for free text
    pub fn options(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ProfileField::Gender => &[("male", "Male"), ("female", "Female"), ("other", "Other")],
            ProfileField::Goal => &[
                ("weight-loss", "Weight Loss"),
                ("muscle-gain", "Muscle Gain"),
                ("maintenance", "Maintenance"),
                ("endurance", "Endurance"),
            ],
            ProfileField::FitnessLevel => &[
                ("beginner", "Beginner"),
                ("intermediate", "Intermediate"),
                ("advanced", "Advanced"),
            ],
            ProfileField::Location => &[("gym", "Gym"), ("home", "Home"), ("outdoor", "Outdoor")],
            ProfileField::Diet => &[
                ("veg", "Vegetarian"),
                ("non-veg", "Non-Vegetarian"),
                ("vegan", "Vegan"),
                ("keto", "Keto"),
            ],
            ProfileField::StressLevel => &[("low", "Low"), ("medium", "Medium"), ("high", "High")],
            _ => &[],
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            ProfileField::Name | ProfileField::Age | ProfileField::Height | ProfileField::Weight
        )
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = ParseError;

    /// Accepts the wire name (`fitnessLevel`) as well as snake/kebab spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        ProfileField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().to_lowercase() == normalized)
            .ok_or_else(|| ParseError::UnknownField(s.to_string()))
    }
}

// ============================================================================
// Plan
// ============================================================================

/// A plan value displayed verbatim: day labels, item names, tips, sets,
/// reps, rest, calories, protein
///
/// The backend may send numbers or strings; both render as-is. A missing
/// value renders as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scalar(pub Value);

impl Scalar {
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Null => Ok(()),
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar(Value::from(value))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar(Value::from(value))
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar(Value::from(value))
    }
}

/// Generated workout/diet plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_plan: Option<Vec<WorkoutDay>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_plan: Option<DietPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<Scalar>>,
    /// Fields this client does not display, kept for export
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Plan {
    /// Compact JSON of one section, used as the text-to-speech input
    ///
    /// An absent section serializes as `null`.
    pub fn section_json(&self, section: Section) -> serde_json::Result<String> {
        match section {
            Section::Workout => serde_json::to_string(&self.workout_plan),
            Section::Diet => serde_json::to_string(&self.diet_plan),
            Section::All => serde_json::to_string(self),
        }
    }
}

/// One day of the workout plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    #[serde(default, skip_serializing_if = "Scalar::is_null")]
    pub day: Scalar,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(default, skip_serializing_if = "Scalar::is_null")]
    pub name: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_null")]
    pub sets: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_null")]
    pub reps: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_null")]
    pub rest: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Exercise {
    /// Detail line, e.g. `3 sets × 10 reps | Rest: 60s`
    pub fn details(&self) -> String {
        format!("{} sets × {} reps | Rest: {}", self.sets, self.reps, self.rest)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    #[serde(default, skip_serializing_if = "Scalar::is_null")]
    pub name: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_null")]
    pub calories: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_null")]
    pub protein: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FoodItem {
    /// Detail line, e.g. `350 cal | 12g protein`
    pub fn details(&self) -> String {
        format!("{} cal | {}g protein", self.calories, self.protein)
    }
}

/// A named meal and its food items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meal {
    pub name: String,
    pub items: Vec<FoodItem>,
}

impl Meal {
    /// Meal name with its first letter capitalized, as shown on the meal card
    pub fn title(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Diet plan: a JSON object of meal name to food items
///
/// Meals keep the order the backend sent them in, so the object is read and
/// written entry by entry instead of through a sorted map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DietPlan {
    pub meals: Vec<Meal>,
}

impl DietPlan {
    pub fn meal(&self, name: &str) -> Option<&Meal> {
        self.meals
            .iter()
            .find(|meal| meal.name.eq_ignore_ascii_case(name))
    }
}

impl Serialize for DietPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.meals.len()))?;
        for meal in &self.meals {
            map.serialize_entry(&meal.name, &meal.items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DietPlan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DietPlanVisitor;

        impl<'de> Visitor<'de> for DietPlanVisitor {
            type Value = DietPlan;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of meal names to food item lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<DietPlan, A::Error> {
                let mut meals = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, items)) = access.next_entry::<String, Vec<FoodItem>>()? {
                    meals.push(Meal { name, items });
                }
                Ok(DietPlan { meals })
            }
        }

        deserializer.deserialize_map(DietPlanVisitor)
    }
}

// ============================================================================
// Enumerations shared by requests and the workspace
// ============================================================================

/// What a generated image depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Exercise,
    Food,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Exercise => "exercise",
            ItemKind::Food => "food",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exercise" => Ok(ItemKind::Exercise),
            "food" => Ok(ItemKind::Food),
            _ => Err(ParseError::UnknownItemKind(s.to_string())),
        }
    }
}

/// Part of the plan that can be read aloud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Workout,
    Diet,
    All,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Workout => "workout",
            Section::Diet => "diet",
            Section::All => "all",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "workout" => Ok(Section::Workout),
            "diet" => Ok(Section::Diet),
            "all" | "full" => Ok(Section::All),
            _ => Err(ParseError::UnknownSection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_serializes_with_wire_names() {
        let profile = Profile::default();
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["fitnessLevel"], "beginner");
        assert_eq!(value["stressLevel"], "low");
        assert_eq!(value["medicalHistory"], "");
        assert_eq!(value.as_object().unwrap().len(), 11);
    }

    #[test]
    fn test_profile_field_parse() {
        assert_eq!("fitnessLevel".parse::<ProfileField>(), Ok(ProfileField::FitnessLevel));
        assert_eq!("fitness_level".parse::<ProfileField>(), Ok(ProfileField::FitnessLevel));
        assert_eq!("medical-history".parse::<ProfileField>(), Ok(ProfileField::MedicalHistory));
        assert_eq!("NAME".parse::<ProfileField>(), Ok(ProfileField::Name));
        assert!(matches!(
            "shoe_size".parse::<ProfileField>(),
            Err(ParseError::UnknownField(_))
        ));
    }

    #[test]
    fn test_every_field_round_trips_through_its_name() {
        for field in ProfileField::ALL {
            assert_eq!(field.as_str().parse::<ProfileField>(), Ok(field));
        }
    }

    #[test]
    fn test_plan_tolerates_missing_sections() {
        let plan: Plan = serde_json::from_value(json!({ "tips": ["Sleep well"] })).unwrap();
        assert!(plan.workout_plan.is_none());
        assert!(plan.diet_plan.is_none());
        assert_eq!(plan.tips, Some(vec![Scalar::from("Sleep well")]));
    }

    #[test]
    fn test_plan_leaves_are_taken_as_received() {
        let plan: Plan = serde_json::from_value(json!({
            "workoutPlan": [{ "day": 1, "exercises": [{ "name": 7, "sets": 3 }] }],
            "dietPlan": { "lunch": [{ "name": null, "calories": 400 }] },
            "tips": ["Hydrate", null, 8]
        }))
        .unwrap();

        let day = &plan.workout_plan.as_ref().unwrap()[0];
        assert_eq!(day.day.to_string(), "1");
        assert_eq!(day.exercises[0].name.to_string(), "7");
        assert_eq!(plan.diet_plan.as_ref().unwrap().meals[0].items[0].name.to_string(), "");
        let tips: Vec<String> = plan.tips.unwrap().iter().map(|tip| tip.to_string()).collect();
        assert_eq!(tips, vec!["Hydrate", "", "8"]);
    }

    #[test]
    fn test_diet_plan_keeps_meal_order() {
        let plan: Plan = serde_json::from_str(
            r#"{"dietPlan":{"lunch":[{"name":"Dal","calories":400,"protein":18}],
                "breakfast":[{"name":"Oats","calories":350,"protein":12}],
                "dinner":[]}}"#,
        )
        .unwrap();
        let names: Vec<_> = plan
            .diet_plan
            .as_ref()
            .unwrap()
            .meals
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["lunch", "breakfast", "dinner"]);

        let text = serde_json::to_string(&plan.diet_plan).unwrap();
        assert!(text.find("lunch").unwrap() < text.find("breakfast").unwrap());
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let raw = json!({
            "workoutPlan": [{"day": "Day 1", "focus": "legs", "exercises": [
                {"name": "Squat", "sets": 3, "reps": "8-10", "rest": "60s", "tempo": "3-1-1"}
            ]}],
            "summary": "Four weeks"
        });
        let plan: Plan = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(plan.extra["summary"], "Four weeks");
        assert_eq!(serde_json::to_value(&plan).unwrap(), raw);
    }

    #[test]
    fn test_exercise_details() {
        let exercise = Exercise {
            name: "Squat".into(),
            sets: 3.into(),
            reps: 10.into(),
            rest: "60s".into(),
            ..Default::default()
        };
        assert_eq!(exercise.details(), "3 sets × 10 reps | Rest: 60s");
    }

    #[test]
    fn test_missing_scalars_render_empty() {
        let item: FoodItem = serde_json::from_value(json!({ "name": "Apple" })).unwrap();
        assert_eq!(item.details(), " cal | g protein");
    }

    #[test]
    fn test_meal_title_capitalizes_first_letter() {
        let meal = Meal {
            name: "breakfast".to_string(),
            items: vec![],
        };
        assert_eq!(meal.title(), "Breakfast");
        assert_eq!(Meal::default().title(), "");
    }

    #[test]
    fn test_section_json_absent_section_is_null() {
        let plan = Plan::default();
        assert_eq!(plan.section_json(Section::Workout).unwrap(), "null");
        assert_eq!(plan.section_json(Section::All).unwrap(), "{}");
    }

    #[test]
    fn test_section_and_kind_parse() {
        assert_eq!("Diet".parse::<Section>(), Ok(Section::Diet));
        assert_eq!("full".parse::<Section>(), Ok(Section::All));
        assert!("lunch".parse::<Section>().is_err());
        assert_eq!("food".parse::<ItemKind>(), Ok(ItemKind::Food));
        assert!("drink".parse::<ItemKind>().is_err());
    }
}
