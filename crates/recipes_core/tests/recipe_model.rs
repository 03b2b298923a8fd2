use chrono::{TimeZone, Utc};
use recipes_core::{Recipe, RecipeInput};

#[test]
fn recipe_serialization_uses_expected_wire_fields() {
    let published_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    let recipe = Recipe::with_id(
        "r-1".to_string(),
        published_at,
        RecipeInput {
            name: "Pie".to_string(),
            tags: vec!["dessert".to_string()],
            ingredients: vec!["flour".to_string()],
            instructions: vec!["bake".to_string()],
        },
    );

    let json = serde_json::to_value(&recipe).unwrap();
    assert_eq!(json["id"], "r-1");
    assert_eq!(json["name"], "Pie");
    assert_eq!(json["tags"], serde_json::json!(["dessert"]));
    assert_eq!(json["ingredients"], serde_json::json!(["flour"]));
    assert_eq!(json["instructions"], serde_json::json!(["bake"]));
    assert_eq!(json["publishedAt"], "2024-03-01T12:30:00Z");
    assert!(json.get("published_at").is_none());

    let decoded: Recipe = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, recipe);
}

#[test]
fn new_recipe_has_generated_identity() {
    let recipe = Recipe::new(RecipeInput::named("Toast"));
    assert!(!recipe.id.is_empty());
    assert_ne!(recipe.id, Recipe::new(RecipeInput::named("Toast")).id);
}

#[test]
fn input_missing_fields_default_to_empty() {
    let input: RecipeInput = serde_json::from_str(r#"{"name": "Toast"}"#).unwrap();
    assert_eq!(input, RecipeInput::named("Toast"));
    assert!(input.validate().is_ok());

    let nameless: RecipeInput = serde_json::from_str(r#"{"tags": ["x"]}"#).unwrap();
    assert!(nameless.validate().is_err());
}
