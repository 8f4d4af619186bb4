use serde::{Deserialize, Serialize};

use crudkit_core::error::require_text;
use crudkit_core::{DomainError, DomainResult, Entity};

crudkit_core::int_id!(
    /// Drink identifier (database-assigned).
    DrinkId,
    "DrinkId"
);

/// One layer of a drink: what goes in, how it is drawn, how much of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

impl Ingredient {
    fn validated(self) -> DomainResult<Self> {
        let name = require_text("recipe.name", &self.name)?;
        let color = require_text("recipe.color", &self.color)?;
        if self.parts == 0 {
            return Err(DomainError::validation(format!(
                "recipe '{name}' must have at least one part"
            )));
        }
        Ok(Self {
            name,
            color,
            parts: self.parts,
        })
    }
}

/// Public projection of an ingredient: how it looks, not what it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientShort {
    pub color: String,
    pub parts: u32,
}

/// Recipe as clients send it: a single ingredient object or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    One(Ingredient),
    Many(Vec<Ingredient>),
}

impl RecipeInput {
    pub fn into_vec(self) -> Vec<Ingredient> {
        match self {
            RecipeInput::One(i) => vec![i],
            RecipeInput::Many(v) => v,
        }
    }
}

fn validate_recipe(recipe: Vec<Ingredient>) -> DomainResult<Vec<Ingredient>> {
    if recipe.is_empty() {
        return Err(DomainError::validation("recipe must contain at least one ingredient"));
    }
    recipe.into_iter().map(Ingredient::validated).collect()
}

/// A drink on the menu.
///
/// Serializes as the long (privileged) form; [`Drink::short`] gives the
/// public one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    pub id: DrinkId,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Public projection of a drink: title and layer colors only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkShort {
    pub id: DrinkId,
    pub title: String,
    pub recipe: Vec<IngredientShort>,
}

impl Drink {
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|i| IngredientShort {
                    color: i.color.clone(),
                    parts: i.parts,
                })
                .collect(),
        }
    }

    /// Apply a validated patch; fields the patch leaves out are untouched.
    pub fn apply(&mut self, patch: DrinkPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(recipe) = patch.recipe {
            self.recipe = recipe;
        }
    }
}

impl Entity for Drink {
    type Id = DrinkId;

    fn id(&self) -> DrinkId {
        self.id
    }
}

/// A validated drink that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrink {
    title: String,
    recipe: Vec<Ingredient>,
}

impl NewDrink {
    pub fn new(title: &str, recipe: Vec<Ingredient>) -> DomainResult<Self> {
        Ok(Self {
            title: require_text("title", title)?,
            recipe: validate_recipe(recipe)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn recipe(&self) -> &[Ingredient] {
        &self.recipe
    }

    pub fn into_drink(self, id: DrinkId) -> Drink {
        Drink {
            id,
            title: self.title,
            recipe: self.recipe,
        }
    }
}

/// Partial update: only the supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkPatch {
    title: Option<String>,
    recipe: Option<Vec<Ingredient>>,
}

impl DrinkPatch {
    pub fn new(title: Option<&str>, recipe: Option<Vec<Ingredient>>) -> DomainResult<Self> {
        Ok(Self {
            title: title.map(|t| require_text("title", t)).transpose()?,
            recipe: recipe.map(validate_recipe).transpose()?,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn recipe(&self) -> Option<&[Ingredient]> {
        self.recipe.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.recipe.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Ingredient {
        Ingredient {
            name: "water".into(),
            color: "blue".into(),
            parts: 1,
        }
    }

    fn espresso() -> Ingredient {
        Ingredient {
            name: "espresso".into(),
            color: "brown".into(),
            parts: 2,
        }
    }

    #[test]
    fn new_drink_trims_and_keeps_recipe_order() {
        let d = NewDrink::new("  Americano ", vec![espresso(), water()]).unwrap();
        assert_eq!(d.title(), "Americano");
        assert_eq!(d.recipe(), &[espresso(), water()]);
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = NewDrink::new(" ", vec![water()]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn empty_recipe_is_rejected() {
        let err = NewDrink::new("Water", vec![]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn zero_parts_is_rejected() {
        let mut bad = water();
        bad.parts = 0;
        assert!(NewDrink::new("Water", vec![bad]).is_err());
    }

    #[test]
    fn short_form_hides_ingredient_names() {
        let drink = NewDrink::new("Americano", vec![espresso(), water()])
            .unwrap()
            .into_drink(DrinkId::new(3));

        let json = serde_json::to_value(drink.short()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "title": "Americano",
                "recipe": [{"color": "brown", "parts": 2}, {"color": "blue", "parts": 1}]
            })
        );

        let long = serde_json::to_value(&drink).unwrap();
        assert_eq!(long["recipe"][0]["name"], "espresso");
    }

    #[test]
    fn patch_changes_only_supplied_fields() {
        let mut drink = NewDrink::new("Water", vec![water()])
            .unwrap()
            .into_drink(DrinkId::new(1));

        drink.apply(DrinkPatch::new(Some("Still Water"), None).unwrap());
        assert_eq!(drink.title, "Still Water");
        assert_eq!(drink.recipe, vec![water()]);

        drink.apply(DrinkPatch::new(None, Some(vec![espresso()])).unwrap());
        assert_eq!(drink.title, "Still Water");
        assert_eq!(drink.recipe, vec![espresso()]);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(DrinkPatch::new(None, None).unwrap().is_empty());
    }

    #[test]
    fn recipe_accepts_single_object_or_list() {
        let one: RecipeInput =
            serde_json::from_str(r#"{"name":"water","color":"blue","parts":1}"#).unwrap();
        assert_eq!(one.into_vec(), vec![water()]);

        let many: RecipeInput = serde_json::from_str(
            r#"[{"name":"espresso","color":"brown","parts":2},{"name":"water","color":"blue","parts":1}]"#,
        )
        .unwrap();
        assert_eq!(many.into_vec(), vec![espresso(), water()]);
    }
}
