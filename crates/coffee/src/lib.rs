//! `crudkit-coffee` — the coffee-shop menu: drinks and their recipes.

pub mod drink;

pub use drink::{Drink, DrinkId, DrinkPatch, DrinkShort, Ingredient, IngredientShort, NewDrink, RecipeInput};
