use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crudkit_core::Entity;

crudkit_core::int_id!(
    /// Category identifier. `0` is reserved for "all categories" in quiz play.
    CategoryId,
    "CategoryId"
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.id
    }
}

/// `{id: type}` lookup, ordered by id (how clients render the sidebar).
pub fn category_map(categories: &[Category]) -> BTreeMap<CategoryId, String> {
    categories.iter().map(|c| (c.id, c.kind.clone())).collect()
}
