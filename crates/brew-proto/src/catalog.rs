//! Catalog file loader.
//!
//! The catalog is a TOML file with `[[recipe]]` and `[[ingredient]]` tables.
//! A missing file is a valid, empty catalog: that is what a brand new user has.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::protocol::{BeverageType, Ingredient, IngredientCategory, RecipeSummary};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub recipes: Vec<RecipeSummary>,
    pub ingredients: Vec<Ingredient>,
}

/// Intermediate structs that match the TOML tables. Kept apart from the
/// protocol types so the file schema can evolve on its own.
#[derive(Debug, serde::Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    recipe: Vec<TomlRecipe>,
    #[serde(default)]
    ingredient: Vec<TomlIngredient>,
}

#[derive(Debug, serde::Deserialize)]
struct TomlRecipe {
    id: String,
    name: String,
    beverage_type: BeverageType,
    #[serde(default)]
    description: String,
    #[serde(default)]
    batch_size_liters: Option<f64>,
    #[serde(default)]
    favorite: bool,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, serde::Deserialize)]
struct TomlIngredient {
    name: String,
    #[serde(default = "default_category")]
    category: IngredientCategory,
    #[serde(default)]
    cost: Option<f64>,
}

fn default_category() -> IngredientCategory {
    IngredientCategory::Other
}

/// Read and parse the catalog at `path`.
pub async fn load_catalog(path: &Path) -> StoreResult<Catalog> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => parse_catalog_str(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("catalog {} missing, starting empty", path.display());
            Ok(Catalog::default())
        }
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn parse_catalog_str(content: &str) -> StoreResult<Catalog> {
    let file: TomlCatalogFile = toml::from_str(content)?;

    let mut seen = HashSet::new();
    let mut recipes = Vec::with_capacity(file.recipe.len());
    for r in file.recipe {
        if !seen.insert(r.id.clone()) {
            return Err(StoreError::DuplicateId(r.id));
        }
        recipes.push(RecipeSummary {
            id: r.id,
            name: r.name,
            beverage_type: r.beverage_type,
            description: r.description,
            batch_size_liters: r.batch_size_liters,
            favorite: r.favorite,
            updated_at: r.updated_at,
        });
    }

    let ingredients = file
        .ingredient
        .into_iter()
        .map(|i| Ingredient {
            name: i.name,
            category: i.category,
            cost: i.cost,
        })
        .collect();

    Ok(Catalog {
        recipes,
        ingredients,
    })
}
