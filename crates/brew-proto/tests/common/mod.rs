//! Catalog fixtures shared by the store integration tests.

use std::path::Path;

use brew_proto::config::StoreConfig;
use brew_proto::state::RecipeStore;

pub const CATALOG: &str = r#"
[[recipe]]
id = "traditional-mead"
name = "Traditional Mead"
beverage_type = "mead"
description = "Orange blossom honey and water"
updated_at = "2024-03-04T09:00:00Z"

[[recipe]]
id = "cyser"
name = "Cyser"
beverage_type = "mead"
description = "Apple juice mead"
favorite = true
updated_at = "2024-03-02T09:00:00Z"

[[recipe]]
id = "pale-ale"
name = "Pale Ale"
beverage_type = "beer"
updated_at = "2024-03-03T09:00:00Z"

[[recipe]]
id = "country-wine"
name = "Blackberry Country Wine"
beverage_type = "wine"

[[ingredient]]
name = "Orange blossom honey"
category = "honey"
cost = 20.0

[[ingredient]]
name = "EC-1118"
category = "yeast"
cost = 2.5

[[ingredient]]
name = "Fermaid O"
category = "nutrient"
"#;

pub fn write_catalog(dir: &Path, content: &str) {
    std::fs::write(dir.join("catalog.toml"), content).expect("write catalog fixture");
}

pub fn store_in(dir: &Path) -> RecipeStore {
    RecipeStore::new(&StoreConfig {
        catalog_file: dir.join("catalog.toml"),
        state_file: dir.join("state").join("state.json"),
        recent_limit: 5,
    })
}

/// Run a full load the way the store loop does it.
pub async fn load(store: &RecipeStore) {
    store.set_loading(None).await;
    let result = store.read_catalog().await;
    store.apply_catalog(result).await;
}
