//! Pure projections the store applies when building a snapshot.

use std::cmp::Ordering;

use crate::protocol::{
    BeverageType, Ingredient, IngredientStats, RecipeStats, RecipeSummary,
};

/// Filter `recipes` by query, category and favorites, ordered favorites
/// first, then most recently updated, then by name.
pub fn filter_recipes(
    recipes: &[RecipeSummary],
    query: &str,
    category: Option<BeverageType>,
    favorites_only: bool,
) -> Vec<RecipeSummary> {
    let terms: Vec<String> = query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();

    let mut out: Vec<RecipeSummary> = recipes
        .iter()
        .filter(|r| category.map_or(true, |c| r.beverage_type == c))
        .filter(|r| !favorites_only || r.favorite)
        .filter(|r| recipe_matches(r, &terms))
        .cloned()
        .collect();
    out.sort_by(list_order);
    out
}

fn recipe_matches(recipe: &RecipeSummary, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }
    let text = format!(
        "{} {} {}",
        recipe.name.to_lowercase(),
        recipe.description.to_lowercase(),
        recipe.beverage_type.label().to_lowercase()
    );
    terms.iter().all(|term| text.contains(term.as_str()))
}

fn list_order(a: &RecipeSummary, b: &RecipeSummary) -> Ordering {
    b.favorite
        .cmp(&a.favorite)
        .then(b.updated_at.cmp(&a.updated_at))
        .then(a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// Most recently updated recipes, newest first. Recipes without a timestamp
/// never count as recent.
pub fn recent_recipes(recipes: &[RecipeSummary], limit: usize) -> Vec<RecipeSummary> {
    let mut dated: Vec<&RecipeSummary> = recipes.iter().filter(|r| r.updated_at.is_some()).collect();
    dated.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then(a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    dated.into_iter().take(limit).cloned().collect()
}

pub fn recipe_stats(recipes: &[RecipeSummary]) -> RecipeStats {
    let mut stats = RecipeStats {
        total: recipes.len(),
        ..RecipeStats::default()
    };
    for r in recipes {
        if r.favorite {
            stats.favorites += 1;
        }
        *stats.by_type.entry(r.beverage_type).or_insert(0) += 1;
    }
    stats
}

pub fn ingredient_stats(ingredients: &[Ingredient]) -> IngredientStats {
    let mut stats = IngredientStats {
        total: ingredients.len(),
        ..IngredientStats::default()
    };
    let mut cost_sum = 0.0;
    let mut cost_n = 0usize;
    for i in ingredients {
        *stats.by_category.entry(i.category).or_insert(0) += 1;
        if let Some(c) = i.cost {
            cost_sum += c;
            cost_n += 1;
        }
    }
    if cost_n > 0 {
        stats.average_cost = Some(cost_sum / cost_n as f64);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::IngredientCategory;
    use chrono::{TimeZone, Utc};

    fn recipe(id: &str, ty: BeverageType, favorite: bool, day: Option<u32>) -> RecipeSummary {
        RecipeSummary {
            id: id.to_string(),
            name: id.to_string(),
            beverage_type: ty,
            description: String::new(),
            batch_size_liters: None,
            favorite,
            updated_at: day.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()),
        }
    }

    fn ids(list: &[RecipeSummary]) -> Vec<&str> {
        list.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn query_terms_must_all_match() {
        let mut a = recipe("Spiced Mead", BeverageType::Mead, false, None);
        a.description = "cinnamon and clove".into();
        let b = recipe("Plain Mead", BeverageType::Mead, false, None);
        let list = [a, b];

        assert_eq!(ids(&filter_recipes(&list, "mead CLOVE", None, false)), ["Spiced Mead"]);
        assert_eq!(filter_recipes(&list, "mead", None, false).len(), 2);
        assert!(filter_recipes(&list, "stout", None, false).is_empty());
    }

    #[test]
    fn category_and_favorites_narrow() {
        let list = [
            recipe("a", BeverageType::Beer, true, None),
            recipe("b", BeverageType::Beer, false, None),
            recipe("c", BeverageType::Wine, true, None),
        ];
        assert_eq!(ids(&filter_recipes(&list, "", Some(BeverageType::Beer), false)), ["a", "b"]);
        assert_eq!(ids(&filter_recipes(&list, "", Some(BeverageType::Beer), true)), ["a"]);
        assert_eq!(ids(&filter_recipes(&list, "", None, true)), ["a", "c"]);
    }

    #[test]
    fn favorites_sort_first_then_newest() {
        let list = [
            recipe("old", BeverageType::Beer, false, Some(1)),
            recipe("new", BeverageType::Beer, false, Some(9)),
            recipe("fav", BeverageType::Beer, true, Some(2)),
        ];
        assert_eq!(ids(&filter_recipes(&list, "", None, false)), ["fav", "new", "old"]);
    }

    #[test]
    fn recent_skips_undated_and_caps() {
        let list = [
            recipe("a", BeverageType::Beer, false, Some(1)),
            recipe("b", BeverageType::Beer, false, None),
            recipe("c", BeverageType::Beer, false, Some(3)),
            recipe("d", BeverageType::Beer, false, Some(2)),
        ];
        assert_eq!(ids(&recent_recipes(&list, 2)), ["c", "d"]);
        assert_eq!(recent_recipes(&list, 10).len(), 3);
    }

    #[test]
    fn ingredient_average_ignores_missing_costs() {
        let ingredients = [
            Ingredient { name: "honey".into(), category: IngredientCategory::Honey, cost: Some(10.0) },
            Ingredient { name: "more honey".into(), category: IngredientCategory::Honey, cost: Some(5.0) },
            Ingredient { name: "yeast".into(), category: IngredientCategory::Yeast, cost: None },
        ];
        let stats = ingredient_stats(&ingredients);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.count(IngredientCategory::Honey), 2);
        assert_eq!(stats.count(IngredientCategory::Spice), 0);
        assert_eq!(stats.average_cost, Some(7.5));

        assert_eq!(ingredient_stats(&[]).average_cost, None);
    }

    #[test]
    fn recipe_stats_count_types() {
        let list = [
            recipe("a", BeverageType::Mead, true, None),
            recipe("b", BeverageType::Mead, false, None),
            recipe("c", BeverageType::Cider, false, None),
        ];
        let stats = recipe_stats(&list);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.favorites, 1);
        assert_eq!(stats.by_type.get(&BeverageType::Mead), Some(&2));
    }
}
