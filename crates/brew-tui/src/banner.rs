//! Status banner model and the debug stats dump.

use brew_proto::protocol::{IngredientCategory, IngredientStats, UiStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Initializing,
    Ready,
    NoIngredients,
}

impl BannerKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Initializing => "Initializing",
            Self::Ready => "Ingredients ready",
            Self::NoIngredients => "No ingredients",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub visible: bool,
}

/// Computed every render pass; `visible` decides whether it is drawn.
pub fn compute_banner(status: &UiStatus, debug: bool) -> Banner {
    let (kind, message) = if let Some(err) = &status.error {
        (BannerKind::Error, err.value.clone())
    } else if let Some(msg) = &status.initialization_message {
        (BannerKind::Initializing, msg.clone())
    } else if status.has_ingredients {
        (
            BannerKind::Ready,
            format!("{} ingredients available", status.ingredient_count),
        )
    } else {
        (
            BannerKind::NoIngredients,
            "Add ingredients to your catalog, then press r to refresh".to_string(),
        )
    };

    let visible = status.initialization_message.is_some() || !status.has_ingredients || debug;
    Banner {
        kind,
        message,
        visible,
    }
}

/// Fixed-format dump shown in the debug panel.
pub fn debug_lines(stats: &IngredientStats) -> Vec<String> {
    let mut lines = Vec::with_capacity(IngredientCategory::ALL.len() + 3);
    lines.push("Ingredient stats".to_string());
    lines.push(format!("  Total: {}", stats.total));
    for category in IngredientCategory::ALL {
        lines.push(format!("  {}: {}", category.label(), stats.count(category)));
    }
    let avg = stats
        .average_cost
        .map(|c| format!("{:.2}", c))
        .unwrap_or_else(|| "N/A".to_string());
    lines.push(format!("  Average cost: {}", avg));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_proto::protocol::Signal;

    fn ready() -> UiStatus {
        UiStatus {
            has_ingredients: true,
            ingredient_count: 7,
            ..UiStatus::default()
        }
    }

    #[test]
    fn priority_error_then_init_then_ingredients() {
        let mut status = ready();
        status.initialization_message = Some("Loading".into());
        status.error = Some(Signal {
            seq: 1,
            value: "disk full".into(),
        });
        assert_eq!(compute_banner(&status, false).kind, BannerKind::Error);

        status.error = None;
        assert_eq!(compute_banner(&status, false).kind, BannerKind::Initializing);

        status.initialization_message = None;
        let banner = compute_banner(&status, false);
        assert_eq!(banner.kind, BannerKind::Ready);
        assert_eq!(banner.message, "7 ingredients available");

        assert_eq!(
            compute_banner(&UiStatus::default(), false).kind,
            BannerKind::NoIngredients
        );
    }

    #[test]
    fn visibility_rules() {
        assert!(!compute_banner(&ready(), false).visible);
        assert!(compute_banner(&ready(), true).visible);
        assert!(compute_banner(&UiStatus::default(), false).visible);

        let mut initializing = ready();
        initializing.initialization_message = Some("Loading".into());
        assert!(compute_banner(&initializing, false).visible);
    }

    #[test]
    fn debug_dump_format() {
        let mut stats = IngredientStats {
            total: 3,
            ..IngredientStats::default()
        };
        stats.by_category.insert(IngredientCategory::Honey, 2);
        stats.by_category.insert(IngredientCategory::Yeast, 1);

        let lines = debug_lines(&stats);
        assert_eq!(lines[0], "Ingredient stats");
        assert_eq!(lines[1], "  Total: 3");
        assert_eq!(lines[2], "  Honey: 2");
        assert!(lines.contains(&"  Yeast: 1".to_string()));
        assert!(lines.contains(&"  Spice: 0".to_string()));
        assert_eq!(lines.last().unwrap(), "  Average cost: N/A");

        stats.average_cost = Some(4.0 / 3.0);
        assert_eq!(debug_lines(&stats).last().unwrap(), "  Average cost: 1.33");
    }
}
