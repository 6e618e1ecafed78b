//! Pending-intent tracking for favorite toggles.
//!
//! When the user toggles a favorite we forward the command to the store and
//! wait for a snapshot that confirms it. During that window the star renders
//! as pending instead of flipping early.
//!
//! # States
//! ```text
//!  Confirmed(T)          -> store confirmed; render normally
//!  Pending { ... }       -> command sent, no confirmation yet; render pulsing
//!  TimedOut { ... }      -> waited too long; render with warning colour + "?"
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

use brew_proto::protocol::StoreSnapshot;

/// Timeout before a pending intent becomes `TimedOut`.
pub const INTENT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Three-state wrapper for a value that may be waiting for confirmation.
#[derive(Debug, Clone)]
pub enum IntentState<T: Clone + PartialEq> {
    Confirmed(T),
    Pending {
        intended: T,
        confirmed: T,
        since: Instant,
    },
    TimedOut { intended: T, confirmed: T },
}

impl<T: Clone + PartialEq> IntentState<T> {
    pub fn new(value: T) -> Self {
        Self::Confirmed(value)
    }

    pub fn intended(&self) -> &T {
        match self {
            Self::Confirmed(v) => v,
            Self::Pending { intended, .. } => intended,
            Self::TimedOut { intended, .. } => intended,
        }
    }

    pub fn confirmed(&self) -> &T {
        match self {
            Self::Confirmed(v) => v,
            Self::Pending { confirmed, .. } => confirmed,
            Self::TimedOut { confirmed, .. } => confirmed,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    /// Register a user intent. Transitions to `Pending` unless `intended`
    /// already equals the confirmed value.
    pub fn set_intent(&mut self, intended: T) {
        let confirmed = self.confirmed().clone();
        if intended == confirmed {
            *self = Self::Confirmed(intended);
        } else {
            *self = Self::Pending {
                intended,
                confirmed,
                since: Instant::now(),
            };
        }
    }

    /// Called every tick to check for timeout. Returns `true` if state changed.
    pub fn tick(&mut self) -> bool {
        if let Self::Pending {
            intended,
            confirmed,
            since,
        } = self
        {
            if since.elapsed() >= INTENT_TIMEOUT {
                *self = Self::TimedOut {
                    intended: intended.clone(),
                    confirmed: confirmed.clone(),
                };
                return true;
            }
        }
        false
    }

    /// Called when the store reports a value. Returns `true` if state changed.
    pub fn on_confirmed(&mut self, value: T) -> bool {
        match self {
            Self::Pending { intended, .. } => {
                if value == *intended {
                    *self = Self::Confirmed(value);
                    return true;
                }
                if let Self::Pending { confirmed, .. } = self {
                    *confirmed = value;
                }
                false
            }
            Self::TimedOut { intended, .. } => {
                let matches = value == *intended;
                *self = Self::Confirmed(value);
                matches
            }
            Self::Confirmed(v) => {
                if *v != value {
                    *self = Self::Confirmed(value);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn render_state(&self) -> RenderHint {
        match self {
            Self::Confirmed(_) => RenderHint::Normal,
            Self::Pending { since, .. } => {
                // Pulse on/off every 400ms
                if (since.elapsed().as_millis() / 400) % 2 == 0 {
                    RenderHint::PendingVisible
                } else {
                    RenderHint::PendingHidden
                }
            }
            Self::TimedOut { .. } => RenderHint::TimedOut,
        }
    }
}

/// How to render a value that may be pending confirmation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderHint {
    Normal,
    PendingVisible,
    PendingHidden,
    TimedOut,
}

/// Per-recipe favorite intents. Entries are dropped once confirmed.
#[derive(Debug, Default)]
pub struct FavoriteIntents {
    by_id: HashMap<String, IntentState<bool>>,
}

impl FavoriteIntents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the user asked to flip `id` away from `current`.
    pub fn toggled(&mut self, id: &str, current: bool) {
        let entry = self
            .by_id
            .entry(id.to_string())
            .or_insert_with(|| IntentState::new(current));
        let target = !*entry.intended();
        entry.set_intent(target);
    }

    /// Feed a new snapshot; confirmed entries are removed.
    pub fn on_snapshot(&mut self, snapshot: &StoreSnapshot) {
        self.by_id.retain(|id, intent| {
            // Recipes filtered out of the snapshot cannot confirm; drop them.
            let Some(recipe) = snapshot.recipe(id) else {
                return false;
            };
            intent.on_confirmed(recipe.favorite);
            !intent.is_confirmed()
        });
    }

    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        for intent in self.by_id.values_mut() {
            changed |= intent.tick();
        }
        changed || !self.by_id.is_empty()
    }

    pub fn hint(&self, id: &str) -> RenderHint {
        self.by_id
            .get(id)
            .map_or(RenderHint::Normal, |i| i.render_state())
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_proto::protocol::{BeverageType, RecipeSummary};

    fn snapshot_with(id: &str, favorite: bool) -> StoreSnapshot {
        StoreSnapshot {
            recipes: vec![RecipeSummary {
                id: id.to_string(),
                name: id.to_string(),
                beverage_type: BeverageType::Beer,
                description: String::new(),
                batch_size_liters: None,
                favorite,
                updated_at: None,
            }],
            ..StoreSnapshot::default()
        }
    }

    #[test]
    fn intent_confirms_on_matching_value() {
        let mut s = IntentState::new(false);
        s.set_intent(true);
        assert!(s.is_pending());
        assert!(!s.on_confirmed(false));
        assert!(s.is_pending());
        assert!(s.on_confirmed(true));
        assert!(s.is_confirmed());
    }

    #[test]
    fn favorite_pending_until_snapshot_confirms() {
        let mut intents = FavoriteIntents::new();
        intents.toggled("ipa", false);
        assert_ne!(intents.hint("ipa"), RenderHint::Normal);

        intents.on_snapshot(&snapshot_with("ipa", false));
        assert!(!intents.is_empty());

        intents.on_snapshot(&snapshot_with("ipa", true));
        assert!(intents.is_empty());
        assert_eq!(intents.hint("ipa"), RenderHint::Normal);
    }

    #[test]
    fn double_toggle_returns_to_confirmed() {
        let mut intents = FavoriteIntents::new();
        intents.toggled("ipa", false);
        intents.toggled("ipa", false);
        intents.on_snapshot(&snapshot_with("ipa", false));
        assert!(intents.is_empty());
    }
}
