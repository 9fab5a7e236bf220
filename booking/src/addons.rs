//! Add-on catalog feature: categories plus a per-category cache of add-ons.
//!
//! The catalog is read-only reference data owned by the reservations API;
//! the booking flow only reads selected quantities against these ids, and
//! the derived totals run over every cached add-on.

use crate::env::AppEnvironment;
use crate::types::{Addon, AddonCategory, CategoryId};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use stayflow_core::effect::{Effect, Effects};
use stayflow_core::reducer::Reducer;
use std::collections::HashMap;

/// State of the add-on catalog feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddonsState {
    /// All add-on categories.
    pub categories: Vec<AddonCategory>,
    /// Fetched add-ons, cached per category.
    pub by_category: HashMap<CategoryId, Vec<Addon>>,
    /// Category currently shown by the wizard.
    pub active_category: Option<CategoryId>,
    /// Whether a catalog request is in flight.
    pub loading: bool,
    /// Last surfaced message.
    pub error: Option<String>,
}

impl AddonsState {
    /// Every cached add-on across all categories (the totals input).
    pub fn catalog(&self) -> impl Iterator<Item = &Addon> {
        self.by_category.values().flatten()
    }

    /// Add-ons of the active category, for display.
    #[must_use]
    pub fn active_addons(&self) -> &[Addon] {
        self.active_category
            .and_then(|id| self.by_category.get(&id))
            .map_or(&[], Vec::as_slice)
    }
}

/// Actions processed by the add-on catalog reducer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AddonsAction {
    /// Fetch the category list.
    FetchCategories,
    /// Result of the category fetch; on success the first category becomes
    /// active and its add-ons are fetched, matching how the wizard opens.
    CategoriesLoaded(Result<Vec<AddonCategory>, String>),
    /// Show a category, fetching its add-ons unless already cached.
    SelectCategory(CategoryId),
    /// Result of an add-on fetch for one category.
    AddonsLoaded {
        /// The category the add-ons belong to.
        category_id: CategoryId,
        /// The fetched add-ons or the failure message.
        result: Result<Vec<Addon>, String>,
    },
    /// Drop the cached add-ons and selection.
    Clear,
}

/// Reducer for the add-on catalog feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddonsReducer;

impl AddonsReducer {
    /// Create a new add-on catalog reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn fetch_addons(
        state: &mut AddonsState,
        category_id: CategoryId,
        env: &AppEnvironment,
    ) -> Effects<AddonsAction> {
        if state.by_category.contains_key(&category_id) {
            // Cache hit; nothing to fetch.
            return smallvec![Effect::None];
        }
        state.loading = true;
        state.error = None;
        let api = env.api();
        smallvec![Effect::future(async move {
            let result = api
                .addons_by_category(category_id)
                .await
                .map_err(|e| e.to_string());
            Some(AddonsAction::AddonsLoaded {
                category_id,
                result,
            })
        })]
    }
}

impl Reducer for AddonsReducer {
    type State = AddonsState;
    type Action = AddonsAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            AddonsAction::FetchCategories => {
                state.loading = true;
                state.error = None;
                let api = env.api();
                smallvec![Effect::future(async move {
                    let result = api.addon_categories().await.map_err(|e| e.to_string());
                    Some(AddonsAction::CategoriesLoaded(result))
                })]
            },

            AddonsAction::CategoriesLoaded(Ok(categories)) => {
                state.loading = false;
                state.categories = categories;
                if state.active_category.is_none() {
                    if let Some(first) = state.categories.first() {
                        let category_id = first.category_id;
                        state.active_category = Some(category_id);
                        return Self::fetch_addons(state, category_id, env);
                    }
                }
                smallvec![Effect::None]
            },

            AddonsAction::CategoriesLoaded(Err(message)) => {
                tracing::warn!(%message, "failed to load add-on categories");
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            },

            AddonsAction::SelectCategory(category_id) => {
                if state.active_category == Some(category_id) {
                    return smallvec![Effect::None];
                }
                state.active_category = Some(category_id);
                Self::fetch_addons(state, category_id, env)
            },

            AddonsAction::AddonsLoaded {
                category_id,
                result: Ok(addons),
            } => {
                state.loading = false;
                state.by_category.insert(category_id, addons);
                smallvec![Effect::None]
            },

            AddonsAction::AddonsLoaded {
                result: Err(message),
                ..
            } => {
                tracing::warn!(%message, "failed to load add-ons");
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            },

            AddonsAction::Clear => {
                state.by_category.clear();
                state.active_category = None;
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::api::mock::MockHotelApi;
    use crate::types::AddonId;
    use stayflow_core::effect::Effect;
    use stayflow_testing::test_clock;
    use std::sync::Arc;

    fn test_env() -> AppEnvironment {
        AppEnvironment::new(Arc::new(test_clock()), Arc::new(MockHotelApi::new()))
    }

    fn category(id: i64, name: &str) -> AddonCategory {
        AddonCategory {
            category_id: CategoryId::new(id),
            name: name.to_string(),
        }
    }

    fn addon(id: i64, category: i64, price: f64) -> Addon {
        Addon {
            addon_id: AddonId::new(id),
            category_id: CategoryId::new(category),
            name: format!("addon-{id}"),
            description: String::new(),
            price,
            unit_name: "per stay".to_string(),
        }
    }

    fn dispatch(state: &mut AddonsState, action: AddonsAction) -> Effects<AddonsAction> {
        AddonsReducer::new().reduce(state, action, &test_env())
    }

    #[test]
    fn loading_categories_auto_selects_the_first() {
        let mut state = AddonsState::default();

        let effects = dispatch(
            &mut state,
            AddonsAction::CategoriesLoaded(Ok(vec![category(1, "Spa"), category(2, "Dining")])),
        );

        assert_eq!(state.active_category, Some(CategoryId::new(1)));
        // The first category's add-ons are fetched right away.
        assert!(effects.iter().any(|e| matches!(e, Effect::Future(_))));
    }

    #[test]
    fn selecting_a_cached_category_skips_the_network() {
        let mut state = AddonsState::default();
        state
            .by_category
            .insert(CategoryId::new(2), vec![addon(9, 2, 500.0)]);

        let effects = dispatch(&mut state, AddonsAction::SelectCategory(CategoryId::new(2)));

        assert_eq!(state.active_category, Some(CategoryId::new(2)));
        assert!(!state.loading);
        assert!(effects.iter().all(|e| matches!(e, Effect::None)));
    }

    #[test]
    fn reselecting_the_active_category_is_a_no_op() {
        let mut state = AddonsState {
            active_category: Some(CategoryId::new(1)),
            ..AddonsState::default()
        };

        let effects = dispatch(&mut state, AddonsAction::SelectCategory(CategoryId::new(1)));

        assert!(effects.iter().all(|e| matches!(e, Effect::None)));
    }

    #[test]
    fn the_catalog_spans_every_cached_category() {
        let mut state = AddonsState::default();
        dispatch(
            &mut state,
            AddonsAction::AddonsLoaded {
                category_id: CategoryId::new(1),
                result: Ok(vec![addon(9, 1, 500.0)]),
            },
        );
        dispatch(
            &mut state,
            AddonsAction::AddonsLoaded {
                category_id: CategoryId::new(2),
                result: Ok(vec![addon(12, 2, 900.0), addon(13, 2, 250.0)]),
            },
        );

        assert_eq!(state.catalog().count(), 3);
    }

    #[test]
    fn failures_surface_the_message_verbatim() {
        let mut state = AddonsState::default();

        dispatch(
            &mut state,
            AddonsAction::CategoriesLoaded(Err("catalog unavailable".to_string())),
        );

        assert_eq!(state.error.as_deref(), Some("catalog unavailable"));
        assert!(!state.loading);
    }
}
