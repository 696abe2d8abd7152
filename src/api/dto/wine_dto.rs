//! Cellar DTOs: list filters, list response and form payloads.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{FormMeta, PaginationMeta};
use crate::domain::{CategoryCounts, FormBinding, Wine, WineCategory, WineDraft};

/// Query parameters for `GET /wines`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WineFilterParams {
    /// `all` (default) or one of `tried`, `wishlist`, `favorite`.
    #[serde(default)]
    pub category: Option<String>,
    /// Case-insensitive search over name, region, tasting notes and pairings.
    #[serde(default)]
    pub q: Option<String>,
}

/// Paginated cellar listing for `GET /wines`.
#[derive(Debug, Serialize, ToSchema)]
pub struct WineListResponse {
    /// Wines on the requested page, in cellar order.
    pub data: Vec<Wine>,
    /// Per-category totals over the whole cellar, for the filter tabs.
    pub counts: CategoryCounts,
    /// Pagination metadata over the filtered result.
    pub pagination: PaginationMeta,
    /// Empty-state text, present only when the filtered result is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Create/edit form state for a wine.
#[derive(Debug, Serialize, ToSchema)]
pub struct WineFormResponse {
    /// Mode, bound record and submit label.
    #[serde(flatten)]
    pub form: FormMeta,
    /// Field values to prefill.
    pub draft: WineDraft,
}

impl From<FormBinding<WineDraft>> for WineFormResponse {
    fn from(binding: FormBinding<WineDraft>) -> Self {
        let form = FormMeta::new(binding.mode(), binding.submit_label("Wine"));
        Self {
            form,
            draft: binding.draft().clone(),
        }
    }
}

/// One entry of `GET /config/wine-categories`.
#[derive(Debug, Serialize, ToSchema)]
pub struct WineCategoryInfo {
    /// Wire value used in queries and bodies.
    pub category: WineCategory,
    /// Display label.
    pub label: &'static str,
}

impl From<WineCategory> for WineCategoryInfo {
    fn from(category: WineCategory) -> Self {
        Self {
            category,
            label: category.label(),
        }
    }
}
