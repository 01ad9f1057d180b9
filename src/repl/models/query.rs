//! # Query Model
//!
//! Filter criteria and page queries sent to the list endpoint.

use crate::config::{ACTOR_FILTER_MIN_LEN, TITLE_FILTER_MIN_LEN};

/// Sort key accepted by the list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Id,
    #[default]
    Title,
    Year,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Title => "title",
            SortKey::Year => "year",
        }
    }
}

/// Sort direction accepted by the list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Active list filters
///
/// `None` means the field places no constraint on the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub title: Option<String>,
    pub actor: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from raw input values
    ///
    /// Values are trimmed; a value shorter than its field's minimum clears
    /// that filter.
    pub fn from_inputs(title: &str, actor: &str) -> Self {
        Self {
            title: Self::accept(title, TITLE_FILTER_MIN_LEN),
            actor: Self::accept(actor, ACTOR_FILTER_MIN_LEN),
        }
    }

    fn accept(value: &str, min_len: usize) -> Option<String> {
        let trimmed = value.trim();
        (trimmed.chars().count() >= min_len).then(|| trimmed.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.actor.is_none()
    }
}

/// Query for one page of the movie list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub filters: FilterCriteria,
    pub search: Option<String>,
    pub sort: SortKey,
    pub order: SortOrder,
    pub limit: u32,
    pub offset: u32,
}

impl MovieQuery {
    /// Title-ascending query for a 1-based page number
    pub fn for_page(page: u32, page_size: u32, filters: FilterCriteria) -> Self {
        let page = page.max(1);
        Self {
            filters,
            search: None,
            sort: SortKey::Title,
            order: SortOrder::Ascending,
            limit: page_size,
            offset: (page - 1) * page_size,
        }
    }

    /// Query string pairs in the order the API documents them
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(actor) = &self.filters.actor {
            params.push(("actor", actor.clone()));
        }
        if let Some(title) = &self.filters.title {
            params.push(("title", title.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params.push(("sort", self.sort.as_str().to_string()));
        params.push(("order", self.order.as_str().to_string()));
        params.push(("limit", self.limit.to_string()));
        params.push(("offset", self.offset.to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_should_apply_minimum_lengths() {
        let criteria = FilterCriteria::from_inputs("Go", "A");
        assert!(criteria.is_empty());

        let criteria = FilterCriteria::from_inputs("Gol", "Al");
        assert_eq!(criteria.title.as_deref(), Some("Gol"));
        assert_eq!(criteria.actor.as_deref(), Some("Al"));
    }

    #[test]
    fn criteria_should_trim_before_measuring() {
        let criteria = FilterCriteria::from_inputs("  ab  ", "  Tom ");
        assert_eq!(criteria.title, None);
        assert_eq!(criteria.actor.as_deref(), Some("Tom"));
    }

    #[test]
    fn criteria_should_count_characters_not_bytes() {
        let criteria = FilterCriteria::from_inputs("Жах", "Я");
        assert_eq!(criteria.title.as_deref(), Some("Жах"));
        assert_eq!(criteria.actor, None);
    }

    #[test]
    fn query_offset_should_follow_page_number() {
        assert_eq!(MovieQuery::for_page(1, 9, FilterCriteria::default()).offset, 0);
        assert_eq!(MovieQuery::for_page(3, 9, FilterCriteria::default()).offset, 18);
        assert_eq!(MovieQuery::for_page(0, 9, FilterCriteria::default()).offset, 0);
    }

    #[test]
    fn query_params_should_include_filters_and_sorting() {
        let filters = FilterCriteria {
            title: Some("Casa".into()),
            actor: Some("Bo".into()),
        };
        let params = MovieQuery::for_page(2, 9, filters).to_params();

        assert_eq!(
            params,
            vec![
                ("actor", "Bo".to_string()),
                ("title", "Casa".to_string()),
                ("sort", "title".to_string()),
                ("order", "ASC".to_string()),
                ("limit", "9".to_string()),
                ("offset", "9".to_string()),
            ]
        );
    }
}
