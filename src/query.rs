//! Derives the effective search term from the `search` location parameter and
//! the featured category list.

use crate::types::FeaturedCategory;

use thiserror::Error;

/// Genre keywords offered by the navbar. Landing on one of these restarts
/// pagination.
pub const GENRE_KEYWORDS: [&str; 8] = [
    "action",
    "comedy",
    "drama",
    "sci-fi",
    "horror",
    "animation",
    "adventure",
    "fantasy",
];

const GENRE_TITLES: [(&str, &str); 10] = [
    ("action", "Action movies"),
    ("comedy", "Comedies"),
    ("drama", "Dramas"),
    ("sci-fi", "Science fiction"),
    ("horror", "Horror movies"),
    ("animation", "Animated movies"),
    ("adventure", "Adventure movies"),
    ("fantasy", "Fantasy movies"),
    ("trending", "Trending movies"),
    ("new", "New movies"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no featured categories configured")]
    NoCategories,
    #[error("featured category {0} has an empty search term")]
    EmptyCategoryTerm(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub term: String,
    pub active_category: usize,
    pub reset_page: bool,
}

pub fn is_genre_keyword(term: &str) -> bool {
    GENRE_KEYWORDS
        .iter()
        .any(|genre| genre.eq_ignore_ascii_case(term))
}

/// Normalizes a submitted search box value. Whitespace-only input is ignored.
pub fn normalize_search(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

pub fn resolve(
    search: Option<&str>,
    categories: &[FeaturedCategory],
    active_category: usize,
) -> Result<Resolution, ResolveError> {
    if categories.is_empty() {
        return Err(ResolveError::NoCategories);
    }

    let active_category = if active_category < categories.len() {
        active_category
    } else {
        0
    };

    let term = match search.and_then(normalize_search) {
        Some(term) => term.to_string(),
        None => {
            let fallback = categories[active_category].term.trim();
            if fallback.is_empty() {
                return Err(ResolveError::EmptyCategoryTerm(active_category));
            }
            fallback.to_string()
        }
    };

    let active_category = categories
        .iter()
        .position(|c| c.term == term)
        .unwrap_or(active_category);

    Ok(Resolution {
        reset_page: is_genre_keyword(&term),
        term,
        active_category,
    })
}

/// Heading shown above the result grid for a term
pub fn page_title(term: &str, categories: &[FeaturedCategory]) -> String {
    if let Some(category) = categories.iter().find(|c| c.term == term) {
        return category.title.clone();
    }

    let lowered = term.to_lowercase();
    if let Some((_, title)) = GENRE_TITLES.iter().find(|(genre, _)| *genre == lowered) {
        return title.to_string();
    }

    format!("Results for: {term}")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::default_featured_categories;

    #[test]
    fn test_search_param_wins() {
        let categories = default_featured_categories();
        let res = resolve(Some("  matrix "), &categories, 2).unwrap();
        assert_eq!(res.term, "matrix");
        assert_eq!(res.active_category, 2);
        assert!(!res.reset_page);
    }

    #[test]
    fn test_falls_back_to_active_category() {
        let categories = default_featured_categories();
        assert_eq!(resolve(None, &categories, 0).unwrap().term, "avengers");
        assert_eq!(resolve(Some(""), &categories, 3).unwrap().term, "pixar");
        assert_eq!(resolve(Some("   "), &categories, 1).unwrap().term, "stranger");
    }

    #[test]
    fn test_category_term_updates_active_category() {
        let categories = default_featured_categories();
        let res = resolve(Some("star wars"), &categories, 0).unwrap();
        assert_eq!(res.active_category, 2);

        // Exact match only
        let res = resolve(Some("Star Wars"), &categories, 0).unwrap();
        assert_eq!(res.active_category, 0);
    }

    #[test]
    fn test_genre_resets_page() {
        let categories = default_featured_categories();
        for genre in GENRE_KEYWORDS {
            assert!(resolve(Some(genre), &categories, 0).unwrap().reset_page);
        }
        assert!(resolve(Some("HORROR"), &categories, 0).unwrap().reset_page);
        assert!(!resolve(Some("horrors"), &categories, 0).unwrap().reset_page);
        assert!(!resolve(Some("trending"), &categories, 0).unwrap().reset_page);
    }

    #[test]
    fn test_invalid_categories() {
        assert_eq!(resolve(None, &[], 0), Err(ResolveError::NoCategories));

        let categories = vec![FeaturedCategory::new("Empty", " ")];
        assert_eq!(
            resolve(None, &categories, 0),
            Err(ResolveError::EmptyCategoryTerm(0))
        );
        // An explicit search still works
        assert_eq!(resolve(Some("dune"), &categories, 0).unwrap().term, "dune");
    }

    #[test]
    fn test_out_of_range_active_category() {
        let categories = default_featured_categories();
        let res = resolve(None, &categories, 42).unwrap();
        assert_eq!(res.term, "avengers");
        assert_eq!(res.active_category, 0);
    }

    #[test]
    fn test_page_title() {
        let categories = default_featured_categories();
        assert_eq!(page_title("stranger", &categories), "Series to discover");
        assert_eq!(page_title("Horror", &categories), "Horror movies");
        assert_eq!(page_title("trending", &categories), "Trending movies");
        assert_eq!(page_title("dune", &categories), "Results for: dune");
    }
}
