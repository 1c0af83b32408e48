//! Sort/rank stage
//!
//! Every ordering uses `sort_by`, which is stable, so records with equal
//! keys keep their source order.

use crate::catalog::Record;
use crate::query::{Hit, SortKey};
use std::cmp::Ordering;
use tracing::debug;

/// Order hits by the requested key
///
/// Returns the ordered hits together with the key that was actually
/// applied. A `distance` request without a user location degrades to
/// `default` ordering.
pub fn rank<'a, R: Record>(
    mut hits: Vec<Hit<'a, R>>,
    sort: SortKey,
    has_user_location: bool,
) -> (Vec<Hit<'a, R>>, SortKey) {
    let applied = match sort {
        SortKey::Distance if !has_user_location => {
            debug!("Distance sort requested without a user location; using default order");
            SortKey::Default
        }
        other => other,
    };

    match applied {
        SortKey::Default => {}
        SortKey::Distance => hits.sort_by(compare_distance),
        SortKey::Rating => hits.sort_by(compare_rating),
        SortKey::Name => hits.sort_by(|a, b| compare_names(a.record.name(), b.record.name())),
    }

    (hits, applied)
}

/// Ascending distance; hits without a distance go last
fn compare_distance<R>(a: &Hit<'_, R>, b: &Hit<'_, R>) -> Ordering {
    let da = a.distance_km.unwrap_or(f64::INFINITY);
    let db = b.distance_km.unwrap_or(f64::INFINITY);
    da.total_cmp(&db)
}

/// Descending rating; unrated counts as 0
fn compare_rating<R: Record>(a: &Hit<'_, R>, b: &Hit<'_, R>) -> Ordering {
    let ra = a.record.rating().unwrap_or(0.0);
    let rb = b.record.rating().unwrap_or(0.0);
    rb.total_cmp(&ra)
}

/// Locale-aware name comparison
///
/// Compares case- and accent-folded keys so "Émile" sorts with "Emile"
/// rather than after "Z".
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold_key(a).cmp(&fold_key(b))
}

/// Lowercase and strip Latin diacritics
pub fn fold_key(s: &str) -> String {
    s.chars()
        .flat_map(|c| c.to_lowercase())
        .map(|c| match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'ç' => 'c',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ñ' => 'n',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ý' | 'ÿ' => 'y',
            other => other,
        })
        .collect()
}
