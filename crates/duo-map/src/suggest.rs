//! Column suggestion heuristic.
//!
//! A case-insensitive substring match against the label key, with a few
//! extra tokens for the region and count labels. The first qualifying column
//! in dataset order wins; there is no scoring.

use duo_model::{ColumnMapping, SemanticLabel};

/// Extra tokens accepted for a label besides its own key.
fn extra_tokens(label: SemanticLabel) -> &'static [&'static str] {
    match label {
        SemanticLabel::Regio => &["regio", "arbeidsmarktregio"],
        SemanticLabel::AantalStudenten => &["aantal", "stud", "count"],
        _ => &[],
    }
}

/// Suggests a column for `label` from `columns`, in dataset order.
///
/// # Examples
///
/// ```
/// use duo_map::suggest;
/// use duo_model::SemanticLabel;
///
/// let columns = ["Instroomjaar", "Arbeidsmarktregio", "Aantal"];
/// assert_eq!(suggest(SemanticLabel::Regio, &columns), Some("Arbeidsmarktregio"));
/// assert_eq!(suggest(SemanticLabel::AantalStudenten, &columns), Some("Aantal"));
/// assert_eq!(suggest(SemanticLabel::Sector, &columns), None);
/// ```
pub fn suggest<S: AsRef<str>>(label: SemanticLabel, columns: &[S]) -> Option<&str> {
    let key = label.key();
    let tokens = extra_tokens(label);
    columns.iter().map(|column| column.as_ref()).find(|column| {
        let lower = column.to_lowercase();
        lower.contains(key) || tokens.iter().any(|token| lower.contains(token))
    })
}

/// Runs [`suggest`] for every catalog label.
pub fn suggest_all<S: AsRef<str>>(columns: &[S]) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();
    for label in SemanticLabel::ALL {
        mapping.set(label, suggest(label, columns).map(str::to_string));
    }
    mapping
}
