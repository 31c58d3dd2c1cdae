//! Patient search filtering.

use crate::domain::Patient;

/// Returns the patients matching `query`, in store order.
///
/// Matching is a case-insensitive substring test against the name, the stored
/// CPF, and (when present) email and phone. A patient matches if any field
/// does. An empty query returns every patient. The store is never modified.
///
/// The CPF is compared as stored, so a masked query such as `123.456` finds
/// nothing when the server keeps raw digits.
///
/// # Parameters
///
/// * `patients` - The store, in server order
/// * `query` - Search text as typed
///
/// # Returns
///
/// References to the matching patients, in store order.
///
/// ```
/// use patient_registry::app::filter::filter_patients;
/// use patient_registry::domain::Patient;
///
/// let patients = vec![
///     Patient::new(1, "Ana Silva", "12345678901"),
///     Patient::new(2, "Bruno Costa", "98765432100"),
/// ];
/// let found = filter_patients(&patients, "ANA");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].id, 1);
/// ```
#[must_use]
pub fn filter_patients<'a>(patients: &'a [Patient], query: &str) -> Vec<&'a Patient> {
    if query.is_empty() {
        return patients.iter().collect();
    }

    let needle = query.to_lowercase();
    let contains = |text: &str| text.to_lowercase().contains(&needle);

    patients
        .iter()
        .filter(|p| {
            contains(&p.full_name)
                || contains(&p.tax_id)
                || p.email.as_deref().is_some_and(contains)
                || p.phone.as_deref().is_some_and(contains)
        })
        .collect()
}

/// Character ranges of every case-insensitive occurrence of `query` in `text`.
///
/// Used to highlight matches in the list. Ranges are `(start, end)` character
/// indices with exclusive end and never overlap. Returns nothing when
/// lowercasing changes byte offsets, which only happens for a handful of
/// non-ASCII characters.
///
/// # Parameters
///
/// * `text` - Displayed text, usually a patient name
/// * `query` - Search text as typed
///
/// ```
/// use patient_registry::app::filter::match_ranges;
///
/// assert_eq!(match_ranges("Ana Banana", "ana"), vec![(0, 3), (5, 8)]);
/// ```
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return Vec::new();
    }
    let haystack = text.to_lowercase();
    if haystack.len() != text.len() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let char_index = |byte: usize| text[..byte].chars().count();

    haystack
        .match_indices(&needle)
        .map(|(start, matched)| (char_index(start), char_index(start + matched.len())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Vec<Patient> {
        let mut ana = Patient::new(1, "Ana Silva", "12345678901");
        ana.email = Some("ana@clinica.com".into());
        let mut bruno = Patient::new(2, "Bruno Costa", "98765432100");
        bruno.phone = Some("(11) 98765-4321".into());
        let carla = Patient::new(3, "Carla Dias", "55544433322");
        vec![ana, bruno, carla]
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let patients = store();
        let ids: Vec<_> = filter_patients(&patients, "").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_case_insensitive_name() {
        let patients = store();
        let found = filter_patients(&patients, "ANA");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].full_name, "Ana Silva");
    }

    #[test]
    fn test_matches_any_field() {
        let patients = store();
        assert_eq!(filter_patients(&patients, "555444")[0].id, 3);
        assert_eq!(filter_patients(&patients, "CLINICA")[0].id, 1);
        assert_eq!(filter_patients(&patients, "98765-")[0].id, 2);
    }

    #[test]
    fn test_cpf_matches_stored_value_only() {
        let patients = store();
        assert!(filter_patients(&patients, "123.456").is_empty());
    }

    #[test]
    fn test_no_match() {
        let patients = store();
        assert!(filter_patients(&patients, "zzz").is_empty());
        assert_eq!(patients.len(), 3);
    }

    #[test]
    fn test_match_ranges() {
        assert_eq!(match_ranges("Ana Banana", "ana"), vec![(0, 3), (5, 8)]);
        assert!(match_ranges("Ana", "").is_empty());
        assert_eq!(match_ranges("José Silva", "silva"), vec![(5, 10)]);
    }
}
