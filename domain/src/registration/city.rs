//! Matching a typed city name against a state's municipality list

/// Case- and accent-insensitive ordering key for Portuguese names
pub fn collation_key(name: &str) -> String {
    name.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Sort names alphabetically ignoring case and accents, dropping repeats
pub fn sort_city_names(names: &mut Vec<String>) {
    names.sort_by_cached_key(|name| (collation_key(name), name.clone()));
    names.dedup();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityMatch {
    /// Exactly one city fits; holds its canonical spelling
    Matched(String),
    /// Several cities start with (or contain) the input
    Ambiguous(Vec<String>),
    /// The list is known and nothing fits
    Unknown,
    /// No list to check against, or nothing typed; holds the trimmed input
    Unchecked(String),
}

/// Resolve `input` against `cities`
///
/// An exact (case- and accent-insensitive) hit wins, then a unique prefix,
/// then a unique substring.
pub fn match_city(input: &str, cities: &[String]) -> CityMatch {
    let input = input.trim();
    if cities.is_empty() || input.is_empty() {
        return CityMatch::Unchecked(input.to_string());
    }

    let key = collation_key(input);
    let keyed: Vec<(String, &String)> = cities.iter().map(|c| (collation_key(c), c)).collect();

    if let Some((_, city)) = keyed.iter().find(|(k, _)| *k == key) {
        return CityMatch::Matched((*city).clone());
    }

    let mut candidates: Vec<String> = keyed
        .iter()
        .filter(|(k, _)| k.starts_with(&key))
        .map(|(_, c)| (*c).clone())
        .collect();
    if candidates.is_empty() {
        candidates = keyed
            .iter()
            .filter(|(k, _)| k.contains(&key))
            .map(|(_, c)| (*c).clone())
            .collect();
    }

    match candidates.len() {
        0 => CityMatch::Unknown,
        1 => CityMatch::Matched(candidates.remove(0)),
        _ => CityMatch::Ambiguous(candidates),
    }
}
