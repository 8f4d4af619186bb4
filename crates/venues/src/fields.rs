/// Trim genres, drop blanks and duplicates (case-insensitive), keep order.
pub(crate) fn normalize_genres(genres: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(genres.len());
    for g in genres {
        let g = g.trim();
        if g.is_empty() || out.iter().any(|seen| seen.eq_ignore_ascii_case(g)) {
            continue;
        }
        out.push(g.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_are_trimmed_and_deduplicated() {
        let genres = vec![" Jazz".into(), "jazz".into(), "".into(), "Folk ".into()];
        assert_eq!(normalize_genres(genres), vec!["Jazz", "Folk"]);
    }
}
