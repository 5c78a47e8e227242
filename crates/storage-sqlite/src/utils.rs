//! Small SQLite helpers shared by the repositories.

/// Upper bound on bound parameters per `IN (...)` list.
///
/// SQLite rejects statements above `SQLITE_MAX_VARIABLE_NUMBER` (999 on older
/// builds), and the remaining slots are left for the other filters.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits `items` into slices small enough for a single `IN (...)` query.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_ids_yields_no_queries() {
        let ids: Vec<String> = vec![];
        assert_eq!(chunk_for_sqlite(&ids).count(), 0);
    }

    #[test]
    fn large_symbol_sets_are_split() {
        let ids: Vec<String> = (0..1200).map(|i| format!("sym-{i}")).collect();
        let sizes: Vec<usize> = chunk_for_sqlite(&ids).map(<[String]>::len).collect();
        assert_eq!(sizes, vec![500, 500, 200]);
    }
}
