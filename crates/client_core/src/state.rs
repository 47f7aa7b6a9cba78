use shared::domain::Departamento;

/// The list half of the screen state: canonical records, the normalized query,
/// and the filtered view derived from both.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    all_records: Vec<Departamento>,
    search_query: String,
    visible_records: Vec<Departamento>,
}

impl CatalogState {
    pub fn all_records(&self) -> &[Departamento] {
        &self.all_records
    }

    pub fn visible_records(&self) -> &[Departamento] {
        &self.visible_records
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Replaces the whole list; records are never patched in place.
    pub fn replace_records(&mut self, records: Vec<Departamento>) {
        self.all_records = records;
        self.recompute();
    }

    pub fn set_search(&mut self, text: &str) {
        self.search_query = text.to_lowercase();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible_records = filter_records(&self.all_records, &self.search_query);
    }
}

pub fn matches_query(record: &Departamento, query: &str) -> bool {
    record.id.0.to_string().contains(query) || record.nombre.to_lowercase().contains(query)
}

/// `query` must already be lowercase.
pub fn filter_records(records: &[Departamento], query: &str) -> Vec<Departamento> {
    if query.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| matches_query(record, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use shared::domain::DepartamentoId;

    use super::*;

    fn record(id: i64, nombre: &str) -> Departamento {
        Departamento {
            id: DepartamentoId(id),
            nombre: nombre.into(),
            descripcion: None,
        }
    }

    #[test]
    fn query_is_lowercased_and_matches_nombre() {
        let mut state = CatalogState::default();
        state.replace_records(vec![record(1, "Ventas"), record(2, "Compras")]);
        state.set_search("VEN");
        assert_eq!(state.search_query(), "ven");
        assert_eq!(state.visible_records(), &[record(1, "Ventas")]);
    }

    #[test]
    fn query_matches_stringified_id() {
        let records = vec![record(12, "Ventas"), record(7, "Compras"), record(21, "RH")];
        let visible = filter_records(&records, "1");
        let ids: Vec<i64> = visible.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![12, 21]);
    }

    #[test]
    fn empty_query_shows_everything_in_order() {
        let mut state = CatalogState::default();
        state.replace_records(vec![record(2, "b"), record(1, "a")]);
        state.set_search("");
        assert_eq!(state.visible_records(), state.all_records());
    }

    #[test]
    fn replacing_records_keeps_current_query() {
        let mut state = CatalogState::default();
        state.set_search("xyz");
        state.replace_records(vec![record(1, "Ventas")]);
        assert!(state.visible_records().is_empty());
        state.replace_records(vec![record(1, "Ventas"), record(2, "xyz corp")]);
        assert_eq!(state.visible_records().len(), 1);
    }

    #[test]
    fn filter_agrees_with_predicate_for_mixed_queries() {
        let records = vec![
            record(1, "Ventas"),
            record(10, "Sistemas"),
            record(100, "Ñandú Logística"),
            record(3, "ventanilla"),
        ];
        for query in ["", "ven", "0", "ñan", "s", "zz", "10"] {
            let visible = filter_records(&records, query);
            let expected: Vec<Departamento> = records
                .iter()
                .filter(|r| {
                    query.is_empty()
                        || r.id.0.to_string().contains(query)
                        || r.nombre.to_lowercase().contains(query)
                })
                .cloned()
                .collect();
            assert_eq!(visible, expected, "query {query:?}");
        }
    }
}
