//! Departamento table with clickable column headers.

use std::cmp::Ordering;

use eframe::egui;
use shared::domain::Departamento;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Nombre,
    Descripcion,
}

impl SortColumn {
    fn label(self) -> &'static str {
        match self {
            SortColumn::Id => "ID",
            SortColumn::Nombre => "Nombre",
            SortColumn::Descripcion => "Descripcion",
        }
    }

    fn compare(self, a: &Departamento, b: &Departamento) -> Ordering {
        match self {
            SortColumn::Id => a.id.cmp(&b.id),
            SortColumn::Nombre => a.nombre.to_lowercase().cmp(&b.nombre.to_lowercase()),
            SortColumn::Descripcion => a
                .descripcion_or_empty()
                .to_lowercase()
                .cmp(&b.descripcion_or_empty().to_lowercase()),
        }
    }
}

/// View-only ordering; `None` keeps the order the service returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableSort {
    column: Option<SortColumn>,
    descending: bool,
}

impl TableSort {
    #[cfg(test)]
    pub fn column(&self) -> Option<SortColumn> {
        self.column
    }

    #[cfg(test)]
    pub fn descending(&self) -> bool {
        self.descending
    }

    /// Clicking the active column flips direction; another column starts ascending.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.descending = !self.descending;
        } else {
            self.column = Some(column);
            self.descending = false;
        }
    }

    pub fn apply<'a>(&self, records: &'a [Departamento]) -> Vec<&'a Departamento> {
        let mut rows: Vec<&Departamento> = records.iter().collect();
        if let Some(column) = self.column {
            rows.sort_by(|a, b| {
                let ordering = column.compare(a, b);
                if self.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        rows
    }

    fn header(&self, column: SortColumn) -> String {
        match (self.column == Some(column), self.descending) {
            (true, false) => format!("{} ▲", column.label()),
            (true, true) => format!("{} ▼", column.label()),
            (false, _) => column.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Edit(Departamento),
    Delete(Departamento),
}

const ACTIONS_WIDTH: f32 = 150.0;
const TABLE_MAX_HEIGHT: f32 = 400.0;

/// Draws `records` in `sort` order. Row buttons are disabled unless `actions_enabled`.
pub fn show_table(
    ui: &mut egui::Ui,
    records: &[Departamento],
    sort: &mut TableSort,
    actions_enabled: bool,
) -> Option<RowAction> {
    let mut action = None;
    let rows = sort.apply(records);
    let mut clicked_header = None;

    egui::ScrollArea::vertical()
        .max_height(TABLE_MAX_HEIGHT)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new("departamentos_table")
                .num_columns(4)
                .striped(true)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for column in [SortColumn::Id, SortColumn::Nombre, SortColumn::Descripcion] {
                        let text = egui::RichText::new(sort.header(column)).strong();
                        if ui.add(egui::Button::new(text).frame(false)).clicked() {
                            clicked_header = Some(column);
                        }
                    }
                    ui.label(egui::RichText::new("Acciones").strong());
                    ui.end_row();

                    if rows.is_empty() {
                        ui.label(egui::RichText::new("Sin registros").weak());
                        ui.end_row();
                    }

                    for record in &rows {
                        ui.label(record.id.to_string());
                        ui.label(&record.nombre);
                        ui.label(record.descripcion_or_empty());
                        ui.horizontal(|ui| {
                            ui.set_width(ACTIONS_WIDTH);
                            if ui
                                .add_enabled(actions_enabled, egui::Button::new("✏ Editar"))
                                .clicked()
                            {
                                action = Some(RowAction::Edit((*record).clone()));
                            }
                            if ui
                                .add_enabled(actions_enabled, egui::Button::new("🗑 Eliminar"))
                                .clicked()
                            {
                                action = Some(RowAction::Delete((*record).clone()));
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    if let Some(column) = clicked_header {
        sort.toggle(column);
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::DepartamentoId;

    fn record(id: i64, nombre: &str, descripcion: Option<&str>) -> Departamento {
        Departamento {
            id: DepartamentoId(id),
            nombre: nombre.into(),
            descripcion: descripcion.map(Into::into),
        }
    }

    fn ids(rows: &[&Departamento]) -> Vec<i64> {
        rows.iter().map(|r| r.id.0).collect()
    }

    fn sample() -> Vec<Departamento> {
        vec![
            record(2, "ventas", Some("Comercial")),
            record(10, "Almacén", None),
            record(1, "Compras", Some("abastecimiento")),
        ]
    }

    #[test]
    fn unsorted_keeps_service_order() {
        let records = sample();
        assert_eq!(ids(&TableSort::default().apply(&records)), vec![2, 10, 1]);
    }

    #[test]
    fn toggle_same_column_flips_direction() {
        let records = sample();
        let mut sort = TableSort::default();
        sort.toggle(SortColumn::Id);
        assert_eq!(ids(&sort.apply(&records)), vec![1, 2, 10]);
        sort.toggle(SortColumn::Id);
        assert!(sort.descending());
        assert_eq!(ids(&sort.apply(&records)), vec![10, 2, 1]);
    }

    #[test]
    fn switching_column_resets_to_ascending() {
        let records = sample();
        let mut sort = TableSort::default();
        sort.toggle(SortColumn::Id);
        sort.toggle(SortColumn::Id);
        sort.toggle(SortColumn::Nombre);
        assert_eq!(sort.column(), Some(SortColumn::Nombre));
        assert!(!sort.descending());
        assert_eq!(ids(&sort.apply(&records)), vec![10, 1, 2]);
    }

    #[test]
    fn missing_descripcion_sorts_first() {
        let records = sample();
        let mut sort = TableSort::default();
        sort.toggle(SortColumn::Descripcion);
        assert_eq!(ids(&sort.apply(&records)), vec![10, 1, 2]);
    }

    #[test]
    fn header_marks_active_direction() {
        let mut sort = TableSort::default();
        assert_eq!(sort.header(SortColumn::Nombre), "Nombre");
        sort.toggle(SortColumn::Nombre);
        assert_eq!(sort.header(SortColumn::Nombre), "Nombre ▲");
        sort.toggle(SortColumn::Nombre);
        assert_eq!(sort.header(SortColumn::Nombre), "Nombre ▼");
    }
}
