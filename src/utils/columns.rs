use std::borrow::Cow;

/// Width limits enforced while resizing, in abstract column units.
pub const MIN_COL_WIDTH: u16 = 50;
pub const MAX_COL_WIDTH: u16 = 500;
pub const DEFAULT_COL_WIDTH: u16 = 200;

pub struct ColDef<T> {
    pub id: &'static str,
    pub title: &'static str,
    /// Per-column filtering is part of the column contract but no filter UI
    /// drives it.
    #[allow(dead_code)]
    pub filterable: bool,
    pub sortable: bool,
    pub resizable: bool,
    /// Configured default width; resize-reset restores this exact value.
    pub width: u16,
    /// value accessor, used in cell rendering
    pub accessor: for<'a> fn(&'a T) -> Cow<'a, str>,
}

/// Current width per column, indexed like the column slice it was built from.
#[derive(Debug, Clone)]
pub struct ColumnWidths {
    widths: Vec<u16>,
    defaults: Vec<u16>,
}

impl ColumnWidths {
    pub fn new<T>(cols: &[ColDef<T>]) -> Self {
        let defaults: Vec<u16> = cols.iter().map(|c| c.width).collect();
        Self { widths: defaults.clone(), defaults }
    }

    #[inline]
    pub fn get(&self, index: usize) -> u16 {
        self.widths.get(index).copied().unwrap_or(DEFAULT_COL_WIDTH)
    }

    pub fn total(&self) -> u32 {
        self.widths.iter().map(|w| *w as u32).sum()
    }

    /// Apply a resize delta, clamped to `[MIN_COL_WIDTH, MAX_COL_WIDTH]`.
    pub fn resize(&mut self, index: usize, delta: i16) {
        if let Some(w) = self.widths.get_mut(index) {
            *w = w
                .saturating_add_signed(delta)
                .clamp(MIN_COL_WIDTH, MAX_COL_WIDTH);
        }
    }

    /// Restore the configured default width for one column.
    pub fn reset(&mut self, index: usize) {
        if let Some(w) = self.widths.get_mut(index) {
            *w = self.defaults[index];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols() -> Vec<ColDef<()>> {
        vec![
            ColDef {
                id: "a",
                title: "A",
                filterable: false,
                sortable: true,
                resizable: true,
                width: 270,
                accessor: |_| Cow::Borrowed(""),
            },
            ColDef {
                id: "b",
                title: "B",
                filterable: false,
                sortable: true,
                resizable: true,
                width: DEFAULT_COL_WIDTH,
                accessor: |_| Cow::Borrowed(""),
            },
        ]
    }

    #[test]
    fn test_resize_clamps() {
        let mut widths = ColumnWidths::new(&cols());

        widths.resize(1, -1000);
        assert_eq!(widths.get(1), MIN_COL_WIDTH);

        widths.resize(1, 1000);
        assert_eq!(widths.get(1), MAX_COL_WIDTH);
    }

    #[test]
    fn test_reset_restores_configured_default() {
        let mut widths = ColumnWidths::new(&cols());

        widths.resize(0, 100);
        assert_eq!(widths.get(0), 370);
        widths.reset(0);
        assert_eq!(widths.get(0), 270);

        widths.resize(1, -30);
        widths.reset(1);
        assert_eq!(widths.get(1), DEFAULT_COL_WIDTH);
    }

    #[test]
    fn test_out_of_range_index_ignored() {
        let mut widths = ColumnWidths::new(&cols());
        widths.resize(9, 100);
        widths.reset(9);
        assert_eq!(widths.total(), 270 + DEFAULT_COL_WIDTH as u32);
    }
}
