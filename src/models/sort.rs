use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Default, Display)]
pub enum SortDir {
    #[default]
    #[strum(to_string = "asc")]
    Asc,
    #[strum(to_string = "desc")]
    Desc,
}

/// Manual sort toggle. The server understands a single active sort key, so
/// the whole grid shares one cycle; activating sort on another column moves
/// ownership of the current cycle state instead of starting a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SortCycle {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortCycle {
    #[inline]
    pub fn advance(self) -> Self {
        match self {
            SortCycle::None => SortCycle::Asc,
            SortCycle::Asc => SortCycle::Desc,
            SortCycle::Desc => SortCycle::None,
        }
    }

    #[inline]
    pub fn dir(self) -> Option<SortDir> {
        match self {
            SortCycle::None => None,
            SortCycle::Asc => Some(SortDir::Asc),
            SortCycle::Desc => Some(SortDir::Desc),
        }
    }
}

/// One committed sort key with direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortEntry {
    pub id: &'static str,
    pub desc: bool,
}

/// Cycle state plus the column that currently owns it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SortState {
    pub cycle: SortCycle,
    pub column: Option<&'static str>,
}

impl SortState {
    /// Advance the shared cycle for `column`. `Desc -> None` clears the sort
    /// entirely, otherwise the activated column takes ownership.
    pub fn advance(&mut self, column: &'static str) {
        self.cycle = self.cycle.advance();
        self.column = match self.cycle {
            SortCycle::None => None,
            _ => Some(column),
        };
    }

    /// Committed sorting list. At most one entry, but downstream consumers
    /// accept a sequence (see [`sort_query`]).
    pub fn entries(&self) -> Vec<SortEntry> {
        match (self.column, self.cycle.dir()) {
            (Some(id), Some(dir)) => vec![SortEntry { id, desc: dir == SortDir::Desc }],
            _ => vec![],
        }
    }
}

/// Map a column id to the field name the server sorts by. `fullName` is a
/// display-only composite backed by `firstName`; everything else maps 1:1.
#[inline]
pub fn server_sort_field(id: &str) -> &str {
    match id {
        "fullName" => "firstName",
        other => other,
    }
}

/// Derive the query string for the committed sorting list, empty when the
/// list is empty. The loop overwrites the result on every entry, so the last
/// entry wins over earlier ones.
pub fn sort_query(entries: &[SortEntry]) -> String {
    let mut query = String::new();
    for entry in entries {
        let sort_by = server_sort_field(entry.id);
        let order = if entry.desc { SortDir::Desc } else { SortDir::Asc };
        query = format!("?sortBy={}&order={}", sort_by, order);
    }
    query
}
