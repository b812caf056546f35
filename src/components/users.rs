use std::borrow::Cow;

use crate::models::User;
use crate::utils::columns::{ColDef, DEFAULT_COL_WIDTH};

/// Fetched user dataset. Replaced wholesale on every successful fetch, never
/// merged or appended.
#[derive(Default)]
pub struct Users {
    rows: Vec<User>,
}

impl Users {
    pub fn replace(&mut self, records: Vec<User>) {
        self.rows = records;
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of the current page, `bounds` as produced by
    /// [`Paginator::page_bounds`](crate::widgets::paginator::Paginator::page_bounds).
    pub fn page_slice(&self, bounds: (usize, usize)) -> &[User] {
        self.rows.get(bounds.0..bounds.1).unwrap_or(&[])
    }
}

pub static USER_COLS: &[ColDef<User>] = &[
    ColDef {
        id: "fullName",
        title: "Full Name",
        filterable: false,
        sortable: true,
        resizable: true,
        width: 270,
        accessor: User::full_name,
    },
    ColDef {
        id: "firstName",
        title: "First Name",
        filterable: true,
        sortable: true,
        resizable: false,
        width: DEFAULT_COL_WIDTH,
        accessor: |u: &User| Cow::Borrowed(u.first_name.as_str()),
    },
    ColDef {
        id: "lastName",
        title: "Last Name",
        filterable: true,
        sortable: true,
        resizable: false,
        width: DEFAULT_COL_WIDTH,
        accessor: |u: &User| Cow::Borrowed(u.last_name.as_str()),
    },
    ColDef {
        id: "age",
        title: "Age",
        filterable: true,
        sortable: false,
        resizable: false,
        width: DEFAULT_COL_WIDTH,
        accessor: |u: &User| Cow::Owned(u.age.to_string()),
    },
    ColDef {
        id: "status",
        title: "Status",
        filterable: true,
        sortable: true,
        resizable: false,
        width: DEFAULT_COL_WIDTH,
        accessor: |u: &User| Cow::Borrowed(u.status.as_str()),
    },
    ColDef {
        id: "address",
        title: "Address",
        filterable: true,
        sortable: true,
        resizable: true,
        width: DEFAULT_COL_WIDTH,
        accessor: |u: &User| Cow::Borrowed(u.address.as_str()),
    },
    ColDef {
        id: "job",
        title: "Job",
        filterable: true,
        sortable: true,
        resizable: false,
        width: DEFAULT_COL_WIDTH,
        accessor: |u: &User| Cow::Borrowed(u.job.as_str()),
    },
    ColDef {
        id: "pet",
        title: "Pet",
        filterable: true,
        sortable: true,
        resizable: false,
        width: DEFAULT_COL_WIDTH,
        accessor: |u: &User| Cow::Borrowed(u.pet.as_str()),
    },
    ColDef {
        id: "identical",
        title: "Identical",
        filterable: true,
        sortable: true,
        resizable: false,
        width: DEFAULT_COL_WIDTH,
        accessor: |u: &User| Cow::Borrowed(u.identical.as_str()),
    },
];

/// Model-order ids, the "center" baseline before pinning is applied.
pub fn model_order() -> Vec<&'static str> {
    USER_COLS.iter().map(|c| c.id).collect()
}

pub fn col_by_id(id: &str) -> Option<(usize, &'static ColDef<User>)> {
    USER_COLS.iter().enumerate().find(|(_, c)| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::sample_users;
    use crate::widgets::paginator::Paginator;

    #[test]
    fn test_page_slice() {
        let mut store = Users::default();
        let mut paginator = Paginator::default();

        assert!(store.page_slice(paginator.page_bounds()).is_empty());

        store.replace(sample_users());
        paginator.length(store.len());
        assert_eq!(store.page_slice(paginator.page_bounds()).len(), 2);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut store = Users::default();
        store.replace(sample_users());
        assert_eq!(store.len(), 2);

        store.replace(sample_users().drain(..1).collect());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_column_contract() {
        // the composite column keeps its configured width and stays sortable
        let (_, full_name) = col_by_id("fullName").unwrap();
        assert!(full_name.sortable && full_name.resizable);
        assert_eq!(full_name.width, 270);

        // age is the single non-sortable column
        let not_sortable: Vec<&str> =
            USER_COLS.iter().filter(|c| !c.sortable).map(|c| c.id).collect();
        assert_eq!(not_sortable, vec!["age"]);

        let resizable: Vec<&str> =
            USER_COLS.iter().filter(|c| c.resizable).map(|c| c.id).collect();
        assert_eq!(resizable, vec!["fullName", "address"]);
    }

    #[test]
    fn test_accessors_return_plain_data() {
        let users = sample_users();
        let (_, full_name) = col_by_id("fullName").unwrap();
        assert_eq!((full_name.accessor)(&users[0]), "A Anders");
        let (_, age) = col_by_id("age").unwrap();
        assert_eq!((age.accessor)(&users[1]), "41");
    }
}
