//! Table sorting: typed column descriptors and the header click cycle
use leptos::prelude::*;
use std::cmp::Ordering;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Column descriptor of one entity table
pub trait TableColumn: Copy + PartialEq + Send + Sync + 'static {
    type Row;

    fn label(&self) -> &'static str;

    fn sortable(&self) -> bool {
        true
    }

    /// Natural ordering of the underlying field, ascending
    fn compare(&self, a: &Self::Row, b: &Self::Row) -> Ordering;
}

/// At most one sorted column. `None` keeps the fetch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<C> {
    active: Option<(C, SortDirection)>,
}

impl<C> Default for SortState<C> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<C: Copy + PartialEq> SortState<C> {
    /// Header click: unsorted -> descending -> ascending -> unsorted.
    /// Another column always starts at descending.
    pub fn toggle(self, column: C) -> Self {
        let active = match self.active {
            Some((current, SortDirection::Descending)) if current == column => {
                Some((column, SortDirection::Ascending))
            }
            Some((current, SortDirection::Ascending)) if current == column => None,
            _ => Some((column, SortDirection::Descending)),
        };
        Self { active }
    }

    pub fn active(&self) -> Option<(C, SortDirection)> {
        self.active
    }

    pub fn direction_of(&self, column: C) -> Option<SortDirection> {
        match self.active {
            Some((current, direction)) if current == column => Some(direction),
            _ => None,
        }
    }
}

/// Stable in-place sort; ties keep their current relative order.
pub fn sort_rows<C: TableColumn>(rows: &mut [C::Row], state: &SortState<C>) {
    let Some((column, direction)) = state.active() else {
        return;
    };
    rows.sort_by(|a, b| {
        let cmp = column.compare(a, b);
        match direction {
            SortDirection::Ascending => cmp,
            SortDirection::Descending => cmp.reverse(),
        }
    });
}

/// Arrow shown next to a header label
pub fn get_sort_indicator<C: Copy + PartialEq>(state: &SortState<C>, column: C) -> &'static str {
    match state.direction_of(column) {
        Some(SortDirection::Ascending) => " ▲",
        Some(SortDirection::Descending) => " ▼",
        None => " ⇅",
    }
}

pub fn get_sort_class<C: Copy + PartialEq>(state: &SortState<C>, column: C) -> &'static str {
    if state.direction_of(column).is_some() {
        "sort-indicator sort-indicator--active"
    } else {
        "sort-indicator"
    }
}

/// Header cell; sortable columns toggle `sort` on click.
pub fn sort_header_cell<C: TableColumn>(column: C, sort: RwSignal<SortState<C>>) -> AnyView {
    if !column.sortable() {
        return view! {
            <TableHeaderCell resizable=false>
                {column.label()}
            </TableHeaderCell>
        }
        .into_any();
    }

    view! {
        <TableHeaderCell resizable=false>
            <span
                style="cursor: pointer; user-select: none;"
                on:click=move |_| sort.update(|s| *s = s.toggle(column))
            >
                {column.label()}
                <span class=move || get_sort_class(&sort.get(), column)>
                    {move || get_sort_indicator(&sort.get(), column)}
                </span>
            </span>
        </TableHeaderCell>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Col {
        Name,
        Version,
    }

    impl TableColumn for Col {
        type Row = (u32, &'static str, Option<&'static str>);

        fn label(&self) -> &'static str {
            match self {
                Col::Name => "Name",
                Col::Version => "Version",
            }
        }

        fn compare(&self, a: &Self::Row, b: &Self::Row) -> Ordering {
            match self {
                Col::Name => a.1.cmp(b.1),
                Col::Version => a.2.cmp(&b.2),
            }
        }
    }

    fn ids(rows: &[(u32, &str, Option<&str>)]) -> Vec<u32> {
        rows.iter().map(|r| r.0).collect()
    }

    #[test]
    fn header_click_cycles_through_three_states() {
        let s = SortState::default();
        let s = s.toggle(Col::Name);
        assert_eq!(s.active(), Some((Col::Name, SortDirection::Descending)));
        let s = s.toggle(Col::Name);
        assert_eq!(s.active(), Some((Col::Name, SortDirection::Ascending)));
        let s = s.toggle(Col::Name);
        assert_eq!(s.active(), None);
    }

    #[test]
    fn new_column_resets_to_descending() {
        let s = SortState::default().toggle(Col::Name).toggle(Col::Name);
        let s = s.toggle(Col::Version);
        assert_eq!(s.active(), Some((Col::Version, SortDirection::Descending)));
        assert_eq!(s.direction_of(Col::Name), None);
        assert_eq!(get_sort_indicator(&s, Col::Version), " ▼");
        assert_eq!(get_sort_indicator(&s, Col::Name), " ⇅");
    }

    #[test]
    fn unsorted_keeps_fetch_order() {
        let mut rows = vec![(1, "b", None), (2, "a", None), (3, "c", None)];
        sort_rows(&mut rows, &SortState::<Col>::default());
        assert_eq!(ids(&rows), vec![1, 2, 3]);
    }

    #[test]
    fn sort_is_stable_and_missing_values_come_first_ascending() {
        let rows = vec![
            (1, "x", Some("1.2")),
            (2, "x", None),
            (3, "y", Some("1.0")),
            (4, "x", None),
        ];

        let asc = SortState::default().toggle(Col::Version).toggle(Col::Version);
        let mut sorted = rows.clone();
        sort_rows(&mut sorted, &asc);
        assert_eq!(ids(&sorted), vec![2, 4, 3, 1]);

        let desc = SortState::default().toggle(Col::Name);
        let mut sorted = rows;
        sort_rows(&mut sorted, &desc);
        assert_eq!(ids(&sorted), vec![3, 1, 2, 4]);
    }
}
