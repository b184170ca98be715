use tracing::debug;

use crate::{
    employee::Employee,
    loader::LoadFailure,
    pagination::{self, PAGE_SIZE},
};

/// State of the single employee table view.
///
/// The view starts in the loading state and stays there until the one remote
/// read settles. Every mutator ends by repairing the page index so that
/// `1 <= page <= total_pages()` holds after any transition.
#[derive(Clone, Debug)]
pub struct EmployeeTable {
    records: Vec<Employee>,
    loading: bool,
    page: usize,
}

impl Default for EmployeeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeTable {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            page: 1,
        }
    }

    /// Install the outcome of the load and clear the loading flag. A failed
    /// load leaves the collection empty.
    pub fn settle(&mut self, result: Result<Vec<Employee>, LoadFailure>) {
        match result {
            Ok(records) => self.records = records,
            Err(_) => self.records.clear(),
        }
        self.loading = false;
        self.repair();
    }

    /// Swap the whole collection for a new one.
    pub fn replace_records(&mut self, records: Vec<Employee>) {
        self.records = records;
        self.repair();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.records.len(), PAGE_SIZE)
    }

    pub fn current_slice(&self) -> &[Employee] {
        &self.records[pagination::page_range(self.records.len(), self.page, PAGE_SIZE)]
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Advance one page; no-op on the last page.
    pub fn next_page(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
        self.repair();
    }

    /// Go back one page; no-op on the first page.
    pub fn previous_page(&mut self) {
        if self.has_previous() {
            self.page -= 1;
        }
        self.repair();
    }

    fn repair(&mut self) {
        let repaired = pagination::repair_page(self.page, self.total_pages());
        if repaired != self.page {
            debug!(from = self.page, to = repaired, "page index out of range, snapping");
            self.page = repaired;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::employee::EmployeeId;

    pub(crate) fn employees(n: usize) -> Vec<Employee> {
        (1..=n)
            .map(|i| Employee {
                id: EmployeeId::new(i.to_string()),
                name: format!("Employee {i}"),
                email: format!("employee{i}@example.test"),
                role: if i % 3 == 0 { "admin" } else { "member" }.to_string(),
            })
            .collect()
    }

    fn ids(slice: &[Employee]) -> Vec<&str> {
        slice.iter().map(|e| e.id.as_str()).collect()
    }

    fn loaded(n: usize) -> EmployeeTable {
        let mut table = EmployeeTable::new();
        table.settle(Ok(employees(n)));
        table
    }

    #[test]
    fn starts_loading_on_first_page() {
        let table = EmployeeTable::new();
        assert!(table.is_loading());
        assert_eq!(table.page(), 1);
        assert_eq!(table.total_pages(), 1);
        assert!(table.current_slice().is_empty());
    }

    #[test]
    fn twenty_five_records_span_three_pages() {
        let mut table = loaded(25);
        assert!(!table.is_loading());
        assert_eq!(table.total_pages(), 3);
        assert_eq!(table.current_slice().len(), 10);
        assert_eq!(ids(table.current_slice())[0], "1");
        assert_eq!(ids(table.current_slice())[9], "10");
        assert!(!table.has_previous());

        table.next_page();
        table.next_page();
        assert_eq!(table.page(), 3);
        assert_eq!(ids(table.current_slice()), ["21", "22", "23", "24", "25"]);
        assert!(!table.has_next());
        assert!(table.has_previous());
    }

    #[test]
    fn navigation_is_a_no_op_at_the_bounds() {
        let mut table = loaded(25);
        table.previous_page();
        assert_eq!(table.page(), 1);

        for _ in 0..10 {
            table.next_page();
        }
        assert_eq!(table.page(), 3);

        for _ in 0..10 {
            table.previous_page();
        }
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn failed_load_leaves_empty_table() {
        let mut table = EmployeeTable::new();
        table.settle(Err(LoadFailure::Status(reqwest::StatusCode::NOT_FOUND)));
        assert!(!table.is_loading());
        assert!(table.records().is_empty());
        assert_eq!(table.total_pages(), 1);
        assert!(!table.has_next());
        assert!(!table.has_previous());
        table.next_page();
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn shrinking_collection_snaps_page_back() {
        let mut table = loaded(45);
        for _ in 0..4 {
            table.next_page();
        }
        assert_eq!(table.page(), 5);

        table.replace_records(employees(12));
        assert_eq!(table.total_pages(), 2);
        assert_eq!(table.page(), 2);
        assert_eq!(ids(table.current_slice()), ["11", "12"]);

        table.replace_records(Vec::new());
        assert_eq!(table.page(), 1);
        assert!(table.current_slice().is_empty());
    }

    #[test]
    fn growing_collection_keeps_page() {
        let mut table = loaded(15);
        table.next_page();
        table.replace_records(employees(40));
        assert_eq!(table.page(), 2);
        assert_eq!(ids(table.current_slice())[0], "11");
    }

    #[test]
    fn page_invariant_holds_across_transitions() {
        let mut table = EmployeeTable::new();
        let sizes = [0, 7, 33, 10, 91, 1, 0, 58];
        for (step, n) in sizes.into_iter().enumerate() {
            table.replace_records(employees(n));
            for _ in 0..step {
                table.next_page();
            }
            assert!(table.page() >= 1);
            assert!(table.page() <= table.total_pages());
            let expected = n.saturating_sub((table.page() - 1) * PAGE_SIZE).min(PAGE_SIZE);
            assert_eq!(table.current_slice().len(), expected);
        }
    }
}
