use directory::{EmployeeTable, Loader, load_into};
use tokio::sync::RwLock;

/// Load the collection once and walk forward to `page` through the guarded
/// transitions, stopping on the last page.
pub async fn snapshot_table(loader: &Loader, page: usize) -> EmployeeTable {
    let view = RwLock::new(EmployeeTable::new());
    load_into(loader, &view).await;

    let mut table = view.into_inner();
    while table.page() < page && table.has_next() {
        table.next_page();
    }
    table
}
