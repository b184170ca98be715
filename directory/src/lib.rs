//! Employee directory primitives: the remote loader, page arithmetic and the
//! single table view rendered by the server.

pub mod employee;
pub mod loader;
pub mod pagination;
pub mod render;
pub mod view;

pub use employee::{Employee, EmployeeId};
pub use loader::{DEFAULT_EMPLOYEES_URL, LoadFailure, Loader, load_into};
pub use pagination::PAGE_SIZE;
pub use view::EmployeeTable;
