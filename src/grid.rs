pub mod data;
pub mod edit;
#[allow(clippy::module_inception)]
pub mod grid;
pub mod selection;
pub mod view;

pub use data::{GridData, VecData};
pub use edit::EditBuffer;
pub use grid::{EditOutcome, Grid};
pub use selection::Selection;
pub use view::{SortDirection, SortState, ViewState};
