//! Service layer for travel-expenses
//!
//! Services sit on top of the storage layer and act on behalf of one user:
//! validation, ownership checks, and cross-entity operations live here.

pub mod category;
pub mod expense;
pub mod rate;
pub mod summary;
pub mod travel;

pub use category::{CategoryChanges, CategoryService, NewCategory};
pub use expense::{ExpenseChanges, ExpenseService, NewExpense};
pub use rate::CurrencyRateService;
pub use summary::SummaryService;
pub use travel::{DeletedTravel, NewTravel, TravelChanges, TravelService};
