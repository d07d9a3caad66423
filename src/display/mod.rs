//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for travels, expenses, categories,
//! currency rates and travel summaries.

pub mod category;
pub mod expense;
pub mod helpers;
pub mod rate;
pub mod summary;
pub mod travel;

pub use category::{format_category_details, format_category_list};
pub use expense::{format_expense_details, format_expense_list};
pub use rate::{format_rate_details, format_rate_list};
pub use summary::{format_summary, format_summary_list};
pub use travel::{format_travel_details, format_travel_list};
