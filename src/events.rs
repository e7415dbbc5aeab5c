//! Names of the htmx events used to coordinate fragments on the page.

/// Emitted after any change to the stored expenses, or when the user asks
/// for a refresh. The listing, the statistics panel and the category filter
/// options reload when it fires.
pub const EXPENSES_CHANGED: &str = "expensesChanged";

/// Emitted after the filter bar has been reset. The listing reloads without
/// any filters when it fires.
pub const FILTERS_CLEARED: &str = "filtersCleared";
