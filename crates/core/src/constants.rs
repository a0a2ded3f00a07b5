/// Decimal precision for amounts in reports
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Fallback currency for expenses created without one
pub const DEFAULT_CURRENCY: &str = "USD";

/// Default number of search results returned
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Hard cap on search results per request
pub const MAX_SEARCH_LIMIT: usize = 50;

/// Maximum characters taken from a document when building search context
pub const CONTEXT_SNIPPET_LEN: usize = 800;
