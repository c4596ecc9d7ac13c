pub mod search_query;
pub mod site_hint;
pub mod token;

pub use search_query::{SearchQuery, SearchUrlTemplate, DEFAULT_SEARCH_URL};
pub use site_hint::SiteHint;
pub use token::TokenShape;
