//! Adapter implementations of the application ports.

mod failure_log;
mod reqwest_transport;
mod scraper_query;

pub use failure_log::FailureLog;
pub use reqwest_transport::ReqwestTransport;
pub use scraper_query::ScraperDocumentQuery;
