pub mod http;
pub mod url;

pub use http::{HttpClient, HttpResponse};
pub use url::{ParsedUrl, Scheme};
