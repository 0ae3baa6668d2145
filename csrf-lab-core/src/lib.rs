// Core library for csrf-lab
// HTTP types, cookies, routing and the hyper-based server runtime

pub mod application;
pub mod cookie;
pub mod error;
pub mod form;
pub mod http;
pub mod logging;
pub mod routing;
pub mod testing;

pub use application::*;
pub use cookie::{Cookie, SameSite, parse_cookie_header};
pub use error::*;
pub use form::*;
pub use http::*;
pub use routing::{BoxedResponse, HandlerFn, Router};
