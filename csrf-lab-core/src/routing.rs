// Routing system for HTTP requests

use crate::form::parse_query_string;
use crate::{Error, HttpMethod, HttpRequest, HttpResponse};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by a route handler
pub type BoxedResponse = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// A route handler function type
pub type HandlerFn = Arc<dyn Fn(HttpRequest) -> BoxedResponse + Send + Sync>;

/// Router for managing routes and dispatching requests
///
/// Each method gets its own `matchit` tree so a path registered under a
/// different method can be reported as `405` instead of `404`.
#[derive(Default)]
pub struct Router {
    trees: HashMap<HttpMethod, matchit::Router<HandlerFn>>,
    route_count: usize,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route to the router
    pub fn add_route(
        &mut self,
        method: HttpMethod,
        path: &str,
        handler: HandlerFn,
    ) -> Result<(), Error> {
        self.trees
            .entry(method)
            .or_insert_with(matchit::Router::new)
            .insert(path, handler)
            .map_err(|e| Error::InvalidRoute(format!("{} {}: {}", method, path, e)))?;
        self.route_count += 1;
        Ok(())
    }

    /// Register an async closure for `method` and `path`
    pub fn on<F, Fut>(&mut self, method: HttpMethod, path: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        let handler: HandlerFn = Arc::new(move |req| -> BoxedResponse { Box::pin(handler(req)) });
        self.add_route(method, path, handler)
    }

    pub fn get<F, Fut>(&mut self, path: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.on(HttpMethod::GET, path, handler)
    }

    pub fn post<F, Fut>(&mut self, path: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.on(HttpMethod::POST, path, handler)
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.route_count
    }

    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }

    /// Match `path` under `method`. HEAD falls back to the GET routes.
    fn lookup<'a>(
        &'a self,
        method: HttpMethod,
        path: &'a str,
    ) -> Option<matchit::Match<'a, 'a, &'a HandlerFn>> {
        let exact = self.trees.get(&method).and_then(|tree| tree.at(path).ok());
        match (method, exact) {
            (HttpMethod::HEAD, None) => self
                .trees
                .get(&HttpMethod::GET)
                .and_then(|tree| tree.at(path).ok()),
            (_, found) => found,
        }
    }

    /// Find the route that matches the request and run it
    pub async fn route(&self, mut request: HttpRequest) -> Result<HttpResponse, Error> {
        let (path, query) = match request.path.split_once('?') {
            Some((p, q)) => (p.to_string(), Some(q.to_string())),
            None => (request.path.clone(), None),
        };

        if let Some(query) = query {
            request.query_params = parse_query_string(&query);
        }

        let head = request.method == HttpMethod::HEAD;
        let handler = match self.lookup(request.method, &path) {
            Some(matched) => {
                request.path_params = matched
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                Some(matched.value.clone())
            }
            None => None,
        };

        if let Some(handler) = handler {
            request.path = path;
            let mut response = handler(request).await?;
            if head {
                response.body.clear();
            }
            return Ok(response);
        }

        let other_method = self
            .trees
            .iter()
            .any(|(method, tree)| *method != request.method && tree.at(&path).is_ok());

        if other_method {
            Err(Error::MethodNotAllowed(format!("{} {}", request.method, path)))
        } else {
            Err(Error::RouteNotFound(format!("{} {}", request.method, path)))
        }
    }
}
