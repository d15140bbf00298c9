use crate::query::QueryDict;

/// What the link builder needs from the host's request object.
pub trait Request {
    /// URL path, without query string.
    fn path(&self) -> &str;

    /// Parsed query parameters of the current request.
    fn query(&self) -> &QueryDict;
}

/// Owned request built from a path and a query string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    path: String,
    query: QueryDict,
}

impl HttpRequest {
    #[must_use]
    pub fn new(path: impl Into<String>, query: QueryDict) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Split `path?query#fragment`. A missing path becomes `/`.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let path = if path.is_empty() { "/" } else { path };
        Self::new(path, QueryDict::parse(query))
    }
}

impl Request for HttpRequest {
    fn path(&self) -> &str {
        &self.path
    }

    fn query(&self) -> &QueryDict {
        &self.query
    }
}

impl<R: Request + ?Sized> Request for &R {
    fn path(&self) -> &str {
        (**self).path()
    }

    fn query(&self) -> &QueryDict {
        (**self).query()
    }
}
