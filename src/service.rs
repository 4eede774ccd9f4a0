use crate::matrix::ParsedMatrix;
use crate::parser::{parse_with, ParseOptions};

use http::Request;
use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

/// The parsing capability a layer dispatches to: given a path and options,
/// produce the ordered segment records.
pub type ParserFn = Arc<dyn Fn(&str, &ParseOptions) -> ParsedMatrix + Send + Sync>;

/// Configuration accepted by [`MatrixLayer::new`].
///
/// Either options for the built-in parser, or a full replacement parsing
/// function for alternative grammars. The union is resolved once at layer
/// construction into a fixed parser reference and a fixed options value;
/// nothing is re-inspected per request.
#[derive(Clone)]
pub enum MatrixConfig {
    /// Run the built-in parser with the given options.
    Options(ParseOptions),
    /// Replace the parsing algorithm entirely.
    Parser(ParserFn),
}

impl MatrixConfig {
    /// Wraps a replacement parser function.
    ///
    /// The function receives the request path and the configured options and
    /// returns the records to attach; it is expected to be total, like the
    /// built-in parser.
    pub fn parser<F>(parser: F) -> Self
    where
        F: Fn(&str, &ParseOptions) -> ParsedMatrix + Send + Sync + 'static,
    {
        MatrixConfig::Parser(Arc::new(parser))
    }
}

impl From<ParseOptions> for MatrixConfig {
    fn from(options: ParseOptions) -> Self {
        MatrixConfig::Options(options)
    }
}

impl fmt::Debug for MatrixConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixConfig::Options(options) => f.debug_tuple("Options").field(options).finish(),
            MatrixConfig::Parser(_) => f.debug_tuple("Parser").finish(),
        }
    }
}

/// A [`Layer`] that decorates services with matrix parsing.
///
/// ```rust
/// use matrix_params::{MatrixLayer, MatrixValue, ParsedMatrix};
/// use tower::{service_fn, Layer, ServiceExt};
/// use http::Request;
/// use std::convert::Infallible;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let service = MatrixLayer::default().layer(service_fn(|req: Request<()>| async move {
///     let matrix = req.extensions().get::<ParsedMatrix>().cloned().unwrap();
///     Ok::<_, Infallible>(matrix)
/// }));
///
/// let request = Request::builder().uri("/home;name=raghav").body(()).unwrap();
/// let matrix = service.oneshot(request).await.unwrap();
///
/// assert_eq!(matrix[0].segment, "home");
/// assert_eq!(matrix[0].matrix.get("name").and_then(MatrixValue::as_str), Some("raghav"));
/// # }
/// ```
#[derive(Clone)]
pub struct MatrixLayer {
    parser: ParserFn,
    options: ParseOptions,
}

impl MatrixLayer {
    /// Creates a layer from the given configuration.
    pub fn new(config: impl Into<MatrixConfig>) -> Self {
        match config.into() {
            MatrixConfig::Options(options) => MatrixLayer {
                parser: Arc::new(parse_with),
                options,
            },
            MatrixConfig::Parser(parser) => MatrixLayer {
                parser,
                options: ParseOptions::default(),
            },
        }
    }
}

impl Default for MatrixLayer {
    /// A layer running the built-in parser with default options.
    fn default() -> Self {
        MatrixLayer::new(ParseOptions::default())
    }
}

impl<S> Layer<S> for MatrixLayer {
    type Service = MatrixService<S>;

    fn layer(&self, inner: S) -> MatrixService<S> {
        MatrixService {
            inner,
            parser: self.parser.clone(),
            options: self.options.clone(),
        }
    }
}

impl fmt::Debug for MatrixLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixLayer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Middleware that attaches a [`ParsedMatrix`] to each request.
///
/// If the request already carries one, it is passed through untouched, so a
/// stack that applies the layer twice still parses once. The middleware then
/// yields to the inner service unconditionally: it never short-circuits and
/// introduces no error or readiness behavior of its own.
#[derive(Clone)]
pub struct MatrixService<S> {
    inner: S,
    parser: ParserFn,
    options: ParseOptions,
}

impl<S, B> Service<Request<B>> for MatrixService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if req.extensions().get::<ParsedMatrix>().is_none() {
            let matrix = (self.parser)(req.uri().path(), &self.options);
            trace!(
                "attached {} matrix segment(s) for {}",
                matrix.len(),
                req.uri().path()
            );
            req.extensions_mut().insert(matrix);
        }

        self.inner.call(req)
    }
}

impl<S: fmt::Debug> fmt::Debug for MatrixService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixService")
            .field("inner", &self.inner)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
