//! Mounts the middleware in front of every route and echoes the parsed
//! matrix back as JSON. Poke at it with curl:
//!
//! ```text
//! curl 'localhost:3000/club;name=lakers;address=downtown/members;role=guest'
//! ```

use std::convert::Infallible;
use std::net::SocketAddr;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tower::{Layer, ServiceExt};

use matrix_params::{MatrixLayer, ParsedMatrix};

async fn echo(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let matrix = req
        .extensions()
        .get::<ParsedMatrix>()
        .expect("the middleware runs on every request");
    let body = serde_json::to_vec_pretty(matrix).expect("a parsed matrix serializes");

    Ok(Response::builder()
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = TcpListener::bind(addr).await.unwrap();
    println!("listening on http://{}", addr);

    loop {
        let (tcp, _) = listener.accept().await.unwrap();

        tokio::task::spawn(async move {
            let service = hyper::service::service_fn(|req: Request<Incoming>| {
                MatrixLayer::default()
                    .layer(tower::service_fn(echo))
                    .oneshot(req)
            });

            if let Err(err) = http1::Builder::new()
                .serve_connection(TokioIo::new(tcp), service)
                .await
            {
                println!("Error serving connection: {:?}", err);
            }
        });
    }
}
