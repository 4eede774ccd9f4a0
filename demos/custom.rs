//! Swaps a replacement parsing function in through [`MatrixConfig`]: the
//! built-in algorithm still does the heavy lifting, but segment names come
//! out upper-cased. Run it to see both variants side by side.

use std::convert::Infallible;

use http::Request;
use tower::{service_fn, Layer, ServiceExt};

use matrix_params::{parse_with, MatrixConfig, MatrixLayer, ParseOptions, ParsedMatrix, SegmentRecord};

async fn echo(req: Request<()>) -> Result<ParsedMatrix, Infallible> {
    Ok(req.extensions().get::<ParsedMatrix>().cloned().unwrap())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let path = "/club;name=lakers;address=downtown/members;role=guest";

    let standard = MatrixLayer::default().layer(service_fn(echo));
    let matrix = standard
        .oneshot(Request::builder().uri(path).body(()).unwrap())
        .await
        .unwrap();
    println!("default parser:\n{}", serde_json::to_string_pretty(&matrix).unwrap());

    let shouting = MatrixConfig::parser(|path: &str, opts: &ParseOptions| {
        parse_with(path, opts)
            .into_iter()
            .map(|record| SegmentRecord {
                segment: record.segment.to_uppercase(),
                matrix: record.matrix,
            })
            .collect()
    });

    let custom = MatrixLayer::new(shouting).layer(service_fn(echo));
    let matrix = custom
        .oneshot(Request::builder().uri(path).body(()).unwrap())
        .await
        .unwrap();
    println!("custom parser:\n{}", serde_json::to_string_pretty(&matrix).unwrap());
}
