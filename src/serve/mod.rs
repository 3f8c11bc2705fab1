//! Delivery server for bundle and asset URLs.
//!
//! Requests are handed to a small rayon pool; the [`Compressor`] is shared
//! read-only behind an `Arc`, and each bundle's cache cell serializes its own
//! fills. A request for a stale hash still gets the current content.

mod lifecycle;
mod response;
pub mod route;

pub use lifecycle::setup_shutdown_handler;
pub use route::Route;

use crate::error::CompressorError;
use crate::registry::Compressor;
use crate::{debug, log};
use anyhow::{Context, Result};
use std::net::IpAddr;
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Worker threads answering requests.
const POOL_SIZE: usize = 4;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    compressor: Arc<Compressor>,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(
    compressor: Arc<Compressor>,
    interface: IpAddr,
    port: u16,
) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(interface, port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "http://{}{}/bundle/", addr, compressor.env().url_prefix);

    Ok(BoundServer { server, compressor })
}

impl BoundServer {
    /// Start the request loop (blocking until shutdown).
    pub fn run(self) -> Result<()> {
        run_request_loop(&self.server, &self.compressor)
    }
}

fn run_request_loop(server: &Server, compressor: &Arc<Compressor>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(POOL_SIZE)
        .build()
        .context("failed to create thread pool")?;

    for request in server.incoming_requests() {
        let compressor = Arc::clone(compressor);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &compressor) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, compressor: &Compressor) -> Result<()> {
    if lifecycle::is_shutdown() {
        return response::respond_unavailable(request);
    }

    match resolve(compressor, request.url()) {
        Reply::Content { mimetype, body } => response::respond_content(request, &mimetype, body),
        Reply::NotFound => {
            debug!("serve"; "404 {}", request.url());
            response::respond_not_found(request)
        }
        Reply::Failed(err) => {
            let err = anyhow::Error::new(err);
            log!("error"; "{}: {:#}", request.url(), err);
            response::respond_processing_error(request, &err, compressor.env().debug)
        }
    }
}

/// Outcome of a delivery request, independent of the transport.
#[derive(Debug)]
enum Reply {
    Content { mimetype: String, body: String },
    NotFound,
    Failed(CompressorError),
}

fn resolve(compressor: &Compressor, url: &str) -> Reply {
    let cx = compressor.context();

    match route::parse(url, cx.url_prefix) {
        Some(Route::Bundle { name, hash, .. }) => {
            let Ok(bundle) = compressor.get_bundle(&name) else {
                return Reply::NotFound;
            };
            match bundle.output(&cx) {
                Ok(output) => {
                    if output.hash != hash {
                        debug!(
                            "serve";
                            "'{}' requested as v{}, serving v{}",
                            name,
                            hash,
                            output.hash
                        );
                    }
                    Reply::Content {
                        mimetype: bundle.mimetype().to_owned(),
                        body: output.content,
                    }
                }
                Err(err) => Reply::Failed(err),
            }
        }
        Some(Route::Asset {
            bundle,
            index,
            name,
        }) => {
            let Ok(bundle) = compressor.get_bundle(&bundle) else {
                return Reply::NotFound;
            };
            let Some(asset) = bundle.asset(index) else {
                return Reply::NotFound;
            };
            if name.is_some() && name != asset.name() {
                return Reply::NotFound;
            }
            match asset.content(&cx) {
                Ok(body) => Reply::Content {
                    mimetype: bundle.mimetype().to_owned(),
                    body,
                },
                Err(err) => Reply::Failed(err),
            }
        }
        None => Reply::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Asset;
    use crate::bundle::Bundle;
    use crate::context::Environment;
    use crate::error::ProcessorError;
    use std::fs;
    use std::io::{Read, Write};
    use std::net::{Ipv4Addr, TcpStream};
    use std::thread;
    use tempfile::TempDir;

    fn failing(_: &str) -> Result<String, ProcessorError> {
        Err(ProcessorError::execution("failing", "boom"))
    }

    fn compressor(env: Environment) -> Compressor {
        let mut compressor = Compressor::new(env);
        compressor.register_processor_fn("failing", failing);
        compressor.register_bundle(
            Bundle::css("site")
                .with_assets([
                    Asset::new("a { color: red }").with_name("a.css"),
                    Asset::new("b{margin:0}"),
                ])
                .with_processors(["cssmin"]),
        );
        compressor.register_bundle(
            Bundle::js("broken").with_asset(Asset::new("x").with_processors(["failing"])),
        );
        compressor
    }

    fn content(reply: Reply) -> (String, String) {
        match reply {
            Reply::Content { mimetype, body } => (mimetype, body),
            other => panic!("expected content, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_bundle() {
        let compressor = compressor(Environment::default());
        let url = compressor.get_bundle("site").unwrap().url(&compressor.context()).unwrap();

        let (mimetype, body) = content(resolve(&compressor, &url));
        assert_eq!(mimetype, "text/css");
        assert_eq!(body, "a{color:red}b{margin:0}");
    }

    #[test]
    fn test_resolve_ignores_hash_and_extension() {
        let compressor = compressor(Environment::default());

        let (_, body) = content(resolve(&compressor, "/_compressor/bundle/site_vdeadbeef.txt"));
        assert_eq!(body, "a{color:red}b{margin:0}");
    }

    #[test]
    fn test_resolve_own_url_with_any_extension() {
        let mut compressor = compressor(Environment::default());
        compressor.register_bundle(
            Bundle::js("app")
                .with_asset(Asset::new("go();"))
                .with_extension("min.js"),
        );
        compressor.register_bundle(
            Bundle::new("raw")
                .with_asset(Asset::new("text"))
                .with_extension(""),
        );
        compressor.register_bundle(
            Bundle::new("odd")
                .with_asset(Asset::new("odd"))
                .with_extension("x/y?z"),
        );

        let cx = compressor.context();
        for (name, expected) in [("app", "go();"), ("raw", "text"), ("odd", "odd")] {
            let url = compressor.get_bundle(name).unwrap().url(&cx).unwrap();
            let (_, body) = content(resolve(&compressor, &url));
            assert_eq!(body, expected, "{url}");
        }
    }

    #[test]
    fn test_resolve_unknown_bundle() {
        let compressor = compressor(Environment::default());

        assert!(matches!(
            resolve(&compressor, "/_compressor/bundle/missing_v00.css"),
            Reply::NotFound
        ));
        assert!(matches!(resolve(&compressor, "/_compressor/other"), Reply::NotFound));
        assert!(matches!(
            resolve(&compressor, "/elsewhere/bundle/site_v00.css"),
            Reply::NotFound
        ));
    }

    #[test]
    fn test_resolve_asset() {
        let compressor = compressor(Environment::default());

        let (mimetype, body) = content(resolve(&compressor, "/_compressor/bundle/site/asset/0/"));
        assert_eq!(mimetype, "text/css");
        // Own content, without the bundle pipeline
        assert_eq!(body, "a { color: red }");

        let (_, body) = content(resolve(&compressor, "/_compressor/bundle/site/asset/0/a.css"));
        assert_eq!(body, "a { color: red }");

        let (_, body) = content(resolve(&compressor, "/_compressor/bundle/site/asset/1/"));
        assert_eq!(body, "b{margin:0}");
    }

    #[test]
    fn test_resolve_asset_not_found() {
        let compressor = compressor(Environment::default());

        for url in [
            "/_compressor/bundle/site/asset/2/",
            "/_compressor/bundle/site/asset/0/b.css",
            "/_compressor/bundle/site/asset/1/anything",
            "/_compressor/bundle/missing/asset/0/",
        ] {
            assert!(matches!(resolve(&compressor, url), Reply::NotFound), "{url}");
        }
    }

    #[test]
    fn test_resolve_processing_error() {
        let compressor = compressor(Environment::default());

        assert!(matches!(
            resolve(&compressor, "/_compressor/bundle/broken_v00.js"),
            Reply::Failed(CompressorError::AssetProcessing { .. })
        ));
    }

    #[test]
    fn test_resolve_file_asset_debug_reload() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), "one();").unwrap();

        let mut compressor = Compressor::new(Environment::new(dir.path()).with_debug(true));
        compressor.register_bundle(Bundle::js("app").with_asset(Asset::file("app.js")));

        let (_, body) = content(resolve(&compressor, "/_compressor/bundle/app_v0.js"));
        assert_eq!(body, "one();");

        fs::write(dir.path().join("app.js"), "two();").unwrap();
        let (_, body) = content(resolve(&compressor, "/_compressor/bundle/app_v0.js"));
        assert_eq!(body, "two();");

        let (_, body) = content(resolve(&compressor, "/_compressor/bundle/app/asset/0/app.js"));
        assert_eq!(body, "two();");
    }

    fn request(method: &str, path: &str) -> String {
        format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
    }

    fn roundtrip(compressor: Compressor, raw_request: &str) -> String {
        let (server, addr) =
            lifecycle::bind_with_retry(IpAddr::V4(Ipv4Addr::LOCALHOST), 0).unwrap();
        let handle = thread::spawn(move || {
            let request = server.recv().unwrap();
            handle_request(request, &compressor).unwrap();
        });

        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(raw_request.as_bytes()).unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        handle.join().unwrap();
        response
    }

    #[test]
    fn test_http_get_bundle() {
        let response = roundtrip(
            compressor(Environment::default()),
            &request("GET", "/_compressor/bundle/site_v0.css"),
        );

        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.contains("text/css; charset=utf-8"));
        assert!(response.ends_with("a{color:red}b{margin:0}"));
    }

    #[test]
    fn test_http_head_and_not_found() {
        let response = roundtrip(
            compressor(Environment::default()),
            &request("HEAD", "/_compressor/bundle/site_v0.css"),
        );
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(!response.contains("a{color:red}"));

        let response = roundtrip(
            compressor(Environment::default()),
            &request("GET", "/_compressor/bundle/nope_v0.css"),
        );
        assert!(response.starts_with("HTTP/1.1 404"), "{response}");
    }

    #[test]
    fn test_http_error_detail_only_in_debug() {
        let raw = request("GET", "/_compressor/bundle/broken_v0.js");

        let response = roundtrip(compressor(Environment::default()), &raw);
        assert!(response.starts_with("HTTP/1.1 500"), "{response}");
        assert!(!response.contains("boom"));

        let response = roundtrip(compressor(Environment::default().with_debug(true)), &raw);
        assert!(response.starts_with("HTTP/1.1 500"), "{response}");
        assert!(response.contains("boom"));
    }
}
