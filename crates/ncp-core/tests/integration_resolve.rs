//! Integration test: resolver + curl client against a local release server.
//!
//! Serves release metadata and firmware bodies over HTTP and checks that the
//! resolver downloads, caches and reuses them with the expected request counts.

mod common;

use common::release_server::ReleaseServer;
use ncp_core::config::ResolverConfig;
use ncp_core::http::{CurlClient, HttpClient, HttpError};
use ncp_core::{ReleaseId, ResolveError, Resolver};
use tempfile::tempdir;

const LATEST: &str = "/repos/blynkkk/BlynkNcpDriver/releases/latest";
const TAG: &str = "/repos/blynkkk/BlynkNcpDriver/releases/tags/v0.6.3";

fn release_json(server: &ReleaseServer, tag: &str) -> String {
    format!(
        r#"{{
            "tag_name": "{tag}",
            "assets": [
                {{"name": "BlynkNCP_esp32.bin", "browser_download_url": "{esp32}"}},
                {{"name": "BlynkNCP_esp8266.bin", "browser_download_url": "{esp8266}"}}
            ]
        }}"#,
        esp32 = server.url(&format!("/dl/{tag}/esp32.bin")),
        esp8266 = server.url(&format!("/dl/{tag}/esp8266.bin")),
    )
}

fn resolver(server: &ReleaseServer, project: &std::path::Path) -> Resolver<CurlClient> {
    let cfg = ResolverConfig {
        api_base: server.base().to_string(),
        ..ResolverConfig::default()
    };
    Resolver::new(CurlClient::new(), &cfg, project)
}

#[test]
fn latest_download_then_cache_hit() {
    let server = ReleaseServer::start();
    server.route(LATEST, 200, release_json(&server, "v0.6.3"));
    let body: Vec<u8> = (0u8..=255).cycle().take(40 * 1024).collect();
    server.route("/dl/v0.6.3/esp32.bin", 200, body.clone());

    let project = tempdir().unwrap();
    let r = resolver(&server, project.path());

    let path = r.resolve("BlynkNCP_*.bin", &ReleaseId::Latest).unwrap();
    assert!(path.ends_with("v0.6.3/BlynkNCP_esp32.bin"));
    assert_eq!(std::fs::read(&path).unwrap(), body);
    assert_eq!(server.hits(LATEST), 1);
    assert_eq!(server.hits("/dl/v0.6.3/esp32.bin"), 1);

    let again = r.resolve("BlynkNCP_esp32.bin", &ReleaseId::Latest).unwrap();
    assert_eq!(again, path);
    assert_eq!(server.hits(LATEST), 1);
    assert_eq!(server.hits("/dl/v0.6.3/esp32.bin"), 1);
}

#[test]
fn tag_metadata_is_cached_on_disk() {
    let server = ReleaseServer::start();
    server.route(TAG, 200, release_json(&server, "v0.6.3"));

    let project = tempdir().unwrap();
    let r = resolver(&server, project.path());
    let id = ReleaseId::Tag("v0.6.3".to_string());

    let info = r.release_info(&id).unwrap();
    assert_eq!(info.tag, "v0.6.3");
    assert_eq!(info.assets.len(), 2);
    assert!(project
        .path()
        .join(".pio/BlynkNCP/.cache/v0.6.3.json")
        .is_file());

    // A fresh resolver over the same project reads the cache file.
    let r2 = resolver(&server, project.path());
    assert_eq!(r2.release_info(&id).unwrap(), info);
    assert_eq!(server.hits(TAG), 1);
}

#[test]
fn missing_release_is_metadata_error() {
    let server = ReleaseServer::start();
    let project = tempdir().unwrap();
    let r = resolver(&server, project.path());

    let err = r
        .resolve("BlynkNCP_esp32.bin", &ReleaseId::Tag("v0.6.3".into()))
        .unwrap_err();
    assert!(matches!(err, ResolveError::MetadataFetch { .. }));
    assert_eq!(server.hits(TAG), 1);
}

#[test]
fn download_error_leaves_no_file() {
    let server = ReleaseServer::start();
    server.route(LATEST, 200, release_json(&server, "v0.6.3"));
    server.route("/dl/v0.6.3/esp8266.bin", 500, "boom");

    let project = tempdir().unwrap();
    let r = resolver(&server, project.path());

    let err = r
        .resolve("BlynkNCP_esp8266.bin", &ReleaseId::Latest)
        .unwrap_err();
    match err {
        ResolveError::Download { source, .. } => {
            assert!(matches!(source, HttpError::Status { code: 500, .. }))
        }
        other => panic!("expected Download, got {other:?}"),
    }

    let dir = project.path().join(".pio/BlynkNCP/v0.6.3");
    let leftovers: Vec<_> = std::fs::read_dir(&dir)
        .map(|rd| rd.flatten().collect())
        .unwrap_or_default();
    assert!(leftovers.is_empty(), "unexpected files: {:?}", leftovers);
}

#[test]
fn curl_client_get_reports_status() {
    let server = ReleaseServer::start();
    server.route("/ok", 200, "hello");

    let client = CurlClient::new();
    assert_eq!(client.get(&server.url("/ok")).unwrap(), b"hello");
    assert!(matches!(
        client.get(&server.url("/missing")),
        Err(HttpError::Status { code: 404, .. })
    ));
}
