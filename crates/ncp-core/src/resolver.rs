//! Release asset resolver: maps an asset filename pattern and a release
//! identifier to a local firmware file, touching the network only when the
//! cache cannot answer.

use std::path::{Path, PathBuf};

use url::Url;

use crate::config::ResolverConfig;
use crate::error::{MetadataError, ResolveError};
use crate::http::HttpClient;
use crate::release::{find_asset, unix_now, AssetMatcher, ReleaseCache, ReleaseId, ReleaseInfo};
use crate::storage::PartFile;

pub struct Resolver<C> {
    client: C,
    cache: ReleaseCache,
    api_base: String,
    repo: String,
}

impl<C: HttpClient> Resolver<C> {
    /// Builds a resolver whose cache root is `cfg.cache_dir` relative to `project_dir`.
    pub fn new(client: C, cfg: &ResolverConfig, project_dir: &Path) -> Self {
        Self {
            client,
            cache: ReleaseCache::new(project_dir.join(&cfg.cache_dir)),
            api_base: cfg.api_base.clone(),
            repo: cfg.repo.clone(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn cache(&self) -> &ReleaseCache {
        &self.cache
    }

    /// Local path of the asset matching `pattern` in `release`, downloading it if needed.
    ///
    /// Performs at most one metadata request and at most one download.
    pub fn resolve(&self, pattern: &str, release: &ReleaseId) -> Result<PathBuf, ResolveError> {
        let candidate = self.cache.asset_path(release.as_str(), pattern);
        if candidate.is_file() {
            tracing::debug!("using cached {}", candidate.display());
            return Ok(candidate);
        }

        let info = self
            .release_info(release)
            .map_err(|source| ResolveError::MetadataFetch {
                release: release.to_string(),
                source,
            })?;

        let candidate = self.cache.asset_path(&info.tag, pattern);
        if candidate.is_file() {
            tracing::debug!("using cached {}", candidate.display());
            return Ok(candidate);
        }

        let matcher = AssetMatcher::new(pattern).map_err(|source| ResolveError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let asset =
            find_asset(&info.assets, &matcher).ok_or_else(|| ResolveError::AssetNotFound {
                pattern: pattern.to_string(),
                tag: info.tag.clone(),
            })?;

        let dest = self.cache.asset_path(&info.tag, &asset.name);
        if dest.is_file() {
            tracing::debug!("using cached {}", dest.display());
            return Ok(dest);
        }

        tracing::info!("downloading {} ({})", asset.name, info.tag);
        self.download(&asset.download_url, &dest)?;
        Ok(dest)
    }

    /// Release metadata for `release`, from the cache when it is still valid.
    pub fn release_info(&self, release: &ReleaseId) -> Result<ReleaseInfo, MetadataError> {
        let now = unix_now();
        if let Some(info) = self.cache.load(release) {
            if !ReleaseCache::is_stale(release, &info, now) {
                tracing::debug!("release info for {} served from cache ({})", release, info.tag);
                return Ok(info);
            }
            tracing::debug!(
                "cached release info for {} is {}s old, refetching",
                release,
                info.age_secs(now)
            );
        }

        tracing::info!("fetching release info for {} from {}", release, self.repo);
        let url = self.release_url(release)?;
        let body = self.client.get(url.as_str())?;
        let mut info: ReleaseInfo = serde_json::from_slice(&body)?;
        info.timestamp = now;

        self.cache
            .store(release, &info)
            .map_err(|source| MetadataError::Cache {
                path: self.cache.metadata_path(release),
                source,
            })?;
        Ok(info)
    }

    /// `<api_base>/repos/<repo>/releases/latest` or `.../releases/tags/<tag>`.
    pub fn release_url(&self, release: &ReleaseId) -> Result<Url, MetadataError> {
        let bad_url = || MetadataError::BadUrl(self.api_base.clone());
        let mut url = Url::parse(&self.api_base).map_err(|_| bad_url())?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| bad_url())?;
            segments
                .pop_if_empty()
                .push("repos")
                .extend(self.repo.split('/').filter(|s| !s.is_empty()))
                .push("releases");
            match release {
                ReleaseId::Latest => segments.push("latest"),
                ReleaseId::Tag(tag) => segments.push("tags").push(tag),
            };
        }
        Ok(url)
    }

    fn download(&self, url: &str, dest: &Path) -> Result<(), ResolveError> {
        let storage_err = |source: std::io::Error| ResolveError::Storage {
            path: dest.to_path_buf(),
            source,
        };

        let mut part = PartFile::create(dest).map_err(storage_err)?;
        match self.client.download(url, &mut part) {
            Ok(bytes) => {
                part.finalize().map_err(storage_err)?;
                tracing::debug!("saved {} bytes to {}", bytes, dest.display());
                Ok(())
            }
            Err(source) => {
                part.discard();
                Err(ResolveError::Download {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }
}
