//! Backend selection and compressor configuration.

use crate::error::{CompressError, CompressResult};

/// Selects which DEFLATE implementation the compressor uses.
///
/// Every backend except [`Passthrough`](Self::Passthrough) emits a raw RFC 1951
/// stream, so data compressed by one can be inflated by any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CompressionBackend {
    /// Pure-Rust `miniz_oxide`.
    Miniz,
    /// The `flate2` stream API; uses the platform zlib with the `native-zlib` feature.
    Flate2,
    /// `Flate2` when built against the platform zlib, otherwise `Miniz`.
    #[default]
    PreferNative,
    /// No compression. Debug only; both peers must use it.
    Passthrough,
}

impl CompressionBackend {
    /// Returns `true` if this backend can be used in the current build.
    #[must_use]
    pub const fn is_available(self) -> bool {
        match self {
            Self::Flate2 => cfg!(feature = "flate2"),
            Self::Miniz | Self::PreferNative | Self::Passthrough => true,
        }
    }

    pub(crate) fn resolve(self) -> CompressResult<Engine> {
        match self {
            Self::Miniz => Ok(Engine::Miniz),
            #[cfg(feature = "flate2")]
            Self::Flate2 => Ok(Engine::Flate2),
            #[cfg(not(feature = "flate2"))]
            Self::Flate2 => Err(CompressError::BackendUnavailable { backend: self }),
            Self::PreferNative => Ok(Engine::preferred()),
            Self::Passthrough => Ok(Engine::Passthrough),
        }
    }
}

/// A backend after resolution against the compiled features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Engine {
    Miniz,
    #[cfg(feature = "flate2")]
    Flate2,
    Passthrough,
}

impl Engine {
    /// The engine `PreferNative` resolves to in this build.
    pub(crate) const fn preferred() -> Self {
        #[cfg(feature = "native-zlib")]
        {
            Self::Flate2
        }
        #[cfg(not(feature = "native-zlib"))]
        {
            Self::Miniz
        }
    }

    pub(crate) const fn backend(self) -> CompressionBackend {
        match self {
            Self::Miniz => CompressionBackend::Miniz,
            #[cfg(feature = "flate2")]
            Self::Flate2 => CompressionBackend::Flate2,
            Self::Passthrough => CompressionBackend::Passthrough,
        }
    }
}

/// Compressor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompressionConfig {
    /// DEFLATE implementation to use.
    pub backend: CompressionBackend,
    /// Compression level, `0..=9`.
    pub level: u8,
    /// Upper bound on the size of any single inflated payload.
    pub max_inflated_bytes: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            backend: CompressionBackend::default(),
            level: 6,
            // Room for a few hundred thousand varints per array.
            max_inflated_bytes: 4 * 1024 * 1024,
        }
    }
}

impl CompressionConfig {
    /// Creates a default configuration using `backend`.
    #[must_use]
    pub fn with_backend(backend: CompressionBackend) -> Self {
        Self {
            backend,
            ..Self::default()
        }
    }

    pub(crate) const fn validate(&self) -> CompressResult<()> {
        if self.level > 9 {
            return Err(CompressError::InvalidLevel { level: self.level });
        }
        Ok(())
    }
}
