//! Integer-array and blob-array compression.

use bitstream::{ByteReader, ByteWriter};
use log::debug;

use crate::backend::{CompressionBackend, CompressionConfig, Engine};
use crate::deflate::{deflate, inflate};
use crate::error::{CompressError, CompressResult};

/// Compresses arrays into DEFLATE byte strings and back.
///
/// A `Compressor` holds only configuration, so one instance can be shared
/// freely across threads and connections.
#[derive(Debug, Clone)]
pub struct Compressor {
    engine: Engine,
    level: u8,
    max_inflated_bytes: usize,
}

impl Default for Compressor {
    fn default() -> Self {
        let config = CompressionConfig::default();
        Self {
            engine: Engine::preferred(),
            level: config.level,
            max_inflated_bytes: config.max_inflated_bytes,
        }
    }
}

impl Compressor {
    /// Creates a compressor, resolving the configured backend eagerly.
    pub fn new(config: &CompressionConfig) -> CompressResult<Self> {
        config.validate()?;
        let engine = config.backend.resolve()?;
        debug!(
            "compressor backend {:?} resolved to {:?} (level {})",
            config.backend,
            engine.backend(),
            config.level
        );
        Ok(Self {
            engine,
            level: config.level,
            max_inflated_bytes: config.max_inflated_bytes,
        })
    }

    /// Creates a compressor for `backend` with default settings.
    pub fn with_backend(backend: CompressionBackend) -> CompressResult<Self> {
        Self::new(&CompressionConfig::with_backend(backend))
    }

    /// Returns the concrete backend in use.
    #[must_use]
    pub const fn backend(&self) -> CompressionBackend {
        self.engine.backend()
    }

    /// Returns the bound on inflated payload size.
    #[must_use]
    pub const fn max_inflated_bytes(&self) -> usize {
        self.max_inflated_bytes
    }

    /// Compresses raw bytes.
    pub fn deflate(&self, data: &[u8]) -> CompressResult<Vec<u8>> {
        deflate(self.engine, self.level, data)
    }

    /// Decompresses raw bytes.
    pub fn inflate(&self, data: &[u8]) -> CompressResult<Vec<u8>> {
        inflate(self.engine, data, self.max_inflated_bytes)
    }

    /// Writes each value as a zigzag varint and compresses the result.
    pub fn compress_i64s(&self, values: &[i64]) -> CompressResult<Vec<u8>> {
        let mut scratch = ByteWriter::with_capacity(values.len());
        for &value in values {
            scratch.write_vari64(value);
        }
        self.deflate(scratch.as_slice())
    }

    /// Inflates `data` and reads exactly `len` zigzag varints.
    pub fn decompress_i64s(&self, data: &[u8], len: usize) -> CompressResult<Vec<i64>> {
        let raw = self.inflate(data)?;
        let mut reader = ByteReader::new(&raw);
        // Every entry takes at least one byte.
        let mut values = Vec::with_capacity(len.min(raw.len()));
        for _ in 0..len {
            values.push(reader.read_vari64()?);
        }
        expect_consumed(&reader, len)?;
        Ok(values)
    }

    /// Writes each blob as `[varint length][bytes]` and compresses the result.
    ///
    /// `None` is written as a zero-length blob, so it decodes as an empty one.
    pub fn compress_blobs<B: AsRef<[u8]>>(&self, blobs: &[Option<B>]) -> CompressResult<Vec<u8>> {
        let mut scratch = ByteWriter::with_capacity(blobs.len());
        for blob in blobs {
            match blob {
                Some(bytes) => scratch.write_bytes(bytes.as_ref()),
                None => scratch.write_len(0),
            }
        }
        self.deflate(scratch.as_slice())
    }

    /// Inflates `data` and reads exactly `len` length-prefixed blobs.
    pub fn decompress_blobs(&self, data: &[u8], len: usize) -> CompressResult<Vec<Vec<u8>>> {
        let raw = self.inflate(data)?;
        let mut reader = ByteReader::new(&raw);
        let mut blobs = Vec::with_capacity(len.min(raw.len()));
        for _ in 0..len {
            blobs.push(reader.read_bytes()?.to_vec());
        }
        expect_consumed(&reader, len)?;
        Ok(blobs)
    }
}

fn expect_consumed(reader: &ByteReader<'_>, entries: usize) -> CompressResult<()> {
    if reader.is_empty() {
        Ok(())
    } else {
        Err(CompressError::TrailingData {
            entries,
            remaining: reader.remaining(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_prefer_native() {
        let default = Compressor::default();
        let configured = Compressor::with_backend(CompressionBackend::PreferNative).unwrap();
        assert_eq!(default.backend(), configured.backend());
    }

    #[test]
    fn i64_roundtrip() {
        let compressor = Compressor::default();
        let values = [0, 1, -1, 300, -300, i64::MAX, i64::MIN];
        let packed = compressor.compress_i64s(&values).unwrap();
        assert_eq!(
            compressor.decompress_i64s(&packed, values.len()).unwrap(),
            values
        );
    }

    #[test]
    fn empty_i64_array() {
        let compressor = Compressor::default();
        let packed = compressor.compress_i64s(&[]).unwrap();
        assert!(compressor.decompress_i64s(&packed, 0).unwrap().is_empty());
    }

    #[test]
    fn i64_length_too_long_fails() {
        let compressor = Compressor::default();
        let packed = compressor.compress_i64s(&[1, 2]).unwrap();
        let err = compressor.decompress_i64s(&packed, 3).unwrap_err();
        assert!(matches!(err, CompressError::Payload(_)));
    }

    #[test]
    fn i64_length_too_short_fails() {
        let compressor = Compressor::default();
        let packed = compressor.compress_i64s(&[1, 2, 3]).unwrap();
        let err = compressor.decompress_i64s(&packed, 2).unwrap_err();
        assert_eq!(
            err,
            CompressError::TrailingData {
                entries: 2,
                remaining: 1
            }
        );
    }

    #[test]
    fn blobs_collapse_none_to_empty() {
        let compressor = Compressor::default();
        let blobs: Vec<Option<&[u8]>> =
            vec![Some(&b"alice"[..]), None, Some(&[][..]), Some(&[0, 255][..])];
        let packed = compressor.compress_blobs(&blobs).unwrap();
        let decoded = compressor.decompress_blobs(&packed, blobs.len()).unwrap();
        assert_eq!(
            decoded,
            vec![b"alice".to_vec(), Vec::new(), Vec::new(), vec![0, 255]]
        );
    }

    #[test]
    fn zero_delta_arrays_compress_well() {
        let compressor = Compressor::default();
        let values = vec![0i64; 1000];
        let packed = compressor.compress_i64s(&values).unwrap();
        assert!(packed.len() < 32, "got {} bytes", packed.len());
    }

    #[test]
    fn passthrough_is_plain_varints() {
        let compressor = Compressor::with_backend(CompressionBackend::Passthrough).unwrap();
        let packed = compressor.compress_i64s(&[1, -1]).unwrap();
        assert_eq!(packed, vec![2, 1]);
    }

    #[test]
    fn inflate_limit_applies_to_arrays() {
        let config = CompressionConfig {
            max_inflated_bytes: 8,
            ..CompressionConfig::with_backend(CompressionBackend::Miniz)
        };
        let compressor = Compressor::new(&config).unwrap();
        let packed = compressor.compress_i64s(&[0; 64]).unwrap();
        let err = compressor.decompress_i64s(&packed, 64).unwrap_err();
        assert_eq!(err, CompressError::InflatedTooLarge { limit: 8 });
    }

    #[test]
    fn invalid_level_rejected_eagerly() {
        let config = CompressionConfig {
            level: 12,
            ..CompressionConfig::default()
        };
        assert!(matches!(
            Compressor::new(&config),
            Err(CompressError::InvalidLevel { level: 12 })
        ));
    }
}
