//! Raw DEFLATE streams over the selected backend.

use miniz_oxide::inflate::TINFLStatus;

use crate::backend::Engine;
use crate::error::{CompressError, CompressResult};

pub(crate) fn deflate(engine: Engine, level: u8, data: &[u8]) -> CompressResult<Vec<u8>> {
    match engine {
        Engine::Miniz => Ok(miniz_oxide::deflate::compress_to_vec(data, level)),
        #[cfg(feature = "flate2")]
        Engine::Flate2 => flate2_deflate(level, data),
        Engine::Passthrough => Ok(data.to_vec()),
    }
}

pub(crate) fn inflate(engine: Engine, data: &[u8], limit: usize) -> CompressResult<Vec<u8>> {
    match engine {
        Engine::Miniz => miniz_inflate(data, limit),
        #[cfg(feature = "flate2")]
        Engine::Flate2 => flate2_inflate(data, limit),
        Engine::Passthrough => {
            if data.len() > limit {
                return Err(CompressError::InflatedTooLarge { limit });
            }
            Ok(data.to_vec())
        }
    }
}

fn miniz_inflate(data: &[u8], limit: usize) -> CompressResult<Vec<u8>> {
    miniz_oxide::inflate::decompress_to_vec_with_limit(data, limit).map_err(|err| {
        match err.status {
            TINFLStatus::HasMoreOutput => CompressError::InflatedTooLarge { limit },
            status => CompressError::Inflate {
                reason: format!("{status:?}"),
            },
        }
    })
}

#[cfg(feature = "flate2")]
fn flate2_deflate(level: u8, data: &[u8]) -> CompressResult<Vec<u8>> {
    use std::io::Write;

    let mut encoder = flate2::write::DeflateEncoder::new(
        Vec::with_capacity(data.len() / 2 + 16),
        flate2::Compression::new(u32::from(level)),
    );
    let to_error = |err: std::io::Error| CompressError::Deflate {
        reason: err.to_string(),
    };
    encoder.write_all(data).map_err(to_error)?;
    encoder.finish().map_err(to_error)
}

#[cfg(feature = "flate2")]
fn flate2_inflate(data: &[u8], limit: usize) -> CompressResult<Vec<u8>> {
    use std::io::Read;

    let mut out = Vec::new();
    flate2::read::DeflateDecoder::new(data)
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut out)
        .map_err(|err| CompressError::Inflate {
            reason: err.to_string(),
        })?;
    if out.len() > limit {
        return Err(CompressError::InflatedTooLarge { limit });
    }
    Ok(out)
}
