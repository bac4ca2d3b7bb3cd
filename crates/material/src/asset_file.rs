//! The on-disk form of a set of compute-color parameters.
//!
//! A [ParameterAsset] can be stored as JSON (readable, easy to diff and hand
//! edit) or with a compact binary encoding (what a build step would ship). The
//! format is picked from the file extension, see [AssetFormat::from_path].

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use thiserror::Error;

use crate::compute_colors::ComputeColorParameters;

/// The newest format version this crate reads, and the one it writes.
pub const FORMAT_VERSION: u32 = 1;

/// File extension of the JSON encoding.
pub const JSON_EXTENSION: &str = "json";

/// File extension of the binary encoding.
pub const BINARY_EXTENSION: &str = "matp";

/// How a [ParameterAsset] is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetFormat {
    Json,
    Binary,
}

impl AssetFormat {
    /// Picks the format from the extension of `path` (`.json` or `.matp`).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AssetFileError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(JSON_EXTENSION) => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case(BINARY_EXTENSION) => Ok(Self::Binary),
            _ => Err(AssetFileError::UnknownExtension(path.to_path_buf())),
        }
    }
}

/// A versioned set of named compute-color parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParameterAsset {
    pub format_version: u32,
    pub parameters: ComputeColorParameters,
}

impl ParameterAsset {
    pub fn new(parameters: ComputeColorParameters) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            parameters,
        }
    }

    /// Encode the asset into `writer`. Fails before writing anything if a
    /// parameter holds a `NaN` or infinite float.
    ///
    /// JSON is pretty printed in debug builds.
    pub fn write_to<W: Write>(&self, writer: W, format: AssetFormat) -> Result<(), AssetFileError> {
        self.ensure_finite()?;
        let mut writer = BufWriter::new(writer);

        match format {
            AssetFormat::Json if cfg!(debug_assertions) => {
                serde_json::to_writer_pretty(&mut writer, self)?
            }
            AssetFormat::Json => serde_json::to_writer(&mut writer, self)?,
            AssetFormat::Binary => writer.write_all(&postcard::to_allocvec(self)?)?,
        }

        writer.flush()?;
        Ok(())
    }

    /// Decode an asset from `reader`, rejecting versions newer than
    /// [FORMAT_VERSION].
    pub fn read_from<R: Read>(reader: R, format: AssetFormat) -> Result<Self, AssetFileError> {
        let asset: Self = match format {
            AssetFormat::Json => serde_json::from_reader(BufReader::new(reader))?,
            AssetFormat::Binary => {
                let mut bytes = Vec::new();
                BufReader::new(reader).read_to_end(&mut bytes)?;
                let (asset, rest) = postcard::take_from_bytes::<Self>(&bytes)?;
                if !rest.is_empty() {
                    return Err(AssetFileError::TrailingBytes(rest.len()));
                }
                asset
            }
        };

        if asset.format_version > FORMAT_VERSION {
            log::error!(
                "Parameter asset has format version {}, newest supported is {FORMAT_VERSION}",
                asset.format_version
            );
            return Err(AssetFileError::UnsupportedVersion {
                found: asset.format_version,
                supported: FORMAT_VERSION,
            });
        }

        asset.ensure_finite()?;
        Ok(asset)
    }

    fn ensure_finite(&self) -> Result<(), AssetFileError> {
        match self.parameters.first_non_finite() {
            Some(name) => Err(AssetFileError::NonFiniteValue(name.to_string())),
            None => Ok(()),
        }
    }

    /// Write the asset to `path`, replacing the file if it exists. The format
    /// is picked from the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AssetFileError> {
        let path = path.as_ref();
        let format = AssetFormat::from_path(path)?;
        self.ensure_finite()?;

        log::debug!(
            "Writing {} parameters to {} as {format:?}",
            self.parameters.len(),
            path.display()
        );
        let file = File::create(path).inspect_err(|e| {
            log::error!("Failed to create {}: {e}", path.display());
        })?;
        self.write_to(file, format)
    }

    /// Read an asset from `path`. The format is picked from the extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AssetFileError> {
        let path = path.as_ref();
        let format = AssetFormat::from_path(path)?;

        log::debug!("Reading parameters from {} as {format:?}", path.display());
        let file = File::open(path)?;
        Self::read_from(file, format).inspect_err(|e| {
            log::error!("Failed to read {}: {e}", path.display());
        })
    }

    /// Read an asset from `path`, or save the result of `f` there if the file
    /// doesn't exist yet.
    pub fn load_or_create<P, F>(path: P, f: F) -> Result<Self, AssetFileError>
    where
        P: AsRef<Path>,
        F: FnOnce() -> Self,
    {
        let path = path.as_ref();
        match fs::metadata(path) {
            Ok(_) => Self::load(path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Creating new parameter asset {}", path.display());
                let asset = f();
                asset.save(path)?;
                Ok(asset)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for ParameterAsset {
    fn default() -> Self {
        Self::new(ComputeColorParameters::default())
    }
}

/// Indicates that a parameter asset couldn't be read or written.
#[derive(Error, Debug)]
pub enum AssetFileError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Bad JSON parameter data: {0}")]
    Json(serde_json::Error),

    #[error("Bad binary parameter data: {0}")]
    Binary(postcard::Error),

    #[error("Unsupported format version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Parameter '{0}' holds a NaN or infinite value, which can't be stored")]
    NonFiniteValue(String),

    #[error("Binary parameter data has {0} unexpected trailing bytes")]
    TrailingBytes(usize),

    #[error("Unknown parameter asset extension for {0:?} (expected .json or .matp)")]
    UnknownExtension(PathBuf),
}

impl From<serde_json::Error> for AssetFileError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            AssetFileError::Io(e.into())
        } else {
            AssetFileError::Json(e)
        }
    }
}

impl From<postcard::Error> for AssetFileError {
    fn from(e: postcard::Error) -> Self {
        AssetFileError::Binary(e)
    }
}
