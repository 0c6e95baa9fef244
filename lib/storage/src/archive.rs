// On-disk workbook container: gzip-compressed tar with a JSON manifest
use crate::config::CodecConfig;
use crate::workbook::{MemoryWorkbook, Workbook};
use anyhow::{anyhow, bail, Context};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use momo_core::{Error, Result, Table};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ARCHIVE_FORMAT: &str = "momo-workbook";
pub const ARCHIVE_VERSION: u32 = 1;
const MANIFEST_ENTRY: &str = "manifest.json";

#[derive(Debug, Serialize, Deserialize)]
struct Manifest {
    format: String,
    version: u32,
    created_at: String,
    sheets: Vec<ManifestSheet>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ManifestSheet {
    name: String,
    entry: String,
    sha256: String,
}

#[derive(Debug, Clone)]
struct RawSheet {
    name: String,
    /// `None` when the manifest lists a sheet the archive does not contain
    data: Option<Vec<u8>>,
    sha256: String,
}

/// Multi-sheet container stored as a single file.
///
/// Opening reads the whole file into memory and closes it; sheets are kept
/// serialized and only parsed when read, so one damaged sheet does not stop
/// the others from being read.
#[derive(Debug, Clone)]
pub struct ArchiveWorkbook {
    sheets: Vec<RawSheet>,
    verify_checksums: bool,
}

impl Default for ArchiveWorkbook {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveWorkbook {
    pub fn new() -> Self {
        Self {
            sheets: Vec::new(),
            verify_checksums: true,
        }
    }

    /// Serialize every sheet of an in-memory workbook
    pub fn from_memory(workbook: &MemoryWorkbook) -> Result<Self> {
        let mut archive = Self::new();
        for (name, table) in workbook.iter() {
            archive.write_sheet(name, table.clone())?;
        }
        Ok(archive)
    }

    pub fn open<P: AsRef<Path>>(path: P, config: &CodecConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::load(path.display().to_string(), e.to_string()))?;
        let archive = Self::from_reader(BufReader::new(file), config.verify_checksums)
            .map_err(|e| Error::load(path.display().to_string(), format!("{:#}", e)))?;
        debug!("Opened {:?}: {} sheets", path, archive.sheets.len());
        Ok(archive)
    }

    pub fn from_reader<R: Read>(reader: R, verify_checksums: bool) -> anyhow::Result<Self> {
        let mut archive = tar::Archive::new(GzDecoder::new(reader));
        let mut entries: HashMap<String, Vec<u8>> = HashMap::new();
        for entry in archive.entries().context("not a workbook container")? {
            let mut entry = entry?;
            let path = entry.path()?.to_string_lossy().into_owned();
            let mut data = Vec::new();
            entry.read_to_end(&mut data)?;
            entries.insert(path, data);
        }

        let manifest_bytes = entries
            .remove(MANIFEST_ENTRY)
            .ok_or_else(|| anyhow!("container has no {}", MANIFEST_ENTRY))?;
        let manifest: Manifest =
            serde_json::from_slice(&manifest_bytes).context("unreadable container manifest")?;

        if manifest.format != ARCHIVE_FORMAT {
            bail!("unexpected container format '{}'", manifest.format);
        }
        if manifest.version > ARCHIVE_VERSION {
            bail!(
                "container version {} is newer than supported version {}",
                manifest.version,
                ARCHIVE_VERSION
            );
        }

        let sheets = manifest
            .sheets
            .into_iter()
            .map(|s| RawSheet {
                data: entries.remove(&s.entry),
                name: s.name,
                sha256: s.sha256,
            })
            .collect();

        Ok(Self {
            sheets,
            verify_checksums,
        })
    }

    /// Encode the container into bytes
    pub fn to_bytes(&self, config: &CodecConfig) -> anyhow::Result<Vec<u8>> {
        let timestamp = config.timestamp();
        let mtime = timestamp.timestamp().max(0) as u64;

        let mut manifest = Manifest {
            format: ARCHIVE_FORMAT.to_string(),
            version: ARCHIVE_VERSION,
            created_at: timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            sheets: Vec::with_capacity(self.sheets.len()),
        };

        let encoder = GzEncoder::new(Vec::new(), Compression::new(config.compression_level.min(9)));
        let mut builder = tar::Builder::new(encoder);

        let mut bodies = Vec::with_capacity(self.sheets.len());
        for (i, sheet) in self.sheets.iter().enumerate() {
            let data = sheet
                .data
                .as_deref()
                .ok_or_else(|| anyhow!("sheet '{}' has no data", sheet.name))?;
            let entry = format!("sheets/{:04}.json", i);
            manifest.sheets.push(ManifestSheet {
                name: sheet.name.clone(),
                entry: entry.clone(),
                sha256: sheet.sha256.clone(),
            });
            bodies.push((entry, data));
        }

        let manifest_bytes = serde_json::to_vec_pretty(&manifest)?;
        append_entry(&mut builder, MANIFEST_ENTRY, &manifest_bytes, mtime)?;
        for (entry, data) in bodies {
            append_entry(&mut builder, &entry, data, mtime)?;
        }

        let encoder = builder.into_inner()?;
        Ok(encoder.finish()?)
    }

    /// Write the container to `path`, replacing any existing file.
    ///
    /// The destination is only touched by a final rename, so a failure
    /// leaves whatever was there before.
    pub fn save<P: AsRef<Path>>(&self, path: P, config: &CodecConfig) -> Result<PathBuf> {
        let path = path.as_ref();
        let bytes = self
            .to_bytes(config)
            .map_err(|e| Error::Serialization(format!("{:#}", e)))?;

        AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(&bytes))
            .map_err(|e| match e {
                atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => Error::Io(e),
            })?;

        debug!("Saved {} sheets to {:?} ({} bytes)", self.sheets.len(), path, bytes.len());
        Ok(path.to_path_buf())
    }
}

fn append_entry<W: Write>(
    builder: &mut tar::Builder<W>,
    path: &str,
    data: &[u8],
    mtime: u64,
) -> std::io::Result<()> {
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(mtime);
    builder.append_data(&mut header, path, data)
}

impl Workbook for ArchiveWorkbook {
    fn list_sheets(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn read_sheet(&self, name: &str) -> Result<Table> {
        let sheet = self
            .sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::InvalidFormat(format!("Sheet '{}' not found", name)))?;
        let data = sheet
            .data
            .as_deref()
            .ok_or_else(|| Error::decode(name, None, "sheet data missing from container"))?;

        if self.verify_checksums {
            let actual = format!("{:x}", Sha256::digest(data));
            if actual != sheet.sha256 {
                return Err(Error::decode(
                    name,
                    None,
                    format!("checksum mismatch: expected {}, got {}", sheet.sha256, actual),
                ));
            }
        }

        serde_json::from_slice(data).map_err(|e| Error::decode(name, None, e.to_string()))
    }

    fn write_sheet(&mut self, name: &str, table: Table) -> Result<()> {
        if name.is_empty() {
            return Err(Error::Validation("Sheet name cannot be empty".to_string()));
        }
        let data = serde_json::to_vec(&table).map_err(|e| Error::Serialization(e.to_string()))?;
        let sha256 = format!("{:x}", Sha256::digest(&data));

        match self.sheets.iter_mut().find(|s| s.name == name) {
            Some(sheet) => {
                sheet.data = Some(data);
                sheet.sha256 = sha256;
            }
            None => self.sheets.push(RawSheet {
                name: name.to_string(),
                data: Some(data),
                sha256,
            }),
        }
        Ok(())
    }
}
