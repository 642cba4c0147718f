use super::{ParcelId, ParcelStore};
use crate::parcel::PolygonSet;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Keeps each parcel's wire array in `<dir>/<parcel>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn parcel_path(&self, parcel: ParcelId) -> PathBuf {
        self.dir.join(format!("{}.json", parcel))
    }
}

impl ParcelStore for FileStore {
    fn load(&self, parcel: ParcelId) -> Result<PolygonSet> {
        let path = self.parcel_path(parcel);
        if !path.exists() {
            log::debug!("no polygons stored for parcel {} at {}", parcel, path.display());
            return Ok(PolygonSet::new());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read parcel file: {}", path.display()))?;
        let set = PolygonSet::from_json_str(&contents)
            .with_context(|| format!("Failed to parse parcel file: {}", path.display()))?;

        log::debug!("loaded {} polygons for parcel {}", set.len(), parcel);
        Ok(set)
    }

    fn save(&self, parcel: ParcelId, polygons: &PolygonSet) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create store directory: {}", self.dir.display()))?;

        // Write beside the target and rename so readers never see a partial file
        let path = self.parcel_path(parcel);
        let tmp = path.with_extension("json.tmp");
        let text = polygons
            .to_json_string()
            .context("Failed to encode parcel polygons")?;
        fs::write(&tmp, text)
            .with_context(|| format!("Failed to write parcel file: {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace parcel file: {}", path.display()))?;

        log::debug!("saved {} polygons for parcel {}", polygons.len(), parcel);
        Ok(())
    }
}
