//! Snapshot file reading and writing.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{HotelError, Result};
use crate::record::{encode_all, Record};

/// Load every complete record from `path`, in file order
pub fn load<R: Record>(path: &Path) -> Result<Vec<R>> {
    let blocks = read_blocks(path, R::SIZE)?;
    Ok(blocks.iter().map(|block| R::decode(block)).collect())
}

/// Read `path` as consecutive `record_size`-byte blocks
///
/// Returns no blocks if the file does not exist. A trailing partial block
/// is dropped.
pub fn read_blocks(path: &Path, record_size: usize) -> Result<Vec<Vec<u8>>> {
    if record_size == 0 {
        return Err(HotelError::Persistence(
            "record size must be non-zero".to_string(),
        ));
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No snapshot at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut reader = BufReader::new(file);
    let mut blocks = Vec::new();

    loop {
        let mut block = vec![0u8; record_size];
        let filled = fill_block(&mut reader, &mut block)?;

        if filled == record_size {
            blocks.push(block);
            continue;
        }

        if filled > 0 {
            tracing::warn!(
                "Ignoring {} trailing bytes in {} (partial record)",
                filled,
                path.display()
            );
        }
        break;
    }

    tracing::debug!("Loaded {} records from {}", blocks.len(), path.display());
    Ok(blocks)
}

/// Rewrite `path` with `records`, in the order given
pub fn snapshot<'a, R, I>(path: &Path, records: I) -> Result<()>
where
    R: Record,
    I: IntoIterator<Item = &'a R>,
{
    write_image(path, &encode_all(records))
}

/// Replace the contents of `path` with `image`
///
/// Writes a sibling temp file, syncs it, then renames it over `path`, so
/// readers see either the previous snapshot or this one.
pub fn write_image(path: &Path, image: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);

    if let Err(e) = replace_with(path, &tmp, image) {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            if cleanup.kind() != io::ErrorKind::NotFound {
                tracing::warn!("Could not remove {}: {}", tmp.display(), cleanup);
            }
        }
        return Err(e);
    }

    tracing::debug!("Wrote {} bytes to {}", image.len(), path.display());
    Ok(())
}

fn replace_with(path: &Path, tmp: &Path, image: &[u8]) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp)?;

    let mut writer = BufWriter::new(file);
    writer.write_all(image)?;

    let file = writer.into_inner().map_err(|e| {
        HotelError::Persistence(format!("Failed to flush {}: {}", tmp.display(), e))
    })?;
    file.sync_all()?;

    fs::rename(tmp, path)?;
    Ok(())
}

/// Read until `buf` is full or EOF; returns the number of bytes read
fn fill_block<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// "room.dat" → "room.dat.tmp"
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
