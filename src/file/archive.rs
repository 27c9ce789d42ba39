//! Zip archive generation for whole folders.
//!
//! The archive is written entry by entry into any `Write + Seek` sink and is
//! only handed back once the central directory has been written, so callers
//! see every failure before a single byte reaches the client.

use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::Result;

/// Deflate level used for every entry.
pub const COMPRESSION_LEVEL: i64 = 9;

fn entry_options(size: u64) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL))
        .large_file(size >= u64::from(u32::MAX))
}

/// Write every file under `dir` into a zip archive on `sink`.
///
/// Entry names are relative to `dir` and use `/` separators. Nested
/// directories are descended into and get their own directory entries.
pub fn write_folder_archive<W: Write + Seek>(dir: &Path, sink: W) -> Result<W> {
    let mut zip = ZipWriter::new(sink);
    add_directory_contents(&mut zip, dir, "")?;
    Ok(zip.finish()?)
}

/// Spool a folder archive into an anonymous temporary file.
///
/// Returns the file rewound to the start together with the archive length.
/// The file is unlinked by the OS once the handle is dropped.
pub fn spool_folder_archive(dir: &Path) -> Result<(File, u64)> {
    let mut file = write_folder_archive(dir, tempfile::tempfile()?)?;
    let len = file.stream_position()?;
    file.rewind()?;
    Ok((file, len))
}

fn add_directory_contents<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    dir: &Path,
    prefix: &str,
) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = format!("{}{}", prefix, entry.file_name().to_string_lossy());
        let metadata = fs::metadata(&path)?;

        if metadata.is_dir() {
            zip.add_directory(format!("{name}/"), entry_options(0))?;
            add_directory_contents(zip, &path, &format!("{name}/"))?;
        } else {
            zip.start_file(name, entry_options(metadata.len()))?;
            let mut file = File::open(&path)?;
            io::copy(&mut file, zip)?;
        }
    }

    Ok(())
}
