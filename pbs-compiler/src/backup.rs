use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where the previous contents of `path` are kept while it is rewritten.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

/// Replace `path` with whatever `action` writes, keeping a backup.
///
/// An existing file is first copied to `<path>.backup`. If `action` fails
/// the backup is moved back into place; on success it is deleted.
pub fn write_file_with_backup<F>(path: &Path, action: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let backup = backup_path(path);
    let had_original = path.exists();
    if had_original {
        fs::copy(path, &backup)?;
    }

    match write_with(path, action) {
        Ok(()) => {
            if had_original {
                fs::remove_file(&backup)?;
            }
            Ok(())
        }
        Err(e) => {
            if had_original {
                if let Err(restore) = fs::rename(&backup, path) {
                    log::error!(
                        "Could not restore {} from {}: {restore}",
                        path.display(),
                        backup.display()
                    );
                }
            } else {
                let _ = fs::remove_file(path);
            }
            Err(e)
        }
    }
}

/// Replace `path` without keeping a backup.
pub fn write_file<F>(path: &Path, action: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    write_with(path, action)
}

fn write_with<F>(path: &Path, action: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    action(&mut writer)?;
    writer.flush()
}
