use std::{fmt::Debug, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;

pub fn read_toml<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| toml::from_str(&fs_err::read_to_string(&path)?).map_err(anyhow::Error::new))().with_context(
        || {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        },
    )
}

/// Writes `contents` to `path` unless the file already holds exactly those bytes.
///
/// Returns whether the file was (re)written.
pub fn write_if_changed<P: Into<PathBuf>>(path: P, contents: &[u8]) -> anyhow::Result<bool> {
    let path = path.into();
    match fs_err::read(&path) {
        Ok(current) if current == contents => return Ok(false),
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    fs_err::write(&path, contents)?;
    Ok(true)
}
