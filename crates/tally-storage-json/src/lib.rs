//! Filesystem-backed JSON persistence for budget book snapshots.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tally_core::{BookStorage, CoreError};
use tally_domain::BudgetBook;

const BOOK_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each workspace book as one pretty-printed JSON file,
/// written atomically via a temp file and rename.
#[derive(Debug, Clone)]
pub struct JsonBookStorage {
    books_dir: PathBuf,
}

impl JsonBookStorage {
    pub fn new(books_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&books_dir)?;
        Ok(Self { books_dir })
    }

    pub fn book_path(&self, name: &str) -> PathBuf {
        self.books_dir
            .join(format!("{}.{}", canonical_name(name), BOOK_EXTENSION))
    }
}

impl BookStorage for JsonBookStorage {
    fn save_book(&self, name: &str, book: &BudgetBook) -> Result<(), CoreError> {
        let path = self.book_path(name);
        let json = serde_json::to_string_pretty(book)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load_book(&self, name: &str) -> Result<BudgetBook, CoreError> {
        let path = self.book_path(name);
        if !path.exists() {
            return Err(CoreError::Storage(format!(
                "book `{}` not found at {}",
                name,
                path.display()
            )));
        }
        let data = fs::read_to_string(&path)?;
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }

    fn list_books(&self) -> Result<Vec<String>, CoreError> {
        if !self.books_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.books_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(BOOK_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_book(&self, name: &str) -> Result<(), CoreError> {
        let path = self.book_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Lowercase slug used for filenames: alphanumerics kept, everything
/// else collapsed to single dashes.
fn canonical_name(name: &str) -> String {
    let mut slug = String::new();
    let mut last_dash = false;
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !slug.is_empty() && !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let trimmed = slug.trim_matches('-').to_string();
    if trimmed.is_empty() {
        "book".to_string()
    } else {
        trimmed
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_slugs_workspace_titles() {
        assert_eq!(canonical_name("Acme Corp 2025"), "acme-corp-2025");
        assert_eq!(canonical_name("  --Weird__Name--  "), "weird-name");
        assert_eq!(canonical_name("!!!"), "book");
    }
}
