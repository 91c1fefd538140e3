//! Runtime settings for the file-level operations.

use std::path::{Path, PathBuf};

use crate::codec::AutoSafe;
use crate::store::ExtensionClassifier;

/// Inputs below this size are refused by the interactive menu
pub const DEFAULT_MIN_INPUT_SIZE: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub autosafe: AutoSafe,
    pub min_input_size: u64,
    pub accepted_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            autosafe: AutoSafe::Reject,
            min_input_size: DEFAULT_MIN_INPUT_SIZE,
            accepted_extensions: vec!["txt".to_string()],
        }
    }
}

impl Settings {
    pub fn classifier(&self) -> ExtensionClassifier {
        ExtensionClassifier::new(&self.accepted_extensions)
    }
}

/// File names used by the interactive menu, all relative to one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPaths {
    pub base: PathBuf,
    pub compressed: PathBuf,
    pub decompressed: PathBuf,
    pub encrypted: PathBuf,
    pub decrypted: PathBuf,
}

impl MenuPaths {
    pub fn in_dir(dir: &Path, base: &Path) -> Self {
        MenuPaths {
            base: dir.join(base),
            compressed: dir.join("textocomprimido.txt"),
            decompressed: dir.join("textodescomprimido.txt"),
            encrypted: dir.join("textoencriptado.txt"),
            decrypted: dir.join("textodesencriptado.txt"),
        }
    }
}

impl Default for MenuPaths {
    fn default() -> Self {
        MenuPaths::in_dir(Path::new("."), Path::new("base.txt"))
    }
}
