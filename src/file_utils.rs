use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File utilities for the controller layer

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for translated subtitle
    // @params: input_file, output_dir, target_language, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        target_language: &str,
        extension: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let output_dir = output_dir.as_ref();

        // Get the file stem (filename without extension)
        let stem = input_file.file_stem().unwrap_or_default();

        // Create the output filename with language code and extension
        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(target_language);
        output_filename.push('.');
        output_filename.push_str(extension);

        // Join with the output directory
        output_dir.join(output_filename)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
