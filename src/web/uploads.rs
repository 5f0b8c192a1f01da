use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use axum::extract::Multipart;
use tokio::{fs::File, io::AsyncWriteExt};

/// Result type used by the shared upload helpers.
pub type UploadResult<T> = Result<T, UploadError>;

/// Error returned when validating or persisting an uploaded file.
#[derive(Debug)]
pub struct UploadError {
    message: String,
}

impl UploadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UploadError {}

/// Expectations for the single file field of a form.
#[derive(Debug, Clone, Copy)]
pub struct FileFieldConfig<'a> {
    pub field_name: &'a str,
    pub allowed_extensions: &'a [&'a str],
    pub stored_prefix: &'a str,
}

impl<'a> FileFieldConfig<'a> {
    pub fn new(
        field_name: &'a str,
        allowed_extensions: &'a [&'a str],
        stored_prefix: &'a str,
    ) -> Self {
        Self {
            field_name,
            allowed_extensions,
            stored_prefix,
        }
    }
}

/// Metadata describing a stored upload on disk.
#[derive(Debug, Clone)]
pub struct SavedFile {
    pub original_name: String,
    pub stored_path: PathBuf,
    pub file_size: u64,
}

/// Aggregated output of the shared upload processor.
#[derive(Debug)]
pub struct UploadOutcome {
    pub file: SavedFile,
    pub text_fields: HashMap<String, String>,
}

impl UploadOutcome {
    pub fn text_value(&self, field_name: &str) -> Option<&str> {
        self.text_fields.get(field_name).map(|value| value.as_str())
    }
}

/// Ensures the destination directory exists.
pub async fn ensure_directory(path: &Path) -> UploadResult<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| UploadError::new(format!("failed to create upload directory: {err}")))
}

/// Parses a multipart form holding one file plus any number of text fields,
/// persisting the file into `dest_dir`.
///
/// The caller is responsible for creating a unique destination directory
/// (e.g. per request) and for removing it when done.
pub async fn process_upload_form(
    mut multipart: Multipart,
    dest_dir: &Path,
    config: &FileFieldConfig<'_>,
) -> UploadResult<UploadOutcome> {
    ensure_directory(dest_dir).await?;

    let mut text_fields: HashMap<String, String> = HashMap::new();
    let mut saved_file: Option<SavedFile> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|err| UploadError::new(format!("failed to parse upload form: {err}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        if field.file_name().is_none() {
            let value = field.text().await.map_err(|err| {
                UploadError::new(format!("failed to read field `{field_name}`: {err}"))
            })?;
            text_fields.insert(field_name, value);
            continue;
        }

        if field_name != config.field_name {
            return Err(UploadError::new(format!(
                "unsupported file field: `{field_name}`"
            )));
        }
        if saved_file.is_some() {
            return Err(UploadError::new("only a single file may be uploaded"));
        }

        let file_name = field.file_name().unwrap_or("upload.bin").to_string();
        let extension = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if !config
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
        {
            return Err(UploadError::new(format!(
                "`{extension}` files are not supported; upload one of: {}",
                config.allowed_extensions.join(", ")
            )));
        }

        let stored_name = stored_name_for(config.stored_prefix, &file_name, &extension);
        let stored_path = dest_dir.join(&stored_name);
        let mut file = File::create(&stored_path)
            .await
            .map_err(|err| UploadError::new(format!("failed to store upload: {err}")))?;

        let mut total_bytes: u64 = 0;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|err| UploadError::new(format!("failed to read upload data: {err}")))?
        {
            total_bytes += chunk.len() as u64;
            file.write_all(&chunk)
                .await
                .map_err(|err| UploadError::new(format!("failed to write upload: {err}")))?;
        }
        file.flush()
            .await
            .map_err(|err| UploadError::new(format!("failed to flush upload: {err}")))?;

        saved_file = Some(SavedFile {
            original_name: file_name,
            stored_path,
            file_size: total_bytes,
        });
    }

    let Some(file) = saved_file else {
        return Err(UploadError::new("no file was uploaded"));
    };

    Ok(UploadOutcome { file, text_fields })
}

fn stored_name_for(prefix: &str, original_name: &str, extension: &str) -> String {
    let mut sanitized = sanitize_filename::sanitize(original_name);
    if sanitized.is_empty() {
        sanitized = if extension.is_empty() {
            "file".to_string()
        } else {
            format!("file.{extension}")
        };
    }
    format!("{prefix}{sanitized}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_name_keeps_prefix_and_sanitized_original() {
        assert_eq!(
            stored_name_for("source_", "manuscript.docx", "docx"),
            "source_manuscript.docx"
        );

        let traversal = stored_name_for("source_", "../../etc/passwd.txt", "txt");
        assert!(traversal.starts_with("source_"));
        assert!(!traversal.contains('/'));
    }

    #[test]
    fn stored_name_falls_back_when_sanitizing_removes_everything() {
        assert_eq!(stored_name_for("source_", "", "docx"), "source_file.docx");
        assert_eq!(stored_name_for("source_", "", ""), "source_file");
    }
}
