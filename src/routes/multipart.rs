use std::collections::HashMap;

use axum::extract::{Multipart, multipart::MultipartError};

use crate::{
    error::{AppError, AppResult},
    services::file_service::UploadedFile,
};

/// A multipart body split into its text fields and file parts.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

fn invalid(err: MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
}

/// Reads the whole form. Parts with a filename are files, empty file parts are skipped.
pub async fn read_form(mut multipart: Multipart) -> AppResult<MultipartForm> {
    let mut form = MultipartForm::default();
    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(invalid)?;
                if bytes.is_empty() {
                    continue;
                }
                form.files.insert(
                    name,
                    UploadedFile {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    },
                );
            }
            None => {
                let text = field.text().await.map_err(invalid)?;
                form.fields.insert(name, text);
            }
        }
    }
    Ok(form)
}
