// SPDX-License-Identifier: MPL-2.0
//! Multipart payload sent to the pixelation service.
//!
//! [`UploadForm`] is a plain description of the parts so the payload can be
//! inspected in tests; [`UploadForm::into_multipart`] turns it into the
//! `reqwest` form at send time.

use super::file::SelectedFile;
use crate::config::EndpointConfig;
use crate::error::SubmissionError;
use reqwest::multipart::{Form, Part};

/// Value sent in the flag field when the toggle is on.
pub const FLAG_ON_VALUE: &str = "true";

/// Names of the multipart fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub file: String,
    pub flag: String,
}

impl From<&EndpointConfig> for FieldNames {
    fn from(endpoint: &EndpointConfig) -> Self {
        Self {
            file: endpoint.file_field.clone(),
            flag: endpoint.flag_field.clone(),
        }
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self::from(&EndpointConfig::default())
    }
}

/// One part of the multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    File {
        name: String,
        file: SelectedFile,
    },
    Text {
        name: String,
        value: String,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::File { name, .. } | FormPart::Text { name, .. } => name,
        }
    }
}

/// Ordered list of parts making up one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    parts: Vec<FormPart>,
}

impl UploadForm {
    /// Builds the payload: the file always, the flag only when enabled.
    pub fn build(file: SelectedFile, flag_enabled: bool, fields: &FieldNames) -> Self {
        let mut parts = vec![FormPart::File {
            name: fields.file.clone(),
            file,
        }];
        if flag_enabled {
            parts.push(FormPart::Text {
                name: fields.flag.clone(),
                value: FLAG_ON_VALUE.to_string(),
            });
        }
        Self { parts }
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Returns the value of the text field `name`, if present.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Returns the file carried under `name`, if present.
    pub fn file(&self, name: &str) -> Option<&SelectedFile> {
        self.parts.iter().find_map(|part| match part {
            FormPart::File { name: n, file } if n == name => Some(file),
            _ => None,
        })
    }

    /// Converts into a `reqwest` multipart form.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Transport`] if a declared media type is not a
    /// valid MIME string.
    pub fn into_multipart(self) -> Result<Form, SubmissionError> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part {
                FormPart::File { name, file } => {
                    let file_name = file.name().to_string();
                    let media_type = file.media_type().to_string();
                    let body = Part::bytes(file.bytes().to_vec())
                        .file_name(file_name)
                        .mime_str(&media_type)
                        .map_err(|err| SubmissionError::Transport(err.to_string()))?;
                    form.part(name, body)
                }
                FormPart::Text { name, value } => form.text(name, value),
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> SelectedFile {
        SelectedFile::new("kid.png", "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn flag_on_adds_true_field() {
        let form = UploadForm::build(png(), true, &FieldNames::default());
        assert_eq!(form.text("debug"), Some("true"));
        assert_eq!(form.parts().len(), 2);
    }

    #[test]
    fn flag_off_omits_field_entirely() {
        let form = UploadForm::build(png(), false, &FieldNames::default());
        assert_eq!(form.text("debug"), None);
        assert!(form.parts().iter().all(|part| part.name() != "debug"));
        assert_eq!(form.parts().len(), 1);
    }

    #[test]
    fn file_goes_under_configured_field() {
        let fields = FieldNames {
            file: "imagen".into(),
            flag: "depurar".into(),
        };
        let form = UploadForm::build(png(), true, &fields);
        assert_eq!(form.file("imagen"), Some(&png()));
        assert!(form.file("file").is_none());
        assert_eq!(form.text("depurar"), Some("true"));
    }

    #[test]
    fn file_part_comes_first() {
        let form = UploadForm::build(png(), true, &FieldNames::default());
        assert!(matches!(form.parts()[0], FormPart::File { .. }));
    }

    #[test]
    fn into_multipart_accepts_declared_types() {
        let form = UploadForm::build(png(), true, &FieldNames::default());
        assert!(form.into_multipart().is_ok());
    }

    #[test]
    fn into_multipart_rejects_malformed_media_type() {
        let file = SelectedFile::new("x.png", "not a mime", vec![1]);
        let form = UploadForm::build(file, false, &FieldNames::default());
        assert!(matches!(
            form.into_multipart(),
            Err(SubmissionError::Transport(_))
        ));
    }
}
