//! Uploaded file items and request size limits

use serde::{Deserialize, Serialize};

use crate::Context;

/// Upload limit violations detected before a form processes its fields.
///
/// A violation is stored as a request attribute of this type; forms read it
/// during validation and turn it into a form-level error.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
	#[error("Request too large: {actual} bytes (max: {permitted} bytes)")]
	SizeLimitExceeded { permitted: u64, actual: u64 },
	#[error("File {field} too large: {actual} bytes (max: {permitted} bytes)")]
	FileSizeLimitExceeded {
		field: String,
		permitted: u64,
		actual: u64,
	},
	#[error("Malformed multipart request: {reason}")]
	Malformed { reason: String },
}

/// A file submitted with a multipart request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
	field_name: String,
	file_name: String,
	content_type: Option<String>,
	data: Vec<u8>,
}

impl FileItem {
	/// # Examples
	///
	/// ```
	/// use clickwork_http::FileItem;
	///
	/// let item = FileItem::new("photo", "me.png", b"\x89PNG".to_vec())
	///     .with_content_type("image/png");
	/// assert_eq!(item.size(), 4);
	/// assert_eq!(item.content_type(), Some("image/png"));
	/// ```
	pub fn new(field_name: impl Into<String>, file_name: impl Into<String>, data: Vec<u8>) -> Self {
		Self {
			field_name: field_name.into(),
			file_name: file_name.into(),
			content_type: None,
			data,
		}
	}

	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	pub fn field_name(&self) -> &str {
		&self.field_name
	}

	/// The client-supplied file name with any directory part removed
	pub fn file_name(&self) -> &str {
		self.file_name
			.rsplit(['/', '\\'])
			.next()
			.unwrap_or(&self.file_name)
	}

	pub fn content_type(&self) -> Option<&str> {
		self.content_type.as_deref()
	}

	pub fn data(&self) -> &[u8] {
		&self.data
	}

	pub fn size(&self) -> u64 {
		self.data.len() as u64
	}
}

/// Size limits applied to multipart requests.
///
/// `None` means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
	pub size_max: Option<u64>,
	pub file_size_max: Option<u64>,
}

impl UploadPolicy {
	/// # Examples
	///
	/// ```
	/// use clickwork_http::UploadPolicy;
	///
	/// let policy = UploadPolicy::new().with_size_max(1024).with_file_size_max(512);
	/// assert_eq!(policy.size_max, Some(1024));
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_size_max(mut self, size_max: u64) -> Self {
		self.size_max = Some(size_max);
		self
	}

	pub fn with_file_size_max(mut self, file_size_max: u64) -> Self {
		self.file_size_max = Some(file_size_max);
		self
	}

	/// Check the request's content length and file items against the limits.
	///
	/// The first violation found is stored as the request's upload error
	/// attribute and returned.
	pub fn apply(&self, ctx: &mut Context) -> Result<(), UploadError> {
		let violation = self.check(ctx);
		match violation {
			Some(error) => {
				tracing::warn!(%error, path = ctx.resource_path(), "upload limit exceeded");
				ctx.attributes_mut().insert(error.clone());
				Err(error)
			}
			None => Ok(()),
		}
	}

	fn check(&self, ctx: &Context) -> Option<UploadError> {
		if let Some(permitted) = self.size_max {
			let actual = ctx.content_length();
			if actual > permitted {
				return Some(UploadError::SizeLimitExceeded { permitted, actual });
			}
		}
		let permitted = self.file_size_max?;
		ctx.file_items()
			.iter()
			.find(|item| item.size() > permitted)
			.map(|item| UploadError::FileSizeLimitExceeded {
				field: item.field_name().to_string(),
				permitted,
				actual: item.size(),
			})
	}
}
