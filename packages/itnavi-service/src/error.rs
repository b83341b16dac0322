pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Index unavailable: {collection}")]
	IndexUnavailable { collection: String },
	#[error("Index build failed: {message}")]
	BuildFailure { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Qdrant error: {message}")]
	Qdrant { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<itnavi_storage::Error> for Error {
	fn from(err: itnavi_storage::Error) -> Self {
		match err {
			itnavi_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			itnavi_storage::Error::NotFound(message) => Self::NotFound { message },
			itnavi_storage::Error::Qdrant(inner) => Self::Qdrant { message: inner.to_string() },
		}
	}
}

impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
