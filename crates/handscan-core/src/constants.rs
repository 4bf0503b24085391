use std::time::Duration;

/// Local development backend used when no override is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Path of the upload endpoint, appended to the backend base URL.
pub const UPLOAD_PATH: &str = "/api/upload";

/// Multipart field carrying the selected file.
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the auxiliary file URL.
pub const FILE_URL_FIELD: &str = "fileUrl";

/// Static value sent in the `fileUrl` field. The backend's tooling resolves it;
/// it is never derived from the uploaded file.
pub const DEFAULT_FILE_URL: &str = "/mnt/data/Handwritting-reading-AI-main.zip";

/// Upper bound for a whole upload (files plus OCR/AI processing on the backend).
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Environment variables holding the backend URL override, in lookup order.
pub const BACKEND_URL_ENV_VARS: [&str; 2] = ["HANDSCAN_BACKEND_URL", "BACKEND_URL"];

/// Prefix of the user-facing alert shown on failure.
pub const ALERT_PREFIX: &str = "Upload failed: ";
