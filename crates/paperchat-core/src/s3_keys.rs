//! S3 key/path conventions.
//!
//! Pure string functions — no AWS SDK dependency. These define the canonical
//! layout of objects in the paperchat S3 bucket.

use uuid::Uuid;

pub const PDFS_PREFIX: &str = "pdfs/";

pub const SESSIONS_PREFIX: &str = "sessions/";

pub fn pdf(filename: &str) -> String {
    format!("pdfs/{filename}")
}

pub fn session(id: Uuid) -> String {
    format!("sessions/{id}.json")
}

/// The bare filename of a stored PDF key, or `None` for keys outside the
/// `pdfs/` namespace (including the prefix placeholder itself).
pub fn pdf_filename(key: &str) -> Option<&str> {
    let name = key.strip_prefix(PDFS_PREFIX)?;
    if name.is_empty() { None } else { Some(name) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_key_roundtrip() {
        let key = pdf("report.pdf");
        assert_eq!(key, "pdfs/report.pdf");
        assert_eq!(pdf_filename(&key), Some("report.pdf"));
    }

    #[test]
    fn foreign_keys_have_no_filename() {
        assert_eq!(pdf_filename("sessions/abc.json"), None);
        assert_eq!(pdf_filename("pdfs/"), None);
    }
}
