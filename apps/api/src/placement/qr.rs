//! Apply links and QR code image URLs for job postings.

use uuid::Uuid;

/// Pixel size requested from the QR image service.
const QR_SIZE: &str = "200x200";

/// Public page a student lands on after scanning a job's QR code.
pub fn apply_url(public_base_url: &str, job_id: Uuid) -> String {
    format!("{}/jobs/{job_id}/apply", public_base_url.trim_end_matches('/'))
}

/// Image URL that renders `data` as a QR code.
pub fn qr_code_url(qr_service_url: &str, data: &str) -> String {
    let separator = if qr_service_url.contains('?') { '&' } else { '?' };
    format!(
        "{qr_service_url}{separator}size={QR_SIZE}&data={}",
        urlencoding::encode(data)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_url_strips_trailing_slash() {
        let id = Uuid::nil();
        assert_eq!(
            apply_url("https://jobs.example.org/", id),
            "https://jobs.example.org/jobs/00000000-0000-0000-0000-000000000000/apply"
        );
    }

    #[test]
    fn test_qr_url_encodes_payload() {
        let url = qr_code_url(
            "https://api.qrserver.com/v1/create-qr-code/",
            "https://jobs.example.org/jobs/1/apply",
        );
        assert_eq!(
            url,
            "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=https%3A%2F%2Fjobs.example.org%2Fjobs%2F1%2Fapply"
        );
    }

    #[test]
    fn test_qr_url_appends_to_existing_query() {
        let url = qr_code_url("https://qr.example.org/render?format=png", "x");
        assert!(url.starts_with("https://qr.example.org/render?format=png&size=200x200"));
    }
}
