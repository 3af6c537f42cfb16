pub mod resend;
pub mod whatsapp;

use anyhow::anyhow;

/// Turn a non-2xx provider reply into an error carrying its status and body.
async fn ensure_success(
    provider: &str,
    resp: reqwest::Response,
) -> anyhow::Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(anyhow!("{provider} API error: {status} - {body}"))
}
