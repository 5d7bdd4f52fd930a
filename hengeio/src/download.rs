use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// POSTs an `application/x-www-form-urlencoded` body and returns the raw response bytes. Any
/// non-2xx status is an error. There's no retry; callers decide what a failure means. On native,
/// this must be called with a tokio runtime somewhere.
pub async fn post_form<I: AsRef<str>>(url: I, form: &[(&str, &str)]) -> Result<Vec<u8>> {
    let url = url.as_ref();
    debug!("POST {} ({} form fields)", url, form.len());
    let resp = reqwest::Client::new()
        .post(url)
        .form(form)
        .send()
        .await
        .with_context(|| format!("posting to {}", url))?;
    resp.error_for_status_ref()
        .with_context(|| format!("posting to {}", url))?;
    let bytes = resp
        .bytes()
        .await
        .with_context(|| format!("reading response from {}", url))?;
    Ok(bytes.to_vec())
}

/// POSTs `body` as JSON and deserializes the JSON response.
pub async fn post_json<I: AsRef<str>, Req: Serialize + ?Sized, Resp: DeserializeOwned>(
    url: I,
    body: &Req,
) -> Result<Resp> {
    let url = url.as_ref();
    debug!("POST {} (JSON)", url);
    let resp = reqwest::Client::new()
        .post(url)
        .json(body)
        .send()
        .await
        .with_context(|| format!("posting to {}", url))?;
    let status = resp.status();
    if !status.is_success() {
        // The body usually holds the backend's error message
        let text = resp.text().await.unwrap_or_default();
        anyhow::bail!("{} returned {}: {}", url, status, text);
    }
    let bytes = resp
        .bytes()
        .await
        .with_context(|| format!("reading response from {}", url))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing response from {}", url))
}
