use http::header;

use crate::net::Response;
use crate::params::Params;

/// POSTs one hit as a URL-encoded form body and returns the buffered response.
///
/// The `lang` value travels as the `Accept-Language` header (it is never a
/// body parameter). The body is serialized explicitly so the `Content-Type`
/// can carry the charset the collection API documents.
pub async fn post_form(
    client: &reqwest::Client,
    endpoint: &url::Url,
    lang: &str,
    user_agent: Option<&str>,
    params: &Params,
) -> Result<Response, reqwest::Error> {
    // serde_urlencoded cannot fail on string pairs
    let body = serde_urlencoded::to_string(params).unwrap_or_default();

    let mut req = client
        .post(endpoint.clone())
        .header(header::ACCEPT, "application/json")
        .header(header::ACCEPT_LANGUAGE, lang)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded; charset=UTF-8")
        .body(body);
    if let Some(ua) = user_agent {
        req = req.header(header::USER_AGENT, ua);
    }

    let res = req.send().await?;

    let final_url = res.url().clone();
    let status = res.status().as_u16();
    let status_text = res.status().canonical_reason().unwrap_or("Unknown").to_string();
    let headers = res.headers().clone();

    // Fetch body. The endpoint's answers are tiny; no streaming needed.
    let body = res.bytes().await?.to_vec();

    Ok(Response {
        url: final_url,
        status,
        status_text,
        headers,
        body,
    })
}
