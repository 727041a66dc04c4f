use std::future::Future;
use std::sync::LazyLock;

use encoding_rs::{Encoding, GB18030};
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use tracing::debug;

use crate::error::FetchError;
use crate::settings::Settings;

/// Anything that can turn a URL plus query parameters into a response body.
pub trait Fetch: Send + Sync {
    fn get_text(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

static META_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta[^>]*charset\s*=\s*["']?([a-z0-9_-]+)"#).unwrap());

pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        if let Ok(ua) = HeaderValue::from_str(&settings.user_agent) {
            headers.insert(USER_AGENT, ua);
        }
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout())
            .build()?;
        Ok(HttpClient { client })
    }
}

impl Fetch for HttpClient {
    async fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        debug!("GET {} {:?}", url, query);
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url).query(query).send().await.map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = resp.bytes().await.map_err(transport)?;
        Ok(decode_body(&bytes, content_type.as_deref()))
    }
}

/// Decode a response body using the Content-Type charset, then a `<meta>`
/// charset near the top of the document. Undeclared bodies that are not valid
/// UTF-8 are read as GB18030, a superset of GBK/GB2312.
pub(crate) fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let declared = content_type
        .and_then(header_charset)
        .or_else(|| meta_charset(bytes))
        .and_then(|label| Encoding::for_label(label.as_bytes()));

    if let Some(encoding) = declared {
        let (text, _, _) = encoding.decode(bytes);
        return text.into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!("Body is not UTF-8 and declares no charset; decoding as GB18030");
            let (text, _, _) = GB18030.decode(bytes);
            text.into_owned()
        }
    }
}

fn header_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
    })
}

fn meta_charset(bytes: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(2048)]);
    META_CHARSET.captures(&head).map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use encoding_rs::GBK;

    use super::*;
    use crate::classify::Classifier;
    use crate::sources::sznews;

    #[test]
    fn undeclared_gbk_page_falls_back_to_gb18030() {
        let bytes = std::fs::read("tests/fixtures/sznews_gbk.html").unwrap();
        assert!(std::str::from_utf8(&bytes).is_err());

        let html = decode_body(&bytes, Some("text/html"));
        let page = sznews::parse(&html, &["搬迁".to_string()]);
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].title, "深圳电子企业生产基地搬迁至惠州");

        let card = Classifier::default().classify(&page.records[0]);
        assert_eq!(card.destination.to_string(), "moving to 惠州（domestic）");
    }

    #[test]
    fn header_charset_wins() {
        let (bytes, _, _) = GBK.encode("研发中心迁往东莞");
        assert_eq!(
            decode_body(&bytes, Some("text/html; charset=GBK")),
            "研发中心迁往东莞"
        );
        assert_eq!(
            decode_body(&bytes, Some("text/html; Charset=\"gb2312\"")),
            "研发中心迁往东莞"
        );
    }

    #[test]
    fn meta_charset_is_sniffed() {
        let html = "<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=gb2312\"></head><body>总部搬迁</body></html>";
        let (bytes, _, _) = GBK.encode(html);
        assert!(decode_body(&bytes, None).contains("总部搬迁"));
    }

    #[test]
    fn utf8_passes_through() {
        let text = "{\"announcements\":[{\"announcementTitle\":\"厂房搬迁\"}]}";
        assert_eq!(decode_body(text.as_bytes(), Some("application/json")), text);
    }

    #[test]
    fn charset_parameter_parsing() {
        assert_eq!(header_charset("text/html;charset=utf-8").as_deref(), Some("utf-8"));
        assert_eq!(header_charset("application/json"), None);
    }
}
