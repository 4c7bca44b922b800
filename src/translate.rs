use serde::{Deserialize, Serialize};

/// Sample phrase every translation response is built from.
pub(crate) const SAMPLE_PHONETIC: &str = "ˈkawˌbɔɪz ˈvɪrsəz ˈeɪɪliənz";
pub(crate) const SAMPLE_LETTERS: &str = "cowboys versus aliens";
pub(crate) const SAMPLE_SYMBOLS: &str = "☁☔☃☠☀☆☇☒☤☂☁☡☍☛☜☋☤☂☁☊☒☕☑☋☗☤";

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct DecodeResponse {
    pub phonetic: String,
    pub letters: String,
}

impl DecodeResponse {
    pub(crate) fn sample() -> Self {
        DecodeResponse {
            phonetic: SAMPLE_PHONETIC.to_string(),
            letters: SAMPLE_LETTERS.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct EncodeTextResponse {
    pub text: String,
}

impl EncodeTextResponse {
    pub(crate) fn sample() -> Self {
        EncodeTextResponse {
            text: SAMPLE_SYMBOLS.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::{DecodeResponse, EncodeTextResponse};

    #[test]
    fn decode_sample_serializes_to_the_fixed_payload() {
        let json = serde_json::to_value(DecodeResponse::sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "phonetic": "ˈkawˌbɔɪz ˈvɪrsəz ˈeɪɪliənz",
                "letters": "cowboys versus aliens"
            })
        );
    }

    #[test]
    fn encode_text_sample_serializes_to_the_fixed_payload() {
        let json = serde_json::to_value(EncodeTextResponse::sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "text": "☁☔☃☠☀☆☇☒☤☂☁☡☍☛☜☋☤☂☁☊☒☕☑☋☗☤" })
        );
    }
}
