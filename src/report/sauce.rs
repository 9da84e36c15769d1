//! Signed links to Sauce Labs device-session recordings.
//!
//! Sauce Labs lets anyone holding `auth=<token>` view a job, where the token
//! is the HMAC-MD5 of the job id keyed by `username:access_key`.

use crate::error::{ReportError, Result};
use hmac::{Hmac, Mac};
use md5::Md5;
use std::fmt::Write;

const JOBS_URL: &str = "https://saucelabs.com/jobs";

type HmacMd5 = Hmac<Md5>;

#[derive(Debug, Clone)]
pub struct SessionSigner {
    username: String,
    access_key: String,
}

impl SessionSigner {
    pub fn new(username: &str, access_key: &str) -> Self {
        Self {
            username: username.to_string(),
            access_key: access_key.to_string(),
        }
    }

    /// Auth token for a job: lowercase hex HMAC-MD5 of the job id
    pub fn token(&self, job_id: &str) -> Result<String> {
        let key = latin1(&format!("{}:{}", self.username, self.access_key))?;
        let data = latin1(job_id)?;

        let mut mac = HmacMd5::new_from_slice(&key).map_err(|_| ReportError::InvalidKey)?;
        mac.update(&data);
        Ok(hex_lower(&mac.finalize().into_bytes()))
    }

    /// Viewable URL of a job's recording
    pub fn sign(&self, job_id: &str) -> Result<String> {
        Ok(format!("{}/{}?auth={}", JOBS_URL, job_id, self.token(job_id)?))
    }
}

/// Encode text as Latin-1, failing on any character above U+00FF
fn latin1(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| u8::try_from(c).map_err(|_| ReportError::UnencodableText(text.to_string())))
        .collect()
}

fn hex_lower(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
            let _ = write!(out, "{:02x}", b);
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_job_url() {
        let signer = SessionSigner::new("u", "k");
        assert_eq!(
            signer.sign("job-42").unwrap(),
            "https://saucelabs.com/jobs/job-42?auth=b6adf47d9bcb0dc007f4926b88074c9e"
        );
    }

    #[test]
    fn test_token_is_deterministic() {
        let signer = SessionSigner::new("alice", "secret");
        assert_eq!(signer.token("abc123").unwrap(), "26efc8808cf149795d6c5114fc7ac003");
        assert_eq!(signer.token("abc123").unwrap(), signer.token("abc123").unwrap());
    }

    #[test]
    fn test_latin1_credentials() {
        let signer = SessionSigner::new("café", "k");
        assert_eq!(signer.token("job").unwrap(), "b5e7269b63fb7cd20ce96cbd7b511077");
    }

    #[test]
    fn test_rejects_text_outside_latin1() {
        let signer = SessionSigner::new("u", "k");
        assert!(matches!(
            signer.sign("job-€"),
            Err(ReportError::UnencodableText(_))
        ));
    }
}
