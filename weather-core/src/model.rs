/// Inbound request as handed over by the host platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingRequest {
    pub body: Option<String>,
}

impl IncomingRequest {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }
}

/// The single response produced for an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingResponse {
    pub status_code: u16,
    pub body: String,
}

impl OutgoingResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// What came back from the weather API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    /// `None` when the upstream sent nothing, or when the body of a failed
    /// response could not be read.
    pub body: Option<String>,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx_only() {
        let status = |s| UpstreamResponse {
            status: s,
            body: None,
        };

        assert!(status(200).is_success());
        assert!(status(204).is_success());
        assert!(!status(199).is_success());
        assert!(!status(301).is_success());
        assert!(!status(503).is_success());
    }
}
