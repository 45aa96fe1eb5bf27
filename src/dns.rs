//! DNS TXT lookups and SPF include extraction.

use async_trait::async_trait;
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::TokioAsyncResolver;

/// Result of a raw TXT query: the decoded record strings, or a typed
/// absence/failure.
///
/// Errors never cross this boundary as panics; callers cannot forget to
/// handle them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxtAnswer {
    /// The name resolved and returned TXT records.
    Records(Vec<String>),
    /// The name does not resolve at all (NXDOMAIN).
    NoSuchDomain,
    /// The name resolves but has no TXT records.
    NoTxtRecords,
    /// Any other lookup failure: timeout, servfail, malformed response.
    Failed(String),
}

/// A source of TXT records, keyed by domain name.
///
/// This is the seam between the flattening core and the DNS layer; tests
/// substitute a map-backed implementation for the live resolver.
#[async_trait]
pub trait TxtSource: Send + Sync {
    /// Issues a single TXT query for `domain`.
    ///
    /// Exactly one lookup attempt per call from this layer; retry and
    /// timeout policy belong to the underlying resolver configuration.
    async fn lookup_txt(&self, domain: &str) -> TxtAnswer;
}

/// Production [`TxtSource`] backed by a hickory resolver.
pub struct ResolverTxtSource {
    resolver: TokioAsyncResolver,
}

impl ResolverTxtSource {
    /// Wraps an already-configured resolver.
    pub fn new(resolver: TokioAsyncResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl TxtSource for ResolverTxtSource {
    async fn lookup_txt(&self, domain: &str) -> TxtAnswer {
        match self.resolver.txt_lookup(domain).await {
            Ok(lookup) => {
                let records: Vec<String> = lookup
                    .iter()
                    .filter_map(|txt| {
                        // TXT records can be split across multiple byte slices, join them
                        let parts: Result<Vec<String>, _> = txt
                            .txt_data()
                            .iter()
                            .map(|bytes| String::from_utf8(bytes.to_vec()))
                            .collect();
                        parts.ok().map(|parts| parts.join(""))
                    })
                    .collect();
                TxtAnswer::Records(records)
            }
            Err(e) => match e.kind() {
                ResolveErrorKind::NoRecordsFound { response_code, .. } => {
                    if *response_code == ResponseCode::NXDomain {
                        TxtAnswer::NoSuchDomain
                    } else {
                        TxtAnswer::NoTxtRecords
                    }
                }
                _ => TxtAnswer::Failed(e.to_string()),
            },
        }
    }
}

/// Outcome tag for a single SPF include lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The lookup succeeded (the include list may still be empty).
    Ok,
    /// The name does not resolve at all.
    NoSuchDomain,
    /// The name resolves but has no TXT records.
    NoTxtAnswer,
    /// Any other lookup failure, with an opaque message.
    OtherError(String),
}

/// Include targets extracted from one domain's TXT records, plus how the
/// lookup went.
#[derive(Debug, Clone)]
pub struct SpfLookup {
    /// Targets of every `include:` mechanism found, in record order.
    pub includes: Vec<String>,
    /// How the underlying TXT lookup went.
    pub outcome: LookupOutcome,
}

/// Queries TXT records for `domain` and extracts `include:` targets from any
/// SPF-looking record.
///
/// Every returned TXT entry is scanned independently; a domain may carry
/// zero, one, or several SPF-looking records. Lookup failures come back in
/// the outcome tag, never as an error.
pub async fn lookup_spf_includes(source: &dyn TxtSource, domain: &str) -> SpfLookup {
    match source.lookup_txt(domain).await {
        TxtAnswer::Records(records) => {
            let includes = records
                .iter()
                .flat_map(|record| extract_include_targets(record))
                .collect();
            SpfLookup {
                includes,
                outcome: LookupOutcome::Ok,
            }
        }
        TxtAnswer::NoSuchDomain => SpfLookup {
            includes: Vec::new(),
            outcome: LookupOutcome::NoSuchDomain,
        },
        TxtAnswer::NoTxtRecords => SpfLookup {
            includes: Vec::new(),
            outcome: LookupOutcome::NoTxtAnswer,
        },
        TxtAnswer::Failed(message) => SpfLookup {
            includes: Vec::new(),
            outcome: LookupOutcome::OtherError(message),
        },
    }
}

/// Extracts `include:` targets from a single TXT record string.
///
/// Records whose lowercase form does not contain `v=spf` are skipped
/// entirely. Within an SPF record, the mechanism list is split on whitespace
/// and each token's suffix after the `include:` prefix is collected; other
/// mechanisms (`ip4`, `a`, `mx`, `redirect`, ...) are ignored.
pub fn extract_include_targets(txt_record: &str) -> Vec<String> {
    if !txt_record.to_lowercase().contains("v=spf") {
        return Vec::new();
    }
    txt_record
        .split_whitespace()
        .filter_map(|mechanism| mechanism.strip_prefix("include:"))
        .map(|target| target.to_string())
        .collect()
}
