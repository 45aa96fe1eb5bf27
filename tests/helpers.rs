// Shared test helpers: a map-backed TXT source standing in for live DNS.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use spf_flattener::{TxtAnswer, TxtSource};

/// Map-backed [`TxtSource`] with per-domain query counters.
///
/// Domains with no configured answer respond `NoSuchDomain`, like a live
/// resolver would for an unregistered name.
#[allow(dead_code)] // Used by other test files
pub struct MockTxtSource {
    records: HashMap<String, TxtAnswer>,
    panic_domains: Vec<String>,
    query_counts: Mutex<HashMap<String, usize>>,
}

#[allow(dead_code)] // Used by other test files
impl MockTxtSource {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            panic_domains: Vec::new(),
            query_counts: Mutex::new(HashMap::new()),
        }
    }

    /// Configures a single SPF TXT record for `domain`.
    pub fn with_spf(mut self, domain: &str, spf: &str) -> Self {
        self.records.insert(
            domain.to_string(),
            TxtAnswer::Records(vec![spf.to_string()]),
        );
        self
    }

    /// Configures an arbitrary TXT answer for `domain`.
    pub fn with_answer(mut self, domain: &str, answer: TxtAnswer) -> Self {
        self.records.insert(domain.to_string(), answer);
        self
    }

    /// Rigs `domain` to panic when queried, for driver-boundary tests.
    pub fn with_panic(mut self, domain: &str) -> Self {
        self.panic_domains.push(domain.to_string());
        self
    }

    /// Number of TXT queries issued for `domain` so far.
    pub fn query_count(&self, domain: &str) -> usize {
        *self
            .query_counts
            .lock()
            .unwrap()
            .get(domain)
            .unwrap_or(&0)
    }
}

#[async_trait]
impl TxtSource for MockTxtSource {
    async fn lookup_txt(&self, domain: &str) -> TxtAnswer {
        *self
            .query_counts
            .lock()
            .unwrap()
            .entry(domain.to_string())
            .or_insert(0) += 1;
        if self.panic_domains.iter().any(|d| d == domain) {
            panic!("rigged failure for {domain}");
        }
        match self.records.get(domain) {
            Some(answer) => answer.clone(),
            None => TxtAnswer::NoSuchDomain,
        }
    }
}
