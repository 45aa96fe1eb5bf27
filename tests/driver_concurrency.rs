//! Driver behavior under concurrency: ceiling, per-domain isolation, and
//! completeness of the outcome set.

mod helpers;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use helpers::MockTxtSource;
use spf_flattener::{
    run_with_source, DomainOutcome, ErrorStats, LookupErrorKind, RunProgress, TxtAnswer, TxtSource,
};

#[tokio::test]
async fn thousand_domains_under_a_five_hundred_ceiling_all_complete() {
    let mut source = MockTxtSource::new().with_spf("shared.com", "v=spf1 -all");
    let mut domains = Vec::new();
    for i in 0..1000 {
        let domain = format!("domain{i}.com");
        source = source.with_spf(&domain, "v=spf1 include:shared.com -all");
        domains.push(domain);
    }

    let stats = ErrorStats::new();
    let progress = RunProgress::new();
    let outcomes = run_with_source(domains, Arc::new(source), 500, &stats, &progress).await;

    assert_eq!(outcomes.len(), 1000);
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, DomainOutcome::Flattened(_))));
    assert_eq!(progress.completed.load(Ordering::SeqCst), 1000);
    assert_eq!(progress.failed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn one_failing_domain_does_not_affect_siblings() {
    let source = MockTxtSource::new()
        .with_spf("good-one.com", "v=spf1 include:x.com -all")
        .with_answer("always-broken.com", TxtAnswer::Failed("SERVFAIL".to_string()))
        .with_spf("good-two.com", "v=spf1 include:y.com -all")
        .with_spf("x.com", "v=spf1 -all")
        .with_spf("y.com", "v=spf1 -all");

    let domains: Vec<String> = ["good-one.com", "always-broken.com", "good-two.com"]
        .iter()
        .map(|d| d.to_string())
        .collect();
    let stats = ErrorStats::new();
    let progress = RunProgress::new();
    let outcomes = run_with_source(domains, Arc::new(source), 500, &stats, &progress).await;

    assert_eq!(outcomes.len(), 3);
    for outcome in &outcomes {
        match outcome {
            DomainOutcome::Flattened(result) => match result.root.as_str() {
                "good-one.com" => assert!(result.included.contains("x.com")),
                "good-two.com" => assert!(result.included.contains("y.com")),
                "always-broken.com" => {
                    assert!(result.included.is_empty());
                    assert_eq!(result.failures.len(), 1);
                }
                other => panic!("unexpected root {other}"),
            },
            DomainOutcome::Failed { domain, .. } => {
                panic!("unexpected driver-level failure for {domain}")
            }
        }
    }
    assert_eq!(stats.get_count(LookupErrorKind::OtherLookupError), 1);
}

#[tokio::test]
async fn duplicate_inputs_are_processed_independently() {
    let source = Arc::new(
        MockTxtSource::new()
            .with_spf("a.com", "v=spf1 include:b.com -all")
            .with_spf("b.com", "v=spf1 -all"),
    );
    let domains = vec!["a.com".to_string(), "a.com".to_string()];

    let stats = ErrorStats::new();
    let progress = RunProgress::new();
    let outcomes = run_with_source(
        domains,
        Arc::clone(&source) as Arc<dyn TxtSource>,
        10,
        &stats,
        &progress,
    )
    .await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.domain() == "a.com"));
    // Each occurrence ran its own traversal
    assert_eq!(source.query_count("a.com"), 2);
}

#[tokio::test]
async fn panicking_traversal_is_converted_to_a_failure_outcome() {
    let source = MockTxtSource::new()
        .with_panic("explodes.com")
        .with_spf("calm.com", "v=spf1 include:b.com -all")
        .with_spf("b.com", "v=spf1 -all");

    let domains = vec!["explodes.com".to_string(), "calm.com".to_string()];
    let stats = ErrorStats::new();
    let progress = RunProgress::new();
    let outcomes = run_with_source(domains, Arc::new(source), 10, &stats, &progress).await;

    assert_eq!(outcomes.len(), 2);
    let failed: Vec<&DomainOutcome> = outcomes
        .iter()
        .filter(|o| matches!(o, DomainOutcome::Failed { .. }))
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].domain(), "explodes.com");

    let calm = outcomes
        .iter()
        .find(|o| o.domain() == "calm.com")
        .expect("calm.com outcome present");
    assert!(matches!(calm, DomainOutcome::Flattened(_)));

    assert_eq!(stats.get_count(LookupErrorKind::TraversalPanic), 1);
    assert_eq!(progress.failed.load(Ordering::SeqCst), 1);
    assert_eq!(progress.completed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn ceiling_of_one_still_processes_every_domain() {
    let source = MockTxtSource::new()
        .with_spf("a.com", "v=spf1 -all")
        .with_spf("b.com", "v=spf1 -all")
        .with_spf("c.com", "v=spf1 -all");

    let domains: Vec<String> = ["a.com", "b.com", "c.com"]
        .iter()
        .map(|d| d.to_string())
        .collect();
    let stats = ErrorStats::new();
    let progress = RunProgress::new();
    let outcomes = run_with_source(domains, Arc::new(source), 1, &stats, &progress).await;

    assert_eq!(outcomes.len(), 3);
}
