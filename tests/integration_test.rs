// Integration tests for neardup
use neardup::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

fn partition(clusters: Vec<Cluster>) -> BTreeSet<BTreeSet<String>> {
    clusters
        .into_iter()
        .map(|cluster| cluster.into_iter().collect())
        .collect()
}

fn group(members: &[&str]) -> BTreeSet<String> {
    members.iter().map(|m| m.to_string()).collect()
}

#[tokio::test]
async fn test_end_to_end_deduplication() {
    let client = MemoryIndexClient::numeric();
    let deduper = Deduper::new(client, DedupeConfig::default());

    // Two tight groups and two isolated items.
    let items = vec![
        Item::new("burst-1.jpg", "0.000"),
        Item::new("burst-2.jpg", "0.010"),
        Item::new("burst-3.jpg", "0.020"),
        Item::new("pair-1.jpg", "3.000"),
        Item::new("pair-2.jpg", "3.010"),
        Item::new("lone-1.jpg", "7.000"),
        Item::new("lone-2.jpg", "12.000"),
    ];

    let outcome = deduper.deduplicate(&items).await.unwrap();

    assert!(outcome.cleanup_error.is_none());
    assert_eq!(
        partition(outcome.clusters),
        BTreeSet::from([
            group(&["burst-1.jpg", "burst-2.jpg", "burst-3.jpg"]),
            group(&["pair-1.jpg", "pair-2.jpg"]),
        ])
    );
    // The run's index was torn down.
    assert_eq!(deduper.client().index_count(), 0);
}

#[tokio::test]
async fn test_threshold_controls_cluster_growth() {
    let items = vec![
        Item::new("a", "0.00"),
        Item::new("b", "0.04"),
        Item::new("c", "0.08"),
    ];

    // Tight threshold: 0.04 apart is not under 0.04.
    let deduper = Deduper::new(
        MemoryIndexClient::numeric(),
        DedupeConfig {
            duplication_threshold: 0.04,
            max_concurrency: 2,
        },
    );
    let outcome = deduper.deduplicate(&items).await.unwrap();
    assert!(outcome.clusters.is_empty());

    // Looser threshold chains all three together.
    let deduper = Deduper::new(
        MemoryIndexClient::numeric(),
        DedupeConfig {
            duplication_threshold: 0.05,
            max_concurrency: 2,
        },
    );
    let outcome = deduper.deduplicate(&items).await.unwrap();
    assert_eq!(
        partition(outcome.clusters),
        BTreeSet::from([group(&["a", "b", "c"])])
    );
}

#[tokio::test]
async fn test_custom_metric_client() {
    // Payload metric: 0 if payloads are equal, 1 otherwise.
    let client = MemoryIndexClient::new(Arc::new(
        |a: &str, b: &str| if a == b { 0.0 } else { 1.0 },
    ));
    let deduper = Deduper::new(client, DedupeConfig::default());

    let items = vec![
        Item::new("x1", "cat"),
        Item::new("x2", "cat"),
        Item::new("y1", "dog"),
    ];

    let outcome = deduper.deduplicate(&items).await.unwrap();
    assert_eq!(
        partition(outcome.clusters),
        BTreeSet::from([group(&["x1", "x2"])])
    );
}

#[test]
fn test_cluster_builder_direct_use() {
    let pairs = [
        DuplicatePair::new("a", "c").unwrap(),
        DuplicatePair::new("b", "d").unwrap(),
        DuplicatePair::new("a", "b").unwrap(),
    ];
    let clusters = ClusterBuilder::build(pairs);
    assert_eq!(
        partition(clusters),
        BTreeSet::from([group(&["a", "b", "c", "d"])])
    );
}
