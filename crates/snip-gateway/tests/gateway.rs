use jiff::{SignedDuration, Timestamp};
use snip_core::{ClickMetadata, ErrorKind, Location, ManualClock};
use snip_gateway::{Gateway, GatewaySettings};
use std::collections::HashSet;
use std::sync::Arc;

fn gateway() -> (Gateway, ManualClock) {
    let clock = ManualClock::new(Timestamp::from_second(1_700_000_000).unwrap());
    let settings = GatewaySettings::builder()
        .clock(Arc::new(clock.clone()))
        .build();
    (Gateway::in_memory(settings), clock)
}

fn visit(referrer: &str) -> ClickMetadata {
    ClickMetadata {
        referrer: Some(referrer.to_string()),
        location: Some(Location {
            city: Some("Tokyo".to_string()),
            country: Some("Japan".to_string()),
        }),
        user_agent: Some("integration-test".to_string()),
    }
}

#[tokio::test]
async fn shorten_resolve_and_count() {
    let (gateway, _) = gateway();

    let receipt = gateway
        .shorten("https://example.com", Some("abc123"), Some(60))
        .await
        .unwrap();
    assert_eq!(receipt.token.as_str(), "abc123");

    let target = gateway
        .redirect_target("abc123", visit("google.com"))
        .await
        .unwrap();
    assert_eq!(target.target_url, "https://example.com");

    let stats = gateway.stats_for("abc123").await.unwrap();
    assert_eq!(stats.click_count, 1);
    assert_eq!(
        stats.record.expires_at,
        stats.record.created_at + SignedDuration::from_mins(60)
    );
    assert_eq!(receipt.expires_at, stats.record.expires_at);
    assert_eq!(stats.clicks[0].metadata, visit("google.com"));

    let err = gateway
        .shorten("https://other.example.com", Some("abc123"), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let err = gateway
        .redirect_target("doesnotexist", ClickMetadata::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn empty_url_is_rejected() {
    let (gateway, _) = gateway();

    let err = gateway.shorten("   ", None, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn expired_link_stops_resolving() {
    let (gateway, clock) = gateway();
    gateway
        .shorten("https://example.com", Some("brief"), Some(1))
        .await
        .unwrap();

    clock.advance(SignedDuration::from_secs(59));
    gateway
        .redirect_target("brief", ClickMetadata::default())
        .await
        .unwrap();

    clock.advance(SignedDuration::from_secs(2));
    let err = gateway
        .redirect_target("brief", ClickMetadata::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Expired);

    // the failed resolution left no click behind, and stats still list it
    let stats = gateway.stats_for("brief").await.unwrap();
    assert_eq!(stats.click_count, 1);

    let err = gateway
        .shorten("https://example.com", Some("brief"), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn remove_url_cascades_and_never_reissues() {
    let (gateway, _) = gateway();
    gateway
        .shorten("https://example.com", Some("abc123"), None)
        .await
        .unwrap();
    gateway
        .shorten("https://example.org", Some("keep"), None)
        .await
        .unwrap();
    for _ in 0..3 {
        gateway
            .redirect_target("abc123", visit("direct"))
            .await
            .unwrap();
    }
    gateway.redirect_target("keep", visit("direct")).await.unwrap();

    gateway.remove_url("abc123").await.unwrap();

    let err = gateway.stats_for("abc123").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let remaining = gateway.stats_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].click_count, 1);

    let err = gateway.remove_url("abc123").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = gateway
        .shorten("https://example.com", Some("abc123"), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn stats_are_newest_first_and_stable() {
    let (gateway, clock) = gateway();
    gateway
        .shorten("https://one.example.com", Some("one"), None)
        .await
        .unwrap();
    clock.advance(SignedDuration::from_secs(1));
    gateway
        .shorten("https://two.example.com", Some("two"), None)
        .await
        .unwrap();

    let first = gateway.stats_all().await.unwrap();
    let tokens: Vec<&str> = first.iter().map(|s| s.record.token.as_str()).collect();
    assert_eq!(tokens, vec!["two", "one"]);

    let second = gateway.stats_all().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn generated_tokens_are_unique() {
    let (gateway, _) = gateway();
    let mut seen = HashSet::new();

    for i in 0..200 {
        let receipt = gateway
            .shorten(format!("https://example.com/{i}"), None, None)
            .await
            .unwrap();
        assert_eq!(receipt.token.as_str().len(), 6);
        assert!(seen.insert(receipt.token));
    }
}

#[tokio::test]
async fn concurrent_claims_of_one_alias_have_one_winner() {
    let (gateway, _) = gateway();
    let mut handles = vec![];

    for i in 0..16 {
        let gateway = gateway.clone();
        handles.push(tokio::spawn(async move {
            gateway
                .shorten(format!("https://example.com/{i}"), Some("shared"), None)
                .await
        }));
    }

    let mut wins = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(e) => assert_eq!(e.kind(), ErrorKind::Conflict),
        }
    }
    assert_eq!(wins, 1);
}

#[tokio::test]
async fn concurrent_redirects_are_all_counted() {
    let (gateway, _) = gateway();
    gateway
        .shorten("https://example.com", Some("busy"), None)
        .await
        .unwrap();

    let mut handles = vec![];
    for _ in 0..32 {
        let gateway = gateway.clone();
        handles.push(tokio::spawn(async move {
            gateway
                .redirect_target("busy", ClickMetadata::default())
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stats = gateway.stats_for("busy").await.unwrap();
    assert_eq!(stats.click_count, 32);
    let ids: HashSet<u64> = stats.clicks.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 32);
    assert!(!ids.contains(&stats.record.id));
}
