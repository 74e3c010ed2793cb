//! Regression coverage for the resource cache.
use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{FixtureEntityClient, MockEntityClient};
use crate::domain::{Amount, ResourceKind, Room};

fn room(id: u64, hostel: u64) -> Room {
    Room {
        room_id: EntityId::new(id),
        hostel_id: EntityId::new(hostel),
        room_number: format!("R{id}"),
        room_type: "single".to_owned(),
        price: Amount::from_units(4_000),
        capacity: 1,
        description: String::new(),
        status: true,
    }
}

#[fixture]
fn tags() -> Arc<TagRegistry> {
    Arc::new(TagRegistry::new())
}

#[rstest]
#[tokio::test]
async fn second_read_is_served_from_memory(tags: Arc<TagRegistry>) {
    let client = Arc::new(FixtureEntityClient::new(vec![room(1, 1), room(2, 1)]));
    let cache = ResourceCache::new(client.clone(), tags);

    let first = cache.read(CacheScope::All).await.expect("first read");
    let second = cache.read(CacheScope::All).await.expect("second read");

    assert_eq!(first.len(), 2);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(client.calls().list, 1);
}

#[rstest]
#[tokio::test]
async fn invalidation_keeps_stale_rows_until_refetch(tags: Arc<TagRegistry>) {
    let client = Arc::new(FixtureEntityClient::new(vec![room(1, 1)]));
    let cache = ResourceCache::new(client.clone(), Arc::clone(&tags));
    cache.read(CacheScope::All).await.expect("warm");

    tags.invalidate(ResourceKind::Rooms);
    let snapshot = cache.peek(CacheScope::All).expect("entry kept");
    assert_eq!(snapshot.freshness, Freshness::Stale);
    assert_eq!(snapshot.rows.len(), 1);

    cache.read(CacheScope::All).await.expect("refetch");
    assert_eq!(client.calls().list, 2);
    assert_eq!(
        cache.peek(CacheScope::All).map(|s| s.freshness),
        Some(Freshness::Fresh)
    );
}

#[rstest]
#[tokio::test]
async fn other_tags_do_not_invalidate(tags: Arc<TagRegistry>) {
    let client = Arc::new(FixtureEntityClient::new(vec![room(1, 1)]));
    let cache = ResourceCache::new(client.clone(), Arc::clone(&tags));
    cache.read(CacheScope::All).await.expect("warm");

    tags.invalidate(ResourceKind::Bookings);
    cache.read(CacheScope::All).await.expect("hit");
    assert_eq!(client.calls().list, 1);
}

#[rstest]
#[tokio::test]
async fn parent_scopes_are_cached_separately(tags: Arc<TagRegistry>) {
    let client = Arc::new(FixtureEntityClient::new(vec![
        room(1, 1),
        room(2, 2),
        room(3, 1),
    ]));
    let cache = ResourceCache::new(client.clone(), tags);

    let hostel_one = CacheScope::Parent(ParentKind::Hostel, EntityId::new(1));
    let rows = cache.read(hostel_one).await.expect("scoped read");
    assert_eq!(rows.len(), 2);
    cache.read(hostel_one).await.expect("scoped hit");
    cache.read(CacheScope::All).await.expect("full read");

    let calls = client.calls();
    assert_eq!(calls.get_by_parent, 1);
    assert_eq!(calls.list, 1);
}

#[rstest]
#[tokio::test]
async fn result_invalidated_mid_flight_stays_stale(tags: Arc<TagRegistry>) {
    let mut client = MockEntityClient::<Room>::new();
    let during_fetch = Arc::clone(&tags);
    client.expect_list().times(2).returning(move || {
        during_fetch.invalidate(ResourceKind::Rooms);
        Ok(vec![room(1, 1)])
    });
    let cache = ResourceCache::new(Arc::new(client), Arc::clone(&tags));

    let rows = cache.read(CacheScope::All).await.expect("first read");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        cache.peek(CacheScope::All).map(|s| s.freshness),
        Some(Freshness::Stale)
    );
    cache.read(CacheScope::All).await.expect("refetch");
}

#[rstest]
#[tokio::test]
async fn failed_fetch_leaves_previous_entry(tags: Arc<TagRegistry>) {
    let client = Arc::new(FixtureEntityClient::new(vec![room(1, 1)]));
    let cache = ResourceCache::new(client.clone(), Arc::clone(&tags));
    cache.read(CacheScope::All).await.expect("warm");
    cache.invalidate();

    client.fail_next(ApiError::network("offline"));
    let err = cache.read(CacheScope::All).await.expect_err("fetch fails");
    assert!(matches!(err, ApiError::Network { .. }));
    assert_eq!(
        cache.peek(CacheScope::All).map(|s| s.rows.len()),
        Some(1)
    );
}
