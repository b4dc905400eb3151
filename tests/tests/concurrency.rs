//! Cloned engines share one store under a single-writer lock.

use std::thread;

use trellis_session::{Engine, Request};
use trellis_tests::prelude::*;

const WRITERS: usize = 8;
const INSERTS_PER_WRITER: usize = 25;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_concurrent_inserts_are_not_lost() {
    // GIVEN
    init_tracing();
    let engine = Engine::office().unwrap();
    let seeded = engine.records("Equipment").unwrap().len();

    // WHEN
    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let engine = engine.clone();
            thread::spawn(move || {
                for n in 0..INSERTS_PER_WRITER {
                    let request = Request::mutation("insertEquipment")
                        .arg("id", format!("w{}-{}", writer, n))
                        .arg("count", n as i64);
                    engine.call(&request).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // THEN
    let stored = engine.records("Equipment").unwrap();
    assert_eq!(stored.len(), seeded + WRITERS * INSERTS_PER_WRITER);
}

#[test]
fn test_concurrent_posts_get_distinct_identities() {
    init_tracing();
    let engine = Engine::office().unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            thread::spawn(move || {
                (0..10)
                    .map(|n| {
                        engine
                            .call(
                                &Request::mutation("postTweet")
                                    .arg("text", format!("post {}", n))
                                    .arg("userId", "1"),
                            )
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<String> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .map(|tweet| {
            tweet
                .as_record()
                .and_then(|t| t.get("id"))
                .and_then(Value::as_str)
                .unwrap()
                .to_string()
        })
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 40);
}

#[test]
fn test_readers_see_whole_mutations() {
    init_tracing();
    let engine = Engine::office().unwrap();

    let writer = {
        let engine = engine.clone();
        thread::spawn(move || {
            for n in 0..50 {
                engine
                    .call(&Request::mutation("insertSupply").arg("id", format!("s{}", n)).arg("team", 1i64))
                    .unwrap();
            }
        })
    };
    let reader = {
        let engine = engine.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                let supplies = engine.call(&Request::query("supplies")).unwrap();
                let len = supplies.as_list().unwrap().len();
                assert!((6..=56).contains(&len));
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(engine.records("Supply").unwrap().len(), 56);
}
