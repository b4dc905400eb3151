//! Relationship fields are computed from the current store on every read.

use pretty_assertions::assert_eq;
use trellis_session::{Engine, EngineConfig, Request, Selection};
use trellis_tests::prelude::*;

fn office() -> Engine {
    Engine::office().unwrap()
}

fn list(engine: &Engine, field: &str, selection: Selection) -> Vec<Record> {
    let value = engine
        .call(&Request::query(field).select(selection))
        .unwrap();
    value
        .as_list()
        .unwrap()
        .iter()
        .map(|item| item.as_record().unwrap().clone())
        .collect()
}

#[test]
fn test_team_supplies_match_foreign_keys() {
    // GIVEN
    let engine = office();
    let supplies = engine.records("Supply").unwrap();

    // WHEN
    let teams = list(&engine, "teams", Selection::Default);

    // THEN
    for team in &teams {
        let id = team.get("id").unwrap();
        let expected: Vec<Value> = supplies
            .iter()
            .filter(|s| s.get("team") == Some(id))
            .cloned()
            .map(Value::Record)
            .collect();
        assert_eq!(team.get("supplies"), Some(&Value::List(expected)));
    }
    let last = teams.last().unwrap();
    assert_eq!(last.get("supplies"), Some(&Value::List(vec![])));
}

#[test]
fn test_tweet_author_is_resolved() {
    let engine = office();
    let selection = Selection::of(&["id", "user_id"]).nested("author", Selection::of(&["id", "username"]));

    let tweets = list(&engine, "allTweets", selection);

    for tweet in &tweets {
        let author = tweet.get("author").unwrap().as_record().unwrap();
        assert_eq!(author.get("id"), tweet.get("user_id"));
    }
    assert_eq!(
        tweets[0].get("author").unwrap().as_record().unwrap().get("username"),
        Some(&Value::from("mija"))
    );
}

#[test]
fn test_author_without_user_is_null() {
    // GIVEN
    let engine = office();
    engine
        .call(
            &Request::mutation("insertTweet")
                .arg("id", "40")
                .arg("text", "orphan")
                .arg("user_id", "77"),
        )
        .unwrap();

    // WHEN
    let tweet = engine
        .call(
            &Request::query("tweet")
                .arg("id", "40")
                .select(Selection::of(&["id"]).nested("author", Selection::Default)),
        )
        .unwrap();

    // THEN
    assert_eq!(
        tweet,
        Value::Record(Record::new(attrs! { "id" => "40", "author" => Value::Null }))
    );
}

#[test]
fn test_relations_reflect_later_writes() {
    let engine = office();
    let supplies_of_five = |engine: &Engine| {
        engine
            .call(
                &Request::query("team")
                    .arg("id", 5i64)
                    .select(Selection::fields().nested("supplies", Selection::of(&["id"]))),
            )
            .unwrap()
    };

    assert_eq!(
        supplies_of_five(&engine),
        Value::Record(Record::new(attrs! { "supplies" => Vec::<Value>::new() }))
    );

    engine
        .call(&Request::mutation("insertSupply").arg("id", "ruler").arg("team", 5i64))
        .unwrap();

    assert_eq!(
        supplies_of_five(&engine),
        Value::Record(Record::new(attrs! {
            "supplies" => vec![Value::Record(Record::new(attrs! { "id" => "ruler" }))],
        }))
    );
}

#[test]
fn test_reads_never_store_relationship_fields() {
    let engine = office();

    list(&engine, "teams", Selection::Default);
    list(&engine, "users", Selection::Default);
    list(&engine, "allTweets", Selection::Default);

    assert!(engine.records("Team").unwrap().iter().all(|t| !t.has("supplies")));
    assert!(engine.records("User").unwrap().iter().all(|u| !u.has("tweets")));
    assert!(engine.records("Tweet").unwrap().iter().all(|t| !t.has("author")));
}

#[test]
fn test_default_depth_is_configurable() {
    let flat = Engine::office_with(EngineConfig::flat()).unwrap();
    let teams = list(&flat, "teams", Selection::Default);
    assert!(teams.iter().all(|t| !t.has("supplies")));

    let deep = Engine::office_with(EngineConfig::new().with_default_depth(2)).unwrap();
    let users = list(&deep, "users", Selection::Default);
    let tweets = users[0].get("tweets").unwrap().as_list().unwrap();
    let author = tweets[0].as_record().unwrap().get("author").unwrap();
    assert_eq!(
        author.as_record().unwrap().get("username"),
        Some(&Value::from("mija"))
    );
    // expansion stops at the configured depth
    assert!(!author.as_record().unwrap().has("tweets"));
}
