//! Both backends evaluate the same condition trees identically

#![cfg(feature = "sqlite")]

use rstest::rstest;
use rusqlite::Connection;
use serde_json::{Value, json};
use tablekit_query::{
	Condition, MemoryQuery, Operator, QueryBuilder, SortDirection, SqlQuery,
};

fn records() -> Vec<Value> {
	vec![
		json!({"id": 1, "name": "Alice", "team": "red", "score": 10}),
		json!({"id": 2, "name": "bob", "team": "blue", "score": 25}),
		json!({"id": 3, "name": "Carol", "team": "red", "score": null}),
		json!({"id": 4, "name": "dave_x", "team": "green", "score": 7}),
		json!({"id": 5, "name": "Eve", "team": "blue", "score": 25}),
	]
}

fn connection() -> Connection {
	let connection = Connection::open_in_memory().unwrap();
	connection
		.execute_batch(
			"CREATE TABLE players (id INTEGER PRIMARY KEY, name TEXT, team TEXT, score INTEGER);
			INSERT INTO players VALUES
				(1, 'Alice', 'red', 10),
				(2, 'bob', 'blue', 25),
				(3, 'Carol', 'red', NULL),
				(4, 'dave_x', 'green', 7),
				(5, 'Eve', 'blue', 25);",
		)
		.unwrap();
	connection
}

fn ids<Q: QueryBuilder<Row = tablekit_query::Record>>(query: Q) -> Vec<Value> {
	query
		.order_by("id", SortDirection::Ascending)
		.paginate(100, "page", 1)
		.unwrap()
		.into_items()
		.into_iter()
		.map(|row| row["id"].clone())
		.collect()
}

#[rstest]
#[case::equality(Condition::eq("team", "red"))]
#[case::comparison(Condition::compare("score", Operator::Gte, 10))]
#[case::not_equal(Condition::compare("team", Operator::Ne, "blue"))]
#[case::like_case_insensitive(Condition::contains("name", "O"))]
#[case::like_underscore(Condition::like("name", "dave_%"))]
#[case::in_list(Condition::is_in("id", [2, 4, 9]))]
#[case::or_group(Condition::any().add(Condition::eq("team", "green")).add(Condition::eq("score", 25)))]
#[case::null_equality(Condition::eq("score", Value::Null))]
fn test_backends_agree(#[case] condition: Condition) {
	let connection = connection();
	let memory = ids(MemoryQuery::from_values(records()).unwrap().filter(condition.clone()));
	let sql = ids(SqlQuery::new(&connection, "players").filter(condition));
	assert_eq!(memory, sql);
}

#[test]
fn test_descending_sort_matches() {
	let connection = connection();
	let memory: Vec<Value> = MemoryQuery::from_values(records())
		.unwrap()
		.order_by("name", SortDirection::Descending)
		.paginate(2, "page", 1)
		.unwrap()
		.into_items()
		.into_iter()
		.map(|row| row["name"].clone())
		.collect();
	let sql: Vec<Value> = SqlQuery::new(&connection, "players")
		.order_by("name", SortDirection::Descending)
		.paginate(2, "page", 1)
		.unwrap()
		.into_items()
		.into_iter()
		.map(|row| row["name"].clone())
		.collect();

	assert_eq!(memory, vec![json!("dave_x"), json!("bob")]);
	assert_eq!(memory, sql);
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(700_000_000_000_000_000)]
fn test_pages_past_the_end_agree(#[case] page: u64) {
	let connection = connection();
	let memory = MemoryQuery::from_values(records())
		.unwrap()
		.paginate(3, "page", page)
		.unwrap();
	let sql = SqlQuery::new(&connection, "players")
		.paginate(3, "page", page)
		.unwrap();

	assert_eq!(memory.items().len(), sql.items().len());
	assert_eq!(memory.total(), sql.total());
	assert_eq!(memory.current_page(), sql.current_page());
}
