//! The table pipeline
//!
//! Rendering a table resolves the effective state of the request, threads
//! the query through filters, sorting and search (in that order), paginates
//! it, and bundles the page with the table's declarations.

use crate::action::Action;
use crate::column::Column;
use crate::error::{Result, TableError};
use crate::filter::Filter;
use crate::payload::{SharedData, TablePayload};
use crate::request::RequestParams;
use crate::state::TableState;
use crate::utils::is_blank;
use serde::Serialize;
use serde_json::{Map, Value};
use tablekit_conf::TableSettings;
use tablekit_query::{Condition, QueryBuilder, SortDirection};
use tablekit_state::{StateMap, StateStore};

/// Request keys that carry table state
const STATE_KEYS: [&str; 3] = ["sort", "filters", "search"];

/// A table definition over queries of type `Q`
///
/// One table is built per request, configured through its builder methods
/// and then rendered.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tablekit_query::MemoryQuery;
/// use tablekit_tables::column::{ColumnBuilder, TextColumn};
/// use tablekit_tables::{RequestParams, Table};
///
/// let query = MemoryQuery::from_values(vec![
///     json!({"name": "John Doe"}),
///     json!({"name": "Bob Johnson"}),
/// ])
/// .unwrap();
///
/// let table = Table::make("users")
///     .columns([TextColumn::make("name").sortable(true)])
///     .query(query);
///
/// let request = RequestParams::from_query("sort=name");
/// let payload = table.get_table_data(&request, None).unwrap();
///
/// assert_eq!(payload.records.items()[0]["name"], "Bob Johnson");
/// assert_eq!(payload.sortable, ["name"]);
/// ```
pub struct Table<Q> {
	name: String,
	columns: Vec<Column>,
	actions: Vec<Action>,
	filters: Vec<Filter<Q>>,
	query: Option<Q>,
	per_page: u64,
	preserve_state: bool,
	page_name: String,
	session_key_prefix: String,
	sortable_columns: Vec<String>,
	searchable_columns: Vec<String>,
}

impl<Q> Table<Q> {
	/// Creates a table with the default settings
	pub fn make(name: impl Into<String>) -> Self {
		Self::with_settings(name, &TableSettings::default())
	}

	/// Creates a table seeded from application settings
	pub fn with_settings(name: impl Into<String>, settings: &TableSettings) -> Self {
		Self {
			name: name.into(),
			columns: Vec::new(),
			actions: Vec::new(),
			filters: Vec::new(),
			query: None,
			per_page: settings.pagination.default_per_page,
			preserve_state: settings.preserve_state,
			page_name: settings.pagination.page_name.clone(),
			session_key_prefix: settings.session_key_prefix.clone(),
			sortable_columns: Vec::new(),
			searchable_columns: Vec::new(),
		}
	}

	/// Replaces the columns and recomputes the sortable and searchable lists
	pub fn columns<I, C>(mut self, columns: I) -> Self
	where
		I: IntoIterator<Item = C>,
		C: Into<Column>,
	{
		self.columns = columns.into_iter().map(Into::into).collect();
		self.sortable_columns = self
			.columns
			.iter()
			.filter(|column| column.is_sortable())
			.map(|column| column.name().to_string())
			.collect();
		self.searchable_columns = self
			.columns
			.iter()
			.filter(|column| column.is_searchable())
			.map(|column| column.name().to_string())
			.collect();
		self
	}

	pub fn actions<I, A>(mut self, actions: I) -> Self
	where
		I: IntoIterator<Item = A>,
		A: Into<Action>,
	{
		self.actions = actions.into_iter().map(Into::into).collect();
		self
	}

	pub fn filters<I, F>(mut self, filters: I) -> Self
	where
		I: IntoIterator<Item = F>,
		F: Into<Filter<Q>>,
	{
		self.filters = filters.into_iter().map(Into::into).collect();
		self
	}

	/// Base query every render starts from
	pub fn query(mut self, query: Q) -> Self {
		self.query = Some(query);
		self
	}

	pub fn per_page(mut self, per_page: u64) -> Self {
		self.per_page = per_page;
		self
	}

	/// Persists sort, filters, search and page across requests
	pub fn preserve_state(mut self, preserve: bool) -> Self {
		self.preserve_state = preserve;
		self
	}

	/// Query-string key of the page number
	pub fn page_name(mut self, page_name: impl Into<String>) -> Self {
		self.page_name = page_name.into();
		self
	}

	pub fn session_key_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.session_key_prefix = prefix.into();
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Names of sortable columns in declaration order
	pub fn sortable_columns(&self) -> &[String] {
		&self.sortable_columns
	}

	/// Names of searchable columns in declaration order
	pub fn searchable_columns(&self) -> &[String] {
		&self.searchable_columns
	}

	/// Key the state of this table is persisted under
	pub fn state_key(&self) -> String {
		format!("{}{}", self.session_key_prefix, self.name)
	}

	/// Resolves the state driving this render
	///
	/// Without state preservation this is the request itself. Otherwise the
	/// persisted state is loaded; when the request carries any state key it
	/// is merged over the persisted state (request values win) and written
	/// back. A failing store falls back to the request.
	pub fn resolve_state(
		&self,
		request: &RequestParams,
		store: Option<&dyn StateStore>,
	) -> TableState {
		if !self.preserve_state {
			return TableState::new(request.all().clone());
		}
		let Some(store) = store else {
			tracing::warn!(table = %self.name, "No state store available, using request parameters");
			return TableState::new(request.all().clone());
		};

		let key = self.state_key();
		let mut state = match store.get_or(&key, StateMap::new()) {
			Ok(state) => state,
			Err(e) => {
				tracing::warn!(table = %self.name, error = %e, "State store unavailable, using request parameters");
				return TableState::new(request.all().clone());
			}
		};

		let carries_state = STATE_KEYS.iter().any(|key| request.has(key))
			|| request.has(&self.page_name);
		if !carries_state {
			tracing::debug!(table = %self.name, "Using persisted table state");
			return TableState::new(state);
		}

		for (name, value) in request.all() {
			state.insert(name.clone(), value.clone());
		}
		if let Err(e) = store.put(&key, &state) {
			tracing::warn!(table = %self.name, error = %e, "State store unavailable, using request parameters");
			return TableState::new(request.all().clone());
		}

		tracing::debug!(table = %self.name, "Merged request into persisted table state");
		TableState::new(state)
	}
}

impl<Q: QueryBuilder> Table<Q> {
	/// Applies every supplied, non-blank filter value in request order
	///
	/// Values are matched to the first filter with the same name; unknown
	/// names are ignored.
	pub fn apply_filters(&self, query: Q, values: &Map<String, Value>) -> Q {
		let mut query = query;
		for (name, value) in values {
			if is_blank(value) {
				continue;
			}
			match self.filters.iter().find(|filter| filter.name() == name) {
				Some(filter) => query = filter.apply(query, value),
				None => tracing::debug!(table = %self.name, filter = %name, "Ignoring unknown filter"),
			}
		}
		query
	}

	/// Orders by a sortable column; `-name` sorts descending
	pub fn apply_sort(&self, query: Q, sort: Option<&str>) -> Q {
		let Some(sort) = sort.filter(|sort| !sort.is_empty() && *sort != "0") else {
			return query;
		};

		let (direction, column) = SortDirection::parse_from_query(sort);
		if !self.sortable_columns.iter().any(|name| name == column) {
			tracing::debug!(table = %self.name, column, "Ignoring sort on unsortable column");
			return query;
		}
		query.order_by(column, direction)
	}

	/// Narrows to records where any searchable column contains `search`
	pub fn apply_search(&self, query: Q, search: Option<&str>) -> Q {
		let Some(search) = search.filter(|search| !search.is_empty() && *search != "0") else {
			return query;
		};
		if self.searchable_columns.is_empty() {
			return query;
		}

		query.where_group(|group| {
			self.searchable_columns
				.iter()
				.fold(group, |group, column| group.add(Condition::contains(column, search)))
		})
	}
}

impl<Q: QueryBuilder + Clone> Table<Q> {
	/// Runs the pipeline and returns the payload for the client
	///
	/// Page links keep the request's query string. Fails when no query was
	/// supplied or when the query fails to execute.
	pub fn get_table_data(
		&self,
		request: &RequestParams,
		store: Option<&dyn StateStore>,
	) -> Result<TablePayload<'_, Q>> {
		let state = self.resolve_state(request, store);

		let query = self
			.query
			.clone()
			.ok_or_else(|| TableError::MissingQuery(self.name.clone()))?;

		let empty = Map::new();
		let query = self.apply_filters(query, state.filters().unwrap_or(&empty));
		let query = self.apply_sort(query, state.sort().as_deref());
		let query = self.apply_search(query, state.search().as_deref());

		let page = state.page(&self.page_name);
		let records = query
			.paginate(self.per_page, &self.page_name, page)?
			.with_path(request.path())
			.with_query(request.query_pairs());

		tracing::debug!(
			table = %self.name,
			page,
			total = records.total(),
			"Rendered table"
		);

		Ok(TablePayload {
			name: &self.name,
			columns: &self.columns,
			actions: &self.actions,
			filters: &self.filters,
			records,
			sortable: &self.sortable_columns,
			searchable: &self.searchable_columns,
			preserve_state: self.preserve_state,
		})
	}
}

impl<Q> Table<Q>
where
	Q: QueryBuilder + Clone,
	Q::Row: Serialize,
{
	/// Renders the table into its serialized payload
	pub fn render(&self, request: &RequestParams, store: Option<&dyn StateStore>) -> Result<Value> {
		self.get_table_data(request, store)?.to_value()
	}

	/// Renders the table and shares it with the view under `"table"`
	pub fn share<S>(
		&self,
		shared: &mut S,
		request: &RequestParams,
		store: Option<&dyn StateStore>,
	) -> Result<()>
	where
		S: SharedData + ?Sized,
	{
		let payload = self.render(request, store)?;
		shared.share("table", payload);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::{ColumnBuilder, TextColumn};
	use crate::filter::SelectFilter;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use tablekit_query::MemoryQuery;
	use tablekit_state::SessionStateStore;

	#[fixture]
	fn table() -> Table<MemoryQuery> {
		Table::make("users")
			.columns([
				TextColumn::make("name").sortable(true).searchable(true),
				TextColumn::make("email").sortable(true).searchable(true),
				TextColumn::make("status"),
			])
			.filters([SelectFilter::make("status")])
	}

	fn query() -> MemoryQuery {
		MemoryQuery::default()
	}

	fn map(value: Value) -> Map<String, Value> {
		match value {
			Value::Object(map) => map,
			_ => Map::new(),
		}
	}

	#[rstest]
	fn test_derived_column_lists(table: Table<MemoryQuery>) {
		assert_eq!(table.sortable_columns(), ["name", "email"]);
		assert_eq!(table.searchable_columns(), ["name", "email"]);
	}

	#[rstest]
	fn test_columns_replace_derived_lists(table: Table<MemoryQuery>) {
		let table = table.columns([TextColumn::make("id").sortable(true)]);
		assert_eq!(table.sortable_columns(), ["id"]);
		assert!(table.searchable_columns().is_empty());
	}

	#[rstest]
	#[case(Some("name"), vec![("name".to_string(), SortDirection::Ascending)])]
	#[case(Some("-email"), vec![("email".to_string(), SortDirection::Descending)])]
	#[case(Some(""), vec![])]
	#[case(Some("0"), vec![])]
	#[case(None, vec![])]
	#[case(Some("status"), vec![])]
	#[case(Some("unknown"), vec![])]
	#[case(Some("--name"), vec![])]
	fn test_apply_sort(
		table: Table<MemoryQuery>,
		#[case] sort: Option<&str>,
		#[case] expected: Vec<(String, SortDirection)>,
	) {
		let query = table.apply_sort(query(), sort);
		assert_eq!(query.orders(), expected.as_slice());
	}

	#[rstest]
	fn test_apply_search_builds_or_group(table: Table<MemoryQuery>) {
		let query = table.apply_search(query(), Some("jane"));
		assert_eq!(
			query.conditions(),
			&[Condition::any()
				.add(Condition::like("name", "%jane%"))
				.add(Condition::like("email", "%jane%"))]
		);
	}

	#[rstest]
	#[case(None)]
	#[case(Some(""))]
	#[case(Some("0"))]
	fn test_apply_search_ignores_blank_terms(
		table: Table<MemoryQuery>,
		#[case] search: Option<&str>,
	) {
		assert!(table.apply_search(query(), search).conditions().is_empty());
	}

	#[test]
	fn test_apply_search_without_searchable_columns() {
		let table: Table<MemoryQuery> = Table::make("users").columns([TextColumn::make("name")]);
		assert!(table.apply_search(query(), Some("jane")).conditions().is_empty());
	}

	#[rstest]
	#[case(json!({"status": ""}))]
	#[case(json!({"status": null}))]
	#[case(json!({"status": "0"}))]
	#[case(json!({"status": 0}))]
	#[case(json!({"status": []}))]
	#[case(json!({"role": "admin"}))]
	fn test_apply_filters_skips_blank_and_unknown(
		table: Table<MemoryQuery>,
		#[case] values: Value,
	) {
		assert!(table.apply_filters(query(), &map(values)).conditions().is_empty());
	}

	#[rstest]
	fn test_apply_filters_threads_query(table: Table<MemoryQuery>) {
		let table = table.filters([
			SelectFilter::make("status"),
			SelectFilter::make("role"),
			SelectFilter::make("status").query(|query: MemoryQuery, _: &Value| query),
		]);
		let query = table.apply_filters(
			query(),
			&map(json!({"role": "admin", "status": "active"})),
		);
		assert_eq!(
			query.conditions(),
			&[Condition::eq("role", "admin"), Condition::eq("status", "active")]
		);
	}

	#[rstest]
	fn test_missing_query(table: Table<MemoryQuery>) {
		let result = table.get_table_data(&RequestParams::new(), None);
		match result {
			Err(TableError::MissingQuery(name)) => assert_eq!(name, "users"),
			_ => panic!("expected a missing query error"),
		}
	}

	#[rstest]
	fn test_state_is_request_without_preservation(table: Table<MemoryQuery>) {
		let store = SessionStateStore::new();
		let request = RequestParams::from_query("sort=name");

		let state = table.resolve_state(&request, Some(&store));

		assert_eq!(state.sort().as_deref(), Some("name"));
		assert!(store.is_empty());
	}

	#[rstest]
	fn test_state_merge_keeps_persisted_keys(table: Table<MemoryQuery>) {
		let table = table.preserve_state(true);
		let store = SessionStateStore::new();
		store
			.put("tables.users", &map(json!({"sort": "name", "search": "jo"})))
			.unwrap();

		let state = table.resolve_state(&RequestParams::from_query("sort=-email"), Some(&store));

		assert_eq!(
			state.as_map(),
			&map(json!({"sort": "-email", "search": "jo"}))
		);
		assert_eq!(
			store.get("tables.users").unwrap(),
			Some(map(json!({"sort": "-email", "search": "jo"})))
		);
	}

	#[rstest]
	fn test_state_without_state_keys_is_not_written(table: Table<MemoryQuery>) {
		let table = table.preserve_state(true);
		let store = SessionStateStore::new();
		store.put("tables.users", &map(json!({"sort": "name"}))).unwrap();

		let state = table.resolve_state(&RequestParams::from_query("tab=2"), Some(&store));

		assert_eq!(state.as_map(), &map(json!({"sort": "name"})));
		assert_eq!(
			store.get("tables.users").unwrap(),
			Some(map(json!({"sort": "name"})))
		);
	}

	#[rstest]
	fn test_custom_page_name_triggers_merge(table: Table<MemoryQuery>) {
		let table = table.preserve_state(true).page_name("users_page");
		let store = SessionStateStore::new();

		let state = table.resolve_state(&RequestParams::from_query("users_page=3"), Some(&store));

		assert_eq!(state.page("users_page"), 3);
		assert!(store.contains("tables.users"));
	}

	#[rstest]
	fn test_state_without_store_falls_back(table: Table<MemoryQuery>) {
		let table = table.preserve_state(true);
		let state = table.resolve_state(&RequestParams::from_query("search=x"), None);
		assert_eq!(state.search().as_deref(), Some("x"));
	}

	#[test]
	fn test_with_settings() {
		let mut settings = TableSettings::default();
		settings.pagination.default_per_page = 50;
		settings.pagination.page_name = "p".to_string();
		settings.preserve_state = true;
		settings.session_key_prefix = "grid:".to_string();

		let table: Table<MemoryQuery> = Table::with_settings("orders", &settings);

		assert_eq!(table.state_key(), "grid:orders");
		assert_eq!(table.per_page, 50);
		assert_eq!(table.page_name, "p");
		assert!(table.preserve_state);
	}
}
