//! Length-aware pagination results

use serde::ser::{Serialize, SerializeStruct, Serializer};
use url::form_urlencoded;

/// One page of query results with the metadata needed to render pagination
///
/// Page links keep the query string of the originating request (see
/// [`Page::with_query`]) and only swap the page parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
	items: Vec<T>,
	total: u64,
	per_page: u64,
	current_page: u64,
	page_name: String,
	path: String,
	query: Vec<(String, String)>,
}

impl<T> Page<T> {
	/// Creates a new page
	///
	/// # Examples
	///
	/// ```
	/// use tablekit_query::Page;
	///
	/// let page = Page::new(vec!["a", "b", "c"], 23, 10, 3, "page");
	/// assert_eq!(page.last_page(), 3);
	/// assert_eq!(page.from(), Some(21));
	/// assert_eq!(page.to(), Some(23));
	/// ```
	pub fn new(
		items: Vec<T>,
		total: u64,
		per_page: u64,
		current_page: u64,
		page_name: impl Into<String>,
	) -> Self {
		Self {
			items,
			total,
			per_page,
			current_page: current_page.max(1),
			page_name: page_name.into(),
			path: "/".to_string(),
			query: Vec::new(),
		}
	}

	/// Sets the base path page links point at
	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	/// Preserves the given query-string pairs in generated links
	///
	/// Pairs named like the page parameter are dropped; links set their own.
	pub fn with_query<I, K, V>(mut self, pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.query = pairs
			.into_iter()
			.map(|(key, value)| (key.into(), value.into()))
			.filter(|(key, _)| key != &self.page_name)
			.collect();
		self
	}

	pub fn items(&self) -> &[T] {
		&self.items
	}

	pub fn into_items(self) -> Vec<T> {
		self.items
	}

	pub fn current_page(&self) -> u64 {
		self.current_page
	}

	pub fn per_page(&self) -> u64 {
		self.per_page
	}

	pub fn total(&self) -> u64 {
		self.total
	}

	pub fn page_name(&self) -> &str {
		&self.page_name
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	/// Number of the last page; never below 1
	pub fn last_page(&self) -> u64 {
		self.total.div_ceil(self.per_page.max(1)).max(1)
	}

	/// 1-based position of the first item on this page
	pub fn from(&self) -> Option<u64> {
		if self.items.is_empty() {
			None
		} else {
			Some((self.current_page - 1) * self.per_page + 1)
		}
	}

	/// 1-based position of the last item on this page
	pub fn to(&self) -> Option<u64> {
		self.from()
			.map(|first| first + self.items.len() as u64 - 1)
	}

	pub fn has_more_pages(&self) -> bool {
		self.current_page < self.last_page()
	}

	pub fn on_first_page(&self) -> bool {
		self.current_page <= 1
	}

	/// Builds the link for `page`, keeping the preserved query string
	///
	/// # Examples
	///
	/// ```
	/// use tablekit_query::Page;
	///
	/// let page = Page::new(vec![1, 2], 4, 2, 1, "page")
	///     .with_path("/users")
	///     .with_query([("sort", "-name")]);
	/// assert_eq!(page.url(2), "/users?sort=-name&page=2");
	/// ```
	pub fn url(&self, page: u64) -> String {
		let page = page.max(1).to_string();
		let mut serializer = form_urlencoded::Serializer::new(String::new());
		for (key, value) in &self.query {
			serializer.append_pair(key, value);
		}
		serializer.append_pair(&self.page_name, &page);
		format!("{}?{}", self.path, serializer.finish())
	}

	pub fn next_page_url(&self) -> Option<String> {
		self.has_more_pages()
			.then(|| self.url(self.current_page + 1))
	}

	pub fn previous_page_url(&self) -> Option<String> {
		(self.current_page > 1).then(|| self.url(self.current_page - 1))
	}

	/// Transforms the items while keeping the page metadata
	pub fn map<U, F>(self, f: F) -> Page<U>
	where
		F: FnMut(T) -> U,
	{
		Page {
			items: self.items.into_iter().map(f).collect(),
			total: self.total,
			per_page: self.per_page,
			current_page: self.current_page,
			page_name: self.page_name,
			path: self.path,
			query: self.query,
		}
	}
}

impl<T: Serialize> Serialize for Page<T> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut state = serializer.serialize_struct("Page", 12)?;
		state.serialize_field("current_page", &self.current_page)?;
		state.serialize_field("data", &self.items)?;
		state.serialize_field("first_page_url", &self.url(1))?;
		state.serialize_field("from", &self.from())?;
		state.serialize_field("last_page", &self.last_page())?;
		state.serialize_field("last_page_url", &self.url(self.last_page()))?;
		state.serialize_field("next_page_url", &self.next_page_url())?;
		state.serialize_field("path", &self.path)?;
		state.serialize_field("per_page", &self.per_page)?;
		state.serialize_field("prev_page_url", &self.previous_page_url())?;
		state.serialize_field("to", &self.to())?;
		state.serialize_field("total", &self.total)?;
		state.end()
	}
}
