//! Sortable and searchable lists follow the declared columns

use proptest::prelude::*;
use tablekit_query::MemoryQuery;
use tablekit_tables::{ColumnBuilder, Table, TextColumn};

fn column_flags() -> impl Strategy<Value = Vec<(String, bool, bool)>> {
	prop::collection::vec(("[a-z][a-z_]{0,8}", any::<bool>(), any::<bool>()), 0..12)
}

fn build(columns: &[(String, bool, bool)]) -> Table<MemoryQuery> {
	Table::make("items").columns(columns.iter().map(|(name, sortable, searchable)| {
		TextColumn::make(name.as_str())
			.sortable(*sortable)
			.searchable(*searchable)
	}))
}

proptest! {
	#[test]
	fn prop_derived_lists_match_flags(columns in column_flags()) {
		let table = build(&columns);

		let sortable: Vec<String> = columns
			.iter()
			.filter(|(_, sortable, _)| *sortable)
			.map(|(name, _, _)| name.clone())
			.collect();
		let searchable: Vec<String> = columns
			.iter()
			.filter(|(_, _, searchable)| *searchable)
			.map(|(name, _, _)| name.clone())
			.collect();

		prop_assert_eq!(table.sortable_columns(), sortable.as_slice());
		prop_assert_eq!(table.searchable_columns(), searchable.as_slice());
	}

	#[test]
	fn prop_columns_call_replaces_previous(first in column_flags(), second in column_flags()) {
		let table = build(&first);
		let rebuilt = build(&second);
		let replaced = table.columns(second.iter().map(|(name, sortable, searchable)| {
			TextColumn::make(name.as_str())
				.sortable(*sortable)
				.searchable(*searchable)
		}));

		prop_assert_eq!(replaced.sortable_columns(), rebuilt.sortable_columns());
		prop_assert_eq!(replaced.searchable_columns(), rebuilt.searchable_columns());
	}
}
