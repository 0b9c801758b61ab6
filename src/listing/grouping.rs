use std::collections::BTreeMap;

use crate::types::{ListingEntry, RepositoryRecord};

/// Flattens `records` into sections keyed by root path.
///
/// Sections come out in ascending key order, each led by a
/// [`ListingEntry::Group`] header. Records keep their input order inside a
/// section. Names without a path prefix land under `root_group_name`.
pub fn grouped_listing(records: Vec<RepositoryRecord>, root_group_name: &str) -> Vec<ListingEntry> {
    let mut groups: BTreeMap<String, Vec<RepositoryRecord>> = BTreeMap::new();
    for record in records {
        let key = record
            .root_path()
            .unwrap_or(root_group_name)
            .to_string();
        groups.entry(key).or_default().push(record);
    }

    let mut out = Vec::with_capacity(groups.len() + groups.values().map(Vec::len).sum::<usize>());
    for (key, members) in groups {
        out.push(ListingEntry::Group(key));
        out.extend(members.into_iter().map(ListingEntry::Repository));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_ROOT_GROUP_NAME;
    use chrono::DateTime;

    fn record(name: &str, secs: i64) -> RepositoryRecord {
        RepositoryRecord::new(name, DateTime::from_timestamp(secs, 0).unwrap())
    }

    fn labels(entries: &[ListingEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| match entry {
                ListingEntry::Group(key) => format!("[{key}]"),
                ListingEntry::Repository(record) => record.name.clone(),
            })
            .collect()
    }

    #[test]
    fn groups_sorted_by_key_with_discovery_order_inside() {
        let entries = grouped_listing(
            vec![record("libs/a", 10), record("libs/b", 20), record("apps/c", 5)],
            DEFAULT_ROOT_GROUP_NAME,
        );
        assert_eq!(
            labels(&entries),
            vec!["[apps]", "apps/c", "[libs]", "libs/a", "libs/b"]
        );
    }

    #[test]
    fn group_members_are_not_resorted() {
        let entries = grouped_listing(
            vec![record("libs/zeta", 1), record("libs/alpha", 2)],
            DEFAULT_ROOT_GROUP_NAME,
        );
        assert_eq!(labels(&entries), vec!["[libs]", "libs/zeta", "libs/alpha"]);
    }

    #[test]
    fn unprefixed_names_use_configured_group() {
        let entries = grouped_listing(vec![record("standalone", 1)], "root");
        assert_eq!(labels(&entries), vec!["[root]", "standalone"]);
    }

    #[test]
    fn default_group_name_is_a_single_space() {
        let entries = grouped_listing(
            vec![record("libs/a", 1), record("top", 1)],
            DEFAULT_ROOT_GROUP_NAME,
        );
        // " " sorts before any printable key.
        assert_eq!(labels(&entries), vec!["[ ]", "top", "[libs]", "libs/a"]);
    }

    #[test]
    fn nested_paths_group_by_full_prefix() {
        let entries = grouped_listing(
            vec![record("team/libs/a", 1), record("team/b", 1), record("team/libs/c", 1)],
            DEFAULT_ROOT_GROUP_NAME,
        );
        assert_eq!(
            labels(&entries),
            vec!["[team]", "team/b", "[team/libs]", "team/libs/a", "team/libs/c"]
        );
    }

    #[test]
    fn every_record_appears_exactly_once() {
        let input = vec![
            record("x/1", 1),
            record("y/2", 2),
            record("x/3", 3),
            record("solo", 4),
            record("y/5", 5),
        ];
        let entries = grouped_listing(input.clone(), "misc");

        let repos: Vec<&RepositoryRecord> = entries
            .iter()
            .filter_map(|entry| match entry {
                ListingEntry::Repository(record) => Some(record),
                ListingEntry::Group(_) => None,
            })
            .collect();
        assert_eq!(repos.len(), input.len());
        for record in &input {
            assert_eq!(repos.iter().filter(|r| r.name == record.name).count(), 1);
        }

        let headers: Vec<&str> = entries
            .iter()
            .filter(|e| matches!(e, ListingEntry::Group(_)))
            .map(ListingEntry::name)
            .collect();
        let mut sorted = headers.clone();
        sorted.sort();
        assert_eq!(headers, sorted);
        assert_eq!(headers, vec!["misc", "x", "y"]);
    }

    #[test]
    fn empty_input_yields_empty_listing() {
        assert!(grouped_listing(Vec::new(), DEFAULT_ROOT_GROUP_NAME).is_empty());
    }
}
