//! Grouping of message records by message id.

use std::collections::BTreeMap;

use super::types::*;

/// Group records by message id and sort each group by `nano_time`.
///
/// The sort is stable, so records with equal timestamps keep their input
/// order. The map iterates in ascending message id order.
pub fn aggregate<I>(records: I) -> BTreeMap<String, Vec<MessageLogRecord>>
where
    I: IntoIterator<Item = MessageLogRecord>,
{
    let mut groups: BTreeMap<String, Vec<MessageLogRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.message_id.clone())
            .or_default()
            .push(record);
    }

    for records in groups.values_mut() {
        records.sort_by_key(|r| r.nano_time);
    }

    groups
}

/// Aggregate records into [`MessageGroup`]s, ascending by message id
pub fn into_groups<I>(records: I) -> Vec<MessageGroup>
where
    I: IntoIterator<Item = MessageLogRecord>,
{
    aggregate(records)
        .into_iter()
        .map(|(message_id, records)| MessageGroup {
            message_id,
            records,
        })
        .collect()
}
