//! Activity aggregation by sport type and year.

use std::collections::{BTreeSet, HashMap};

use super::types::{Activity, ActivityCountByType};

/// Count activities per sport type, in first-seen order.
pub fn group_by_type(activities: &[Activity]) -> Vec<ActivityCountByType> {
    let mut counts: Vec<ActivityCountByType> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for activity in activities {
        match index.get(activity.activity_type.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(activity.activity_type.as_str(), counts.len());
                counts.push(ActivityCountByType {
                    activity_type: activity.activity_type.clone(),
                    count: 1,
                });
            }
        }
    }

    counts
}

/// Unique years present in the history, ascending.
pub fn available_years(activities: &[Activity]) -> Vec<i32> {
    activities
        .iter()
        .map(Activity::year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sport type with the highest count. Ties go to the earliest entry.
pub fn most_performed_type(counts: &[ActivityCountByType]) -> Option<String> {
    let mut best: Option<&ActivityCountByType> = None;

    for entry in counts {
        if best.map_or(true, |b| entry.count > b.count) {
            best = Some(entry);
        }
    }

    best.map(|b| b.activity_type.clone())
}
