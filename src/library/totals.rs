use std::time::Duration;

use super::model::MediaItem;

/// Summed duration and size over a set of items.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub count: usize,
    pub duration: Duration,
    pub size: u64,
    /// Items that contributed nothing to `duration` because they have none
    /// (folders, unreadable or non-media files).
    pub missing_duration: usize,
}

impl Totals {
    fn add(mut self, item: &MediaItem) -> Self {
        self.count += 1;
        match item.duration {
            Some(d) => self.duration += d,
            None => self.missing_duration += 1,
        }
        if !item.is_container {
            self.size += item.size;
        }
        self
    }
}

pub fn totals(items: &[MediaItem]) -> Totals {
    items.iter().fold(Totals::default(), Totals::add)
}

/// Totals over the items at `indices`; positions past the end are ignored.
pub fn totals_of<'a>(items: &[MediaItem], indices: impl IntoIterator<Item = &'a usize>) -> Totals {
    indices
        .into_iter()
        .filter_map(|&i| items.get(i))
        .fold(Totals::default(), Totals::add)
}
