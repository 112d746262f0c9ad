//! Column sorting for the item list.

use std::cmp::Ordering;

use crate::config::SortKeySetting;

use super::model::MediaItem;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Date,
    Size,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        }
    }
}

impl From<SortKeySetting> for SortKey {
    fn from(s: SortKeySetting) -> Self {
        match s {
            SortKeySetting::Name => SortKey::Name,
            SortKeySetting::Date => SortKey::Date,
            SortKeySetting::Size => SortKey::Size,
        }
    }
}

/// Order two items by `key`.
///
/// A folder always comes before a file, whichever direction is requested;
/// only items of the same kind are compared by key and direction.
pub fn compare(a: &MediaItem, b: &MediaItem, key: SortKey, order: SortOrder) -> Ordering {
    match (a.is_container, b.is_container) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    let by_key = match key {
        SortKey::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        SortKey::Date => a.modified.cmp(&b.modified),
        SortKey::Size => a.size.cmp(&b.size),
    };

    match order {
        SortOrder::Ascending => by_key,
        SortOrder::Descending => by_key.reverse(),
    }
}

/// Sort `items` in place. Equal items keep their relative order.
pub fn sort_items(items: &mut [MediaItem], key: SortKey, order: SortOrder) {
    items.sort_by(|a, b| compare(a, b, key, order));
}
