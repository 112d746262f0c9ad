use std::collections::BTreeSet;

/// Move the elements at `selected` so they form one contiguous block
/// inserted at `target`.
///
/// `target` is a position in the list as it was before anything was
/// removed, so it is shifted left by the number of selected positions in
/// front of it. The moved elements keep their relative order, as do all the
/// others. Selected positions outside the list are ignored, and a target past
/// the end puts the block at the end.
///
/// Returns the position where the block now starts.
pub fn move_block<T>(list: &mut Vec<T>, selected: &BTreeSet<usize>, target: usize) -> usize {
    let len = list.len();
    let selected: Vec<usize> = selected.iter().copied().filter(|&i| i < len).collect();
    let before = selected.iter().filter(|&&i| i < target).count();
    let adjusted = target - before;

    let mut moving: Vec<T> = Vec::with_capacity(selected.len());
    for &i in selected.iter().rev() {
        moving.push(list.remove(i));
    }
    moving.reverse();

    let at = adjusted.min(list.len());
    list.splice(at..at, moving);
    at
}

/// Move a single element from `from` so that it ends up in front of what is
/// currently at `to`.
///
/// `to` may equal the length of the list, meaning "to the end". Out of range
/// positions leave the list untouched. Returns the element's new position.
pub fn move_item<T>(list: &mut Vec<T>, from: usize, to: usize) -> Option<usize> {
    if from >= list.len() || to > list.len() {
        return None;
    }
    if from == to {
        return Some(from);
    }
    let at = if from < to { to - 1 } else { to };
    let item = list.remove(from);
    list.insert(at, item);
    Some(at)
}
