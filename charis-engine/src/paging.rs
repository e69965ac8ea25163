use crate::data::Question;
use rand::Rng;
use rand::seq::SliceRandom;

/// Questions shown per page.
pub const PAGE_SIZE: usize = 10;

/// Produce the session's working order: an unbiased shuffle of the feed
/// order. The input is left untouched; the same rng state always yields
/// the same permutation.
#[must_use]
pub fn shuffle(questions: &[Question], rng: &mut impl Rng) -> Vec<Question> {
    let mut order = questions.to_vec();
    order.shuffle(rng);
    order
}

/// Number of pages needed for `total` questions. An empty set still
/// renders one (empty) page.
#[must_use]
pub const fn page_count(total: usize) -> usize {
    if total == 0 { 1 } else { total.div_ceil(PAGE_SIZE) }
}

/// The window of items visible on `page_index`. Out-of-range indexes
/// yield an empty slice rather than panicking.
#[must_use]
pub fn page_slice<T>(items: &[T], page_index: usize) -> &[T] {
    let Some(start) = page_index.checked_mul(PAGE_SIZE) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = usize::min(start + PAGE_SIZE, items.len());
    &items[start..end]
}

/// Page index holding the given working-order position.
#[must_use]
pub const fn page_of(position: usize) -> usize {
    position / PAGE_SIZE
}
