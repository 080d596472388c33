//! Applying a [`Specification`] to a collection.
//!
//! Every function here makes a single pass over the input and calls
//! `is_satisfied` once per record. Matching records come back as borrows of
//! the input, in input order. Only [`retain`] touches the collection, and it
//! says so in its signature.

use tracing::trace;

use crate::error::{Result, SifterError};
use crate::spec::Specification;

/// Something that selects records with a specification.
///
/// [`SpecFilter`] is the stock implementation. The trait exists so that code
/// consuming filtered results can be handed a different strategy (for
/// instance one backed by an index) without changing its signature.
pub trait Filter<T> {
    fn filter<'a, S>(&self, items: &'a [T], spec: &S) -> Vec<&'a T>
    where
        S: Specification<T> + ?Sized;
}

/// Linear-scan [`Filter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecFilter;

impl<T> Filter<T> for SpecFilter {
    fn filter<'a, S>(&self, items: &'a [T], spec: &S) -> Vec<&'a T>
    where
        S: Specification<T> + ?Sized,
    {
        filter(items, spec)
    }
}

/// Returns the records matching `spec`, in input order.
pub fn filter<'a, T, S>(items: &'a [T], spec: &S) -> Vec<&'a T>
where
    S: Specification<T> + ?Sized,
{
    let matched: Vec<&'a T> = filter_iter(items, spec).collect();
    trace!(total = items.len(), matched = matched.len(), "filtered records");
    matched
}

/// Like [`filter`], but with the specification passed as an `Option`.
///
/// `None` is rejected with [`SifterError::InvalidArgument`] before any record
/// is looked at; there is no implicit "match all" or "match nothing".
pub fn try_filter<'a, T, S>(items: &'a [T], spec: Option<&S>) -> Result<Vec<&'a T>>
where
    S: Specification<T> + ?Sized,
{
    let spec = spec.ok_or(SifterError::InvalidArgument("a specification is required"))?;
    Ok(filter(items, spec))
}

/// Lazy variant of [`filter`].
pub fn filter_iter<'a, 's, T, S>(items: &'a [T], spec: &'s S) -> Matches<'a, 's, T, S>
where
    S: Specification<T> + ?Sized,
{
    Matches {
        items: items.iter(),
        spec,
    }
}

/// Iterator returned by [`filter_iter`].
pub struct Matches<'a, 's, T, S: ?Sized> {
    items: std::slice::Iter<'a, T>,
    spec: &'s S,
}

impl<'a, 's, T, S> Iterator for Matches<'a, 's, T, S>
where
    S: Specification<T> + ?Sized,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let spec = self.spec;
        self.items.find(|item| spec.is_satisfied(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.items.size_hint().1)
    }
}

impl<'a, 's, T, S> DoubleEndedIterator for Matches<'a, 's, T, S>
where
    S: Specification<T> + ?Sized,
{
    fn next_back(&mut self) -> Option<&'a T> {
        let spec = self.spec;
        self.items.rfind(|item| spec.is_satisfied(item))
    }
}

impl<'a, 's, T, S> std::iter::FusedIterator for Matches<'a, 's, T, S> where
    S: Specification<T> + ?Sized
{
}

/// Clones the matching records.
pub fn filter_cloned<T, S>(items: &[T], spec: &S) -> Vec<T>
where
    T: Clone,
    S: Specification<T> + ?Sized,
{
    filter_iter(items, spec).cloned().collect()
}

/// Drops the records that do not match, in place.
pub fn retain<T, S>(items: &mut Vec<T>, spec: &S)
where
    S: Specification<T> + ?Sized,
{
    let before = items.len();
    items.retain(|item| spec.is_satisfied(item));
    trace!(before, after = items.len(), "retained records");
}

/// Splits the records into `(matching, rejected)`, both in input order.
pub fn partition<'a, T, S>(items: &'a [T], spec: &S) -> (Vec<&'a T>, Vec<&'a T>)
where
    S: Specification<T> + ?Sized,
{
    items.iter().partition(|item| spec.is_satisfied(item))
}

/// Number of matching records.
pub fn count<T, S>(items: &[T], spec: &S) -> usize
where
    S: Specification<T> + ?Sized,
{
    filter_iter(items, spec).count()
}

/// Returns `true` if at least one record matches.
pub fn any<T, S>(items: &[T], spec: &S) -> bool
where
    S: Specification<T> + ?Sized,
{
    items.iter().any(|item| spec.is_satisfied(item))
}

/// Returns `true` if every record matches (vacuously true when empty).
pub fn all<T, S>(items: &[T], spec: &S) -> bool
where
    S: Specification<T> + ?Sized,
{
    items.iter().all(|item| spec.is_satisfied(item))
}

/// First matching record.
pub fn find<'a, T, S>(items: &'a [T], spec: &S) -> Option<&'a T>
where
    S: Specification<T> + ?Sized,
{
    filter_iter(items, spec).next()
}

/// Index of the first matching record.
pub fn position<T, S>(items: &[T], spec: &S) -> Option<usize>
where
    S: Specification<T> + ?Sized,
{
    items.iter().position(|item| spec.is_satisfied(item))
}
