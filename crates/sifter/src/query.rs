//! Reusable queries: a specification plus ordering and pagination.
//!
//! A [`Query`] is built with [`Query::builder`] and validated once, at
//! [`QueryBuilder::build`]. After that, running it cannot fail.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, SifterError};
use crate::filter::filter_iter;
use crate::ordering::{compare_records, Dir, OrderBy};
use crate::record::Record;
use crate::spec::{BoxedSpec, Specification};

/// A validated, reusable query.
///
/// Results are computed as:
///
/// ```text
/// matches  = records satisfying the specification, in input order
/// sorted   = stable sort of matches by the order keys (skipped if none)
/// result   = sorted, skipping `offset`, keeping at most `limit`
/// ```
///
/// # Example
///
/// ```
/// use sifter::{field, Number, Query, Record, Value};
///
/// struct Task {
///     title: &'static str,
///     priority: u8,
///     done: bool,
/// }
///
/// impl Record for Task {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "title" => Value::String(self.title),
///             "priority" => Value::Number(Number::from(self.priority)),
///             "done" => Value::Bool(self.done),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let tasks = [
///     Task { title: "Write docs", priority: 3, done: false },
///     Task { title: "Fix bug", priority: 5, done: false },
///     Task { title: "Ship it", priority: 4, done: true },
/// ];
///
/// let query = Query::builder()
///     .spec(field("done").eq(false))
///     .order_desc("priority")
///     .limit(1)
///     .build()
///     .unwrap();
///
/// let top = query.run(&tasks);
/// assert_eq!(top.len(), 1);
/// assert_eq!(top[0].title, "Fix bug");
/// ```
pub struct Query<T: ?Sized> {
    spec: BoxedSpec<T>,
    orderings: Vec<OrderBy>,
    limit: Option<usize>,
    offset: usize,
}

impl<T: ?Sized> Query<T> {
    /// Starts a new query.
    pub fn builder() -> QueryBuilder<T> {
        QueryBuilder::default()
    }

    pub fn spec(&self) -> &BoxedSpec<T> {
        &self.spec
    }

    /// Sort keys, most significant first.
    pub fn orderings(&self) -> &[OrderBy] {
        &self.orderings
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Tests a single record against the specification.
    pub fn matches(&self, item: &T) -> bool {
        self.spec.is_satisfied(item)
    }
}

impl<T> Query<T> {
    /// Number of matching records, ignoring offset and limit.
    pub fn count(&self, items: &[T]) -> usize {
        filter_iter(items, &self.spec).count()
    }
}

impl<T: Record> Query<T> {
    /// Runs the query against `items`.
    pub fn run<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        let mut results: Vec<&'a T> = filter_iter(items, &self.spec).collect();
        let matched = results.len();

        if !self.orderings.is_empty() {
            results.sort_by(|a, b| compare_records(*a, *b, &self.orderings));
        }

        let skip = self.offset.min(results.len());
        if skip > 0 {
            results.drain(..skip);
        }
        if let Some(limit) = self.limit {
            results.truncate(limit);
        }

        debug!(
            total = items.len(),
            matched,
            returned = results.len(),
            "ran query"
        );
        results
    }

    /// Runs the query and clones the results.
    pub fn run_cloned(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        self.run(items).into_iter().cloned().collect()
    }
}

impl<T: ?Sized> Clone for Query<T> {
    fn clone(&self) -> Self {
        Query {
            spec: Arc::clone(&self.spec),
            orderings: self.orderings.clone(),
            limit: self.limit,
            offset: self.offset,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("orderings", &self.orderings)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

/// Fluent builder for [`Query`].
pub struct QueryBuilder<T: ?Sized> {
    spec: Option<BoxedSpec<T>>,
    orderings: Vec<OrderBy>,
    limit: Option<usize>,
    offset: usize,
}

impl<T: ?Sized> Default for QueryBuilder<T> {
    fn default() -> Self {
        QueryBuilder {
            spec: None,
            orderings: Vec::new(),
            limit: None,
            offset: 0,
        }
    }
}

impl<T: ?Sized> QueryBuilder<T> {
    /// Sets the specification. Calling it again replaces the previous one;
    /// combine specifications with `and`/`or` first if both should apply.
    pub fn spec<S>(self, spec: S) -> Self
    where
        S: Specification<T> + Send + Sync + 'static,
    {
        self.shared_spec(Arc::new(spec))
    }

    /// Sets an already shared specification.
    pub fn shared_spec(mut self, spec: BoxedSpec<T>) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Adds a sort key. Earlier keys take precedence.
    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        self.orderings.push(OrderBy::new(field, dir));
        self
    }

    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    /// Keeps at most `n` records.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Skips the first `n` matching records.
    pub fn offset(mut self, n: usize) -> Self {
        self.offset = n;
        self
    }

    /// Validates and finalizes the query.
    ///
    /// Fails with [`SifterError::InvalidArgument`] if no specification was
    /// set. Use [`Always`](crate::Always) to select every record on purpose.
    pub fn build(self) -> Result<Query<T>> {
        let spec = self
            .spec
            .ok_or(SifterError::InvalidArgument("query has no specification"))?;
        Ok(Query {
            spec,
            orderings: self.orderings,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::field;
    use crate::spec::{predicate, Always};
    use crate::value::{Number, Value};

    #[derive(Debug, Clone, PartialEq)]
    struct Task {
        name: &'static str,
        priority: i64,
        archived: bool,
    }

    impl Record for Task {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "name" => Value::String(self.name),
                "priority" => Value::Number(Number::I64(self.priority)),
                "archived" => Value::Bool(self.archived),
                _ => Value::None,
            }
        }
    }

    fn tasks() -> Vec<Task> {
        vec![
            Task { name: "Task A", priority: 1, archived: false },
            Task { name: "Task B", priority: 2, archived: false },
            Task { name: "Urgent Task", priority: 5, archived: false },
            Task { name: "Critical Task", priority: 5, archived: true },
            Task { name: "Done Task", priority: 3, archived: true },
        ]
    }

    fn names<'a>(results: &[&'a Task]) -> Vec<&'a str> {
        results.iter().map(|t| t.name).collect()
    }

    #[test]
    fn build_without_spec_fails() {
        let err = Query::<Task>::builder().limit(3).build().unwrap_err();
        assert!(matches!(err, SifterError::InvalidArgument(_)));
    }

    #[test]
    fn unordered_keeps_input_order() {
        let tasks = tasks();
        let query = Query::builder()
            .spec(field("archived").eq(false))
            .build()
            .unwrap();

        assert_eq!(
            names(&query.run(&tasks)),
            ["Task A", "Task B", "Urgent Task"]
        );
        assert_eq!(query.count(&tasks), 3);
    }

    #[test]
    fn ordering_is_stable() {
        let tasks = tasks();
        let query = Query::builder().spec(Always).order_desc("priority").build().unwrap();

        assert_eq!(
            names(&query.run(&tasks)),
            ["Urgent Task", "Critical Task", "Done Task", "Task B", "Task A"]
        );
    }

    #[test]
    fn secondary_key_breaks_ties() {
        let tasks = tasks();
        let query = Query::builder()
            .spec(Always)
            .order_desc("priority")
            .order_asc("name")
            .build()
            .unwrap();

        let results = query.run(&tasks);
        assert_eq!(names(&results[..2]), ["Critical Task", "Urgent Task"]);
    }

    #[test]
    fn offset_and_limit() {
        let tasks = tasks();
        let query = Query::builder().spec(Always).offset(1).limit(2).build().unwrap();
        assert_eq!(names(&query.run(&tasks)), ["Task B", "Urgent Task"]);

        let past_end = Query::builder().spec(Always).offset(50).build().unwrap();
        assert!(past_end.run(&tasks).is_empty());

        let none = Query::builder().spec(Always).limit(0).build().unwrap();
        assert!(none.run(&tasks).is_empty());
    }

    #[test]
    fn closure_spec_and_run_cloned() {
        let tasks = tasks();
        let query = Query::builder()
            .spec(predicate(|t: &Task| t.name.ends_with("Task")))
            .order_asc("priority")
            .build()
            .unwrap();

        let owned = query.run_cloned(&tasks);
        assert_eq!(owned.len(), 3);
        assert_eq!(owned[0].name, "Done Task");
        assert!(query.matches(&tasks[2]));
        assert!(!query.matches(&tasks[0]));
    }

    #[test]
    fn introspection_and_clone() {
        let query: Query<Task> = Query::builder()
            .spec(Always)
            .order_asc("name")
            .offset(2)
            .limit(4)
            .build()
            .unwrap();
        let copy = query.clone();

        assert_eq!(copy.orderings(), &[OrderBy::asc("name")]);
        assert_eq!(copy.limit(), Some(4));
        assert_eq!(copy.offset(), 2);
        assert!(Arc::ptr_eq(query.spec(), copy.spec()));
        assert!(format!("{:?}", query).starts_with("Query {"));
    }

    /// Row whose `reading` is a number, NaN, text or absent.
    struct Sample {
        id: usize,
        reading: Option<std::result::Result<f64, &'static str>>,
    }

    impl Record for Sample {
        fn field_value(&self, field: &str) -> Value<'_> {
            match (field, &self.reading) {
                ("reading", Some(Ok(n))) => Value::Number(Number::F64(*n)),
                ("reading", Some(Err(s))) => Value::String(s),
                _ => Value::None,
            }
        }
    }

    fn samples() -> Vec<Sample> {
        (0..200)
            .map(|id| {
                let reading = match id % 7 {
                    0 => None,
                    3 | 5 => Some(Ok(f64::NAN)),
                    6 => Some(Err("n/a")),
                    _ => Some(Ok(((id * 37) % 101) as f64 - 50.0)),
                };
                Sample { id, reading }
            })
            .collect()
    }

    fn kind(sample: &Sample) -> u8 {
        match sample.reading {
            Some(Ok(n)) if !n.is_nan() => 0,
            Some(Ok(_)) => 1,
            Some(Err(_)) => 2,
            None => 3,
        }
    }

    #[test]
    fn nan_and_mixed_types_sort_into_groups() {
        let samples = samples();
        for dir in [Dir::Asc, Dir::Desc] {
            let query = Query::builder()
                .spec(Always)
                .order_by("reading", dir)
                .build()
                .unwrap();
            let results = query.run(&samples);
            assert_eq!(results.len(), samples.len());

            let kinds: Vec<u8> = results.iter().map(|s| kind(s)).collect();
            let expected: Vec<u8> = match dir {
                Dir::Asc => vec![0, 1, 2, 3],
                Dir::Desc => vec![2, 1, 0, 3],
            };
            let mut groups = kinds.clone();
            groups.dedup();
            assert_eq!(groups, expected);

            let numbers: Vec<f64> = results
                .iter()
                .filter(|s| kind(s) == 0)
                .filter_map(|s| s.reading.and_then(|r| r.ok()))
                .collect();
            let in_order = numbers.windows(2).all(|w| match dir {
                Dir::Asc => w[0] <= w[1],
                Dir::Desc => w[0] >= w[1],
            });
            assert!(in_order, "numbers out of order: {:?}", numbers);

            // ties keep input order
            let nan_ids: Vec<usize> = results
                .iter()
                .filter(|s| kind(s) == 1)
                .map(|s| s.id)
                .collect();
            assert!(nan_ids.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
