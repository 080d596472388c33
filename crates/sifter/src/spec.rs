//! The [`Specification`] trait and its logical combinators.
//!
//! A specification answers one question about one record: does it match?
//! Leaves decide from the record itself; composites ([`And`], [`Or`],
//! [`Not`], [`AllOf`], [`AnyOf`]) decide from their operands. New leaves are
//! added by implementing the trait, without touching the composites or the
//! filter functions.
//!
//! Composites own their operands. To share one operand between several
//! trees, wrap it in an [`Arc`] (or turn it into a [`BoxedSpec`]); to compose
//! borrowed operands, pass `&spec`, in which case the borrow checker keeps the
//! composite from outliving them.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A pure boolean predicate over a single record.
///
/// `is_satisfied` must not have side effects and must return the same answer
/// for the same record state. Everything in this crate relies on that: the
/// combinators short-circuit, and filters may evaluate a record at most once.
///
/// # Example
///
/// ```
/// use sifter::{filter, Specification};
///
/// struct Even;
///
/// impl Specification<i64> for Even {
///     fn is_satisfied(&self, n: &i64) -> bool {
///         n % 2 == 0
///     }
/// }
///
/// struct Positive;
///
/// impl Specification<i64> for Positive {
///     fn is_satisfied(&self, n: &i64) -> bool {
///         *n > 0
///     }
/// }
///
/// let numbers = [-4, -1, 0, 3, 8];
/// let spec = Even.and(Positive);
/// assert_eq!(filter(&numbers, &spec), vec![&8]);
/// assert_eq!(filter(&numbers, &Even.not()), vec![&-1, &3]);
/// ```
pub trait Specification<T: ?Sized> {
    /// Returns `true` if `item` matches.
    fn is_satisfied(&self, item: &T) -> bool;

    /// Both `self` and `other` must match. `other` is only evaluated when
    /// `self` matches, so put the cheaper check on the left.
    fn and<S>(self, other: S) -> And<Self, S, T>
    where
        Self: Sized,
        S: Specification<T>,
    {
        And::new(self, other)
    }

    /// Either `self` or `other` must match. `other` is only evaluated when
    /// `self` does not match.
    fn or<S>(self, other: S) -> Or<Self, S, T>
    where
        Self: Sized,
        S: Specification<T>,
    {
        Or::new(self, other)
    }

    /// Matches exactly the records `self` rejects.
    fn not(self) -> Not<Self, T>
    where
        Self: Sized,
    {
        Not::new(self)
    }

    /// Moves this specification behind a shared, thread-safe handle.
    fn boxed(self) -> BoxedSpec<T>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Arc::new(self)
    }
}

/// Shared handle to a specification of any concrete type.
///
/// Used when a tree is assembled at runtime (from user input, config, ...)
/// and the concrete composite type cannot be named.
pub type BoxedSpec<T> = Arc<dyn Specification<T> + Send + Sync>;

impl<T: ?Sized, S: Specification<T> + ?Sized> Specification<T> for &S {
    fn is_satisfied(&self, item: &T) -> bool {
        (**self).is_satisfied(item)
    }
}

impl<T: ?Sized, S: Specification<T> + ?Sized> Specification<T> for Box<S> {
    fn is_satisfied(&self, item: &T) -> bool {
        (**self).is_satisfied(item)
    }
}

impl<T: ?Sized, S: Specification<T> + ?Sized> Specification<T> for Arc<S> {
    fn is_satisfied(&self, item: &T) -> bool {
        (**self).is_satisfied(item)
    }
}

// ============================================================================
// Composites
// ============================================================================

/// Short-circuit conjunction, see [`Specification::and`].
///
/// `T` is the record type; it only pins down which `Specification` impl of
/// the operands is meant.
pub struct And<A, B, T: ?Sized> {
    left: A,
    right: B,
    _record: PhantomData<fn(&T)>,
}

impl<A, B, T: ?Sized> And<A, B, T> {
    pub fn new(left: A, right: B) -> Self {
        And {
            left,
            right,
            _record: PhantomData,
        }
    }

    pub fn left(&self) -> &A {
        &self.left
    }

    pub fn right(&self) -> &B {
        &self.right
    }
}

impl<T: ?Sized, A: Specification<T>, B: Specification<T>> Specification<T> for And<A, B, T> {
    fn is_satisfied(&self, item: &T) -> bool {
        self.left.is_satisfied(item) && self.right.is_satisfied(item)
    }
}

/// Short-circuit disjunction, see [`Specification::or`].
pub struct Or<A, B, T: ?Sized> {
    left: A,
    right: B,
    _record: PhantomData<fn(&T)>,
}

impl<A, B, T: ?Sized> Or<A, B, T> {
    pub fn new(left: A, right: B) -> Self {
        Or {
            left,
            right,
            _record: PhantomData,
        }
    }

    pub fn left(&self) -> &A {
        &self.left
    }

    pub fn right(&self) -> &B {
        &self.right
    }
}

impl<T: ?Sized, A: Specification<T>, B: Specification<T>> Specification<T> for Or<A, B, T> {
    fn is_satisfied(&self, item: &T) -> bool {
        self.left.is_satisfied(item) || self.right.is_satisfied(item)
    }
}

/// Negation, see [`Specification::not`].
pub struct Not<S, T: ?Sized> {
    inner: S,
    _record: PhantomData<fn(&T)>,
}

impl<S, T: ?Sized> Not<S, T> {
    pub fn new(inner: S) -> Self {
        Not {
            inner,
            _record: PhantomData,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<T: ?Sized, S: Specification<T>> Specification<T> for Not<S, T> {
    fn is_satisfied(&self, item: &T) -> bool {
        !self.inner.is_satisfied(item)
    }
}

// Clone, Copy and Debug bounded on the operands only.
macro_rules! binary_traits {
    ($name:ident) => {
        impl<A: Clone, B: Clone, T: ?Sized> Clone for $name<A, B, T> {
            fn clone(&self) -> Self {
                $name::new(self.left.clone(), self.right.clone())
            }
        }

        impl<A: Copy, B: Copy, T: ?Sized> Copy for $name<A, B, T> {}

        impl<A: fmt::Debug, B: fmt::Debug, T: ?Sized> fmt::Debug for $name<A, B, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&self.left)
                    .field(&self.right)
                    .finish()
            }
        }
    };
}

binary_traits!(And);
binary_traits!(Or);

impl<S: Clone, T: ?Sized> Clone for Not<S, T> {
    fn clone(&self) -> Self {
        Not::new(self.inner.clone())
    }
}

impl<S: Copy, T: ?Sized> Copy for Not<S, T> {}

impl<S: fmt::Debug, T: ?Sized> fmt::Debug for Not<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Not").field(&self.inner).finish()
    }
}

/// N-ary conjunction over runtime-built operands.
///
/// Operands are evaluated in insertion order and evaluation stops at the
/// first rejection. An empty `AllOf` matches everything.
pub struct AllOf<T: ?Sized> {
    specs: Vec<BoxedSpec<T>>,
}

/// N-ary disjunction over runtime-built operands.
///
/// Evaluation stops at the first match. An empty `AnyOf` matches nothing.
pub struct AnyOf<T: ?Sized> {
    specs: Vec<BoxedSpec<T>>,
}

macro_rules! group_spec {
    ($name:ident, $iter_method:ident) => {
        impl<T: ?Sized> $name<T> {
            pub fn new() -> Self {
                $name { specs: Vec::new() }
            }

            /// Appends an operand.
            pub fn with<S>(mut self, spec: S) -> Self
            where
                S: Specification<T> + Send + Sync + 'static,
            {
                self.specs.push(Arc::new(spec));
                self
            }

            pub fn push(&mut self, spec: BoxedSpec<T>) {
                self.specs.push(spec);
            }

            pub fn len(&self) -> usize {
                self.specs.len()
            }

            pub fn is_empty(&self) -> bool {
                self.specs.is_empty()
            }
        }

        impl<T: ?Sized> Default for $name<T> {
            fn default() -> Self {
                $name::new()
            }
        }

        impl<T: ?Sized> Clone for $name<T> {
            fn clone(&self) -> Self {
                $name {
                    specs: self.specs.clone(),
                }
            }
        }

        impl<T: ?Sized> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("len", &self.specs.len())
                    .finish()
            }
        }

        impl<T: ?Sized> FromIterator<BoxedSpec<T>> for $name<T> {
            fn from_iter<I: IntoIterator<Item = BoxedSpec<T>>>(iter: I) -> Self {
                $name {
                    specs: iter.into_iter().collect(),
                }
            }
        }

        impl<T: ?Sized> Specification<T> for $name<T> {
            fn is_satisfied(&self, item: &T) -> bool {
                self.specs.iter().$iter_method(|spec| spec.is_satisfied(item))
            }
        }
    };
}

group_spec!(AllOf, all);
group_spec!(AnyOf, any);

/// Collects operands into an [`AllOf`].
pub fn all_of<T: ?Sized, I>(specs: I) -> AllOf<T>
where
    I: IntoIterator<Item = BoxedSpec<T>>,
{
    specs.into_iter().collect()
}

/// Collects operands into an [`AnyOf`].
pub fn any_of<T: ?Sized, I>(specs: I) -> AnyOf<T>
where
    I: IntoIterator<Item = BoxedSpec<T>>,
{
    specs.into_iter().collect()
}

// ============================================================================
// Leaves
// ============================================================================

/// Matches every record. Identity for [`And`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Always;

impl<T: ?Sized> Specification<T> for Always {
    fn is_satisfied(&self, _item: &T) -> bool {
        true
    }
}

/// Matches no record. Identity for [`Or`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Never;

impl<T: ?Sized> Specification<T> for Never {
    fn is_satisfied(&self, _item: &T) -> bool {
        false
    }
}

/// Leaf built from a closure.
///
/// The closure must be pure; see [`Specification`].
#[derive(Clone, Copy)]
pub struct Predicate<F> {
    check: F,
}

impl<F> fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

impl<T: ?Sized, F: Fn(&T) -> bool> Specification<T> for Predicate<F> {
    fn is_satisfied(&self, item: &T) -> bool {
        (self.check)(item)
    }
}

/// Wraps a closure as a leaf specification.
///
/// ```
/// use sifter::{filter, predicate};
///
/// let words = ["tree", "house", "apple"];
/// let short = predicate(|w: &&str| w.len() <= 4);
/// assert_eq!(filter(&words, &short), vec![&"tree"]);
/// ```
pub fn predicate<T: ?Sized, F: Fn(&T) -> bool>(check: F) -> Predicate<F> {
    Predicate { check }
}
