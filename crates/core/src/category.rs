//! Iterator categories and the random-access classifier.
//!
//! Every iterator type that takes part in strategy selection carries a
//! category marker through [`Categorized`]. A list of iterator types is a
//! tuple implementing [`IteratorList`]; its classification is the logical
//! AND of each member's, and the empty tuple classifies as random-access.

use std::collections::{btree_map, btree_set, hash_map, hash_set, linked_list, vec_deque};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Iterator capability category.
///
/// Refinement chain: `Contiguous` refines `RandomAccess` refines
/// `Bidirectional` refines `Forward` refines `Input`. `Output` stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IteratorCategory {
    /// Single pass, read only.
    Input,
    /// Single pass, write only.
    Output,
    /// Multi pass.
    Forward,
    /// Multi pass, can step backwards.
    Bidirectional,
    /// Constant-time offset and comparison.
    RandomAccess,
    /// Random access over contiguous memory.
    Contiguous,
}

impl IteratorCategory {
    /// Every category, weakest first.
    pub const ALL: [IteratorCategory; 6] = [
        IteratorCategory::Input,
        IteratorCategory::Output,
        IteratorCategory::Forward,
        IteratorCategory::Bidirectional,
        IteratorCategory::RandomAccess,
        IteratorCategory::Contiguous,
    ];

    /// Position on the input refinement chain; `None` for `Output`.
    const fn rank(self) -> Option<u8> {
        match self {
            Self::Output => None,
            Self::Input => Some(0),
            Self::Forward => Some(1),
            Self::Bidirectional => Some(2),
            Self::RandomAccess => Some(3),
            Self::Contiguous => Some(4),
        }
    }

    const fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Self::Input,
            1 => Self::Forward,
            2 => Self::Bidirectional,
            3 => Self::RandomAccess,
            _ => Self::Contiguous,
        }
    }

    /// Whether `self` is `base` or a refinement of it.
    pub const fn refines(self, base: IteratorCategory) -> bool {
        match (self.rank(), base.rank()) {
            (Some(this), Some(base)) => this >= base,
            (None, None) => true,
            _ => false,
        }
    }

    /// Whether this category is random-access or a refinement of it.
    pub const fn is_random_access(self) -> bool {
        self.refines(Self::RandomAccess)
    }

    /// Strongest category refined by both operands.
    ///
    /// Mixing `Output` with any other category degrades to `Input`.
    pub const fn meet(self, other: IteratorCategory) -> IteratorCategory {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => Self::from_rank(if a < b { a } else { b }),
            (None, None) => Self::Output,
            _ => Self::Input,
        }
    }

    /// Short name used on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Forward => "forward",
            Self::Bidirectional => "bidirectional",
            Self::RandomAccess => "random-access",
            Self::Contiguous => "contiguous",
        }
    }
}

impl std::fmt::Display for IteratorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IteratorCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "input" => Ok(Self::Input),
            "output" => Ok(Self::Output),
            "forward" => Ok(Self::Forward),
            "bidirectional" | "bidi" => Ok(Self::Bidirectional),
            "random-access" | "random" => Ok(Self::RandomAccess),
            "contiguous" => Ok(Self::Contiguous),
            _ => Err(ParseError::Category(s.to_string())),
        }
    }
}

/// AND-reduction of [`IteratorCategory::is_random_access`]; `true` for an
/// empty slice.
pub const fn all_random_access(categories: &[IteratorCategory]) -> bool {
    let mut i = 0;
    while i < categories.len() {
        if !categories[i].is_random_access() {
            return false;
        }
        i += 1;
    }
    true
}

/// An iterator type that carries a category marker.
///
/// Types without an implementation cannot be passed to the selector; wrap
/// them in [`Opaque`] to get the conservative `Input` classification.
pub trait Categorized {
    /// The category of this iterator type.
    const CATEGORY: IteratorCategory;
}

/// Iterator wrapper that classifies as [`IteratorCategory::Input`].
#[derive(Debug, Clone)]
pub struct Opaque<I>(pub I);

impl<I> Opaque<I> {
    /// Wrap an iterator.
    pub fn new(inner: I) -> Self {
        Self(inner)
    }

    /// Unwrap the iterator.
    pub fn into_inner(self) -> I {
        self.0
    }
}

impl<I: Iterator> Iterator for Opaque<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<I> Categorized for Opaque<I> {
    const CATEGORY: IteratorCategory = IteratorCategory::Input;
}

/// Category marker for adapters whose result is never contiguous memory.
const fn not_contiguous(category: IteratorCategory) -> IteratorCategory {
    category.meet(IteratorCategory::RandomAccess)
}

macro_rules! categorize {
    ($category:ident => $($ty:ty $(where [$($bound:tt)*])?),+ $(,)?) => {
        $(
            impl<$($($bound)*)?> Categorized for $ty {
                const CATEGORY: IteratorCategory = IteratorCategory::$category;
            }
        )+
    };
}

categorize!(Contiguous =>
    std::slice::Iter<'a, T> where ['a, T],
    std::slice::IterMut<'a, T> where ['a, T],
    std::vec::IntoIter<T> where [T],
    std::array::IntoIter<T, N> where [T, const N: usize],
);

categorize!(RandomAccess =>
    std::slice::Chunks<'a, T> where ['a, T],
    std::slice::ChunksExact<'a, T> where ['a, T],
    std::slice::Windows<'a, T> where ['a, T],
    vec_deque::Iter<'a, T> where ['a, T],
    vec_deque::IterMut<'a, T> where ['a, T],
    vec_deque::IntoIter<T> where [T],
    std::ops::Range<usize>,
    std::ops::Range<u32>,
    std::ops::Range<u64>,
    std::ops::Range<i32>,
    std::ops::Range<i64>,
);

categorize!(Bidirectional =>
    linked_list::Iter<'a, T> where ['a, T],
    linked_list::IterMut<'a, T> where ['a, T],
    linked_list::IntoIter<T> where [T],
    btree_map::Iter<'a, K, V> where ['a, K, V],
    btree_map::Keys<'a, K, V> where ['a, K, V],
    btree_map::Values<'a, K, V> where ['a, K, V],
    btree_map::IntoIter<K, V> where [K, V],
    btree_set::Iter<'a, T> where ['a, T],
    btree_set::IntoIter<T> where [T],
    std::str::Chars<'a> where ['a],
    std::str::CharIndices<'a> where ['a],
    std::str::Bytes<'a> where ['a],
);

categorize!(Forward =>
    hash_map::Iter<'a, K, V> where ['a, K, V],
    hash_map::Keys<'a, K, V> where ['a, K, V],
    hash_map::Values<'a, K, V> where ['a, K, V],
    hash_map::IntoIter<K, V> where [K, V],
    hash_set::Iter<'a, T> where ['a, T],
    hash_set::IntoIter<T> where [T],
    std::str::Lines<'a> where ['a],
);

categorize!(Input =>
    std::io::Lines<B> where [B],
    std::io::Bytes<R> where [R],
    std::sync::mpsc::IntoIter<T> where [T],
    std::iter::FromFn<F> where [F],
);

impl<I: Categorized> Categorized for &mut I {
    const CATEGORY: IteratorCategory = I::CATEGORY;
}

impl<I: Categorized> Categorized for std::iter::Rev<I> {
    const CATEGORY: IteratorCategory = not_contiguous(I::CATEGORY);
}

impl<I: Categorized> Categorized for std::iter::Enumerate<I> {
    const CATEGORY: IteratorCategory = not_contiguous(I::CATEGORY);
}

impl<I: Categorized> Categorized for std::iter::Copied<I> {
    const CATEGORY: IteratorCategory = not_contiguous(I::CATEGORY);
}

impl<I: Categorized> Categorized for std::iter::Cloned<I> {
    const CATEGORY: IteratorCategory = not_contiguous(I::CATEGORY);
}

impl<I: Categorized, F> Categorized for std::iter::Map<I, F> {
    const CATEGORY: IteratorCategory = not_contiguous(I::CATEGORY);
}

impl<I: Categorized> Categorized for std::iter::Skip<I> {
    const CATEGORY: IteratorCategory = not_contiguous(I::CATEGORY);
}

impl<I: Categorized> Categorized for std::iter::Take<I> {
    const CATEGORY: IteratorCategory = not_contiguous(I::CATEGORY);
}

impl<I: Categorized, P> Categorized for std::iter::Filter<I, P> {
    const CATEGORY: IteratorCategory = I::CATEGORY.meet(IteratorCategory::Bidirectional);
}

impl<A: Categorized, B: Categorized> Categorized for std::iter::Zip<A, B> {
    const CATEGORY: IteratorCategory = not_contiguous(A::CATEGORY.meet(B::CATEGORY));
}

impl<A: Categorized, B: Categorized> Categorized for std::iter::Chain<A, B> {
    const CATEGORY: IteratorCategory =
        A::CATEGORY.meet(B::CATEGORY).meet(IteratorCategory::Bidirectional);
}

/// A compile-time list of iterator types.
///
/// Implemented for tuples of [`Categorized`] types up to arity 12,
/// including the empty tuple.
pub trait IteratorList {
    /// Number of iterator types in the list.
    const LEN: usize;

    /// Category of each member, in list order.
    const CATEGORIES: &'static [IteratorCategory];

    /// Whether every member is random-access. `true` for the empty list.
    const ALL_RANDOM_ACCESS: bool;
}

macro_rules! iterator_list {
    ($($name:ident),*) => {
        impl<$($name: Categorized),*> IteratorList for ($($name,)*) {
            const LEN: usize = Self::CATEGORIES.len();
            const CATEGORIES: &'static [IteratorCategory] = &[$(<$name as Categorized>::CATEGORY),*];
            const ALL_RANDOM_ACCESS: bool = all_random_access(Self::CATEGORIES);
        }
    };
}

iterator_list!();
iterator_list!(A);
iterator_list!(A, B);
iterator_list!(A, B, C);
iterator_list!(A, B, C, D);
iterator_list!(A, B, C, D, E);
iterator_list!(A, B, C, D, E, F);
iterator_list!(A, B, C, D, E, F, G);
iterator_list!(A, B, C, D, E, F, G, H);
iterator_list!(A, B, C, D, E, F, G, H, I);
iterator_list!(A, B, C, D, E, F, G, H, I, J);
iterator_list!(A, B, C, D, E, F, G, H, I, J, K);
iterator_list!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Category of a single iterator type, usable in `const` context.
pub const fn category_of<I: Categorized>() -> IteratorCategory {
    I::CATEGORY
}

/// Classify the iterator list a value belongs to.
pub const fn is_random_access<L: IteratorList>(_iterators: &L) -> bool {
    L::ALL_RANDOM_ACCESS
}

/// Zero-sized witness of an iterator list, for naming a list without
/// holding iterator values.
#[derive(Debug)]
pub struct ListOf<L>(PhantomData<fn() -> L>);

impl<L> ListOf<L> {
    /// Create the witness.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<L> Default for ListOf<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> Clone for ListOf<L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for ListOf<L> {}

impl<L: IteratorList> IteratorList for ListOf<L> {
    const LEN: usize = L::LEN;
    const CATEGORIES: &'static [IteratorCategory] = L::CATEGORIES;
    const ALL_RANDOM_ACCESS: bool = L::ALL_RANDOM_ACCESS;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet, LinkedList, VecDeque};

    type VecIter<'a> = std::slice::Iter<'a, i32>;
    type ListIter<'a> = linked_list::Iter<'a, i32>;

    const _: () = assert!(<() as IteratorList>::ALL_RANDOM_ACCESS);
    const _: () = assert!(<(VecIter<'static>,) as IteratorList>::ALL_RANDOM_ACCESS);
    const _: () = assert!(!<(ListIter<'static>,) as IteratorList>::ALL_RANDOM_ACCESS);
    const _: () = assert!(!<(VecIter<'static>, ListIter<'static>) as IteratorList>::ALL_RANDOM_ACCESS);
    const _: () = assert!(!<(ListIter<'static>, VecIter<'static>) as IteratorList>::ALL_RANDOM_ACCESS);

    #[test]
    fn test_refinement_chain() {
        use IteratorCategory::*;
        assert!(Contiguous.refines(RandomAccess));
        assert!(Contiguous.refines(Input));
        assert!(RandomAccess.refines(Bidirectional));
        assert!(Bidirectional.refines(Forward));
        assert!(Forward.refines(Input));
        assert!(!Forward.refines(Bidirectional));
        assert!(!Input.refines(Forward));
        assert!(Output.refines(Output));
        assert!(!Output.refines(Input));
        assert!(!Contiguous.refines(Output));
    }

    #[test]
    fn test_is_random_access() {
        let ra: Vec<_> = IteratorCategory::ALL
            .into_iter()
            .filter(|c| c.is_random_access())
            .collect();
        assert_eq!(ra, vec![IteratorCategory::RandomAccess, IteratorCategory::Contiguous]);
    }

    #[test]
    fn test_meet() {
        use IteratorCategory::*;
        assert_eq!(Contiguous.meet(Bidirectional), Bidirectional);
        assert_eq!(Forward.meet(RandomAccess), Forward);
        assert_eq!(Output.meet(Output), Output);
        assert_eq!(Output.meet(Contiguous), Input);
        for a in IteratorCategory::ALL {
            for b in IteratorCategory::ALL {
                assert_eq!(a.meet(b), b.meet(a));
            }
        }
    }

    #[test]
    fn test_all_random_access_empty_is_true() {
        assert!(all_random_access(&[]));
    }

    #[test]
    fn test_std_categories() {
        assert_eq!(category_of::<std::vec::IntoIter<u8>>(), IteratorCategory::Contiguous);
        assert_eq!(category_of::<vec_deque::Iter<'_, u8>>(), IteratorCategory::RandomAccess);
        assert_eq!(category_of::<linked_list::Iter<'_, u8>>(), IteratorCategory::Bidirectional);
        assert_eq!(category_of::<hash_set::Iter<'_, u8>>(), IteratorCategory::Forward);
        assert_eq!(category_of::<std::ops::Range<usize>>(), IteratorCategory::RandomAccess);
    }

    #[test]
    fn test_adapter_categories() {
        type Mapped<'a> = std::iter::Map<VecIter<'a>, fn(&i32) -> i32>;
        type Filtered<'a> = std::iter::Filter<VecIter<'a>, fn(&&i32) -> bool>;
        type Zipped<'a> = std::iter::Zip<VecIter<'a>, ListIter<'a>>;

        assert_eq!(category_of::<std::iter::Rev<VecIter<'_>>>(), IteratorCategory::RandomAccess);
        assert_eq!(category_of::<Mapped<'_>>(), IteratorCategory::RandomAccess);
        assert_eq!(category_of::<Filtered<'_>>(), IteratorCategory::Bidirectional);
        assert_eq!(category_of::<Zipped<'_>>(), IteratorCategory::Bidirectional);
        assert_eq!(category_of::<Opaque<VecIter<'_>>>(), IteratorCategory::Input);
    }

    #[test]
    fn test_is_random_access_from_values() {
        let v = vec![1, 2, 3];
        let d: VecDeque<i32> = v.iter().copied().collect();
        let l: LinkedList<i32> = v.iter().copied().collect();
        let m: BTreeMap<i32, i32> = v.iter().map(|x| (*x, *x)).collect();
        let s: HashSet<i32> = v.iter().copied().collect();

        assert!(is_random_access(&()));
        assert!(is_random_access(&(v.iter(), d.iter())));
        assert!(!is_random_access(&(v.iter(), l.iter())));
        assert!(!is_random_access(&(m.iter(),)));
        assert!(!is_random_access(&(s.iter(), v.iter())));
        assert!(!is_random_access(&(Opaque::new(v.iter()),)));
    }

    #[test]
    fn test_type_and_value_classifiers_agree() {
        type L<'a> = (VecIter<'a>, ListIter<'a>, std::ops::Range<usize>);
        assert_eq!(<L<'static>>::LEN, 3);
        assert_eq!(
            <L<'static>>::CATEGORIES,
            &[
                IteratorCategory::Contiguous,
                IteratorCategory::Bidirectional,
                IteratorCategory::RandomAccess
            ]
        );
        assert_eq!(
            all_random_access(<L<'static>>::CATEGORIES),
            <L<'static>>::ALL_RANDOM_ACCESS
        );
        assert_eq!(<ListOf<L<'static>>>::ALL_RANDOM_ACCESS, <L<'static>>::ALL_RANDOM_ACCESS);
    }

    #[test]
    fn test_opaque_iterates() {
        let items: Vec<_> = Opaque::new([1, 2, 3].into_iter()).collect();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("random_access".parse::<IteratorCategory>().unwrap(), IteratorCategory::RandomAccess);
        assert_eq!("BIDI".parse::<IteratorCategory>().unwrap(), IteratorCategory::Bidirectional);
        for category in IteratorCategory::ALL {
            assert_eq!(category.as_str().parse::<IteratorCategory>().unwrap(), category);
        }
        assert!("sparse".parse::<IteratorCategory>().is_err());
    }
}
