//! Three-way comparison categories.
//!
//! Algorithms that sort or search need to know how strong the ordering on
//! their element type is. A strong ordering implies a weak one, and a weak
//! ordering implies a partial one.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Strength of a three-way comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonCategory {
    /// Equivalent values are indistinguishable; every pair is ordered.
    Strong,
    /// Every pair is ordered; equivalent values may differ.
    Weak,
    /// Some pairs are unordered (e.g. NaN).
    Partial,
}

impl ComparisonCategory {
    /// Every category, strongest first.
    pub const ALL: [ComparisonCategory; 3] = [
        ComparisonCategory::Strong,
        ComparisonCategory::Weak,
        ComparisonCategory::Partial,
    ];

    const fn strength(self) -> u8 {
        match self {
            Self::Strong => 2,
            Self::Weak => 1,
            Self::Partial => 0,
        }
    }

    /// Whether an ordering of this category also is an ordering of `required`.
    pub const fn implies(self, required: ComparisonCategory) -> bool {
        self.strength() >= required.strength()
    }

    /// The weaker of two categories.
    pub const fn common(self, other: ComparisonCategory) -> ComparisonCategory {
        if self.strength() <= other.strength() {
            self
        } else {
            other
        }
    }

    /// Short display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Weak => "weak",
            Self::Partial => "partial",
        }
    }
}

impl std::fmt::Display for ComparisonCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComparisonCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strong" | "strong-ordering" => Ok(Self::Strong),
            "weak" | "weak-ordering" => Ok(Self::Weak),
            "partial" | "partial-ordering" => Ok(Self::Partial),
            _ => Err(ParseError::Comparison(s.to_string())),
        }
    }
}

/// A type with a three-way comparison of a known category.
pub trait ThreeWayComparable {
    /// Category of the comparison `Self` provides.
    const CATEGORY: ComparisonCategory;
}

/// Whether `T` is three-way comparable under `required`.
pub const fn satisfies<T: ThreeWayComparable + ?Sized>(required: ComparisonCategory) -> bool {
    T::CATEGORY.implies(required)
}

/// A type with a three-way comparison against `U` of a known category.
///
/// `U` defaults to `Self`. Implementations come in symmetric pairs: if `T`
/// compares with `U`, then `U` compares with `T` under the same category.
/// Pairs with no implementation are not comparable at all.
pub trait ThreeWayComparableWith<U: ?Sized = Self> {
    /// Category of the comparison between `Self` and `U`.
    const CATEGORY: ComparisonCategory;
}

/// Whether `T` and `U` are three-way comparable with each other under
/// `required`.
pub const fn satisfies_with<T, U>(required: ComparisonCategory) -> bool
where
    T: ThreeWayComparableWith<U> + ?Sized,
    U: ?Sized,
{
    <T as ThreeWayComparableWith<U>>::CATEGORY.implies(required)
}

/// The category a comparison of `T` with `U` produces. Does not exist for
/// pairs that cannot be compared.
pub const fn three_way_result<T, U>() -> ComparisonCategory
where
    T: ThreeWayComparableWith<U> + ?Sized,
    U: ?Sized,
{
    <T as ThreeWayComparableWith<U>>::CATEGORY
}

/// The common category of a set of categories: the weakest one. `Strong`
/// for an empty set.
pub const fn common_category(categories: &[ComparisonCategory]) -> ComparisonCategory {
    let mut result = ComparisonCategory::Strong;
    let mut i = 0;
    while i < categories.len() {
        result = result.common(categories[i]);
        i += 1;
    }
    result
}

macro_rules! three_way {
    ($category:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl ThreeWayComparable for $ty {
                const CATEGORY: ComparisonCategory = ComparisonCategory::$category;
            }

            impl ThreeWayComparableWith for $ty {
                const CATEGORY: ComparisonCategory = ComparisonCategory::$category;
            }
        )+
    };
}

// Emits both directions of each pair.
macro_rules! comparable_with {
    ($category:ident => $(($a:ty, $b:ty)),+ $(,)?) => {
        $(
            impl ThreeWayComparableWith<$b> for $a {
                const CATEGORY: ComparisonCategory = ComparisonCategory::$category;
            }

            impl ThreeWayComparableWith<$a> for $b {
                const CATEGORY: ComparisonCategory = ComparisonCategory::$category;
            }
        )+
    };
}

three_way!(Strong =>
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    bool, char, str, String, (),
    std::time::Duration,
);

three_way!(Partial => f32, f64);

// Mixed integers compare through a lossless widening.
comparable_with!(Strong =>
    (u8, u16), (u8, u32), (u8, u64), (u8, u128), (u16, u32), (u16, u64), (u16, u128),
    (u32, u64), (u32, u128), (u64, u128),
    (i8, i16), (i8, i32), (i8, i64), (i8, i128), (i16, i32), (i16, i64), (i16, i128),
    (i32, i64), (i32, i128), (i64, i128),
    (u8, i16), (u8, i32), (u8, i64), (u8, i128), (u16, i32), (u16, i64), (u16, i128),
    (u32, i64), (u32, i128), (u64, i128),
    (char, u32), (char, u64), (char, i64),
    (str, String),
);

// Integers compare with a float that holds every value exactly.
comparable_with!(Partial =>
    (f32, f64),
    (u8, f32), (u16, f32), (i8, f32), (i16, f32),
    (u8, f64), (u16, f64), (u32, f64), (i8, f64), (i16, f64), (i32, f64),
);

impl<T: ?Sized> ThreeWayComparable for *const T {
    const CATEGORY: ComparisonCategory = ComparisonCategory::Strong;
}

impl<T: ?Sized> ThreeWayComparable for *mut T {
    const CATEGORY: ComparisonCategory = ComparisonCategory::Strong;
}

impl<T: ?Sized> ThreeWayComparableWith for *const T {
    const CATEGORY: ComparisonCategory = ComparisonCategory::Strong;
}

impl<T: ?Sized> ThreeWayComparableWith for *mut T {
    const CATEGORY: ComparisonCategory = ComparisonCategory::Strong;
}

impl<T: ?Sized> ThreeWayComparableWith<*mut T> for *const T {
    const CATEGORY: ComparisonCategory = ComparisonCategory::Strong;
}

impl<T: ?Sized> ThreeWayComparableWith<*const T> for *mut T {
    const CATEGORY: ComparisonCategory = ComparisonCategory::Strong;
}

impl<T: ThreeWayComparable + ?Sized> ThreeWayComparable for &T {
    const CATEGORY: ComparisonCategory = T::CATEGORY;
}

impl<T: ThreeWayComparable + ?Sized> ThreeWayComparable for &mut T {
    const CATEGORY: ComparisonCategory = T::CATEGORY;
}

impl<T: ThreeWayComparable + ?Sized> ThreeWayComparable for Box<T> {
    const CATEGORY: ComparisonCategory = T::CATEGORY;
}

impl<T: ThreeWayComparable> ThreeWayComparable for Option<T> {
    const CATEGORY: ComparisonCategory = T::CATEGORY;
}

impl<T: ThreeWayComparable> ThreeWayComparable for [T] {
    const CATEGORY: ComparisonCategory = T::CATEGORY;
}

impl<T: ThreeWayComparable, const N: usize> ThreeWayComparable for [T; N] {
    const CATEGORY: ComparisonCategory = T::CATEGORY;
}

impl<T: ThreeWayComparable> ThreeWayComparable for Vec<T> {
    const CATEGORY: ComparisonCategory = T::CATEGORY;
}

impl<T: ThreeWayComparable> ThreeWayComparable for std::cmp::Reverse<T> {
    const CATEGORY: ComparisonCategory = T::CATEGORY;
}

// References compare like their referents, whatever their mutability.
macro_rules! comparable_with_ref {
    ($(($a:ty, $b:ty)),+ $(,)?) => {
        $(
            impl<T, U> ThreeWayComparableWith<$b> for $a
            where
                T: ThreeWayComparableWith<U> + ?Sized,
                U: ?Sized,
            {
                const CATEGORY: ComparisonCategory = <T as ThreeWayComparableWith<U>>::CATEGORY;
            }
        )+
    };
}

comparable_with_ref!((&T, &U), (&T, &mut U), (&mut T, &U), (&mut T, &mut U));

impl<T, U> ThreeWayComparableWith<Box<U>> for Box<T>
where
    T: ThreeWayComparableWith<U> + ?Sized,
    U: ?Sized,
{
    const CATEGORY: ComparisonCategory = <T as ThreeWayComparableWith<U>>::CATEGORY;
}

impl<T: ThreeWayComparableWith<U>, U> ThreeWayComparableWith<Option<U>> for Option<T> {
    const CATEGORY: ComparisonCategory = <T as ThreeWayComparableWith<U>>::CATEGORY;
}

impl<T: ThreeWayComparableWith<U>, U> ThreeWayComparableWith<[U]> for [T] {
    const CATEGORY: ComparisonCategory = <T as ThreeWayComparableWith<U>>::CATEGORY;
}

impl<T: ThreeWayComparableWith<U>, U, const N: usize> ThreeWayComparableWith<[U; N]> for [T; N] {
    const CATEGORY: ComparisonCategory = <T as ThreeWayComparableWith<U>>::CATEGORY;
}

impl<T: ThreeWayComparableWith<U>, U> ThreeWayComparableWith<Vec<U>> for Vec<T> {
    const CATEGORY: ComparisonCategory = <T as ThreeWayComparableWith<U>>::CATEGORY;
}

impl<T: ThreeWayComparableWith<U>, U> ThreeWayComparableWith<std::cmp::Reverse<U>>
    for std::cmp::Reverse<T>
{
    const CATEGORY: ComparisonCategory = <T as ThreeWayComparableWith<U>>::CATEGORY;
}

/// Common comparison category of a tuple of types.
pub trait CommonCategory {
    /// The weakest category among the members; `Strong` for `()`.
    const CATEGORY: ComparisonCategory;
}

macro_rules! common_category_tuple {
    ($($name:ident),*) => {
        impl<$($name: ThreeWayComparable),*> CommonCategory for ($($name,)*) {
            const CATEGORY: ComparisonCategory =
                common_category(&[$(<$name as ThreeWayComparable>::CATEGORY),*]);
        }
    };
}

common_category_tuple!();
common_category_tuple!(A);
common_category_tuple!(A, B);
common_category_tuple!(A, B, C);
common_category_tuple!(A, B, C, D);
common_category_tuple!(A, B, C, D, E);
common_category_tuple!(A, B, C, D, E, F);
