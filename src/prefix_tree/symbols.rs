/// A borrowed sequence that can be walked symbol by symbol.
///
/// Implemented for `str`/`String` over `char`, and for slices, arrays and
/// vectors over any `Clone` symbol type.
pub trait Symbols<S> {
    type Iter<'a>: Iterator<Item = S>
    where
        Self: 'a;

    fn symbols(&self) -> Self::Iter<'_>;
}

impl Symbols<char> for str {
    type Iter<'a> = std::str::Chars<'a>;

    fn symbols(&self) -> Self::Iter<'_> {
        self.chars()
    }
}

impl Symbols<char> for String {
    type Iter<'a> = std::str::Chars<'a>;

    fn symbols(&self) -> Self::Iter<'_> {
        self.chars()
    }
}

impl<S: Clone> Symbols<S> for [S] {
    type Iter<'a> = std::iter::Cloned<std::slice::Iter<'a, S>>
    where
        Self: 'a;

    fn symbols(&self) -> Self::Iter<'_> {
        self.iter().cloned()
    }
}

impl<S: Clone, const N: usize> Symbols<S> for [S; N] {
    type Iter<'a> = std::iter::Cloned<std::slice::Iter<'a, S>>
    where
        Self: 'a;

    fn symbols(&self) -> Self::Iter<'_> {
        self.iter().cloned()
    }
}

impl<S: Clone> Symbols<S> for Vec<S> {
    type Iter<'a> = std::iter::Cloned<std::slice::Iter<'a, S>>
    where
        Self: 'a;

    fn symbols(&self) -> Self::Iter<'_> {
        self.iter().cloned()
    }
}
