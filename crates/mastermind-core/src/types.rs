//! Types and data structures that describe a game: colors, codes, feedback and the rules

use rand::Rng;
use smallvec::SmallVec;
use std::fmt::Display;

/// Maximum number of colors a [`Palette`] can hold
pub const MAX_COLORS: usize = 32;

/// Maximum length of a [`Code`]
pub const MAX_CODE_LENGTH: usize = 32;

/// One entry of a [`Palette`], identified by its position in the palette
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Color(u8);

impl Color {
    /// Create a color from its palette index
    ///
    /// # Panics
    /// Panics if the index is not below [`MAX_COLORS`]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        assert!(index < MAX_COLORS, "Invalid color, index out of range");
        // bounded by MAX_COLORS
        #[allow(clippy::cast_possible_truncation)]
        Self(index as u8)
    }

    /// The index of this color in its palette
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The ordered set of colors that can be used in a code
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    names: Vec<String>,
}

impl Palette {
    /// The palette used when nothing else is configured
    pub const DEFAULT_COLORS: [&'static str; 6] =
        ["Red", "Blue", "Green", "Yellow", "Orange", "Purple"];

    /// Create a palette from color names
    ///
    /// Names are trimmed and compared case-insensitively for duplicates.
    ///
    /// # Errors
    ///
    /// [`InvalidRules`] if the palette is empty, has duplicates, blank names or more than [`MAX_COLORS`] entries
    pub fn new<I>(names: I) -> Result<Self, InvalidRules>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut result = Vec::<String>::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(InvalidRules::BlankColor);
            }
            if result.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                return Err(InvalidRules::DuplicateColor(name.to_owned()));
            }
            result.push(name.to_owned());
        }

        match result.len() {
            0 => Err(InvalidRules::EmptyPalette),
            n if n > MAX_COLORS => Err(InvalidRules::TooManyColors(n)),
            _ => Ok(Self { names: result }),
        }
    }

    /// Return the number of colors in this palette
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false, a palette cannot be empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Test if the color belongs to this palette
    #[must_use]
    pub fn contains(&self, color: Color) -> bool {
        color.index() < self.names.len()
    }

    /// Iterate over all colors in palette order
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        (0..self.names.len()).map(Color::new)
    }

    /// The display name of a color
    ///
    /// # Panics
    /// Panics if the color is not part of this palette
    #[must_use]
    pub fn name(&self, color: Color) -> &str {
        &self.names[color.index()]
    }

    /// Look up a color by its name, ignoring case
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Color> {
        let name = name.trim();
        self.names
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
            .map(Color::new)
    }

    /// Draw `len` colors independently and uniformly, with replacement
    pub fn random_code<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Code {
        (0..len)
            .map(|_| Color::new(rng.gen_range(0..self.names.len())))
            .collect()
    }

    /// Translate color names into a code
    ///
    /// # Errors
    ///
    /// [`InvalidGuess::UnknownColorName`] for the first name that is not in the palette
    pub fn parse_code<I>(&self, names: I) -> Result<Code, InvalidGuess>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        names
            .into_iter()
            .enumerate()
            .map(|(position, name)| {
                let name = name.as_ref();
                self.find(name).ok_or_else(|| InvalidGuess::UnknownColorName {
                    position,
                    name: name.to_owned(),
                })
            })
            .collect()
    }

    /// Render a code as a comma separated list of color names
    #[must_use]
    pub fn describe(&self, code: &Code) -> String {
        code.iter()
            .map(|&c| self.names.get(c.index()).map_or("?", String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            names: Self::DEFAULT_COLORS.iter().map(|&n| n.to_owned()).collect(),
        }
    }
}

/// An ordered sequence of colors, duplicates are allowed
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Code(SmallVec<[Color; 8]>);

impl Code {
    /// Create an empty code
    #[must_use]
    pub const fn new() -> Self {
        Self(SmallVec::new_const())
    }

    /// Return the number of colors in this code
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true iff the code has no colors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a color
    pub fn push(&mut self, color: Color) {
        self.0.push(color);
    }

    /// Remove all colors
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Create an iterator over all colors in this code
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.0.iter()
    }

    /// Count how often every color appears, indexed by [`Color::index`]
    #[must_use]
    pub(crate) fn color_counts(&self) -> [u8; MAX_COLORS] {
        let mut counts = [0_u8; MAX_COLORS];
        for color in self {
            counts[color.index()] += 1;
        }
        counts
    }
}

impl FromIterator<Color> for Code {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Color; N]> for Code {
    fn from(colors: [Color; N]) -> Self {
        Self(colors.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Code {
    type Item = &'a Color;

    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The result of scoring a guess against the secret
///
/// `exact` counts the positions where both codes agree,
/// `colors` counts the remaining color overlaps in the wrong position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Feedback {
    /// Correct color in the correct position, black pegs
    pub exact: u8,
    /// Correct color in a wrong position, white pegs
    pub colors: u8,
}

impl Feedback {
    /// Create a new feedback
    #[must_use]
    pub const fn new(exact: u8, colors: u8) -> Self {
        Self { exact, colors }
    }

    /// Check if the feedback means that the code was cracked
    #[must_use]
    pub const fn is_solved(self, code_length: usize) -> bool {
        self.exact as usize == code_length
    }
}

/// The validated configuration of a game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    palette: Palette,
    code_length: usize,
    max_attempts: usize,
}

impl Rules {
    /// The code length when nothing else is configured
    pub const DEFAULT_CODE_LENGTH: usize = 4;

    /// The number of attempts when nothing else is configured
    pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

    /// Create a new set of rules
    ///
    /// # Errors
    ///
    /// [`InvalidRules`] if the code length is not in `1..=MAX_CODE_LENGTH` or there are no attempts
    pub fn new(
        palette: Palette,
        code_length: usize,
        max_attempts: usize,
    ) -> Result<Self, InvalidRules> {
        if !(1..=MAX_CODE_LENGTH).contains(&code_length) {
            return Err(InvalidRules::InvalidCodeLength(code_length));
        }
        if max_attempts == 0 {
            return Err(InvalidRules::NoAttempts);
        }
        Ok(Self {
            palette,
            code_length,
            max_attempts,
        })
    }

    /// The colors of the game
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// How many colors make up a code
    #[must_use]
    pub const fn code_length(&self) -> usize {
        self.code_length
    }

    /// How many guesses the player gets
    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Check that a guess can be scored under these rules
    ///
    /// # Errors
    ///
    /// [`InvalidGuess`] if the length is wrong or a color is outside of the palette
    pub fn validate(&self, guess: &Code) -> Result<(), InvalidGuess> {
        if guess.len() != self.code_length {
            return Err(InvalidGuess::WrongLength {
                expected: self.code_length,
                actual: guess.len(),
            });
        }
        match guess.iter().position(|&c| !self.palette.contains(c)) {
            Some(position) => Err(InvalidGuess::UnknownColor { position }),
            None => Ok(()),
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            code_length: Self::DEFAULT_CODE_LENGTH,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A guess was rejected and not scored
pub enum InvalidGuess {
    /// The guess does not have exactly `code_length` colors
    WrongLength {
        /// The configured code length
        expected: usize,
        /// The length of the rejected guess
        actual: usize,
    },
    /// A color is not part of the palette
    UnknownColor {
        /// 0-based position of the offending color
        position: usize,
    },
    /// A color name is not part of the palette
    UnknownColorName {
        /// 0-based position of the offending name
        position: usize,
        /// The name as given
        name: String,
    },
    /// The game is already won or lost
    GameOver,
}

impl Display for InvalidGuess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongLength { expected, actual } => write!(
                f,
                "Please select {expected} colors, the guess has {actual}"
            ),
            Self::UnknownColor { position } => {
                write!(f, "The color on position {} is not available", position + 1)
            }
            Self::UnknownColorName { position, name } => write!(
                f,
                "The color '{name}' on position {} is not available",
                position + 1
            ),
            Self::GameOver => f.pad("The game is over, start a new one"),
        }
    }
}

impl std::error::Error for InvalidGuess {}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The game cannot be configured this way
pub enum InvalidRules {
    /// The palette has no colors
    EmptyPalette,
    /// A color name is empty
    BlankColor,
    /// A color name appears more than once
    DuplicateColor(String),
    /// The palette has more than [`MAX_COLORS`] colors
    TooManyColors(usize),
    /// The code length is not in `1..=MAX_CODE_LENGTH`
    InvalidCodeLength(usize),
    /// There must be at least one attempt
    NoAttempts,
}

impl Display for InvalidRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPalette => f.pad("The palette must have at least one color"),
            Self::BlankColor => f.pad("Color names must not be empty"),
            Self::DuplicateColor(name) => write!(f, "The color '{name}' is listed more than once"),
            Self::TooManyColors(n) => {
                write!(f, "The palette has {n} colors, at most {MAX_COLORS} are allowed")
            }
            Self::InvalidCodeLength(n) => write!(
                f,
                "The code length must be between 1 and {MAX_CODE_LENGTH}, but is {n}"
            ),
            Self::NoAttempts => f.pad("There must be at least one attempt"),
        }
    }
}

impl std::error::Error for InvalidRules {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_color_new() {
        assert_eq!(Color::new(0).index(), 0);
        assert_eq!(Color::new(31).index(), 31);
    }

    #[test]
    #[should_panic(expected = "Invalid color, index out of range")]
    fn test_color_new_invalid() {
        let _ = Color::new(MAX_COLORS);
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 6);
        assert_eq!(palette.name(Color::new(0)), "Red");
        assert_eq!(palette.name(Color::new(5)), "Purple");
        assert_eq!(Palette::new(Palette::DEFAULT_COLORS), Ok(palette));
    }

    #[test]
    fn test_palette_rejects_empty() {
        assert_eq!(
            Palette::new(Vec::<String>::new()),
            Err(InvalidRules::EmptyPalette)
        );
        assert_eq!(Palette::new(["Red", " "]), Err(InvalidRules::BlankColor));
    }

    #[test]
    fn test_palette_rejects_duplicates() {
        assert_eq!(
            Palette::new(["Red", "Blue", "red"]),
            Err(InvalidRules::DuplicateColor(String::from("red")))
        );
    }

    #[test]
    fn test_palette_rejects_too_many() {
        let names = (0..=MAX_COLORS).map(|i| format!("c{i}"));
        assert_eq!(
            Palette::new(names),
            Err(InvalidRules::TooManyColors(MAX_COLORS + 1))
        );
    }

    #[test]
    fn test_palette_find() {
        let palette = Palette::default();
        assert_eq!(palette.find("green"), Some(Color::new(2)));
        assert_eq!(palette.find(" YELLOW "), Some(Color::new(3)));
        assert_eq!(palette.find("Teal"), None);
        assert!(palette.contains(Color::new(5)));
        assert!(!palette.contains(Color::new(6)));
    }

    #[test]
    fn test_parse_code() {
        let palette = Palette::default();
        let code = palette.parse_code(["red", "Red", "purple"]).unwrap();
        assert_eq!(
            code,
            Code::from([Color::new(0), Color::new(0), Color::new(5)])
        );
        assert_eq!(palette.describe(&code), "Red, Red, Purple");

        assert_eq!(
            palette.parse_code(["red", "teal"]),
            Err(InvalidGuess::UnknownColorName {
                position: 1,
                name: String::from("teal")
            })
        );
    }

    #[test]
    fn test_random_code_uses_palette() {
        let palette = Palette::new(["a", "b", "c"]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let code = palette.random_code(5, &mut rng);
            assert_eq!(code.len(), 5);
            assert!(code.iter().all(|&c| palette.contains(c)));
        }
    }

    #[test]
    fn test_color_counts() {
        let code = Code::from([Color::new(1), Color::new(3), Color::new(1)]);
        let counts = code.color_counts();
        assert_eq!(counts[0], 0);
        assert_eq!(counts[1], 2);
        assert_eq!(counts[3], 1);
        assert_eq!(counts.iter().map(|&c| usize::from(c)).sum::<usize>(), 3);
    }

    #[test]
    fn test_rules_validation() {
        assert_eq!(
            Rules::new(Palette::default(), 0, 10),
            Err(InvalidRules::InvalidCodeLength(0))
        );
        assert_eq!(
            Rules::new(Palette::default(), MAX_CODE_LENGTH + 1, 10),
            Err(InvalidRules::InvalidCodeLength(MAX_CODE_LENGTH + 1))
        );
        assert_eq!(
            Rules::new(Palette::default(), 4, 0),
            Err(InvalidRules::NoAttempts)
        );
        assert_eq!(Rules::new(Palette::default(), 4, 10), Ok(Rules::default()));
    }

    #[test]
    fn test_rules_validate_guess() {
        let rules = Rules::default();
        let short = Code::from([Color::new(0); 3]);
        assert_eq!(
            rules.validate(&short),
            Err(InvalidGuess::WrongLength {
                expected: 4,
                actual: 3
            })
        );

        let unknown = Code::from([Color::new(0), Color::new(1), Color::new(6), Color::new(2)]);
        assert_eq!(
            rules.validate(&unknown),
            Err(InvalidGuess::UnknownColor { position: 2 })
        );

        assert_eq!(rules.validate(&Code::from([Color::new(5); 4])), Ok(()));
    }

    #[test]
    fn test_error_messages() {
        let err = InvalidGuess::WrongLength {
            expected: 4,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Please select 4 colors, the guess has 2");
        assert_eq!(
            InvalidRules::DuplicateColor(String::from("Red")).to_string(),
            "The color 'Red' is listed more than once"
        );
    }
}
