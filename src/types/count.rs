use std::fmt;

use rand::Rng;

/// An inclusive amount range from one segment of an item count spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountRange {
    pub min: i32,
    pub max: i32,
}

impl CountRange {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn exactly(amount: i32) -> Self {
        Self::new(amount, amount)
    }

    /// Pick an amount. Draws from `rng` only when the range is wider than one value.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// Turns a looting level into an item count.
///
/// Built once from an item count spec such as `"1/2-3/5"`:
/// `/` separates per-looting-level segments, each either `N` or `N-M`.
///
/// ```
/// use droprule::CountResolver;
/// use rand::SeedableRng;
///
/// let count = CountResolver::parse(Some("1/2-3/5"));
/// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
///
/// assert_eq!(count.resolve(0, &mut rng), 1);
/// assert!((2..=3).contains(&count.resolve(1, &mut rng)));
/// assert_eq!(count.resolve(9, &mut rng), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountResolver {
    /// Always the same amount; never draws.
    Constant(i32),
    /// Uniform in `[min, max]` regardless of level.
    Uniform { min: i32, max: i32 },
    /// One range per looting level; out-of-table levels clamp to the ends.
    Stepped(Vec<CountRange>),
}

impl Default for CountResolver {
    fn default() -> Self {
        Self::Constant(1)
    }
}

impl CountResolver {
    /// Build a resolver from an optional spec. `None` always yields 1.
    ///
    /// Malformed segments are logged and count as exactly 1; the remaining
    /// segments are still used.
    #[must_use]
    pub fn parse(spec: Option<&str>) -> Self {
        let Some(spec) = spec else {
            return Self::default();
        };

        let ranges: Vec<CountRange> = spec
            .split('/')
            .filter(|segment| !segment.trim().is_empty())
            .map(|segment| parse_segment(spec, segment))
            .collect();

        match ranges.as_slice() {
            [] => {
                tracing::warn!(spec, "empty item count in loot rule, using 1");
                Self::default()
            }
            [only] if only.min == only.max => Self::Constant(only.min),
            [only] => Self::Uniform {
                min: only.min,
                max: only.max,
            },
            _ => Self::Stepped(ranges),
        }
    }

    /// Resolve a count for the given looting level.
    pub fn resolve<R: Rng + ?Sized>(&self, level: i32, rng: &mut R) -> i32 {
        match self {
            Self::Constant(amount) => *amount,
            Self::Uniform { min, max } => CountRange::new(*min, *max).pick(rng),
            Self::Stepped(ranges) => {
                let index = usize::try_from(level)
                    .unwrap_or(0)
                    .min(ranges.len().saturating_sub(1));
                ranges
                    .get(index)
                    .map_or(1, |range| range.pick(rng))
            }
        }
    }

    /// Whether [`resolve`](Self::resolve) ignores the random source.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }
}

fn parse_segment(spec: &str, segment: &str) -> CountRange {
    match crate::parse::count_range(segment) {
        Ok((min, max)) if min > max => {
            tracing::warn!(spec, segment, "reversed amount range in loot rule, swapping bounds");
            CountRange::new(max, min)
        }
        Ok((min, max)) => CountRange::new(min, max),
        Err(error) => {
            tracing::error!(spec, segment, %error, "bad amount in loot rule, using 1");
            CountRange::exactly(1)
        }
    }
}

impl fmt::Display for CountResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(amount) => write!(f, "{amount}"),
            Self::Uniform { min, max } => write!(f, "{min}-{max}"),
            Self::Stepped(ranges) => {
                for (i, range) in ranges.iter().enumerate() {
                    if i > 0 {
                        f.write_str("/")?;
                    }
                    write!(f, "{range}")?;
                }
                Ok(())
            }
        }
    }
}
