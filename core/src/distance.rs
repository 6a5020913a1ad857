use std::fmt::Debug;

/// Numeric types usable as edge weights and path distances.
///
/// Supplies the defaults for the configurable zero, infinity and combine.
/// `saturating_combine` treats `INFINITY` as absorbing: combining anything
/// with infinity yields infinity instead of wrapping or overflowing.
pub trait Distance: Copy + PartialOrd + Debug + 'static {
    const ZERO: Self;
    const INFINITY: Self;

    fn saturating_combine(self, rhs: Self) -> Self;
}

macro_rules! int_distance {
    ($($t:ty),*) => {
        $(
            impl Distance for $t {
                const ZERO: Self = 0;
                const INFINITY: Self = <$t>::MAX;

                #[inline]
                fn saturating_combine(self, rhs: Self) -> Self {
                    if self == Self::INFINITY || rhs == Self::INFINITY {
                        Self::INFINITY
                    } else {
                        self.saturating_add(rhs)
                    }
                }
            }
        )*
    };
}

macro_rules! float_distance {
    ($($t:ty),*) => {
        $(
            impl Distance for $t {
                const ZERO: Self = 0.0;
                const INFINITY: Self = <$t>::INFINITY;

                #[inline]
                fn saturating_combine(self, rhs: Self) -> Self {
                    if self == Self::INFINITY || rhs == Self::INFINITY {
                        Self::INFINITY
                    } else {
                        self + rhs
                    }
                }
            }
        )*
    };
}

int_distance!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
float_distance!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_infinity_absorbs() {
        assert_eq!(u32::INFINITY.saturating_combine(5), u32::INFINITY);
        assert_eq!(3u32.saturating_combine(u32::INFINITY), u32::INFINITY);
        // signed: a negative operand must not pull infinity back into range
        assert_eq!(i64::INFINITY.saturating_combine(-1), i64::INFINITY);
    }

    #[test]
    fn test_integer_saturates_near_max() {
        assert_eq!((u32::MAX - 1).saturating_combine(10), u32::MAX);
        assert_eq!(2u8.saturating_combine(3), 5);
    }

    #[test]
    fn test_float_combine() {
        assert_eq!(1.5f64.saturating_combine(2.0), 3.5);
        assert_eq!(f64::INFINITY.saturating_combine(1.0), f64::INFINITY);
        assert_eq!(f32::ZERO, 0.0);
    }
}
