//! Tools that we could imagine being in the Rust standard library, but aren't.

use core::fmt;
use core::time::Duration;

use manyfmt::{Fmt, Refmt as _};

// -------------------------------------------------------------------------------------------------

/// Format type for [`manyfmt::Fmt`] which is similar to [`fmt::Debug`], but uses an
/// alternate concise format.
///
/// This format may be on one line despite the pretty-printing option, and may lose
/// precision or Rust syntax in favor of a short at-a-glance representation.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ConciseDebug;

impl<T: Fmt<ConciseDebug>, const N: usize> Fmt<ConciseDebug> for [T; N] {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        fmt.debug_list().entries(self.iter().map(|item| item.refmt(fopt))).finish()
    }
}

impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Point3D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "({:+.3?}, {:+.3?}, {:+.3?})", self.x, self.y, self.z)
    }
}
impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Vector3D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "({:+.3?}, {:+.3?}, {:+.3?})", self.x, self.y, self.z)
    }
}
impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Size3D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(
            fmt,
            "({:+.3?}, {:+.3?}, {:+.3?})",
            self.width, self.height, self.depth
        )
    }
}

impl<T: fmt::Debug, Src, Dst> Fmt<ConciseDebug> for euclid::Rotation3D<T, Src, Dst> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(
            fmt,
            "({:+.3?} + {:+.3?}i + {:+.3?}j + {:+.3?}k)",
            self.r, self.i, self.j, self.k
        )
    }
}

/// Makes the assumption that [`Duration`]s are per-frame timings and hence the
/// interesting precision is in the millisecond-to-microsecond range.
impl Fmt<ConciseDebug> for Duration {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "{:5.2?} ms", (self.as_micros() as f32) / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::default::{Point3D, Vector3D};

    #[test]
    fn concise_point() {
        assert_eq!(
            format!("{}", Point3D::new(1.0, -2.5, 0.0).refmt(&ConciseDebug)),
            "(+1.000, -2.500, +0.000)"
        );
    }

    #[test]
    fn concise_vector_array() {
        assert_eq!(
            format!(
                "{}",
                [Vector3D::new(1.0, 0.0, 0.0), Vector3D::new(0.0, 1.0, 0.0)].refmt(&ConciseDebug)
            ),
            "[(+1.000, +0.000, +0.000), (+0.000, +1.000, +0.000)]"
        );
    }

    #[test]
    fn concise_duration() {
        assert_eq!(
            format!("{}", Duration::from_micros(1250).refmt(&ConciseDebug)),
            " 1.25 ms"
        );
    }
}
