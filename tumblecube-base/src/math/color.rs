//! Color data types. This module is private but reexported by its parent.

use core::fmt;

pub use ordered_float::{FloatIsNan, NotNan};

use crate::notnan;

/// Allows writing a constant [`Rgba`] color value, provided that its components are
/// float literals.
///
/// ```
/// # extern crate tumblecube_base as tumblecube;
/// use tumblecube::math::Rgba;
/// use tumblecube::rgba_const;
///
/// const RED: Rgba = rgba_const!(1.0, 0.0, 0.0, 1.0);
/// assert_eq!(RED, Rgba::new(1.0, 0.0, 0.0, 1.0));
/// ```
#[macro_export]
macro_rules! rgba_const {
    ($r:literal, $g:literal, $b:literal, $a:literal) => {
        $crate::math::Rgba::new_nn(
            $crate::notnan!($r),
            $crate::notnan!($g),
            $crate::notnan!($b),
            $crate::notnan!($a),
        )
    };
}

/// A floating-point RGBA color value, used to tint cube textures.
///
/// * Each color component has a nominal range of 0 to 1, but out-of-range values
///   are preserved rather than clipped.
/// * NaN is banned so that [`Eq`] may be implemented.
/// * The alpha is not premultiplied.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Rgba {
    r: NotNan<f32>,
    g: NotNan<f32>,
    b: NotNan<f32>,
    a: NotNan<f32>,
}

// NotNan::zero() and one() exist, but only via traits, which can't be used in const
const NN0: NotNan<f32> = notnan!(0.0);
const NN1: NotNan<f32> = notnan!(1.0);

impl Rgba {
    /// Transparent black (all components zero); identical to
    /// `Rgba::new(0.0, 0.0, 0.0, 0.0)` except for being a constant.
    pub const TRANSPARENT: Rgba = Rgba::new_nn(NN0, NN0, NN0, NN0);
    /// Black; identical to `Rgba::new(0.0, 0.0, 0.0, 1.0)` except for being a constant.
    pub const BLACK: Rgba = Rgba::new_nn(NN0, NN0, NN0, NN1);
    /// White; identical to `Rgba::new(1.0, 1.0, 1.0, 1.0)` except for being a constant.
    pub const WHITE: Rgba = Rgba::new_nn(NN1, NN1, NN1, NN1);

    /// Constructs a color from components. Panics if any component is NaN.
    /// No other range checks are performed.
    #[inline]
    #[track_caller]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        match Self::try_new(r, g, b, a) {
            Ok(color) => color,
            Err(FloatIsNan) => panic!("color components may not be NaN"),
        }
    }

    /// Constructs a color from components, or returns an error if any is NaN.
    #[inline]
    pub fn try_new(r: f32, g: f32, b: f32, a: f32) -> Result<Self, FloatIsNan> {
        Ok(Self::new_nn(
            NotNan::new(r)?,
            NotNan::new(g)?,
            NotNan::new(b)?,
            NotNan::new(a)?,
        ))
    }

    /// Constructs a color from components that have already been checked for not being
    /// NaN.
    ///
    /// Note: This exists primarily to assist the [`rgba_const!`] macro and may be
    /// renamed or replaced in future versions.
    #[inline]
    pub const fn new_nn(r: NotNan<f32>, g: NotNan<f32>, b: NotNan<f32>, a: NotNan<f32>) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the red color component. Values are linear (gamma = 1).
    #[inline]
    pub const fn red(self) -> NotNan<f32> {
        self.r
    }
    /// Returns the green color component. Values are linear (gamma = 1).
    #[inline]
    pub const fn green(self) -> NotNan<f32> {
        self.g
    }
    /// Returns the blue color component. Values are linear (gamma = 1).
    #[inline]
    pub const fn blue(self) -> NotNan<f32> {
        self.b
    }
    /// Returns the alpha component; not premultiplied.
    #[inline]
    pub const fn alpha(self) -> NotNan<f32> {
        self.a
    }

    /// Returns whether this color has an alpha component of zero or less.
    #[inline]
    pub fn fully_transparent(self) -> bool {
        self.alpha() <= NN0
    }
    /// Returns whether this color has an alpha component of one or greater.
    #[inline]
    pub fn fully_opaque(self) -> bool {
        self.alpha() >= NN1
    }

    /// Clamp each component to lie within the range 0 to 1, inclusive.
    #[inline]
    #[must_use]
    pub fn clamp(self) -> Self {
        Self {
            r: self.r.clamp(NN0, NN1),
            g: self.g.clamp(NN0, NN1),
            b: self.b.clamp(NN0, NN1),
            a: self.a.clamp(NN0, NN1),
        }
    }
}

impl From<Rgba> for [f32; 4] {
    #[inline]
    fn from(value: Rgba) -> Self {
        [
            value.r.into_inner(),
            value.g.into_inner(),
            value.b.into_inner(),
            value.a.into_inner(),
        ]
    }
}
impl From<[NotNan<f32>; 4]> for Rgba {
    #[inline]
    fn from([r, g, b, a]: [NotNan<f32>; 4]) -> Self {
        Self { r, g, b, a }
    }
}
impl TryFrom<[f32; 4]> for Rgba {
    type Error = FloatIsNan;
    #[inline]
    fn try_from([r, g, b, a]: [f32; 4]) -> Result<Self, Self::Error> {
        Self::try_new(r, g, b, a)
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "Rgba({:?}, {:?}, {:?}, {:?})",
            self.red().into_inner(),
            self.green().into_inner(),
            self.blue().into_inner(),
            self.alpha().into_inner()
        )
    }
}
