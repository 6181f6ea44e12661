//! Integer geometry in matrix space (x right, y up).

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A cell position or a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0, 0);
    pub const UP: Vec2 = Vec2::new(0, 1);
    pub const DOWN: Vec2 = Vec2::new(0, -1);
    pub const LEFT: Vec2 = Vec2::new(-1, 0);
    pub const RIGHT: Vec2 = Vec2::new(1, 0);

    #[inline(always)]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    #[inline(always)]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    #[inline(always)]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    #[inline(always)]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Vec2 {
    type Output = Vec2;

    #[inline(always)]
    fn mul(self, rhs: i32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Width and height of an area in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RectSize {
    pub width: i32,
    pub height: i32,
}

impl RectSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Inclusive axis-aligned box spanned by `mins` and `maxes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub mins: Vec2,
    pub maxes: Vec2,
}

impl Bounds {
    pub const fn new(mins: Vec2, maxes: Vec2) -> Self {
        Self { mins, maxes }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Bounds::new(first, first);
        for p in points {
            bounds.mins.x = bounds.mins.x.min(p.x);
            bounds.mins.y = bounds.mins.y.min(p.y);
            bounds.maxes.x = bounds.maxes.x.max(p.x);
            bounds.maxes.y = bounds.maxes.y.max(p.y);
        }
        Some(bounds)
    }

    /// Size in cells (inclusive on both ends).
    pub fn size(&self) -> RectSize {
        RectSize::new(
            self.maxes.x - self.mins.x + 1,
            self.maxes.y - self.mins.y + 1,
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.mins.x && p.x <= self.maxes.x && p.y >= self.mins.y && p.y <= self.maxes.y
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Bounds::new(self.mins + offset, self.maxes + offset)
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.mins.x, self.maxes.y)
    }

    pub fn top_right(&self) -> Vec2 {
        self.maxes
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.maxes.x, self.mins.y)
    }

    pub fn bottom_left(&self) -> Vec2 {
        self.mins
    }

    /// Corners clockwise from the top left: TL, TR, BR, BL.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }
}
