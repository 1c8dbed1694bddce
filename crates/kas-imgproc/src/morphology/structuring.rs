use super::MorphologyError;

/// Offset of a pixel relative to the center of a structuring element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelOffset {
    /// Row delta.
    pub dy: i32,
    /// Column delta.
    pub dx: i32,
}

impl PixelOffset {
    /// Create a new offset.
    pub const fn new(dy: i32, dx: i32) -> Self {
        Self { dy, dx }
    }
}

/// A disk-shaped structuring element with an incremental stamping schedule.
///
/// The offsets of the disk are ordered in rounds: every round takes the offset with the
/// largest remaining column delta from each row of the disk. After `w` rounds the schedule
/// holds exactly the offsets that a pixel `w` columns further left cannot reach, so a
/// scanner that saw a qualifying pixel `w` columns ago only needs to stamp the first
/// [`prefix_counts`](Self::prefix_counts)`[w]` offsets.
///
/// The element is immutable once built and can be shared between threads.
///
/// # Example
///
/// ```rust
/// use kas_imgproc::morphology::{PixelOffset, StructuringElement};
///
/// let element = StructuringElement::new(1, false).unwrap();
/// assert_eq!(element.scan_width(), 3);
/// assert_eq!(element.len(), 5);
/// assert_eq!(element.prefix_counts(), &[0, 3, 4, 5]);
/// assert_eq!(element.offsets_for_gap(1)[1], PixelOffset::new(0, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    radius: i32,
    include_border: bool,
    scan_width: usize,
    schedule: Vec<PixelOffset>,
    prefix_counts: Vec<usize>,
}

impl StructuringElement {
    /// Build the structuring element of a disk.
    ///
    /// # Arguments
    ///
    /// * `radius` - The radius of the disk in pixels. Zero gives a degenerate element that
    ///   cannot be used to dilate.
    /// * `include_border` - Treat every pixel as a unit cell and include the offsets whose
    ///   cell reaches into the disk of radius `radius + 0.5`.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::InvalidArgument`] if `radius` is negative.
    pub fn new(radius: i32, include_border: bool) -> Result<Self, MorphologyError> {
        if radius < 0 {
            return Err(MorphologyError::InvalidArgument(format!(
                "negative dilation radius {radius}"
            )));
        }

        let scan_width = 2 * radius as usize + 1;

        if radius == 0 {
            return Ok(Self {
                radius,
                include_border,
                scan_width,
                schedule: Vec::new(),
                prefix_counts: vec![0],
            });
        }

        // columns of every row in ascending order, rows in ascending dy
        let mut rows = (-radius..=radius)
            .map(|dy| {
                (-radius..=radius)
                    .filter(|&dx| in_disk(radius, include_border, dy, dx))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let mut remaining = rows.iter().map(Vec::len).sum::<usize>();
        let mut schedule = Vec::with_capacity(remaining);
        let mut prefix_counts = Vec::with_capacity(scan_width + 1);
        prefix_counts.push(0);

        while remaining > 0 {
            for (dy, cols) in (-radius..).zip(rows.iter_mut()) {
                if let Some(dx) = cols.pop() {
                    schedule.push(PixelOffset { dy, dx });
                    remaining -= 1;
                }
            }
            prefix_counts.push(schedule.len());
        }

        // the center row spans the full width, so there is one round per column
        debug_assert_eq!(prefix_counts.len(), scan_width + 1);

        log::debug!(
            "structuring element: radius {}, include_border {}, {} offsets",
            radius,
            include_border,
            schedule.len()
        );

        Ok(Self {
            radius,
            include_border,
            scan_width,
            schedule,
            prefix_counts,
        })
    }

    /// The radius of the disk in pixels.
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Whether the offsets touching the disk border are included.
    pub fn include_border(&self) -> bool {
        self.include_border
    }

    /// The width of the bounding box of the disk, `2 * radius + 1`.
    pub fn scan_width(&self) -> usize {
        self.scan_width
    }

    /// Every offset of the disk, in stamping order.
    pub fn schedule(&self) -> &[PixelOffset] {
        &self.schedule
    }

    /// Number of leading schedule entries to stamp for each gap, indexed by gap.
    pub fn prefix_counts(&self) -> &[usize] {
        &self.prefix_counts
    }

    /// Number of offsets in the disk.
    pub fn len(&self) -> usize {
        self.schedule.len()
    }

    /// Whether the disk holds no offsets.
    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    /// Whether the element has zero radius and cannot be used to dilate.
    pub fn is_degenerate(&self) -> bool {
        self.radius == 0
    }

    /// The offsets to stamp when the previous qualifying pixel of the row is `gap` columns
    /// to the left. Gaps larger than the scan width select the whole disk.
    #[inline]
    pub fn offsets_for_gap(&self, gap: usize) -> &[PixelOffset] {
        let gap = gap.min(self.prefix_counts.len() - 1);
        &self.schedule[..self.prefix_counts[gap]]
    }

    /// Check whether an offset lies inside the disk.
    pub fn contains(&self, offset: PixelOffset) -> bool {
        !self.is_degenerate()
            && offset.dy.unsigned_abs() <= self.radius as u32
            && offset.dx.unsigned_abs() <= self.radius as u32
            && in_disk(self.radius, self.include_border, offset.dy, offset.dx)
    }

    /// Rasterize the disk into a `scan_width x scan_width` mask, row-major, with 1 for the
    /// offsets in the disk.
    pub fn mask(&self) -> Vec<u8> {
        let mut data = vec![0u8; self.scan_width * self.scan_width];
        for offset in &self.schedule {
            let row = (offset.dy + self.radius) as usize;
            let col = (offset.dx + self.radius) as usize;
            data[row * self.scan_width + col] = 1;
        }
        data
    }
}

/// Disk membership in exact integer arithmetic.
///
/// With `include_border` each non-zero coordinate is moved half a pixel towards the center
/// and compared against `radius + 0.5`; both sides are scaled by 2 to stay integral.
fn in_disk(radius: i32, include_border: bool, dy: i32, dx: i32) -> bool {
    let (dy, dx, radius) = (dy as i64, dx as i64, radius as i64);
    if include_border {
        let shrink = |v: i64| if v == 0 { 0 } else { 2 * v.abs() - 1 };
        let (sy, sx) = (shrink(dy), shrink(dx));
        sy * sy + sx * sx <= (2 * radius + 1) * (2 * radius + 1)
    } else {
        dy * dy + dx * dx <= radius * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn print_mask(element: &StructuringElement) {
        let w = element.scan_width();
        for row in element.mask().chunks_exact(w) {
            for v in row {
                print!("{} ", v);
            }
            println!();
        }
    }

    #[test]
    fn test_negative_radius() {
        let res = StructuringElement::new(-1, false);
        assert!(matches!(res, Err(MorphologyError::InvalidArgument(_))));
    }

    #[test]
    fn test_zero_radius() -> Result<(), MorphologyError> {
        let element = StructuringElement::new(0, true)?;
        assert!(element.is_degenerate());
        assert!(element.is_empty());
        assert_eq!(element.prefix_counts(), &[0]);
        assert!(element.offsets_for_gap(5).is_empty());
        assert!(!element.contains(PixelOffset::new(0, 0)));
        assert!(element.include_border());
        Ok(())
    }

    #[test]
    fn test_contains_extreme_offsets() -> Result<(), MorphologyError> {
        let element = StructuringElement::new(3, false)?;
        assert!(!element.include_border());
        assert!(!element.contains(PixelOffset::new(i32::MIN, 0)));
        assert!(!element.contains(PixelOffset::new(0, i32::MIN)));
        assert!(!element.contains(PixelOffset::new(i32::MAX, i32::MIN)));
        assert!(element.contains(PixelOffset::new(-3, 0)));
        Ok(())
    }

    #[test]
    fn test_radius_one_schedule() -> Result<(), MorphologyError> {
        let element = StructuringElement::new(1, false)?;
        assert_eq!(
            element.schedule(),
            &[
                PixelOffset::new(-1, 0),
                PixelOffset::new(0, 1),
                PixelOffset::new(1, 0),
                PixelOffset::new(0, 0),
                PixelOffset::new(0, -1),
            ]
        );
        assert_eq!(element.prefix_counts(), &[0, 3, 4, 5]);
        Ok(())
    }

    #[test]
    fn test_radius_one_border_schedule() -> Result<(), MorphologyError> {
        let element = StructuringElement::new(1, true)?;
        assert_eq!(element.len(), 9);
        assert_eq!(element.prefix_counts(), &[0, 3, 6, 9]);
        assert_eq!(
            &element.schedule()[..3],
            &[
                PixelOffset::new(-1, 1),
                PixelOffset::new(0, 1),
                PixelOffset::new(1, 1),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_kernel_sizes() -> Result<(), MorphologyError> {
        let expected = [(1, 5, 9), (2, 13, 25), (3, 29, 45)];
        for (radius, exact, border) in expected {
            assert_eq!(StructuringElement::new(radius, false)?.len(), exact);
            assert_eq!(StructuringElement::new(radius, true)?.len(), border);
        }
        print_mask(&StructuringElement::new(3, true)?);
        Ok(())
    }

    #[test]
    fn test_prefix_counts_shape() -> Result<(), MorphologyError> {
        for radius in 1..=12 {
            for include_border in [false, true] {
                let element = StructuringElement::new(radius, include_border)?;
                let counts = element.prefix_counts();
                assert_eq!(counts.len(), element.scan_width() + 1);
                assert_eq!(counts[0], 0);
                assert_eq!(counts[element.scan_width()], element.len());
                assert!(counts.windows(2).all(|w| w[0] <= w[1]));
            }
        }
        Ok(())
    }

    #[test]
    fn test_border_is_superset() -> Result<(), MorphologyError> {
        for radius in 1..=12 {
            let exact = StructuringElement::new(radius, false)?;
            let border = StructuringElement::new(radius, true)?;
            let border_set: HashSet<_> = border.schedule().iter().copied().collect();
            assert!(exact.schedule().iter().all(|o| border_set.contains(o)));
            assert_eq!(border_set.len(), border.len());
        }
        Ok(())
    }

    #[test]
    fn test_disk_is_symmetric() -> Result<(), MorphologyError> {
        for radius in 1..=8 {
            for include_border in [false, true] {
                let element = StructuringElement::new(radius, include_border)?;
                for o in element.schedule() {
                    assert!(element.contains(PixelOffset::new(-o.dy, o.dx)));
                    assert!(element.contains(PixelOffset::new(o.dy, -o.dx)));
                    assert!(element.contains(PixelOffset::new(o.dx, o.dy)));
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_prefix_is_uncovered_part() -> Result<(), MorphologyError> {
        // offsets skipped at gap w are the ones the pixel w columns to the left already reached
        for radius in 1..=8 {
            for include_border in [false, true] {
                let element = StructuringElement::new(radius, include_border)?;
                for gap in 1..element.scan_width() {
                    let stamped: HashSet<_> = element.offsets_for_gap(gap).iter().collect();
                    for o in element.schedule() {
                        let covered = element.contains(PixelOffset::new(o.dy, o.dx + gap as i32));
                        assert_eq!(stamped.contains(o), !covered, "radius {radius} gap {gap}");
                    }
                }
                assert_eq!(element.offsets_for_gap(element.scan_width() + 4).len(), element.len());
            }
        }
        Ok(())
    }
}
